use core::cell::RefCell;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

#[allow(unused_imports)]
use num_traits::Float;
#[cfg(test)]
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};

use crate::value::{Accepts, Value, VectorError};
use crate::vector::vec2::Vec2;

const KIND: &str = "Vec3";

/// A 3-component floating-point vector.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds the vector from spherical coordinates.
    ///
    /// `phi` is the inclination from the z axis, `theta` the azimuth in
    /// the x-y plane.
    pub fn polar(rho: f64, phi: f64, theta: f64) -> Self {
        Self {
            x: rho * phi.sin() * theta.cos(),
            y: rho * phi.sin() * theta.sin(),
            z: rho * phi.cos(),
        }
    }

    pub fn sq_mag(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn mag(&self) -> f64 {
        self.sq_mag().sqrt()
    }

    /// Narrows to two components, dropping `z`.
    pub fn to_v2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A classified right-hand operand of a binary operator.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Vector(Vec3),
}

impl Operand {
    /// Classifies a host value, testing the scalar case first.
    ///
    /// The order is observable: a numeric value must never reach the
    /// vector case, and a vector must never pass the scalar test.
    pub fn classify(value: &Value<'_>) -> Result<Self, VectorError> {
        if let Some(scalar) = value.as_scalar() {
            return Ok(Operand::Scalar(scalar));
        }
        if let Value::Vec3(slot) = value {
            return Ok(Operand::Vector(slot.value()?));
        }
        Err(VectorError::OperandTypeError {
            got: value.kind(),
            accepted: Accepts::NumericOr(KIND),
        })
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<f64> for Vec3 {
    type Output = Self;

    fn add(self, rhs: f64) -> Self::Output {
        Self::new(self.x + rhs, self.y + rhs, self.z + rhs)
    }
}

impl Add<Operand> for Vec3 {
    type Output = Self;

    fn add(self, rhs: Operand) -> Self::Output {
        match rhs {
            Operand::Scalar(scalar) => self + scalar,
            Operand::Vector(vector) => self + vector,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<f64> for Vec3 {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self::Output {
        Self::new(self.x - rhs, self.y - rhs, self.z - rhs)
    }
}

impl Sub<Operand> for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Operand) -> Self::Output {
        match rhs {
            Operand::Scalar(scalar) => self - scalar,
            Operand::Vector(vector) => self - vector,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl AddAssign<f64> for Vec3 {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl SubAssign<f64> for Vec3 {
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(value: Vec3) -> Self {
        [value.x, value.y, value.z]
    }
}

/// Host-owned backing store for one 3-vector object.
///
/// A slot is allocated empty and gains its backing value on the first
/// construction call; reads before that fail instead of defaulting.
#[derive(Debug, Default)]
pub struct Vec3Slot(RefCell<Option<Vec3>>);

impl Vec3Slot {
    /// An allocated slot with no backing value yet.
    pub const fn empty() -> Self {
        Self(RefCell::new(None))
    }

    /// A slot holding the given components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(RefCell::new(Some(Vec3::new(x, y, z))))
    }

    /// A slot holding a vector built from spherical coordinates.
    pub fn polar(rho: f64, phi: f64, theta: f64) -> Self {
        Self(RefCell::new(Some(Vec3::polar(rho, phi, theta))))
    }

    /// (Re)initializes the backing value from raw components.
    pub fn init(&self, x: f64, y: f64, z: f64) {
        self.0.replace(Some(Vec3::new(x, y, z)));
    }

    /// (Re)initializes the backing value from spherical coordinates.
    pub fn init_polar(&self, rho: f64, phi: f64, theta: f64) {
        self.0.replace(Some(Vec3::polar(rho, phi, theta)));
    }

    /// Copies another vector's value into this slot.
    ///
    /// Copying a slot into itself is a no-op. Otherwise the source must
    /// be another 3-vector and must already be initialized.
    pub fn init_copy(&self, source: &Value<'_>) -> Result<(), VectorError> {
        if let Value::Vec3(slot) = source {
            if core::ptr::eq(self, *slot) {
                return Ok(());
            }
            let value = slot.value()?;
            self.0.replace(Some(value));
            return Ok(());
        }
        Err(VectorError::TypeMismatch {
            expected: KIND,
            got: source.kind(),
        })
    }

    /// Reads the backing value.
    pub fn value(&self) -> Result<Vec3, VectorError> {
        (*self.0.borrow()).ok_or(VectorError::UninitializedOperand { kind: KIND })
    }

    pub fn x(&self) -> Result<f64, VectorError> {
        Ok(self.value()?.x)
    }

    pub fn y(&self) -> Result<f64, VectorError> {
        Ok(self.value()?.y)
    }

    pub fn z(&self) -> Result<f64, VectorError> {
        Ok(self.value()?.z)
    }

    /// Stores a new x component, returning the stored value.
    pub fn set_x(&self, x: f64) -> Result<f64, VectorError> {
        let mut value = self.value()?;
        value.x = x;
        self.0.replace(Some(value));
        Ok(x)
    }

    /// Stores a new y component, returning the stored value.
    pub fn set_y(&self, y: f64) -> Result<f64, VectorError> {
        let mut value = self.value()?;
        value.y = y;
        self.0.replace(Some(value));
        Ok(y)
    }

    /// Stores a new z component, returning the stored value.
    pub fn set_z(&self, z: f64) -> Result<f64, VectorError> {
        let mut value = self.value()?;
        value.z = z;
        self.0.replace(Some(value));
        Ok(z)
    }

    /// Componentwise or broadcast addition, producing a new value.
    pub fn add(&self, operand: &Value<'_>) -> Result<Vec3, VectorError> {
        Ok(self.value()? + Operand::classify(operand)?)
    }

    /// In-place addition, returning the receiver itself.
    pub fn add_assign(&self, operand: &Value<'_>) -> Result<&Self, VectorError> {
        let next = self.add(operand)?;
        self.0.replace(Some(next));
        Ok(self)
    }

    /// Componentwise or broadcast subtraction, producing a new value.
    ///
    /// The receiver is the left operand.
    pub fn sub(&self, operand: &Value<'_>) -> Result<Vec3, VectorError> {
        Ok(self.value()? - Operand::classify(operand)?)
    }

    /// In-place subtraction, returning the receiver itself.
    pub fn sub_assign(&self, operand: &Value<'_>) -> Result<&Self, VectorError> {
        let next = self.sub(operand)?;
        self.0.replace(Some(next));
        Ok(self)
    }

    /// Scales by a scalar operand, producing a new value.
    ///
    /// Vector operands are rejected; there is no vector-by-vector
    /// multiplication.
    pub fn mul(&self, operand: &Value<'_>) -> Result<Vec3, VectorError> {
        Ok(self.value()? * operand.expect_scalar()?)
    }

    /// In-place scaling, returning the receiver itself.
    pub fn mul_assign(&self, operand: &Value<'_>) -> Result<&Self, VectorError> {
        let next = self.mul(operand)?;
        self.0.replace(Some(next));
        Ok(self)
    }

    /// Divides by a scalar operand, producing a new value.
    ///
    /// A zero divisor follows float semantics and is not trapped.
    pub fn div(&self, operand: &Value<'_>) -> Result<Vec3, VectorError> {
        Ok(self.value()? / operand.expect_scalar()?)
    }

    /// In-place division, returning the receiver itself.
    pub fn div_assign(&self, operand: &Value<'_>) -> Result<&Self, VectorError> {
        let next = self.div(operand)?;
        self.0.replace(Some(next));
        Ok(self)
    }

    pub fn sq_mag(&self) -> Result<f64, VectorError> {
        Ok(self.value()?.sq_mag())
    }

    pub fn mag(&self) -> Result<f64, VectorError> {
        Ok(self.value()?.mag())
    }

    /// Identity conversion: the receiver itself, unchanged.
    pub fn to_v3(&self) -> &Self {
        self
    }

    /// Narrowing conversion to a new 2-vector value, dropping `z`.
    pub fn to_v2(&self) -> Result<Vec2, VectorError> {
        Ok(self.value()?.to_v2())
    }
}

impl From<Vec3> for Vec3Slot {
    fn from(value: Vec3) -> Self {
        Self(RefCell::new(Some(value)))
    }
}
