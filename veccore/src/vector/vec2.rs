use core::cell::RefCell;
use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

#[allow(unused_imports)]
use num_traits::Float;
#[cfg(test)]
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};

use crate::value::{Accepts, Value, VectorError};
use crate::vector::vec3::Vec3;

const KIND: &str = "Vec2";

/// A 2-component floating-point vector.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds the vector from a radius and an angle.
    pub fn polar(r: f64, theta: f64) -> Self {
        Self {
            x: r * theta.cos(),
            y: r * theta.sin(),
        }
    }

    pub fn sq_mag(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn mag(&self) -> f64 {
        self.sq_mag().sqrt()
    }

    /// Widens to three components with a zero `z`.
    pub fn to_v3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }
}

/// A classified right-hand operand of a binary operator.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Vector(Vec2),
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
        if let Value::Vec2(slot) = value {
            return Ok(Operand::Vector(slot.value()?));
        }
        Err(VectorError::OperandTypeError {
            got: value.kind(),
            accepted: Accepts::NumericOr(KIND),
        })
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f64> for Vec2 {
    type Output = Self;

    fn add(self, rhs: f64) -> Self::Output {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Add<Operand> for Vec2 {
    type Output = Self;

    fn add(self, rhs: Operand) -> Self::Output {
        match rhs {
            Operand::Scalar(scalar) => self + scalar,
            Operand::Vector(vector) => self + vector,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f64> for Vec2 {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self::Output {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Sub<Operand> for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Operand) -> Self::Output {
        match rhs {
            Operand::Scalar(scalar) => self - scalar,
            Operand::Vector(vector) => self - vector,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl AddAssign<f64> for Vec2 {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl SubAssign<f64> for Vec2 {
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2[{}, {}]", self.x, self.y)
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(value: Vec2) -> Self {
        [value.x, value.y]
    }
}

/// Host-owned backing store for one 2-vector object.
///
/// A slot is allocated empty and gains its backing value on the first
/// construction call; reads before that fail instead of defaulting.
#[derive(Debug, Default)]
pub struct Vec2Slot(RefCell<Option<Vec2>>);

impl Vec2Slot {
    /// An allocated slot with no backing value yet.
    pub const fn empty() -> Self {
        Self(RefCell::new(None))
    }

    /// A slot holding the given components.
    pub fn new(x: f64, y: f64) -> Self {
        Self(RefCell::new(Some(Vec2::new(x, y))))
    }

    /// A slot holding a vector built from polar coordinates.
    pub fn polar(r: f64, theta: f64) -> Self {
        Self(RefCell::new(Some(Vec2::polar(r, theta))))
    }

    /// (Re)initializes the backing value from raw components.
    pub fn init(&self, x: f64, y: f64) {
        self.0.replace(Some(Vec2::new(x, y)));
    }

    /// (Re)initializes the backing value from polar coordinates.
    pub fn init_polar(&self, r: f64, theta: f64) {
        self.0.replace(Some(Vec2::polar(r, theta)));
    }

    /// Copies another vector's value into this slot.
    ///
    /// Copying a slot into itself is a no-op. Otherwise the source must
    /// be another 2-vector and must already be initialized.
    pub fn init_copy(&self, source: &Value<'_>) -> Result<(), VectorError> {
        if let Value::Vec2(slot) = source {
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
    pub fn value(&self) -> Result<Vec2, VectorError> {
        (*self.0.borrow()).ok_or(VectorError::UninitializedOperand { kind: KIND })
    }

    pub fn x(&self) -> Result<f64, VectorError> {
        Ok(self.value()?.x)
    }

    pub fn y(&self) -> Result<f64, VectorError> {
        Ok(self.value()?.y)
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

    /// Componentwise or broadcast addition, producing a new value.
    pub fn add(&self, operand: &Value<'_>) -> Result<Vec2, VectorError> {
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
    pub fn sub(&self, operand: &Value<'_>) -> Result<Vec2, VectorError> {
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
    pub fn mul(&self, operand: &Value<'_>) -> Result<Vec2, VectorError> {
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
    pub fn div(&self, operand: &Value<'_>) -> Result<Vec2, VectorError> {
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
    pub fn to_v2(&self) -> &Self {
        self
    }

    /// Widening conversion to a new 3-vector value.
    pub fn to_v3(&self) -> Result<Vec3, VectorError> {
        Ok(self.value()?.to_v3())
    }
}

impl From<Vec2> for Vec2Slot {
    fn from(value: Vec2) -> Self {
        Self(RefCell::new(Some(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::{FRAC_PI_2, PI};
    use proptest::prelude::*;

    use crate::vector::vec3::Vec3Slot;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_new_stores_components() {
        let test_cases = [(0.0, 0.0), (1.5, -2.5), (-3.0, 4.0)];
        for (x, y) in test_cases {
            let v = Vec2::new(x, y);
            assert_eq!(v.x, x);
            assert_eq!(v.y, y);
        }
    }

    #[test]
    fn test_default_is_origin() {
        assert_eq!(Vec2::default(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_polar() {
        let test_cases = [
            (0.0, 0.0, 0.0, 0.0),
            (1.0, 0.0, 1.0, 0.0),
            (2.0, FRAC_PI_2, 0.0, 2.0),
            (1.5, PI, -1.5, 0.0),
            (-1.0, 0.0, -1.0, 0.0),
        ];
        for (r, theta, x, y) in test_cases {
            let v = Vec2::polar(r, theta);
            assert_relative_eq!(v.x, x, epsilon = EPSILON);
            assert_relative_eq!(v.y, y, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_magnitudes() {
        assert_eq!(Vec2::new(3.0, 4.0).sq_mag(), 25.0);
        assert_eq!(Vec2::new(3.0, 4.0).mag(), 5.0);
        assert_eq!(Vec2::new(0.0, 0.0).mag(), 0.0);
        assert_relative_eq!(Vec2::new(-1.0, 1.0).mag(), 2.0f64.sqrt());
    }

    #[test]
    fn test_operator_aliases() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a + 2.0, Vec2::new(3.0, 4.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(a - 1.0, Vec2::new(0.0, 1.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(a / 2.0, Vec2::new(0.5, 1.0));
    }

    #[test]
    fn test_assign_operator_aliases() {
        let mut v = Vec2::new(1.0, 2.0);
        v += Vec2::new(1.0, 1.0);
        assert_eq!(v, Vec2::new(2.0, 3.0));
        v += 1.0;
        assert_eq!(v, Vec2::new(3.0, 4.0));
        v -= Vec2::new(1.0, 1.0);
        assert_eq!(v, Vec2::new(2.0, 3.0));
        v -= 1.0;
        assert_eq!(v, Vec2::new(1.0, 2.0));
        v *= 2.0;
        assert_eq!(v, Vec2::new(2.0, 4.0));
        v /= 4.0;
        assert_eq!(v, Vec2::new(0.5, 1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Vec2::new(1.0, 2.0)), "Vec2[1, 2]");
        assert_eq!(format!("{}", Vec2::new(-0.5, 2.25)), "Vec2[-0.5, 2.25]");
    }

    #[test]
    fn test_array_conversions() {
        assert_eq!(Vec2::from([1.0, 2.0]), Vec2::new(1.0, 2.0));
        assert_eq!(<[f64; 2]>::from(Vec2::new(1.0, 2.0)), [1.0, 2.0]);
    }

    #[test]
    fn test_widening_sets_zero_z() {
        assert_eq!(Vec2::new(1.0, 2.0).to_v3(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_serde_round_trip() {
        let v = Vec2::new(1.0, 2.0);
        let serialized = serde_json::to_string(&v).unwrap();
        assert_eq!(serialized, r#"{"x":1.0,"y":2.0}"#);
        assert_eq!(serde_json::from_str::<Vec2>(&serialized).unwrap(), v);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Operand::classify(&Value::Int(2)), Ok(Operand::Scalar(2.0)));
        assert_eq!(
            Operand::classify(&Value::Float(0.5)),
            Ok(Operand::Scalar(0.5))
        );
        let slot = Vec2Slot::new(1.0, 2.0);
        assert_eq!(
            Operand::classify(&Value::Vec2(&slot)),
            Ok(Operand::Vector(Vec2::new(1.0, 2.0)))
        );
        let empty = Vec2Slot::empty();
        assert_eq!(
            Operand::classify(&Value::Vec2(&empty)),
            Err(VectorError::UninitializedOperand { kind: "Vec2" })
        );
        let v3 = Vec3Slot::new(1.0, 2.0, 3.0);
        let test_cases = [
            (Value::Nil, "Nil"),
            (Value::Bool(false), "Bool"),
            (Value::Str("a"), "Str"),
            (Value::Vec3(&v3), "Vec3"),
        ];
        for (value, got) in test_cases {
            assert_eq!(
                Operand::classify(&value),
                Err(VectorError::OperandTypeError {
                    got,
                    accepted: Accepts::NumericOr("Vec2"),
                })
            );
        }
    }

    #[test]
    fn test_empty_slot_rejects_reads() {
        let slot = Vec2Slot::empty();
        let err = VectorError::UninitializedOperand { kind: "Vec2" };
        assert_eq!(slot.value(), Err(err));
        assert_eq!(slot.x(), Err(err));
        assert_eq!(slot.y(), Err(err));
        assert_eq!(slot.set_x(1.0), Err(err));
        assert_eq!(slot.set_y(1.0), Err(err));
        assert_eq!(slot.sq_mag(), Err(err));
        assert_eq!(slot.mag(), Err(err));
        assert_eq!(slot.to_v3(), Err(err));
        assert_eq!(slot.add(&Value::Int(1)), Err(err));
    }

    #[test]
    fn test_init_makes_slot_readable() {
        let slot = Vec2Slot::empty();
        slot.init(1.0, 2.0);
        assert_eq!(slot.value(), Ok(Vec2::new(1.0, 2.0)));
        slot.init(3.0, 4.0);
        assert_eq!(slot.value(), Ok(Vec2::new(3.0, 4.0)));
        slot.init_polar(2.0, 0.0);
        assert_eq!(slot.value(), Ok(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_accessors() {
        let slot = Vec2Slot::new(1.0, 2.0);
        assert_eq!(slot.x(), Ok(1.0));
        assert_eq!(slot.y(), Ok(2.0));
        assert_eq!(slot.set_x(5.0), Ok(5.0));
        assert_eq!(slot.set_y(-1.0), Ok(-1.0));
        assert_eq!(slot.value(), Ok(Vec2::new(5.0, -1.0)));
    }

    #[test]
    fn test_add() {
        let a = Vec2Slot::new(1.0, 2.0);
        let b = Vec2Slot::new(0.5, -1.0);
        assert_eq!(a.add(&Value::Int(2)), Ok(Vec2::new(3.0, 4.0)));
        assert_eq!(a.add(&Value::Float(0.5)), Ok(Vec2::new(1.5, 2.5)));
        assert_eq!(a.add(&Value::Vec2(&b)), Ok(Vec2::new(1.5, 1.0)));
        // the receiver is never mutated by the copying variant
        assert_eq!(a.value(), Ok(Vec2::new(1.0, 2.0)));
        assert_eq!(
            a.add(&Value::Str("a")),
            Err(VectorError::OperandTypeError {
                got: "Str",
                accepted: Accepts::NumericOr("Vec2"),
            })
        );
        let empty = Vec2Slot::empty();
        assert_eq!(
            a.add(&Value::Vec2(&empty)),
            Err(VectorError::UninitializedOperand { kind: "Vec2" })
        );
    }

    #[test]
    fn test_sub_is_left_to_right() {
        let a = Vec2Slot::new(1.0, 2.0);
        let b = Vec2Slot::new(0.5, -1.0);
        assert_eq!(a.sub(&Value::Vec2(&b)), Ok(Vec2::new(0.5, 3.0)));
        assert_eq!(b.sub(&Value::Vec2(&a)), Ok(Vec2::new(-0.5, -3.0)));
        assert_eq!(a.sub(&Value::Int(1)), Ok(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_mul_div_accept_scalars_only() {
        let a = Vec2Slot::new(1.0, 2.0);
        let b = Vec2Slot::new(2.0, 2.0);
        assert_eq!(a.mul(&Value::Int(2)), Ok(Vec2::new(2.0, 4.0)));
        assert_eq!(a.div(&Value::Float(2.0)), Ok(Vec2::new(0.5, 1.0)));
        let err = VectorError::OperandTypeError {
            got: "Vec2",
            accepted: Accepts::Numeric,
        };
        assert_eq!(a.mul(&Value::Vec2(&b)), Err(err));
        assert_eq!(a.div(&Value::Vec2(&b)), Err(err));
        assert_eq!(
            a.mul(&Value::Bool(true)),
            Err(VectorError::OperandTypeError {
                got: "Bool",
                accepted: Accepts::Numeric,
            })
        );
    }

    #[test]
    fn test_div_by_zero_follows_float_semantics() {
        let slot = Vec2Slot::new(1.0, 0.0);
        let divided = slot.div(&Value::Int(0)).unwrap();
        assert!(divided.x.is_infinite());
        assert!(divided.y.is_nan());
        let negative = Vec2Slot::new(-1.0, 2.0).div(&Value::Float(0.0)).unwrap();
        assert_eq!(negative.x, f64::NEG_INFINITY);
        assert_eq!(negative.y, f64::INFINITY);
    }

    #[test]
    fn test_bang_ops_mutate_and_return_receiver() {
        let slot = Vec2Slot::new(1.0, 2.0);
        let returned = slot.add_assign(&Value::Int(1)).unwrap();
        assert!(core::ptr::eq(returned, &slot));
        assert_eq!(slot.value(), Ok(Vec2::new(2.0, 3.0)));
        // bang calls chain on the receiver identity
        slot.mul_assign(&Value::Float(2.0))
            .unwrap()
            .sub_assign(&Value::Int(1))
            .unwrap()
            .div_assign(&Value::Float(0.5))
            .unwrap();
        assert_eq!(slot.value(), Ok(Vec2::new(6.0, 10.0)));
    }

    #[test]
    fn test_failed_bang_leaves_receiver_untouched() {
        let slot = Vec2Slot::new(1.0, 2.0);
        let other = Vec2Slot::new(1.0, 1.0);
        assert!(slot.add_assign(&Value::Str("a")).is_err());
        assert!(slot.mul_assign(&Value::Vec2(&other)).is_err());
        assert!(slot.div_assign(&Value::Nil).is_err());
        assert_eq!(slot.value(), Ok(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_bang_with_aliased_operand() {
        let slot = Vec2Slot::new(1.0, 2.0);
        slot.add_assign(&Value::Vec2(&slot)).unwrap();
        assert_eq!(slot.value(), Ok(Vec2::new(2.0, 4.0)));
        slot.sub_assign(&Value::Vec2(&slot)).unwrap();
        assert_eq!(slot.value(), Ok(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_init_copy() {
        let dst = Vec2Slot::empty();
        let src = Vec2Slot::new(1.0, 2.0);
        assert_eq!(dst.init_copy(&Value::Vec2(&src)), Ok(()));
        assert_eq!(dst.value(), Ok(Vec2::new(1.0, 2.0)));
        // overwrites an already initialized destination
        let other = Vec2Slot::new(-1.0, -2.0);
        assert_eq!(dst.init_copy(&Value::Vec2(&other)), Ok(()));
        assert_eq!(dst.value(), Ok(Vec2::new(-1.0, -2.0)));
    }

    #[test]
    fn test_self_copy_is_noop() {
        let slot = Vec2Slot::new(1.0, 2.0);
        assert_eq!(slot.init_copy(&Value::Vec2(&slot)), Ok(()));
        assert_eq!(slot.value(), Ok(Vec2::new(1.0, 2.0)));
        // even an empty slot may be copied into itself
        let empty = Vec2Slot::empty();
        assert_eq!(empty.init_copy(&Value::Vec2(&empty)), Ok(()));
        assert!(empty.value().is_err());
    }

    #[test]
    fn test_init_copy_rejects_bad_sources() {
        let dst = Vec2Slot::new(1.0, 2.0);
        let empty = Vec2Slot::empty();
        assert_eq!(
            dst.init_copy(&Value::Vec2(&empty)),
            Err(VectorError::UninitializedOperand { kind: "Vec2" })
        );
        let v3 = Vec3Slot::new(1.0, 2.0, 3.0);
        assert_eq!(
            dst.init_copy(&Value::Vec3(&v3)),
            Err(VectorError::TypeMismatch {
                expected: "Vec2",
                got: "Vec3",
            })
        );
        assert_eq!(
            dst.init_copy(&Value::Int(1)),
            Err(VectorError::TypeMismatch {
                expected: "Vec2",
                got: "Int",
            })
        );
        // failed copies leave the destination as it was
        assert_eq!(dst.value(), Ok(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_conversions_on_slots() {
        let slot = Vec2Slot::new(1.0, 2.0);
        assert!(core::ptr::eq(slot.to_v2(), &slot));
        assert_eq!(slot.to_v3(), Ok(Vec3::new(1.0, 2.0, 0.0)));
        let from_value = Vec2Slot::from(Vec2::new(3.0, 4.0));
        assert_eq!(from_value.value(), Ok(Vec2::new(3.0, 4.0)));
    }

    proptest! {
        #[test]
        fn test_polar_magnitude(r in -1e3f64..1e3, theta in -10.0f64..10.0) {
            let v = Vec2::polar(r, theta);
            assert_relative_eq!(v.sq_mag(), r * r, epsilon = EPSILON);
        }

        #[test]
        fn test_add_sub_round_trip(
            x in -1e6f64..1e6,
            y in -1e6f64..1e6,
            operand: Operand,
        ) {
            prop_assume!(match operand {
                Operand::Scalar(scalar) => scalar.is_finite() && scalar.abs() < 1e6,
                Operand::Vector(vector) => {
                    vector.x.is_finite()
                        && vector.y.is_finite()
                        && vector.x.abs() < 1e6
                        && vector.y.abs() < 1e6
                }
            });
            let original = Vec2::new(x, y);
            let round_tripped = (original + operand) - operand;
            assert_relative_eq!(round_tripped.x, original.x, epsilon = EPSILON);
            assert_relative_eq!(round_tripped.y, original.y, epsilon = EPSILON);
        }

        #[test]
        fn test_numbers_always_classify_as_scalars(int: i64, float in -1e9f64..1e9) {
            assert_eq!(
                Operand::classify(&Value::Int(int)),
                Ok(Operand::Scalar(int as f64))
            );
            assert_eq!(
                Operand::classify(&Value::Float(float)),
                Ok(Operand::Scalar(float))
            );
        }

        #[test]
        fn test_bang_matches_copying_variant(
            x in -1e3f64..1e3,
            y in -1e3f64..1e3,
            scalar in -1e3f64..1e3,
        ) {
            let slot = Vec2Slot::new(x, y);
            let expected = slot.add(&Value::Float(scalar)).unwrap();
            slot.add_assign(&Value::Float(scalar)).unwrap();
            assert_eq!(slot.value().unwrap(), expected);
        }
    }
}
