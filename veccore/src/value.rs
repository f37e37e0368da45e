use core::fmt;

use num_traits::ToPrimitive;

use crate::vector::{vec2::Vec2Slot, vec3::Vec3Slot};

/// A dynamically typed argument marshaled by the host dispatcher.
///
/// Vector arguments are passed as references to the host-owned slots so
/// that an uninitialized operand stays observable as such.
#[derive(Clone, Copy, Debug)]
pub enum Value<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    Vec2(&'a Vec2Slot),
    Vec3(&'a Vec3Slot),
}

impl<'a> Value<'a> {
    /// Host-facing name of the value's concrete kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "Str",
            Value::Vec2(_) => "Vec2",
            Value::Vec3(_) => "Vec3",
        }
    }

    /// Widens the value to `f64` if it is a generic number.
    ///
    /// This is the scalar test of operand resolution. `Bool` is not a
    /// number and does not widen.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Int(value) => value.to_f64(),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Widens to `f64` or fails with the scalar-only accepted set.
    pub fn expect_scalar(&self) -> Result<f64, VectorError> {
        self.as_scalar().ok_or(VectorError::OperandTypeError {
            got: self.kind(),
            accepted: Accepts::Numeric,
        })
    }
}

/// Errors surfaced by vector operations.
///
/// Every error returns synchronously to the caller of the failing
/// operation; a failed in-place operator leaves its receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    /// A read from a slot whose backing value is not initialized yet.
    UninitializedOperand { kind: &'static str },
    /// A copy source of a different concrete kind than the destination.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// A binary-operator operand outside the operator's accepted kinds.
    OperandTypeError {
        got: &'static str,
        accepted: Accepts,
    },
}

/// Operand kinds admitted by a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepts {
    /// Scalar-only operators (`mul`, `div`).
    Numeric,
    /// Scalar-or-vector operators (`add`, `sub`); holds the vector kind.
    NumericOr(&'static str),
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::UninitializedOperand { kind } => {
                write!(f, "uninitialized `{}`", kind)
            }
            VectorError::TypeMismatch { expected, got } => {
                write!(f, "wrong argument class `{}`, expected `{}`", got, expected)
            }
            VectorError::OperandTypeError { got, accepted } => match accepted {
                Accepts::Numeric => write!(f, "`{}` is not a `Numeric`", got),
                Accepts::NumericOr(vector) => {
                    write!(f, "`{}` is neither a `Numeric` nor a `{}`", got, vector)
                }
            },
        }
    }
}
