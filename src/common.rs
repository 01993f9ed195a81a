use crate::error::{Error, Result};
use std::fmt;

pub use vec1::vec1;

pub type Int = i64;
pub type UInt = u32;
pub type Float = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// A numeric value produced by the calculator.
///
/// Arithmetic between two integers stays integral; anything involving a
/// float is carried out in floating point.
#[derive(Debug, Copy, Clone)]
pub enum Number {
    Int(Int),
    Float(Float),
}

impl Number {
    pub const ZERO: Self = Self::Int(0);

    pub fn as_int(self) -> Int {
        match self {
            Self::Int(x) => x,
            Self::Float(x) => x as Int,
        }
    }

    pub fn as_float(self) -> Float {
        match self {
            Self::Int(x) => x as Float,
            Self::Float(x) => x,
        }
    }

    pub fn is_int(self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Floor division for two integers, true division otherwise.
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        match (self, rhs) {
            (_, Self::Int(0)) => Err(Error::ZeroDivision),
            (_, Self::Float(y)) if y == 0.0 => Err(Error::ZeroDivision),
            (Self::Int(x), Self::Int(y)) => {
                let q = x.checked_div(y).ok_or(Error::Overflow)?;
                if x % y != 0 && (x < 0) != (y < 0) {
                    Ok(Self::Int(q - 1))
                } else {
                    Ok(Self::Int(q))
                }
            }
            (x, y) => Ok(Self::Float(x.as_float() / y.as_float())),
        }
    }
}

macro_rules! num_impl_checked_op {
    ($name:ident, $int_op:ident, $op:tt) => {
        impl Number {
            pub fn $name(self, rhs: Self) -> Result<Self> {
                match (self, rhs) {
                    (Self::Int(x), Self::Int(y)) => {
                        x.$int_op(y).map(Self::Int).ok_or(Error::Overflow)
                    }
                    (x, y) => Ok(Self::Float(x.as_float() $op y.as_float())),
                }
            }
        }
    };
}

num_impl_checked_op!(checked_add, checked_add, +);
num_impl_checked_op!(checked_sub, checked_sub, -);
num_impl_checked_op!(checked_mul, checked_mul, *);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x == y,
            (x, y) => x.as_float() == y.as_float(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x.partial_cmp(y),
            (x, y) => x.as_float().partial_cmp(&y.as_float()),
        }
    }
}

impl From<Int> for Number {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<Float> for Number {
    fn from(x: Float) -> Self {
        Self::Float(x)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::Float(x) => fmt::Debug::fmt(x, f),
        }
    }
}

/// The result of a whole calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Number),
    /// An amount tagged with a unit name, from `u(expr, unit)`.
    Quantity { amount: Number, unit: String },
}

impl Value {
    pub fn number(&self) -> Number {
        match self {
            Self::Number(x) => *x,
            Self::Quantity { amount, .. } => *amount,
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Quantity { unit, .. } => Some(unit),
        }
    }
}

impl From<Number> for Value {
    fn from(x: Number) -> Self {
        Self::Number(x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => fmt::Display::fmt(x, f),
            Self::Quantity { amount, unit } => write!(f, "{} {}", amount, unit),
        }
    }
}
