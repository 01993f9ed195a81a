use crate::common::{Int, UInt};
use std::fmt;

/// A parsed dice specifier: roll `count` dice with `sides` faces each, adding
/// `modifier` to every die.
///
/// A `count` or `sides` of zero means "no roll" and produces a single zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceSpec {
    pub count: UInt,
    pub sides: UInt,
    pub modifier: Int,
}

impl DiceSpec {
    pub const DEFAULT_SIDES: UInt = 6;

    pub const fn new(count: UInt, sides: UInt, modifier: Int) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0 || self.sides == 0
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{}", m),
            m => write!(f, "{}", m),
        }
    }
}

impl std::str::FromStr for DiceSpec {
    type Err = ParseDiceError;

    /// Parses `NdS+M`, `NdS-M`, `NdS` or `Nd`. Sides default to 6 and the
    /// modifier to 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, rest) = s.trim().split_once('d').ok_or(ParseDiceError::NoDelimiter)?;
        if count.is_empty() {
            return Err(ParseDiceError::MissingCount);
        }
        let count = count.parse().map_err(ParseDiceError::InvalidCount)?;

        let (sides, modifier) = match rest.find(|c| c == '+' || c == '-') {
            Some(i) => (&rest[..i], Some((&rest[i..i + 1], &rest[i + 1..]))),
            None => (rest, None),
        };

        let sides = if sides.is_empty() {
            Self::DEFAULT_SIDES
        } else {
            sides.parse().map_err(ParseDiceError::InvalidSides)?
        };

        let modifier = match modifier {
            Some((_, "")) | None => 0,
            Some((_, digits)) if digits.starts_with(['+', '-']) => {
                return Err(ParseDiceError::ExtraSign);
            }
            Some((sign, digits)) => {
                let m: Int = digits.parse().map_err(ParseDiceError::InvalidModifier)?;
                if sign == "-" {
                    -m
                } else {
                    m
                }
            }
        };

        Ok(Self::new(count, sides, modifier))
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("cannot parse string as dice without 'd' delimiter")]
    NoDelimiter,
    #[error("dice specifier is missing the number of dice")]
    MissingCount,
    #[error("invalid number of dice: {0}")]
    InvalidCount(std::num::ParseIntError),
    #[error("invalid number of sides: {0}")]
    InvalidSides(std::num::ParseIntError),
    #[error("invalid modifier: {0}")]
    InvalidModifier(std::num::ParseIntError),
    #[error("dice modifier has more than one sign")]
    ExtraSign,
}
