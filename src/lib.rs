//! Dice notation, a small calculator language with random terms, and
//! random tables that roll through it.
//!
//! ```
//! use dicecalc::{Calculator, Number};
//!
//! let mut calc = Calculator::seeded(7);
//! calc.calculate("set gold 10").unwrap();
//! assert_eq!(calc.number("let x = 2 in gold + x * 3").unwrap(), Number::Int(16));
//! ```

pub mod calculator;
pub mod common;
pub mod dice;
pub mod env;
pub mod error;
pub mod parse;
pub mod roll;
pub mod table;

pub use calculator::{Calculator, DiceExpr};
pub use common::{Number, Value};
pub use dice::{DiceSpec, ParseDiceError};
pub use env::Globals;
pub use error::{Error, Result};
pub use parse::calculate;
pub use roll::{DefaultSource, DiceKind, RandomSource, RollDice};
pub use table::{Outcome, Resolved, Resolver, RollKey, Table, TableRegistry};
