mod error;
mod lexer;
mod parser;

pub use error::{Expected, ParseError, ParseErrorKind};
pub use lexer::TokenKind;

use crate::common::Value;
use crate::env::Globals;
use crate::error::Result;
use crate::roll::RandomSource;

/// Evaluates one line of calculator input.
///
/// `set` statements write into `globals`; every random draw comes from
/// `source`, in the order the terms appear in `input`.
pub fn calculate<S: RandomSource>(
    input: &str,
    globals: &mut Globals,
    source: &mut S,
) -> Result<Value> {
    parser::Parser::new(input, globals, source).parse()
}
