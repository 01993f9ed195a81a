use crate::common::Number;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Format(#[from] crate::dice::ParseDiceError),
    #[error("{0}")]
    Syntax(#[from] crate::parse::ParseError),
    #[error("{0}")]
    Range(String),
    #[error("{0}")]
    Type(String),
    #[error("cannot divide by zero")]
    ZeroDivision,
    #[error("integer overflow")]
    Overflow,
    #[error(
        "roll {roll} found at index {index} of rolls (length {rolls_len}), \
         but there is no corresponding index in results (length {results_len})"
    )]
    Alignment {
        roll: Number,
        index: usize,
        rolls_len: usize,
        results_len: usize,
    },
    #[error("no {what} named {name:?}")]
    Lookup { what: &'static str, name: String },
    #[error("table {table:?} redirected more than {limit} times")]
    TooManyRedirects { table: String, limit: usize },
    #[error("{origin}: {message}")]
    Config { origin: String, message: String },
}

impl Error {
    pub fn range_error(msg: impl ToString) -> Self {
        Self::Range(msg.to_string())
    }

    pub fn type_error(msg: impl ToString) -> Self {
        Self::Type(msg.to_string())
    }

    pub(crate) fn lookup(what: &'static str, name: impl Into<String>) -> Self {
        Self::Lookup {
            what,
            name: name.into(),
        }
    }
}
