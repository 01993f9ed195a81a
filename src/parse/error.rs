use super::lexer::TokenKind;
use std::fmt;
use std::ops::Range;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("syntax error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<Expected>,
    },
    UnexpectedString {
        expected: Vec<Expected>,
    },
    MissingSeparator,
    DetachedSign,
    InvalidLiteral,
}

/// Something the parser would have accepted at the point of failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Expected {
    Token(TokenKind),
    End,
}

impl From<TokenKind> for Expected {
    fn from(kind: TokenKind) -> Self {
        Self::Token(kind)
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(kind) => fmt::Display::fmt(kind, f),
            Self::End => f.write_str("end of input"),
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                match found {
                    Some(kind) => write!(f, "unexpected token: found {}, expected ", kind)?,
                    None => write!(f, "unexpected end of input, expected ")?,
                }
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::MissingSeparator => write!(f, "range bounds must be separated by a space"),
            Self::DetachedSign => write!(f, "a minus sign must be attached to its number"),
            Self::InvalidLiteral => write!(f, "number literal out of range"),
        }
    }
}

fn fmt_expected(expected: &[Expected], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        Ok(())
    } else if len == 1 {
        write!(f, "{}", expected[0])
    } else if len == 2 {
        write!(f, "{} or {}", expected[0], expected[1])
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp)?;
        }
        write!(f, "or {}", expected[len - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let err = ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                found: Some(TokenKind::Comma),
                expected: vec![TokenKind::Plus.into(), TokenKind::Minus.into(), Expected::End],
            },
            span: 3..4,
            slice: ",".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "syntax error at position 3 (\",\"): unexpected token: found ',', expected '+', '-', or end of input"
        );
    }
}
