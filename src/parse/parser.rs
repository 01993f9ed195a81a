use super::error::{Expected, ParseError, ParseErrorKind};
use super::lexer::{lexer, Lexer, TokenKind};
use crate::common::*;
use crate::dice::DiceSpec;
use crate::env::{Globals, Scope};
use crate::error::Result;
use crate::roll::{RandomSource, RollDice, UniformDice};
use logos_iter::LogosIter;
use std::ops::Range;

type PResult<T = Number> = Result<T>;

/// Parses a calculator expression and evaluates it in the same pass.
///
/// Every production returns its value as soon as it has been read, so
/// random draws happen in source order and nothing but the current scope
/// chain is kept around.
pub(crate) struct Parser<'a, 'e, S> {
    source: &'a str,
    lexer: Lexer<'a>,
    globals: &'e mut Globals,
    rng: &'e mut S,
}

impl<'a, 'e, S: RandomSource> Parser<'a, 'e, S> {
    const EXPR_FOLLOW: &'static [TokenKind] = &[
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
    ];

    const TERM_START: &'static [TokenKind] = &[
        TokenKind::Dice,
        TokenKind::LeftBracket,
        TokenKind::LeftBrace,
        TokenKind::BellInt,
        TokenKind::BellFloat,
        TokenKind::Fuzz,
        TokenKind::LeftParen,
        TokenKind::Let,
        TokenKind::Var,
        TokenKind::Minus,
        TokenKind::Float,
        TokenKind::Integer,
    ];

    pub fn new(source: &'a str, globals: &'e mut Globals, rng: &'e mut S) -> Self {
        Self {
            source,
            lexer: lexer(source),
            globals,
            rng,
        }
    }

    pub fn parse(mut self) -> PResult<Value> {
        self.parse_goal()
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn peek(&mut self) -> Option<TokenKind> {
        self.lexer.peek().copied()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.peek().map_or(false, |peeked| options.contains(&peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected_token(&[expected], false)
        }
    }

    fn consume_any(&mut self, options: &[TokenKind]) -> PResult<TokenKind> {
        match self.peek() {
            Some(kind) if options.contains(&kind) => {
                self.advance();
                Ok(kind)
            }
            _ => self.unexpected_token(options, false),
        }
    }

    fn consume_slice(&mut self, expected: TokenKind) -> PResult<&'a str> {
        self.consume(expected)?;
        Ok(self.slice())
    }

    fn span(&mut self) -> Range<usize> {
        self.lexer.span()
    }

    fn slice(&mut self) -> &'a str {
        let source = self.source;
        &source[self.span()]
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        let span = self.span();
        self.error_at(kind, span)
    }

    fn error_at<T>(&self, kind: ParseErrorKind, span: Range<usize>) -> PResult<T> {
        Err(ParseError {
            kind,
            slice: self.source[span.clone()].to_string(),
            span,
        }
        .into())
    }

    fn unexpected_token<T>(&mut self, expected: &[TokenKind], or_end: bool) -> PResult<T> {
        let mut expected: Vec<_> = expected.iter().copied().map(Expected::from).collect();
        if or_end {
            expected.push(Expected::End);
        }

        match self.advance() {
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnexpectedString { expected }),
            Some(found) => self.error(ParseErrorKind::UnexpectedToken {
                found: Some(found),
                expected,
            }),
            None => {
                let end = self.source.len();
                self.error_at(
                    ParseErrorKind::UnexpectedToken {
                        found: None,
                        expected,
                    },
                    end..end,
                )
            }
        }
    }

    fn expect_end(&mut self, follow: &[TokenKind]) -> PResult<()> {
        if self.peek().is_none() {
            Ok(())
        } else {
            self.unexpected_token(follow, true)
        }
    }

    fn parse_goal(&mut self) -> PResult<Value> {
        let root = Scope::Empty;

        match self.peek() {
            Some(TokenKind::Set) => {
                self.advance();
                let name = self.consume_slice(TokenKind::Var)?;
                let value = self.parse_expr(&root)?;
                self.expect_end(Self::EXPR_FOLLOW)?;

                self.globals.set(name, value);
                log::debug!("{} = {}", name, value);
                Ok(Value::Number(value))
            }
            Some(TokenKind::Unit) => {
                self.advance();
                let amount = self.parse_expr(&root)?;
                self.consume(TokenKind::Comma)?;
                let unit = self.consume_slice(TokenKind::Var)?;
                self.consume(TokenKind::RightParen)?;
                self.expect_end(&[])?;

                log::debug!("= ({}, {:?})", amount, unit);
                Ok(Value::Quantity {
                    amount,
                    unit: unit.to_string(),
                })
            }
            _ => {
                let value = self.parse_expr(&root)?;
                self.expect_end(Self::EXPR_FOLLOW)?;

                log::debug!("= {}", value);
                Ok(Value::Number(value))
            }
        }
    }

    fn parse_expr(&mut self, scope: &Scope<'_>) -> PResult {
        let mut lhs = self.parse_factor(scope)?;

        while self.matches_any(TokenKind::ADDITION_OPS) {
            let op = self.advance();
            let rhs = self.parse_factor(scope)?;

            lhs = match op {
                Some(TokenKind::Plus) => lhs.checked_add(rhs)?,
                _ => lhs.checked_sub(rhs)?,
            };
        }

        Ok(lhs)
    }

    fn parse_factor(&mut self, scope: &Scope<'_>) -> PResult {
        let mut lhs = self.parse_term(scope)?;

        while self.matches_any(TokenKind::MULTIPLICATION_OPS) {
            let op = self.advance();
            let rhs = self.parse_term(scope)?;

            lhs = match op {
                Some(TokenKind::Star) => lhs.checked_mul(rhs)?,
                _ => lhs.checked_div(rhs)?,
            };
        }

        Ok(lhs)
    }

    fn parse_term(&mut self, scope: &Scope<'_>) -> PResult {
        use TokenKind::*;

        match self.peek() {
            Some(Dice) => self.parse_dice(),
            Some(LeftBracket) => {
                let (lo, hi) = self.parse_range(LeftBracket, RightBracket, &[Integer])?;
                Ok(Number::Int(self.rng.uniform_int(lo.as_int(), hi.as_int())?))
            }
            Some(LeftBrace) => {
                let (lo, hi) = self.parse_range(LeftBrace, RightBrace, TokenKind::NUMBERS)?;
                Ok(Number::Float(self.rng.uniform_float(lo.as_float(), hi.as_float())))
            }
            Some(BellInt) => {
                let (lo, hi) = self.parse_range(BellInt, RightBracket, &[Integer])?;
                Ok(Number::Int(self.rng.bell_int(lo.as_int(), hi.as_int())?))
            }
            Some(BellFloat) => {
                let (lo, hi) = self.parse_range(BellFloat, RightBrace, &[Float])?;
                Ok(Number::Float(self.rng.bell(lo.as_float(), hi.as_float())?))
            }
            Some(Fuzz) => self.parse_fuzz(scope),
            Some(LeftParen) => {
                self.advance();
                let value = self.parse_expr(scope)?;
                self.consume(RightParen)?;
                Ok(value)
            }
            Some(Let) => self.parse_let(scope),
            Some(Var) => {
                let name = self.consume_slice(Var)?;
                Ok(self.lookup(scope, name))
            }
            Some(Minus | Float | Integer) => self.parse_number(),
            _ => self.unexpected_token(Self::TERM_START, false),
        }
    }

    fn parse_dice(&mut self) -> PResult {
        let spec: DiceSpec = self.consume_slice(TokenKind::Dice)?.parse()?;
        Ok(Number::Int(UniformDice.sum(&mut *self.rng, spec)?))
    }

    fn parse_fuzz(&mut self, scope: &Scope<'_>) -> PResult {
        self.consume(TokenKind::Fuzz)?;
        let value = self.parse_expr(scope)?;
        self.consume(TokenKind::Comma)?;
        let distance = self.parse_number()?;
        self.consume(TokenKind::RightParen)?;

        Ok(Number::Float(self.rng.fuzz(value.as_float(), distance.as_float())))
    }

    fn parse_let(&mut self, scope: &Scope<'_>) -> PResult {
        self.consume(TokenKind::Let)?;
        let name = self.consume_slice(TokenKind::Var)?;
        self.consume(TokenKind::Equal)?;
        let value = self.parse_expr(scope)?;
        self.consume(TokenKind::In)?;

        let inner = scope.bind(name, value);
        self.parse_expr(&inner)
    }

    fn lookup(&self, scope: &Scope<'_>, name: &str) -> Number {
        scope
            .get(name)
            .or_else(|| self.globals.get(name))
            .unwrap_or_else(|| {
                log::info!("undefined (defaulting to 0): {}", name);
                Number::ZERO
            })
    }

    /// `"[" lo " " hi "]"` and its brace/bell relatives; the bounds must be
    /// separated by whitespace.
    fn parse_range(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        bounds: &[TokenKind],
    ) -> PResult<(Number, Number)> {
        self.consume(open)?;
        let (kind, lo_span) = self.parse_literal(bounds)?;
        let lo = self.to_number(kind, lo_span.clone())?;

        let (kind, hi_span) = self.parse_literal(bounds)?;
        if lo_span.end == hi_span.start {
            return self.error_at(ParseErrorKind::MissingSeparator, hi_span);
        }
        let hi = self.to_number(kind, hi_span)?;

        self.consume(close)?;
        Ok((lo, hi))
    }

    fn parse_number(&mut self) -> PResult {
        let (kind, span) = self.parse_literal(TokenKind::NUMBERS)?;
        self.to_number(kind, span)
    }

    /// A numeric token, optionally preceded by a minus sign touching it.
    fn parse_literal(&mut self, options: &[TokenKind]) -> PResult<(TokenKind, Range<usize>)> {
        let minus = if self.matches(TokenKind::Minus) {
            self.advance();
            Some(self.span())
        } else {
            None
        };

        let kind = self.consume_any(options)?;
        let span = self.span();

        match minus {
            Some(minus) if minus.end != span.start => self.error(ParseErrorKind::DetachedSign),
            Some(minus) => Ok((kind, minus.start..span.end)),
            None => Ok((kind, span)),
        }
    }

    fn to_number(&self, kind: TokenKind, span: Range<usize>) -> PResult {
        let text = &self.source[span.clone()];
        let parsed = match kind {
            TokenKind::Float => text.parse().map(Number::Float).ok(),
            _ => text.parse().map(Number::Int).ok(),
        };

        match parsed {
            Some(x) => Ok(x),
            None => self.error_at(ParseErrorKind::InvalidLiteral, span),
        }
    }
}
