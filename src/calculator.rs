use crate::common::*;
use crate::dice::DiceSpec;
use crate::env::Globals;
use crate::error::{Error, Result};
use crate::roll::{DefaultSource, RandomSource, RollDice};
use rand::SeedableRng;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Evaluates expressions against a shared set of globals and one random
/// source.
pub struct Calculator<S: RandomSource = DefaultSource> {
    globals: Globals,
    source: S,
    initial: S::State,
}

impl<S: RandomSource> Calculator<S> {
    pub fn new(source: S) -> Self {
        Self {
            globals: Globals::new(),
            initial: source.state(),
            source,
        }
    }

    pub fn calculate(&mut self, input: &str) -> Result<Value> {
        crate::parse::calculate(input, &mut self.globals, &mut self.source)
    }

    /// Like [`calculate`](Self::calculate), but rejects quantities.
    pub fn number(&mut self, input: &str) -> Result<Number> {
        match self.calculate(input)? {
            Value::Number(x) => Ok(x),
            Value::Quantity { unit, .. } => Err(Error::type_error(format!(
                "expected a plain number from {:?}, got a quantity of {}",
                input, unit
            ))),
        }
    }

    /// Rolls `spec` with any dice strategy, drawing from this calculator's
    /// source.
    pub fn roll<D: RollDice>(
        &mut self,
        dice: &D,
        spec: DiceSpec,
        sort: bool,
    ) -> Result<NonEmpty<Int>> {
        dice.roll(&mut self.source, spec, sort)
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut Globals {
        &mut self.globals
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Puts the source back into the state it had when the calculator was
    /// built. Globals are kept.
    pub fn reset_source(&mut self) {
        self.source.set_state(self.initial.clone());
    }
}

impl Calculator<DefaultSource> {
    pub fn from_entropy() -> Self {
        Self::new(DefaultSource::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(DefaultSource::seed_from_u64(seed))
    }
}

impl Default for Calculator<DefaultSource> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// An expression kept as text and evaluated anew on every call.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DiceExpr(String);

impl DiceExpr {
    pub fn new(expr: impl Into<String>) -> Self {
        Self(expr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn calculate<S: RandomSource>(&self, calc: &mut Calculator<S>) -> Result<Value> {
        calc.calculate(&self.0)
    }
}

impl FromStr for DiceExpr {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for DiceExpr {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DiceExpr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
