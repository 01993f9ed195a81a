use crate::common::*;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// A random table: a dice expression, the rolls it recognises and the
/// outcome for each of them.
///
/// `rolls[i]` selects `results[i]`. Outcomes may redirect to the table
/// itself (`"reroll"`) or to one of its direct sub-tables
/// (`"reroll:NAME"`), and `"None"` stands for no result at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub name: String,
    pub dice: Option<String>,
    pub rolls: Option<Vec<RollKey>>,
    pub results: Option<Vec<Outcome>>,
    pub subtables: BTreeMap<String, Table>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_dice(mut self, dice: impl Into<String>) -> Self {
        self.dice = Some(dice.into());
        self
    }

    pub fn with_rolls<K: Into<RollKey>>(mut self, rolls: impl IntoIterator<Item = K>) -> Self {
        self.rolls = Some(rolls.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_results<O: Into<Outcome>>(mut self, results: impl IntoIterator<Item = O>) -> Self {
        self.results = Some(results.into_iter().map(Into::into).collect());
        self
    }

    /// Adds `table` as a sub-table under its own name, replacing any
    /// previous one.
    pub fn with_subtable(mut self, table: Table) -> Self {
        self.subtables.insert(table.name.clone(), table);
        self
    }

    pub fn subtable(&self, name: &str) -> Option<&Table> {
        self.subtables.get(name)
    }
}

/// Which rolls select an outcome.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RollKey {
    Exact(Int),
    /// Both ends inclusive.
    Range(Int, Int),
}

impl RollKey {
    pub fn matches(&self, roll: Number) -> bool {
        match *self {
            Self::Exact(x) => roll == Number::Int(x),
            Self::Range(lo, hi) => Number::Int(lo) <= roll && roll <= Number::Int(hi),
        }
    }
}

impl From<Int> for RollKey {
    fn from(x: Int) -> Self {
        Self::Exact(x)
    }
}

impl From<RangeInclusive<Int>> for RollKey {
    fn from(range: RangeInclusive<Int>) -> Self {
        Self::Range(*range.start(), *range.end())
    }
}

impl fmt::Display for RollKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(x) => write!(f, "{}", x),
            Self::Range(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Text(String),
    Int(Int),
    Float(Float),
}

impl From<&str> for Outcome {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Outcome {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Int> for Outcome {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<Float> for Outcome {
    fn from(x: Float) -> Self {
        Self::Float(x)
    }
}

/// What resolving a table finally produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Text(String),
    Number(Number),
    None,
}

impl Resolved {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(x) => fmt::Display::fmt(x, f),
            Self::None => f.write_str("None"),
        }
    }
}
