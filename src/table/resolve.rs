use super::{Outcome, Resolved, Table};
use crate::calculator::Calculator;
use crate::common::*;
use crate::error::{Error, Result};
use crate::roll::RandomSource;

const REROLL: &str = "reroll";
const NONE: &str = "None";

/// Rolls on tables, following their redirections.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Resolver {
    max_redirects: Option<usize>,
}

/// Where a single roll on a table led.
#[derive(Debug, PartialEq)]
enum Candidate<'t> {
    Done(Resolved),
    /// Roll again on the same table, or on the named sub-table.
    Reroll(Option<&'t str>),
}

impl<'t> Candidate<'t> {
    fn from_outcome(outcome: &'t Outcome) -> Self {
        match outcome {
            Outcome::Text(text) if text == NONE => Self::Done(Resolved::None),
            Outcome::Text(text) => match text.strip_prefix(REROLL) {
                Some("") => Self::Reroll(None),
                Some(rest) if rest.starts_with(':') => Self::Reroll(Some(&rest[1..])),
                _ => Self::Done(Resolved::Text(text.clone())),
            },
            Outcome::Int(x) => Self::Done(Resolved::Number(Number::Int(*x))),
            Outcome::Float(x) => Self::Done(Resolved::Number(Number::Float(*x))),
        }
    }
}

impl Resolver {
    /// A resolver that follows any number of redirections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [`Error::TooManyRedirects`] once a single resolution has
    /// been redirected more than `limit` times.
    pub fn with_max_redirects(mut self, limit: usize) -> Self {
        self.max_redirects = Some(limit);
        self
    }

    pub fn max_redirects(&self) -> Option<usize> {
        self.max_redirects
    }

    /// Rolls on `table`, adding `modifier` to the first roll only.
    pub fn resolve<S: RandomSource>(
        &self,
        table: &Table,
        modifier: Int,
        calc: &mut Calculator<S>,
    ) -> Result<Resolved> {
        let mut current = table;
        let mut modifier = modifier;
        let mut redirects = 0;

        loop {
            let next = match Self::roll_once(current, modifier, calc)? {
                Candidate::Done(resolved) => return Ok(resolved),
                Candidate::Reroll(None) => current,
                Candidate::Reroll(Some(name)) => current
                    .subtable(name)
                    .ok_or_else(|| {
                        Error::lookup("sub-table", format!("{}.{}", current.name, name))
                    })?,
            };

            redirects += 1;
            if let Some(limit) = self.max_redirects {
                if redirects > limit {
                    return Err(Error::TooManyRedirects {
                        table: current.name.clone(),
                        limit,
                    });
                }
            }

            current = next;
            modifier = 0;
        }
    }

    fn roll_once<'t, S: RandomSource>(
        table: &'t Table,
        modifier: Int,
        calc: &mut Calculator<S>,
    ) -> Result<Candidate<'t>> {
        let dice = table
            .dice
            .as_deref()
            .ok_or_else(|| Error::lookup("dice expression for table", table.name.as_str()))?;
        log::info!("{}: rolling {}", table.name, dice);

        let roll = calc.number(dice)?.checked_add(Number::Int(modifier))?;
        log::info!("{}: rolled {}", table.name, roll);

        let candidate = match (&table.rolls, &table.results) {
            (Some(rolls), Some(results)) => match rolls.iter().position(|key| key.matches(roll)) {
                Some(index) => {
                    let outcome = results.get(index).ok_or(Error::Alignment {
                        roll,
                        index,
                        rolls_len: rolls.len(),
                        results_len: results.len(),
                    })?;
                    Candidate::from_outcome(outcome)
                }
                None => Candidate::Done(Resolved::Number(roll)),
            },
            _ => Candidate::Done(Resolved::Number(roll)),
        };
        log::info!("{}: candidate {:?}", table.name, candidate);

        Ok(candidate)
    }
}
