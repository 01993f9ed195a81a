use super::RandomSource;
use crate::common::*;
use crate::dice::DiceSpec;
use crate::error::{Error, Result};

/// The most dice a single roll may throw.
pub const MAX_DICE: UInt = 10_000;

#[enum_dispatch::enum_dispatch]
pub trait RollDice {
    /// One die in `[1, sides]`, before the modifier is applied.
    fn face<S: RandomSource>(&self, source: &mut S, sides: UInt) -> Result<Int>;

    fn check(&self, _spec: &DiceSpec) -> Result<()> {
        Ok(())
    }

    /// Rolls every die of `spec`, adding the modifier to each.
    fn roll<S: RandomSource>(
        &self,
        source: &mut S,
        spec: DiceSpec,
        sort: bool,
    ) -> Result<NonEmpty<Int>> {
        self.check(&spec)?;
        if spec.is_empty() {
            return Ok(vec1![0]);
        }
        if spec.count > MAX_DICE {
            return Err(Error::range_error(format!(
                "too many dice: {} (at most {})",
                spec.count, MAX_DICE
            )));
        }

        let mut rolls = Vec::with_capacity(spec.count as usize);
        for _ in 0..spec.count {
            let face = self.face(source, spec.sides)?;
            rolls.push(face.checked_add(spec.modifier).ok_or(Error::Overflow)?);
        }
        if sort {
            rolls.sort_unstable();
        }
        NonEmpty::try_from_vec(rolls).map_err(|_| Error::range_error("no dice were rolled"))
    }

    fn sum<S: RandomSource>(&self, source: &mut S, spec: DiceSpec) -> Result<Int> {
        self.roll(source, spec, false)?
            .iter()
            .try_fold(0, |total: Int, &x| total.checked_add(x))
            .ok_or(Error::Overflow)
    }
}

/// Fair dice.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct UniformDice;

impl RollDice for UniformDice {
    fn face<S: RandomSource>(&self, source: &mut S, sides: UInt) -> Result<Int> {
        source.uniform_int(1, sides as Int)
    }
}

/// Dice weighted towards their low faces.
///
/// A Pareto draw with scale 1 falls mostly within `(1, 2]`; that interval is
/// split into one slice per face, and anything past it lands on the top face.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParetoDice {
    pub alpha: Float,
}

impl ParetoDice {
    pub const DEFAULT_ALPHA: Float = 10.0;

    pub fn new(alpha: Float) -> Self {
        Self { alpha }
    }
}

impl Default for ParetoDice {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA)
    }
}

impl RollDice for ParetoDice {
    fn face<S: RandomSource>(&self, source: &mut S, sides: UInt) -> Result<Int> {
        let draw = source.pareto(self.alpha)?;
        let index = ((draw - 1.0) * sides as Float).ceil() as Int - 1;
        Ok(index.clamp(0, sides as Int - 1) + 1)
    }

    fn check(&self, spec: &DiceSpec) -> Result<()> {
        if spec.count < 1 {
            return Err(Error::range_error("number of dice out of range; must be > 0"));
        }
        if spec.sides < 2 {
            return Err(Error::range_error("number of sides out of range; must be >= 2"));
        }
        if !(self.alpha >= 1.0) {
            return Err(Error::range_error(format!(
                "alpha shape parameter out of range; must be >= 1, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// Dice pools counted by successes rather than summed.
///
/// With `explode` set, every die showing its top face adds another die to
/// the pool, and so on for the new dice.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SuccessDice {
    pub target: Int,
    pub explode: bool,
}

impl SuccessDice {
    pub fn new(target: Int, explode: bool) -> Self {
        Self { target, explode }
    }

    /// Dice at or above the target count once, top faces count twice and
    /// ones cancel a success.
    pub fn successes(&self, rolls: &[Int], spec: &DiceSpec) -> Int {
        let top = spec.sides as Int + spec.modifier;
        let bottom = 1 + spec.modifier;
        rolls
            .iter()
            .map(|&r| {
                let mut n = Int::from(r >= self.target);
                if r == top {
                    n += 1;
                }
                if r == bottom {
                    n -= 1;
                }
                n
            })
            .sum()
    }
}

impl RollDice for SuccessDice {
    fn face<S: RandomSource>(&self, source: &mut S, sides: UInt) -> Result<Int> {
        UniformDice.face(source, sides)
    }

    fn check(&self, spec: &DiceSpec) -> Result<()> {
        if self.explode && spec.sides == 1 {
            return Err(Error::range_error("exploding dice need at least 2 sides"));
        }
        Ok(())
    }

    fn roll<S: RandomSource>(
        &self,
        source: &mut S,
        spec: DiceSpec,
        sort: bool,
    ) -> Result<NonEmpty<Int>> {
        self.check(&spec)?;
        let mut rolls = UniformDice.roll(source, spec, false)?.into_vec();

        if self.explode && !spec.is_empty() {
            let top = spec.sides as Int + spec.modifier;
            let mut pending = rolls.iter().filter(|&&r| r == top).count();
            while pending > 0 {
                let extra = DiceSpec::new(pending as UInt, spec.sides, spec.modifier);
                let extra = UniformDice.roll(source, extra, false)?;
                pending = extra.iter().filter(|&&r| r == top).count();
                rolls.extend(extra);
            }
        }

        if sort {
            rolls.sort_unstable();
        }
        NonEmpty::try_from_vec(rolls).map_err(|_| Error::range_error("no dice were rolled"))
    }
}

/// The dice strategy a roller is built with.
#[derive(Debug, Copy, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(RollDice)]
pub enum DiceKind {
    Uniform(UniformDice),
    Pareto(ParetoDice),
    Success(SuccessDice),
}

impl Default for DiceKind {
    fn default() -> Self {
        Self::Uniform(UniformDice)
    }
}
