mod source;
mod strategy;

pub use source::RandomSource;
pub use strategy::{DiceKind, ParetoDice, RollDice, SuccessDice, UniformDice, MAX_DICE};

#[cfg(test)]
pub(crate) use source::StepSource;

/// The generator used when no other source is supplied.
pub type DefaultSource = rand::rngs::StdRng;
