use dicecalc::roll::UniformDice;
use dicecalc::{Calculator, DiceSpec, RollDice};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn dice_notation_reads_back(
        count in 0u32..1000,
        sides in 0u32..1000,
        modifier in -100i64..100,
    ) {
        let spec = DiceSpec::new(count, sides, modifier);
        prop_assert_eq!(spec.to_string().parse::<DiceSpec>(), Ok(spec));
    }

    #[test]
    fn roll_sum_within_bounds(
        count in 1u32..50,
        sides in 1u32..100,
        modifier in -10i64..10,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let spec = DiceSpec::new(count, sides, modifier);
        let total = UniformDice.sum(&mut rng, spec).unwrap();

        let count = i64::from(count);
        let low = count * (1 + modifier);
        let high = count * (i64::from(sides) + modifier);
        prop_assert!((low..=high).contains(&total), "{} not in [{}, {}]", total, low, high);
    }

    #[test]
    fn calculator_never_panics(input in "\\PC{0,64}", seed in any::<u64>()) {
        let mut calc = Calculator::seeded(seed);
        let _ = calc.calculate(&input);
    }
}
