use dicecalc::parse::ParseErrorKind;
use dicecalc::{calculate, Calculator, DiceExpr, Error, Globals, Number, RandomSource, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn int(x: i64) -> Value {
    Value::Number(Number::Int(x))
}

#[test]
fn replaying_state_replays_rolls() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut globals = Globals::new();

    let saved = rng.state();
    let first = calculate("3d6+5", &mut globals, &mut rng).unwrap();
    let x = first.number().as_int();
    assert!((8..=23).contains(&x));

    rng.set_state(saved);
    assert_eq!(calculate("3d6+5", &mut globals, &mut rng).unwrap(), first);
}

#[test]
fn let_bindings_are_local() {
    let mut calc = Calculator::seeded(0);
    assert_eq!(calc.calculate("let x = 2 in x*3").unwrap(), int(6));
    assert_eq!(calc.calculate("x").unwrap(), int(0));
    assert!(calc.globals().is_empty());
}

#[test]
fn set_persists_between_calculations() {
    let mut calc = Calculator::seeded(0);
    assert_eq!(calc.calculate("set gold 10").unwrap(), int(10));
    assert_eq!(calc.calculate("gold + 5").unwrap(), int(15));
    assert_eq!(calc.calculate("let gold = 1 in gold").unwrap(), int(1));
    assert_eq!(calc.globals().get("gold"), Some(Number::Int(10)));
}

#[test]
fn random_terms_stay_in_range() {
    let mut calc = Calculator::seeded(31337);
    for _ in 0..200 {
        let x = calc.number("[2 5]").unwrap();
        assert!(x.is_int() && (2..=5).contains(&x.as_int()));

        let x = calc.number("{1.5 2.5}").unwrap().as_float();
        assert!((1.5..=2.5).contains(&x));

        let x = calc.number("bell[1 10]").unwrap();
        assert!(x.is_int() && (1..=10).contains(&x.as_int()));

        let x = calc.number("bell{0.5 1.5}").unwrap().as_float();
        assert!((0.5..=1.5).contains(&x));

        let x = calc.number("fuzz(100, 0.1)").unwrap().as_float();
        assert!((90.0..=110.0).contains(&x));
    }
}

#[test]
fn quantities() {
    let mut calc = Calculator::seeded(0);
    let value = calc.calculate("u(3 * 4, gold)").unwrap();
    assert_eq!(value.to_string(), "12 gold");
    assert_eq!(value.unit(), Some("gold"));
}

#[test]
fn arithmetic_types() {
    let mut calc = Calculator::seeded(0);
    assert_eq!(calc.calculate("7 / 2").unwrap(), int(3));
    assert_eq!(calc.calculate("7 / 2.0").unwrap().to_string(), "3.5");
    assert_eq!(calc.calculate("2 * 1.5").unwrap().to_string(), "3.0");
    assert_eq!(calc.calculate("1d1 * 10 - 3").unwrap(), int(7));
}

#[test]
fn errors() {
    let mut calc = Calculator::seeded(0);

    let err = calc.calculate("1 +").unwrap_err();
    assert!(err.to_string().starts_with("syntax error at position 3"), "{}", err);

    assert!(matches!(
        calc.calculate("[1-6]"),
        Err(Error::Syntax(e)) if e.kind == ParseErrorKind::MissingSeparator
    ));
    assert_eq!(calc.calculate("3 / 0"), Err(Error::ZeroDivision));
    assert_eq!(calc.calculate("9223372036854775807 + 1"), Err(Error::Overflow));
    assert!(matches!(calc.calculate("[5 1]"), Err(Error::Range(_))));
    assert!(matches!(calc.calculate("20000d6"), Err(Error::Range(_))));
    assert!(matches!(calc.calculate("99999999999d6"), Err(Error::Format(_))));
}

#[test]
fn stored_expressions() {
    let mut calc = Calculator::seeded(12);
    let expr = DiceExpr::from("2d6 + bonus");
    calc.calculate("set bonus 100").unwrap();

    for _ in 0..20 {
        let x = expr.calculate(&mut calc).unwrap().number().as_int();
        assert!((102..=112).contains(&x));
    }
}
