use super::{Outcome, RollKey, Table};
use crate::error::{Error, Result};

/// Builds a table tree from a TOML document.
///
/// The document itself becomes a table called `name`, and every TOML table
/// inside it becomes a sub-table of the table it is nested in.
pub(crate) fn parse_table(name: &str, text: &str, origin: &str) -> Result<Table> {
    let doc: toml::Table = text.parse().map_err(|e: toml::de::Error| Error::Config {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;
    from_toml(name, &doc)
}

fn from_toml(name: &str, doc: &toml::Table) -> Result<Table> {
    let mut table = Table::new(name);

    for (key, value) in doc {
        match (key.as_str(), value) {
            (_, toml::Value::Table(sub)) => {
                table.subtables.insert(key.clone(), from_toml(key, sub)?);
            }
            ("dice", toml::Value::String(dice)) => table.dice = Some(dice.clone()),
            ("dice", _) => return Err(wrong_type(name, key, "a string")),
            ("rolls", toml::Value::Array(items)) => {
                let rolls = items
                    .iter()
                    .map(|item| roll_key(name, item))
                    .collect::<Result<_>>()?;
                table.rolls = Some(rolls);
            }
            ("results", toml::Value::Array(items)) => {
                let results = items
                    .iter()
                    .map(|item| outcome(name, item))
                    .collect::<Result<_>>()?;
                table.results = Some(results);
            }
            ("rolls" | "results", _) => return Err(wrong_type(name, key, "an array")),
            _ => log::debug!("{}: ignoring key {:?}", name, key),
        }
    }

    Ok(table)
}

fn roll_key(table: &str, value: &toml::Value) -> Result<RollKey> {
    match value {
        toml::Value::Integer(x) => Ok(RollKey::Exact(*x)),
        toml::Value::Array(pair) => match pair.as_slice() {
            [toml::Value::Integer(lo), toml::Value::Integer(hi)] if lo <= hi => {
                Ok(RollKey::Range(*lo, *hi))
            }
            [toml::Value::Integer(lo), toml::Value::Integer(hi)] => Err(Error::range_error(format!(
                "table {:?}: empty roll range [{}, {}]",
                table, lo, hi
            ))),
            _ => Err(wrong_type(table, "rolls", "integers or [low, high] pairs")),
        },
        _ => Err(wrong_type(table, "rolls", "integers or [low, high] pairs")),
    }
}

fn outcome(table: &str, value: &toml::Value) -> Result<Outcome> {
    match value {
        toml::Value::String(s) => Ok(Outcome::Text(s.clone())),
        toml::Value::Integer(x) => Ok(Outcome::Int(*x)),
        toml::Value::Float(x) => Ok(Outcome::Float(*x)),
        _ => Err(wrong_type(table, "results", "strings or numbers")),
    }
}

fn wrong_type(table: &str, key: &str, expected: &str) -> Error {
    Error::type_error(format!("table {:?}: {} must be {}", table, key, expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARS: &str = r#"
        [arity]
        dice = "2d6"
        rolls = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
        results = [1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 3]

        [class]
        dice = "3d6"
        rolls = [[3, 5], 6, [7, 17], 18]
        results = ["D", "VI", "V", "reroll:giant"]

        [class.giant]
        dice = "3d6"
        rolls = [3, [4, 11], [12, 18]]
        results = ["reroll:super", "III", "IV"]

        [class.giant.super]
        dice = "1d3"
        rolls = [1, 2, 3]
        results = ["Ia", "Ib", "Ib"]

        [system_data]
        mass = 70
    "#;

    #[test]
    fn test_load_nested_tables() {
        let stars = parse_table("stars", STARS, "stars.toml").unwrap();
        assert_eq!(stars.name, "stars");
        assert!(stars.dice.is_none());
        assert_eq!(stars.subtables.len(), 3);

        let class = stars.subtable("class").unwrap();
        assert_eq!(class.dice.as_deref(), Some("3d6"));
        assert_eq!(
            class.rolls,
            Some(vec![
                RollKey::Range(3, 5),
                RollKey::Exact(6),
                RollKey::Range(7, 17),
                RollKey::Exact(18),
            ])
        );

        let sup = class.subtable("giant").and_then(|t| t.subtable("super")).unwrap();
        assert_eq!(sup.name, "super");
        assert_eq!(sup.results.as_ref().map(Vec::len), Some(3));

        let arity = stars.subtable("arity").unwrap();
        assert_eq!(arity.results.as_ref().and_then(|r| r.first()), Some(&Outcome::Int(1)));

        let data = stars.subtable("system_data").unwrap();
        assert!(data.dice.is_none() && data.rolls.is_none());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_table("bad", "[class\ndice = ", "bad.toml").unwrap_err();
        assert!(matches!(err, Error::Config { ref origin, .. } if origin == "bad.toml"));
    }

    #[test]
    fn test_wrong_value_types() {
        let err = parse_table("t", "dice = 6", "t").unwrap_err();
        assert!(matches!(err, Error::Type(_)));

        let err = parse_table("t", "rolls = \"1, 2\"", "t").unwrap_err();
        assert!(matches!(err, Error::Type(_)));

        let err = parse_table("t", "rolls = [[1, 2, 3]]", "t").unwrap_err();
        assert!(matches!(err, Error::Type(_)));

        let err = parse_table("t", "results = [true]", "t").unwrap_err();
        assert!(matches!(err, Error::Type(_)));

        let err = parse_table("t", "rolls = [[5, 1]]", "t").unwrap_err();
        assert!(matches!(err, Error::Range(_)));
    }
}
