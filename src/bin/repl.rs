use clap::Parser;
use dicecalc::{Calculator, Resolver, TableRegistry};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dicecalc")]
#[command(about = "Evaluate dice expressions and roll on random tables")]
struct Cli {
    /// Table file to load, as NAME=PATH (repeatable)
    #[arg(long = "tables", value_name = "NAME=PATH", value_parser = parse_table_arg)]
    tables: Vec<(String, PathBuf)>,

    /// Seed the random source for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a table roll after this many redirections
    #[arg(long)]
    max_redirects: Option<usize>,
}

fn parse_table_arg(s: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got {:?}", s))?;
    if name.is_empty() {
        return Err("table name cannot be empty".to_string());
    }
    Ok((name.to_string(), PathBuf::from(path)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();

    let mut registry = TableRegistry::new();
    if let Some(limit) = cli.max_redirects {
        registry = registry.with_resolver(Resolver::new().with_max_redirects(limit));
    }
    for (name, path) in &cli.tables {
        registry.load_file(name, path)?;
    }

    let mut calc = match cli.seed {
        Some(seed) => Calculator::seeded(seed),
        None => Calculator::from_entropy(),
    };

    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        match eval_line(line, &registry, &mut calc) {
            Ok(r) => println!("{}", r),
            Err(why) => eprintln!("Error: {}", why),
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

/// `roll PATH` resolves a table; anything else is a calculator expression.
fn eval_line(
    line: &str,
    registry: &TableRegistry,
    calc: &mut Calculator,
) -> dicecalc::Result<String> {
    match line.strip_prefix("roll ") {
        Some(path) => registry.resolve(path.trim(), calc).map(|r| r.to_string()),
        None => calc.calculate(line).map(|v| v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TableRegistry {
        let mut registry = TableRegistry::new();
        registry
            .load_str("coin", "dice = \"1d1\"\nrolls = [1]\nresults = [\"heads\"]\n")
            .unwrap();
        registry
    }

    #[test]
    fn test_eval_line_dispatch() {
        let registry = registry();
        let mut calc = Calculator::seeded(0);
        assert_eq!(eval_line("roll coin", &registry, &mut calc).unwrap(), "heads");
        assert_eq!(eval_line("roll  coin ", &registry, &mut calc).unwrap(), "heads");
        assert_eq!(eval_line("2 * 3", &registry, &mut calc).unwrap(), "6");
    }

    #[test]
    fn test_eval_line_errors() {
        let registry = registry();
        let mut calc = Calculator::seeded(0);
        let err = eval_line("roll missing", &registry, &mut calc).unwrap_err();
        assert!(matches!(err, dicecalc::Error::Lookup { .. }));
        assert!(eval_line("1 +", &registry, &mut calc).is_err());
    }

    #[test]
    fn test_parse_table_arg() {
        assert_eq!(
            parse_table_arg("stars=tables/stars.toml").unwrap(),
            ("stars".to_string(), PathBuf::from("tables/stars.toml"))
        );
        assert!(parse_table_arg("stars").is_err());
        assert!(parse_table_arg("=stars.toml").is_err());
    }
}
