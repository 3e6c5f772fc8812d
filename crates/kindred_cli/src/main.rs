//! Rule evaluation CLI.
//!
//! # Responsibility
//! - Load a JSON graph snapshot and evaluate one or more named rules
//!   against it, combined with a logical operator.
//! - Print matching stable IDs, one per line, sorted.
//!
//! Usage: `kindred_cli <snapshot.json> [--op and|or|one] [--invert] <Rule>
//! [args...] [+ <Rule> [args...]]...`. Without arguments the core version is
//! printed. Setting `KINDRED_LOG_DIR` to an absolute path enables file
//! logging.

use kindred_core::{
    core_version, default_log_level, init_logging, FilterService, GenericFilter, GraphSnapshot,
    LoggingConfig, LogicalOp, MemoryDb,
};
use log::info;
use std::error::Error;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "KINDRED_LOG_DIR";
const USAGE: &str =
    "usage: kindred_cli <snapshot.json> [--op and|or|one] [--invert] <Rule> [args...] [+ <Rule> [args...]]...";
const RULE_SEPARATOR: &str = "+";

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    snapshot_path: String,
    logical_op: LogicalOp,
    invert: bool,
    rules: Vec<(String, Vec<String>)>,
}

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        println!("kindred_core version={}", core_version());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(ids) => {
            for id in ids {
                println!("{id}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<Vec<String>, Box<dyn Error>> {
    let invocation = parse_invocation(args)?;

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        init_logging(&LoggingConfig::new(default_log_level(), log_dir)?)?;
    }

    let raw = std::fs::read_to_string(&invocation.snapshot_path)
        .map_err(|err| format!("cannot read `{}`: {err}", invocation.snapshot_path))?;
    let snapshot: GraphSnapshot = serde_json::from_str(&raw)?;
    let service = FilterService::new(MemoryDb::from_snapshot(snapshot)?);

    let mut filter = GenericFilter::new("cli")
        .with_logical_op(invocation.logical_op)
        .with_invert(invocation.invert);
    for (name, rule_args) in &invocation.rules {
        filter.add_rule(service.construct_rule(name, rule_args)?);
    }

    let ids = service.evaluate_ids(&mut filter);
    info!(
        "event=cli_run module=cli status=ok op={} rules={} matched={}",
        invocation.logical_op.as_str(),
        filter.rule_names().join(","),
        ids.len()
    );
    Ok(ids)
}

fn parse_invocation(args: &[String]) -> Result<Invocation, String> {
    let Some((snapshot_path, mut rest)) = args.split_first() else {
        return Err(USAGE.to_string());
    };

    let mut logical_op = LogicalOp::default();
    let mut invert = false;
    loop {
        match rest {
            [flag, value, tail @ ..] if flag == "--op" => {
                logical_op = LogicalOp::parse(value)
                    .ok_or_else(|| format!("unknown logical operator `{value}`"))?;
                rest = tail;
            }
            [flag, tail @ ..] if flag == "--invert" => {
                invert = true;
                rest = tail;
            }
            [flag] if flag == "--op" => return Err(USAGE.to_string()),
            _ => break,
        }
    }

    let mut rules = Vec::new();
    for group in rest.split(|token| token == RULE_SEPARATOR) {
        let [name, rule_args @ ..] = group else {
            return Err(USAGE.to_string());
        };
        rules.push((name.clone(), rule_args.to_vec()));
    }

    Ok(Invocation {
        snapshot_path: snapshot_path.clone(),
        logical_op,
        invert,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_invocation, LogicalOp};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn single_rule_defaults_to_and() {
        let invocation = parse_invocation(&args(&["graph.json", "IsMale"])).unwrap();
        assert_eq!(invocation.snapshot_path, "graph.json");
        assert_eq!(invocation.logical_op, LogicalOp::And);
        assert!(!invocation.invert);
        assert_eq!(invocation.rules, vec![("IsMale".to_string(), Vec::new())]);
    }

    #[test]
    fn options_and_separated_rules() {
        let invocation = parse_invocation(&args(&[
            "graph.json",
            "--op",
            "One",
            "--invert",
            "IsAncestorOf",
            "I0001",
            "1",
            "+",
            "IsFemale",
        ]))
        .unwrap();
        assert_eq!(invocation.logical_op, LogicalOp::One);
        assert!(invocation.invert);
        assert_eq!(
            invocation.rules,
            vec![
                ("IsAncestorOf".to_string(), args(&["I0001", "1"])),
                ("IsFemale".to_string(), Vec::new()),
            ]
        );
    }

    #[test]
    fn rejects_malformed_invocations() {
        assert!(parse_invocation(&args(&["graph.json"])).is_err());
        assert!(parse_invocation(&args(&["graph.json", "--op"])).is_err());
        assert!(parse_invocation(&args(&["graph.json", "--op", "xor", "IsMale"]))
            .unwrap_err()
            .contains("xor"));
        assert!(parse_invocation(&args(&["graph.json", "IsMale", "+"])).is_err());
    }
}
