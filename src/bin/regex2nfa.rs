use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};

use lexgen_machine::table;
use lexgen_transformer::regex_to_nfa;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <output.csv> <regular-expression>", args[0]);
        return ExitCode::FAILURE;
    }
    match run(&args[1], &args[2]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(output: &str, pattern: &str) -> Result<()> {
    let nfa = regex_to_nfa(pattern)?;
    fs::write(output, table::render(&nfa)).with_context(|| format!("cannot write '{output}'"))?;
    Ok(())
}
