use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};

use lexgen_machine::table;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <input.txt> <output.csv>", args[0]);
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

fn run(input: &str, output: &str) -> Result<()> {
    let text = fs::read_to_string(input).with_context(|| format!("cannot read '{input}'"))?;
    let machine = lexgen_grammar::convert(text.trim())?;
    fs::write(output, table::render(&machine)).with_context(|| format!("cannot write '{output}'"))?;
    Ok(())
}
