//! Command-line driver for the registeel pipeline.
//!
//! Reads one expression from standard input, compiles it and executes it on
//! the virtual machine, cross-checking the result against the reference
//! evaluator before printing it.
//!
//! Trace events from the evaluator and the machine go to standard error and
//! are filtered through `RUST_LOG` (e.g. `RUST_LOG=trace` shows one line
//! per resolved operation and per dispatched instruction).

use std::io::{self, BufRead};

use anyhow::{bail, Context};
use registeel_lang::{codegen, eval, parser};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read input")?;

    let source = line.trim();
    if source.is_empty() {
        bail!("empty input");
    }

    let expr = parser::parse(source)?;
    let reference = eval::eval(&expr)?;

    let program = codegen::compile(&expr);
    let result = registeel_vm::execute(&program, None).context("execution failed")?;

    // The evaluator computes over 64-bit values and the machine over 32-bit
    // words; they must agree on the low 32 bits. A mismatch is a compiler
    // bug, not a user error.
    if result as u32 != reference as u32 {
        bail!(
            "evaluator ({:#010x}) and machine ({:#010x}) disagree at the 32-bit level",
            reference as u32,
            result as u32,
        );
    }

    println!("RESULT: {result}");
    Ok(())
}
