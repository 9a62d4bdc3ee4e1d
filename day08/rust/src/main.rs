use std::{fs, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use day08::{bonus, solve};

#[derive(Parser)]
#[command()]
struct Cli {
    #[arg(short, long)]
    /// Print out how long each part took
    timings: bool,

    /// Puzzle input
    #[arg(default_value = "input.txt")]
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("Could not read file: {}", cli.input.display()))?;

    time(cli.timings, || {
        println!("First part: {}", solve(&input)?);
        Ok(())
    })?;

    time(cli.timings, || {
        match bonus(&input)? {
            Some(acc) => println!("Bonus: {acc}"),
            None => println!("Bonus: no single flip terminates"),
        }
        Ok(())
    })
}

fn time<F>(timings: bool, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    let t0 = Instant::now();
    f()?;
    if timings {
        println!("  took {:?}", t0.elapsed());
    }
    Ok(())
}
