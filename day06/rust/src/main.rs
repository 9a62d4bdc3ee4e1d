use std::{fs, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use fxhash::FxHashSet;
use log::info;

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
        println!("First part: {}", solve(&input));
    });

    time(cli.timings, || {
        println!("Bonus: {}", bonus(&input));
    });

    Ok(())
}

fn time<F>(timings: bool, f: F)
where
    F: FnOnce(),
{
    let t0 = Instant::now();
    f();
    if timings {
        println!("  took {:?}", t0.elapsed());
    }
}

type Answers = FxHashSet<char>;

fn groups(input: &str) -> Vec<Vec<Answers>> {
    let groups = input
        .split("\n\n")
        .map(|group| {
            group
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| line.chars().collect::<Answers>())
                .collect::<Vec<_>>()
        })
        .filter(|people| !people.is_empty())
        .collect::<Vec<_>>();

    info!("{} groups", groups.len());

    groups
}

/// Questions anyone in a group answered.
fn solve(input: &str) -> usize {
    groups(input)
        .into_iter()
        .map(|people| {
            people
                .into_iter()
                .flatten()
                .collect::<Answers>()
                .len()
        })
        .sum()
}

/// Questions everyone in a group answered.
fn bonus(input: &str) -> usize {
    groups(input)
        .into_iter()
        .filter_map(|people| {
            people
                .into_iter()
                .reduce(|all, person| all.intersection(&person).copied().collect())
        })
        .map(|common| common.len())
        .sum()
}

#[test]
fn test() {
    let example_input = "abc

a
b
c

ab
ac

a
a
a
a

b
";

    assert_eq!(solve(example_input), 11);

    assert_eq!(bonus(example_input), 6);

    assert_eq!(solve(""), 0);
    assert_eq!(bonus("abc\n\n\n"), 3);
}
