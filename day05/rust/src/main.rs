use std::{fs, ops::RangeInclusive, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info, trace};
use tuple::Map;

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
        println!("Bonus: {}", bonus(&input)?);
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

/// Binary space partitioning of an inclusive range, one character at a time.
struct Partition<'a> {
    code: &'a [u8],
    min: u32,
    max: u32,
    position: usize,
}

impl<'a> Partition<'a> {
    fn new(code: &'a str, range: RangeInclusive<u32>) -> Partition<'a> {
        Partition {
            code: code.as_bytes(),
            min: *range.start(),
            max: *range.end(),
            position: 0,
        }
    }

    fn advance(&mut self) -> Result<()> {
        match self.code.get(self.position) {
            Some(b'F' | b'L') => self.max = self.min + (self.max - self.min) / 2,
            Some(b'B' | b'R') => self.min = (self.min + self.max + 1) / 2,
            Some(&c) => bail!("unexpected {:?} at {}", c as char, self.position),
            None => bail!("ran out of characters before narrowing down to one"),
        }

        self.position += 1;
        trace!("narrowed to {:?}", self.current_range());
        Ok(())
    }

    fn is_terminated(&self) -> bool {
        self.min == self.max
    }

    fn current_range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    fn result(mut self) -> Result<u32> {
        while !self.is_terminated() {
            self.advance()?;
        }

        Ok(self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Seat {
    row: u32,
    column: u32,
}

impl Seat {
    fn parse(code: &str) -> Result<Seat> {
        if code.len() != 10 || !code.is_ascii() {
            bail!("seat code should be 10 characters: {code:?}");
        }

        let (row, column) = ((&code[..7], 0..=127), (&code[7..], 0..=7))
            .map(|(part, range)| Partition::new(part, range).result());

        Ok(Seat {
            row: row?,
            column: column?,
        })
    }

    fn id(&self) -> u32 {
        self.row * 8 + self.column
    }
}

fn parse(input: &str) -> Result<Vec<u32>> {
    let ids = input
        .split_whitespace()
        .map(|code| Seat::parse(code).map(|seat| seat.id()))
        .collect::<Result<Vec<_>>>()?;

    info!("{} boarding passes", ids.len());

    Ok(ids)
}

fn solve(input: &str) -> Result<u32> {
    parse(input)?
        .into_iter()
        .max()
        .context("no boarding passes")
}

fn bonus(input: &str) -> Result<u32> {
    let mut ids = parse(input)?;
    ids.sort();

    let mine = ids
        .windows(2)
        .find(|w| w[0] + 2 == w[1])
        .map(|w| w[0] + 1)
        .context("no free seat between two taken ones")?;

    debug!("free seat between {} and {}", mine - 1, mine + 1);

    Ok(mine)
}

#[test]
fn test() {
    let mut subject = Partition::new("F", 0..=127);
    subject.advance().unwrap();
    assert_eq!(subject.current_range(), 0..=63);

    let mut subject = Partition::new("B", 0..=127);
    subject.advance().unwrap();
    assert_eq!(subject.current_range(), 64..=127);

    let mut subject = Partition::new("FF", 0..=127);
    subject.advance().unwrap();
    subject.advance().unwrap();
    assert_eq!(subject.current_range(), 0..=31);

    let mut subject = Partition::new("LRL", 0..=7);
    assert!(!subject.is_terminated());
    subject.advance().unwrap();
    assert!(!subject.is_terminated());
    subject.advance().unwrap();
    subject.advance().unwrap();
    assert!(subject.is_terminated());

    assert_eq!(Partition::new("LRL", 0..=7).result().unwrap(), 2);
    assert!(Partition::new("LR", 0..=7).result().is_err());
    assert!(Partition::new("LXL", 0..=7).result().is_err());

    let example_input = "FBFBBFFRLR\nBFFFBBFRRR\nFFFBBBFRRR\nBBFFBBFRLL\n";
    assert_eq!(solve(example_input).unwrap(), 820);

    assert_eq!(bonus("FFFFFFFLLL FFFFFFFLLR FFFFFFFLRR").unwrap(), 2);
    assert!(bonus("FFFFFFFLLL FFFFFFFLLR").is_err());
}

#[cfg(test)]
#[rstest::rstest]
#[case("FBFBBFFRLR", 44, 5, 357)]
#[case("BFFFBBFRRR", 70, 7, 567)]
#[case("FFFBBBFRRR", 14, 7, 119)]
#[case("BBFFBBFRLL", 102, 4, 820)]
fn test_seats(#[case] code: &str, #[case] row: u32, #[case] column: u32, #[case] id: u32) {
    let seat = Seat::parse(code).unwrap();
    assert_eq!(seat, Seat { row, column });
    assert_eq!(seat.id(), id);
}

#[test]
fn test_bad_seats() {
    assert!(Seat::parse("FBFBBFFRL").is_err());
    assert!(Seat::parse("FBFBBFFRLRR").is_err());
    assert!(Seat::parse("FBFBBFFRLX").is_err());
}
