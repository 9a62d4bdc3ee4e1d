use std::{fs, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};

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

const TREE: char = '#';
const OPEN: char = '.';

/// Repeats infinitely to the right.
struct Map {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Map {
    fn parse(input: &str) -> Result<Map> {
        let rows = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let Some(width) = rows.first().map(Vec::len) else {
            bail!("empty map");
        };

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                bail!("row {y} is {} wide, expected {width}", row.len());
            }
            if let Some(c) = row.iter().find(|&&c| c != TREE && c != OPEN) {
                bail!("unexpected {c:?} in row {y}");
            }
        }

        info!("map is {width}x{}", rows.len());

        Ok(Map { rows, width })
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn is_tree(&self, (x, y): (usize, usize)) -> bool {
        self.rows[y][x % self.width] == TREE
    }

    fn tree_count(&self, (right, down): (usize, usize)) -> usize {
        let count = (0..self.height())
            .step_by(down.max(1))
            .enumerate()
            .filter(|&(step, y)| self.is_tree((step * right, y)))
            .count();

        debug!("slope ({right}, {down}): {count} trees");
        count
    }
}

fn solve(input: &str) -> Result<usize> {
    Ok(Map::parse(input)?.tree_count((3, 1)))
}

fn bonus(input: &str) -> Result<usize> {
    let map = Map::parse(input)?;

    Ok([(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)]
        .into_iter()
        .map(|slope| map.tree_count(slope))
        .product())
}

#[test]
fn test() {
    let small_map = Map::parse(
        "
..
.#
..
.#
",
    )
    .unwrap();

    assert_eq!(small_map.tree_count((1, 1)), 2);

    let example_input = "..##.......
#...#...#..
.#....#..#.
..#.#...#.#
.#...##..#.
..#.##.....
.#.#.#....#
.#........#
#.##...#...
#...##....#
.#..#...#.#";

    assert_eq!(solve(example_input).unwrap(), 7);

    let map = Map::parse(example_input).unwrap();
    assert_eq!(map.tree_count((1, 1)), 2);
    assert_eq!(map.tree_count((5, 1)), 3);
    assert_eq!(map.tree_count((7, 1)), 4);
    assert_eq!(map.tree_count((1, 2)), 2);

    assert_eq!(bonus(example_input).unwrap(), 336);
}

#[test]
fn test_bad_maps() {
    assert!(Map::parse("").is_err());
    assert!(Map::parse("..#\n.#").is_err());
    assert!(Map::parse("..x").is_err());
}
