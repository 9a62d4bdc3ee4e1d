use std::{fs, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use fxhash::{FxHashMap, FxHashSet};
use log::{debug, info};
use regex::Regex;

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

const MY_BAG: &str = "shiny gold";

/// Bag colors with weighted "contains" edges in both directions.
#[derive(Default)]
struct Bags<'a> {
    index: FxHashMap<&'a str, usize>,
    colors: Vec<&'a str>,
    children: Vec<Vec<(usize, u64)>>,
    parents: Vec<Vec<usize>>,
}

impl<'a> Bags<'a> {
    fn parse(input: &'a str) -> Result<Bags<'a>> {
        let rule_re = Regex::new(r"^(.+?) bags contain (.+)$")?;
        let clause_re = Regex::new(r"^([0-9]+) (.+?) bags?$")?;

        let mut bags = Bags::default();

        for rule in input.split('.').map(str::trim).filter(|s| !s.is_empty()) {
            let Some(c) = rule_re.captures(rule) else {
                bail!("not a rule: {rule:?}");
            };
            let (Some(container), Some(contents)) = (c.get(1), c.get(2)) else {
                bail!("not a rule: {rule:?}");
            };
            let parent = bags.bag_for(container.as_str());

            if contents.as_str() == "no other bags" {
                continue;
            }

            for clause in contents.as_str().split(',').map(str::trim) {
                let Some(c) = clause_re.captures(clause) else {
                    bail!("not a clause: {clause:?}");
                };
                let (Some(quantity), Some(color)) = (c.get(1), c.get(2)) else {
                    bail!("not a clause: {clause:?}");
                };
                let quantity = quantity.as_str().parse::<u64>()?;
                let child = bags.bag_for(color.as_str());
                bags.add_child(parent, child, quantity);
            }
        }

        info!("{} bag colors", bags.colors.len());

        Ok(bags)
    }

    fn bag_for(&mut self, color: &'a str) -> usize {
        if let Some(&i) = self.index.get(color) {
            return i;
        }

        let i = self.colors.len();
        self.index.insert(color, i);
        self.colors.push(color);
        self.children.push(vec![]);
        self.parents.push(vec![]);
        i
    }

    fn add_child(&mut self, parent: usize, child: usize, quantity: u64) {
        self.children[parent].push((child, quantity));
        self.parents[child].push(parent);
    }

    fn get(&self, color: &str) -> Result<usize> {
        self.index
            .get(color)
            .copied()
            .with_context(|| format!("unknown bag color: {color:?}"))
    }

    #[cfg(test)]
    fn children(&self, color: &str) -> Result<Vec<&'a str>> {
        Ok(self.children[self.get(color)?]
            .iter()
            .map(|&(child, _)| self.colors[child])
            .collect())
    }

    #[cfg(test)]
    fn parents(&self, color: &str) -> Result<Vec<&'a str>> {
        Ok(self.parents[self.get(color)?]
            .iter()
            .map(|&parent| self.colors[parent])
            .collect())
    }

    /// Every color that can eventually contain `color`.
    fn ancestors(&self, color: &str) -> Result<FxHashSet<&'a str>> {
        let mut seen = FxHashSet::default();
        let mut todo = vec![self.get(color)?];

        while let Some(i) = todo.pop() {
            for &parent in &self.parents[i] {
                if seen.insert(parent) {
                    todo.push(parent);
                }
            }
        }

        Ok(seen.into_iter().map(|i| self.colors[i]).collect())
    }

    /// Total number of bags inside one bag of `color`.
    fn containing_bag_count(&self, color: &str) -> Result<u64> {
        let mut memo = FxHashMap::default();
        let mut visiting = FxHashSet::default();
        self.count_inside(self.get(color)?, &mut memo, &mut visiting)
    }

    fn count_inside(
        &self,
        i: usize,
        memo: &mut FxHashMap<usize, u64>,
        visiting: &mut FxHashSet<usize>,
    ) -> Result<u64> {
        if let Some(&n) = memo.get(&i) {
            return Ok(n);
        }

        if !visiting.insert(i) {
            bail!("{} bags contain themselves", self.colors[i]);
        }

        let mut total: u64 = 0;
        for &(child, quantity) in &self.children[i] {
            let inside = self.count_inside(child, memo, visiting)?;
            total = quantity
                .checked_mul(inside)
                .and_then(|n| n.checked_add(quantity))
                .and_then(|n| n.checked_add(total))
                .context("bag count overflows u64")?;
        }

        debug!("{} bags hold {total} bags", self.colors[i]);
        visiting.remove(&i);
        memo.insert(i, total);

        Ok(total)
    }
}

fn solve(input: &str) -> Result<usize> {
    Ok(Bags::parse(input)?.ancestors(MY_BAG)?.len())
}

fn bonus(input: &str) -> Result<u64> {
    Bags::parse(input)?.containing_bag_count(MY_BAG)
}

#[cfg(test)]
const EXAMPLE_INPUT: &str = "light red bags contain 1 bright white bag, 2 muted yellow bags.
dark orange bags contain 3 bright white bags, 4 muted yellow bags.
bright white bags contain 1 shiny gold bag.
muted yellow bags contain 2 shiny gold bags, 9 faded blue bags.
shiny gold bags contain 1 dark olive bag, 2 vibrant plum bags.
dark olive bags contain 3 faded blue bags, 4 dotted black bags.
vibrant plum bags contain 5 faded blue bags, 6 dotted black bags.
faded blue bags contain no other bags.
dotted black bags contain no other bags.";

#[test]
fn test() {
    assert_eq!(solve(EXAMPLE_INPUT).unwrap(), 4);
    assert_eq!(bonus(EXAMPLE_INPUT).unwrap(), 32);

    let deeper_input = "shiny gold bags contain 2 dark red bags.
dark red bags contain 2 dark orange bags.
dark orange bags contain 2 dark yellow bags.
dark yellow bags contain 2 dark green bags.
dark green bags contain 2 dark blue bags.
dark blue bags contain 2 dark violet bags.
dark violet bags contain no other bags.";

    assert_eq!(bonus(deeper_input).unwrap(), 126);
}

#[test]
fn test_graph() {
    use pretty_assertions::assert_eq;

    let bags = Bags::parse(
        "dim red bags contain 2 dim salmon bags, 2 faded orange bags, 5 muted aqua bags",
    )
    .unwrap();
    assert_eq!(
        bags.children("dim red").unwrap(),
        vec!["dim salmon", "faded orange", "muted aqua"]
    );
    assert_eq!(bags.parents("muted aqua").unwrap(), vec!["dim red"]);

    let bags = Bags::parse("poop brown bags contain no other bags").unwrap();
    assert!(bags.children("poop brown").unwrap().is_empty());
    assert!(bags.parents("poop brown").unwrap().is_empty());

    let bags = Bags::parse("light red bags contain 3 bright white bags").unwrap();
    assert_eq!(bags.containing_bag_count("light red").unwrap(), 3);

    let bags = Bags::parse(EXAMPLE_INPUT).unwrap();
    let mut ancestors = bags.ancestors(MY_BAG).unwrap().into_iter().collect::<Vec<_>>();
    ancestors.sort();
    assert_eq!(
        ancestors,
        vec!["bright white", "dark orange", "light red", "muted yellow"]
    );

    assert!(bags.ancestors("plaid magenta").is_err());
    assert!(Bags::parse("red bags contain lots of bags").is_err());
}

#[test]
fn test_cycles_are_rejected() {
    let bags = Bags::parse(
        "dull tan bags contain 1 pale lime bag. pale lime bags contain 2 dull tan bags.",
    )
    .unwrap();
    assert!(bags.containing_bag_count("dull tan").is_err());
}

#[test]
fn test_huge_counts_are_rejected() {
    let bags = Bags::parse(
        "shiny gold bags contain 4294967296 dark red bags.
dark red bags contain 4294967296 dark blue bags.
dark blue bags contain 4294967296 dark violet bags.
dark violet bags contain no other bags.",
    )
    .unwrap();
    assert!(bags.containing_bag_count("dark blue").is_ok());
    assert!(bags.containing_bag_count(MY_BAG).is_err());
}
