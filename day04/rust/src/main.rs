use std::{fs, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use fxhash::FxHashMap;
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

const REQUIRED_KEYS: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];
const EYE_COLORS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

struct Passport<'a> {
    fields: FxHashMap<&'a str, &'a str>,
}

impl<'a> Passport<'a> {
    fn parse(record: &'a str) -> Result<Passport<'a>> {
        let mut fields = FxHashMap::default();
        for token in record.split_whitespace() {
            let Some((key, value)) = token.split_once(':') else {
                bail!("field without a key: {token:?}");
            };
            fields.insert(key, value);
        }

        Ok(Passport { fields })
    }

    fn has_required_keys(&self) -> bool {
        REQUIRED_KEYS.iter().all(|key| self.fields.contains_key(key))
    }

    fn is_valid(&self, rules: &Rules) -> bool {
        self.has_required_keys()
            && self
                .fields
                .iter()
                .all(|(key, value)| rules.is_valid(key, value))
    }
}

struct Rules {
    hgt: Regex,
    hcl: Regex,
    pid: Regex,
}

impl Rules {
    fn new() -> Result<Rules> {
        Ok(Rules {
            hgt: Regex::new(r"^([0-9]+)(cm|in)$")?,
            hcl: Regex::new(r"^#[0-9a-f]{6}$")?,
            pid: Regex::new(r"^[0-9]{9}$")?,
        })
    }

    fn is_valid(&self, key: &str, value: &str) -> bool {
        let year_within = |min: u32, max: u32| {
            value
                .parse::<u32>()
                .is_ok_and(|year| (min..=max).contains(&year))
        };

        let valid = match key {
            "byr" => year_within(1920, 2002),
            "iyr" => year_within(2010, 2020),
            "eyr" => year_within(2020, 2030),
            "hgt" => self.hgt.captures(value).is_some_and(|c| {
                let height = c[1].parse::<u32>().unwrap_or(0);
                match &c[2] {
                    "cm" => (150..=193).contains(&height),
                    _ => (59..=76).contains(&height),
                }
            }),
            "hcl" => self.hcl.is_match(value),
            "ecl" => EYE_COLORS.iter().any(|&color| color == value),
            "pid" => self.pid.is_match(value),
            _ => true,
        };

        if !valid {
            debug!("invalid {key}: {value:?}");
        }

        valid
    }
}

fn parse(input: &str) -> Result<Vec<Passport>> {
    let passports = input
        .split("\n\n")
        .filter(|record| !record.trim().is_empty())
        .map(Passport::parse)
        .collect::<Result<Vec<_>>>()?;

    info!("{} passports", passports.len());

    Ok(passports)
}

fn solve(input: &str) -> Result<usize> {
    Ok(parse(input)?
        .iter()
        .filter(|passport| passport.has_required_keys())
        .count())
}

fn bonus(input: &str) -> Result<usize> {
    let rules = Rules::new()?;

    Ok(parse(input)?
        .iter()
        .filter(|passport| passport.is_valid(&rules))
        .count())
}

#[test]
fn test() {
    let example_input = "ecl:gry pid:860033327 eyr:2020 hcl:#fffffd
byr:1937 iyr:2017 cid:147 hgt:183cm

iyr:2013 ecl:amb cid:350 eyr:2023 pid:028048884
hcl:#cfa07d byr:1929

hcl:#ae17e1 iyr:2013
eyr:2024
ecl:brn pid:760753108 byr:1931
hgt:179cm

hcl:#cfa07d eyr:2025 pid:166559648
iyr:2011 ecl:brn hgt:59in";

    assert_eq!(solve(example_input).unwrap(), 2);

    let invalid_input = "eyr:1972 cid:100
hcl:#18171d ecl:amb hgt:170 pid:186cm iyr:2018 byr:1926

iyr:2019
hcl:#602927 eyr:1967 hgt:170cm
ecl:grn pid:012533040 byr:1946

hcl:dab227 iyr:2012
ecl:brn hgt:182cm pid:021572410 eyr:2020 byr:1992 cid:277

hgt:59cm ecl:zzz
eyr:2038 hcl:74454a iyr:2023
pid:3556412378 byr:2007";

    assert_eq!(solve(invalid_input).unwrap(), 4);
    assert_eq!(bonus(invalid_input).unwrap(), 0);

    let valid_input = "pid:087499704 hgt:74in ecl:grn iyr:2012 eyr:2030 byr:1980
hcl:#623a2f

eyr:2029 ecl:blu cid:129 byr:1989
iyr:2014 pid:896056539 hcl:#a97842 hgt:165cm

hcl:#888785
hgt:164cm byr:2001 iyr:2015 cid:88
pid:545766238 ecl:hzl
eyr:2022

iyr:2010 hgt:158cm hcl:#b6652a ecl:blu byr:1944 eyr:2021 pid:093154719";

    assert_eq!(bonus(valid_input).unwrap(), 4);
}

#[test]
fn test_required_keys() {
    let missing_fields = Passport::parse("ecl:gry").unwrap();
    let complete = Passport::parse(
        "ecl:gry pid:860033327 eyr:2020 hcl:#fffffd byr:1937 iyr:2017 cid:147 hgt:183cm",
    )
    .unwrap();

    assert!(!missing_fields.has_required_keys());
    assert!(complete.has_required_keys());

    let rules = Rules::new().unwrap();
    assert!(complete.is_valid(&rules));

    let born_in_the_future = Passport::parse(
        "byr:3000 ecl:gry pid:860033327 eyr:2020 hcl:#fffffd iyr:2017 cid:147 hgt:183cm",
    )
    .unwrap();
    assert!(!born_in_the_future.is_valid(&rules));

    assert!(Passport::parse("ecl:gry pid").is_err());
}

#[cfg(test)]
#[rstest::rstest]
#[case("byr", "1920", true)]
#[case("byr", "2002", true)]
#[case("byr", "1919", false)]
#[case("byr", "2003", false)]
#[case("iyr", "2010", true)]
#[case("iyr", "2021", false)]
#[case("eyr", "2030", true)]
#[case("eyr", "2019", false)]
#[case("hgt", "60in", true)]
#[case("hgt", "59in", true)]
#[case("hgt", "190cm", true)]
#[case("hgt", "150cm", true)]
#[case("hgt", "149cm", false)]
#[case("hgt", "190in", false)]
#[case("hgt", "190", false)]
#[case("hcl", "#123abc", true)]
#[case("hcl", "#123abz", false)]
#[case("hcl", "#abc", false)]
#[case("hcl", "123abc", false)]
#[case("hcl", "#00000012", false)]
#[case("ecl", "brn", true)]
#[case("ecl", "wat", false)]
#[case("pid", "000000001", true)]
#[case("pid", "0123456789", false)]
#[case("pid", "abcdefghi", false)]
#[case("cid", "anything", true)]
fn test_field_rules(#[case] key: &str, #[case] value: &str, #[case] expected: bool) {
    let rules = Rules::new().unwrap();
    assert_eq!(rules.is_valid(key, value), expected);
}
