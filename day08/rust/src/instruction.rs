use std::{fmt::Display, str::FromStr};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Nop(i64),
    Acc(i64),
    Jmp(i64),
}

const MNEMONICS: [(&str, fn(i64) -> Instruction); 3] = [
    ("nop", Instruction::Nop),
    ("acc", Instruction::Acc),
    ("jmp", Instruction::Jmp),
];

/// Whitespace tokenizer for a single input line.
pub fn split_words(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

impl Instruction {
    /// Looks up `code` (case-insensitive) in the mnemonic table.
    pub fn parse(code: &str, argument: i64) -> Result<Instruction> {
        MNEMONICS
            .iter()
            .find(|(mnemonic, _)| mnemonic.eq_ignore_ascii_case(code))
            .map(|(_, make)| make(argument))
            .ok_or_else(|| Error::InvalidInstruction(code.to_string()))
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Nop(_) => "nop",
            Instruction::Acc(_) => "acc",
            Instruction::Jmp(_) => "jmp",
        }
    }

    pub fn argument(&self) -> i64 {
        match *self {
            Instruction::Nop(n) | Instruction::Acc(n) | Instruction::Jmp(n) => n,
        }
    }

    /// Only `nop` and `jmp` can have been swapped for each other.
    pub fn is_possibly_corrupt(&self) -> bool {
        matches!(self, Instruction::Nop(_) | Instruction::Jmp(_))
    }

    /// Swaps `nop` and `jmp`, keeping the argument. `acc` maps to itself.
    pub fn to_opposite(self) -> Instruction {
        match self {
            Instruction::Nop(n) => Instruction::Jmp(n),
            Instruction::Jmp(n) => Instruction::Nop(n),
            acc @ Instruction::Acc(_) => acc,
        }
    }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(line: &str) -> Result<Instruction> {
        let words = split_words(line);
        let [code, argument] = words[..] else {
            return Err(Error::MalformedLine(line.to_string()));
        };

        // i64 parsing accepts the explicit `+` prefix
        let n = argument
            .parse::<i64>()
            .map_err(|source| Error::InvalidArgument {
                argument: argument.to_string(),
                source,
            })?;

        Instruction::parse(code, n)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:+}", self.mnemonic(), self.argument())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_mnemonics() {
        assert_eq!(Instruction::parse("nop", 0), Ok(Instruction::Nop(0)));
        assert_eq!(Instruction::parse("acc", -7), Ok(Instruction::Acc(-7)));
        assert_eq!(Instruction::parse("JMP", 3), Ok(Instruction::Jmp(3)));
        assert_eq!(Instruction::parse("Acc", 1), Ok(Instruction::Acc(1)));
    }

    #[test]
    fn rejects_unknown_mnemonics() {
        assert_eq!(
            Instruction::parse("mul", 2),
            Err(Error::InvalidInstruction("mul".into()))
        );
        assert_eq!(
            "hlt +0".parse::<Instruction>(),
            Err(Error::InvalidInstruction("hlt".into()))
        );
    }

    #[test]
    fn parses_lines() {
        assert_eq!("jmp -3".parse::<Instruction>(), Ok(Instruction::Jmp(-3)));
        assert_eq!("acc +45".parse::<Instruction>(), Ok(Instruction::Acc(45)));
        assert_eq!("  nop   +0 ".parse::<Instruction>(), Ok(Instruction::Nop(0)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(
            "jmp".parse::<Instruction>(),
            Err(Error::MalformedLine("jmp".into()))
        );
        assert_eq!(
            "acc +1 +2".parse::<Instruction>(),
            Err(Error::MalformedLine("acc +1 +2".into()))
        );
        assert!(matches!(
            "acc one".parse::<Instruction>(),
            Err(Error::InvalidArgument { argument, .. }) if argument == "one"
        ));
    }

    #[test]
    fn displays_with_explicit_sign() {
        assert_eq!(Instruction::Nop(0).to_string(), "nop +0");
        assert_eq!(Instruction::Jmp(-4).to_string(), "jmp -4");
        assert_eq!(Instruction::Acc(6).to_string(), "acc +6");
    }

    #[test]
    fn opposite_is_an_involution() {
        for instr in [
            Instruction::Nop(0),
            Instruction::Nop(-12),
            Instruction::Jmp(5),
            Instruction::Acc(3),
        ] {
            assert_eq!(instr.to_opposite().to_opposite(), instr);
        }

        assert_eq!(Instruction::Nop(2).to_opposite(), Instruction::Jmp(2));
        assert_eq!(Instruction::Acc(2).to_opposite(), Instruction::Acc(2));
    }

    #[test]
    fn only_nop_and_jmp_are_possibly_corrupt() {
        assert!(Instruction::Nop(1).is_possibly_corrupt());
        assert!(Instruction::Jmp(1).is_possibly_corrupt());
        assert!(!Instruction::Acc(1).is_possibly_corrupt());
    }
}
