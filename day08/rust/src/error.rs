use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid instruction: {0:?}")]
    InvalidInstruction(String),

    #[error("expected `<mnemonic> <argument>`, found {0:?}")]
    MalformedLine(String),

    #[error("invalid argument {argument:?}")]
    InvalidArgument {
        argument: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("jump {offset:+} from {from} lands before the start of the program")]
    JumpOutOfBounds { from: usize, offset: i64 },

    #[error("acc {argument:+} at {pc} overflows accumulator {accumulator}")]
    AccumulatorOverflow {
        pc: usize,
        accumulator: i64,
        argument: i64,
    },

    #[error("program counter {pc} is past the end of a {len} instruction program")]
    ProgramCounterOutOfBounds { pc: usize, len: usize },
}
