//! Handheld halting: a three-instruction console with loop detection and a
//! search for the single corrupted instruction.

pub mod error;
pub mod instruction;
pub mod machine;
pub mod program;
pub mod repair;

pub use error::{Error, Result};
pub use instruction::{split_words, Instruction};
pub use machine::Machine;
pub use program::{ExecutionTrace, Program, State};
pub use repair::{repair, Repair};

/// Accumulator right before the first repeated instruction (or at exit).
pub fn solve(input: &str) -> Result<i64> {
    let program: Program = input.parse()?;
    let mut machine = Machine::new();
    program.execute_on(&mut machine)?;

    Ok(machine.accumulator)
}

/// Accumulator after the repaired program terminates, if it can be repaired.
pub fn bonus(input: &str) -> Result<Option<i64>> {
    let program: Program = input.parse()?;

    Ok(repair(&program).map(|fix| fix.accumulator))
}
