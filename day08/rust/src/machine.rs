use crate::{
    error::{Error, Result},
    instruction::Instruction,
};

/// Accumulator plus program counter of the hand-held console.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Machine {
    pub accumulator: i64,
    pub program_counter: usize,
}

impl Machine {
    pub fn new() -> Machine {
        Machine::default()
    }

    pub fn reset(&mut self) -> &mut Machine {
        self.accumulator = 0;
        self.program_counter = 0;
        self
    }

    pub fn execute(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {
            Instruction::Nop(_) => {
                self.program_counter += 1;
            }
            Instruction::Acc(n) => {
                let pc = self.program_counter;
                self.accumulator = self
                    .accumulator
                    .checked_add(n)
                    .ok_or(Error::AccumulatorOverflow {
                        pc,
                        accumulator: self.accumulator,
                        argument: n,
                    })?;
                self.program_counter += 1;
            }
            Instruction::Jmp(offset) => {
                let from = self.program_counter;
                self.program_counter = isize::try_from(offset)
                    .ok()
                    .and_then(|offset| from.checked_add_signed(offset))
                    .ok_or(Error::JumpOutOfBounds { from, offset })?;
            }
        }

        Ok(())
    }
}
