use std::str::FromStr;

use fxhash::FxHashSet;
use log::{debug, info, trace};

use crate::{
    error::{Error, Result},
    instruction::Instruction,
    machine::Machine,
};

/// Indices executed during one run.
pub type ExecutionTrace = FxHashSet<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    HaltedNormal,
    /// Stopped right before executing `repeated` a second time.
    HaltedLoop { repeated: usize },
}

impl State {
    pub fn exited_normally(&self) -> bool {
        *self == State::HaltedNormal
    }

    pub fn is_halted(&self) -> bool {
        *self != State::Running
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Program {
        Program { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.instructions.get(index).copied()
    }

    /// Swaps the instruction at `index` for its opposite. Returns `false`
    /// (and changes nothing) if it can't be corrupt or doesn't exist.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.instructions.get_mut(index) {
            Some(instr) if instr.is_possibly_corrupt() => {
                *instr = instr.to_opposite();
                true
            }
            _ => false,
        }
    }

    /// Performs a single transition of the run state machine.
    pub fn step(&self, machine: &mut Machine, trace: &mut ExecutionTrace) -> Result<State> {
        let pc = machine.program_counter;

        if pc == self.len() {
            return Ok(State::HaltedNormal);
        }

        let Some(instr) = self.get(pc) else {
            return Err(Error::ProgramCounterOutOfBounds {
                pc,
                len: self.len(),
            });
        };

        if !trace.insert(pc) {
            return Ok(State::HaltedLoop { repeated: pc });
        }

        trace!("{pc:>4}: {instr}  acc={}", machine.accumulator);
        machine.execute(instr)?;

        Ok(State::Running)
    }

    /// Runs until halted, recording every executed index in `trace`.
    pub fn execute_traced(
        &self,
        machine: &mut Machine,
        trace: &mut ExecutionTrace,
    ) -> Result<State> {
        let mut state = State::Running;
        while !state.is_halted() {
            state = self.step(machine, trace)?;
        }

        debug!(
            "halted: {state:?} after {} steps, acc={}",
            trace.len(),
            machine.accumulator
        );

        Ok(state)
    }

    pub fn execute_on(&self, machine: &mut Machine) -> Result<State> {
        self.execute_traced(machine, &mut ExecutionTrace::default())
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Program::new(iter.into_iter().collect())
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(input: &str) -> Result<Program> {
        let program = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                line.parse::<Instruction>().map_err(|e| Error::AtLine {
                    line: i + 1,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Program>>()?;

        info!("parsed program of {} instructions", program.len());

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_off_the_end() {
        let program = Program::new(vec![Instruction::Acc(1)]);
        let mut machine = Machine::new();

        assert_eq!(program.execute_on(&mut machine), Ok(State::HaltedNormal));
        assert_eq!(machine.accumulator, 1);
    }

    #[test]
    fn jumping_actually_jumps() {
        let program: Program = "jmp +2\nacc +1\nacc +2".parse().unwrap();
        let mut machine = Machine::new();

        assert_eq!(program.execute_on(&mut machine), Ok(State::HaltedNormal));
        assert_eq!(machine.accumulator, 2);
    }

    #[test]
    fn empty_program_halts_immediately() {
        let program = Program::new(vec![]);
        let mut machine = Machine::new();

        assert!(program.execute_on(&mut machine).unwrap().exited_normally());
        assert_eq!(machine, Machine::new());
    }

    #[test]
    fn halts_before_repeating() {
        let program: Program = "acc +3\njmp -1".parse().unwrap();
        let mut machine = Machine::new();

        assert_eq!(
            program.execute_on(&mut machine),
            Ok(State::HaltedLoop { repeated: 0 })
        );
        assert_eq!(machine.accumulator, 3);
        assert_eq!(machine.program_counter, 0);
    }

    #[test]
    fn step_by_step() {
        let program: Program = "nop +0\njmp -1".parse().unwrap();
        let mut machine = Machine::new();
        let mut trace = ExecutionTrace::default();

        assert_eq!(program.step(&mut machine, &mut trace), Ok(State::Running));
        assert_eq!(program.step(&mut machine, &mut trace), Ok(State::Running));
        assert_eq!(
            program.step(&mut machine, &mut trace),
            Ok(State::HaltedLoop { repeated: 0 })
        );
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn jump_past_the_end_is_an_error() {
        let program: Program = "jmp +5\nacc +1".parse().unwrap();
        let mut machine = Machine::new();

        assert_eq!(
            program.execute_on(&mut machine),
            Err(Error::ProgramCounterOutOfBounds { pc: 5, len: 2 })
        );
    }

    #[test]
    fn toggle_flips_only_nop_and_jmp() {
        let mut program: Program = "nop +1\nacc +1\njmp -2".parse().unwrap();

        assert!(program.toggle(0));
        assert!(!program.toggle(1));
        assert!(program.toggle(2));
        assert!(!program.toggle(3));

        assert_eq!(
            program.instructions(),
            &[
                Instruction::Jmp(1),
                Instruction::Acc(1),
                Instruction::Nop(-2)
            ]
        );
    }

    #[test]
    fn parse_errors_carry_the_line_number() {
        let err = "nop +0\n\nfoo +1".parse::<Program>().unwrap_err();

        assert_eq!(
            err,
            Error::AtLine {
                line: 3,
                source: Box::new(Error::InvalidInstruction("foo".into())),
            }
        );
        assert_eq!(err.to_string(), "line 3: invalid instruction: \"foo\"");
    }
}
