use log::debug;

use crate::{
    instruction::Instruction,
    machine::Machine,
    program::{Program, State},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    pub index: usize,
    pub replacement: Instruction,
    pub accumulator: i64,
}

/// Tries flipping each `nop`/`jmp` in program order and returns the first
/// variant that runs off the end. Candidates that error are rejected like
/// looping ones.
pub fn repair(program: &Program) -> Option<Repair> {
    let mut candidate = program.clone();
    let mut machine = Machine::new();

    for index in 0..candidate.len() {
        if !candidate.toggle(index) {
            continue;
        }

        match candidate.execute_on(machine.reset()) {
            Ok(State::HaltedNormal) => {
                return candidate.get(index).map(|replacement| Repair {
                    index,
                    replacement,
                    accumulator: machine.accumulator,
                });
            }
            Ok(state) => debug!("flipping {index} still ends in {state:?}"),
            Err(err) => debug!("flipping {index} fails: {err}"),
        }

        candidate.toggle(index);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_flip() {
        let program: Program = "acc +1\nacc +2".parse().unwrap();
        assert_eq!(repair(&program), None);
    }

    #[test]
    fn first_fix_wins() {
        // flipping index 1 would also terminate, with acc=2
        let program: Program = "nop +3\njmp +0\nacc +1\nacc +1".parse().unwrap();

        assert_eq!(
            repair(&program),
            Some(Repair {
                index: 0,
                replacement: Instruction::Jmp(3),
                accumulator: 1,
            })
        );
    }

    #[test]
    fn skips_flips_that_jump_out_of_bounds() {
        let program: Program = "nop -5\njmp +0".parse().unwrap();

        assert_eq!(
            repair(&program),
            Some(Repair {
                index: 1,
                replacement: Instruction::Nop(0),
                accumulator: 0,
            })
        );
    }

    #[test]
    fn leaves_the_original_untouched() {
        let program: Program = "jmp +0".parse().unwrap();
        let before = program.clone();

        assert!(repair(&program).is_some());
        assert_eq!(program, before);
    }
}
