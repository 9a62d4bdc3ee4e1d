use day08::{
    bonus, repair, solve, Error, ExecutionTrace, Instruction, Machine, Program, Repair, State,
};
use pretty_assertions::assert_eq;

const EXAMPLE: &str = "nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

#[test]
fn self_jump_loops_immediately() {
    let program = Program::new(vec![Instruction::Jmp(0)]);
    let mut machine = Machine::new();

    let state = program.execute_on(&mut machine).unwrap();

    assert_eq!(state, State::HaltedLoop { repeated: 0 });
    assert!(!state.exited_normally());
    assert_eq!(machine.accumulator, 0);
}

#[test]
fn equal_instructions_at_different_positions_both_run() {
    let instr = Instruction::parse("acc", 1).unwrap();
    let program = Program::new(vec![instr, instr]);
    let mut machine = Machine::new();

    assert_eq!(program.execute_on(&mut machine), Ok(State::HaltedNormal));
    assert_eq!(machine.accumulator, 2);
}

#[test]
fn example_halts_in_a_loop() {
    let program: Program = EXAMPLE.parse().unwrap();
    let mut machine = Machine::new();

    assert_eq!(
        program.execute_on(&mut machine),
        Ok(State::HaltedLoop { repeated: 1 })
    );
    assert_eq!(machine.accumulator, 5);
    assert_eq!(solve(EXAMPLE), Ok(5));
}

#[test]
fn example_can_be_repaired() {
    let program: Program = EXAMPLE.parse().unwrap();

    assert_eq!(
        repair(&program),
        Some(Repair {
            index: 7,
            replacement: Instruction::Nop(-4),
            accumulator: 8,
        })
    );
    assert_eq!(bonus(EXAMPLE), Ok(Some(8)));
}

#[test]
fn runs_never_exceed_program_length() {
    let program: Program = EXAMPLE.parse().unwrap();
    let mut machine = Machine::new();
    let mut trace = ExecutionTrace::default();

    program.execute_traced(&mut machine, &mut trace).unwrap();

    assert!(trace.len() <= program.len());
    assert_eq!(trace.len(), 7);
    assert!(!trace.contains(&5) && !trace.contains(&8));
}

#[test]
fn exit_status_per_program() {
    let good_program = Program::new(vec![Instruction::Acc(1)]);
    let corrupt_program = Program::new(vec![Instruction::Jmp(0)]);
    let mut machine = Machine::new();

    let good = good_program.execute_on(&mut machine).unwrap();
    let corrupt = corrupt_program.execute_on(machine.reset()).unwrap();

    assert!(good.exited_normally());
    assert!(!corrupt.exited_normally());
}

#[test]
fn reset_is_independent_of_history() {
    let program: Program = EXAMPLE.parse().unwrap();
    let mut machine = Machine::new();

    program.execute_on(&mut machine).unwrap();
    assert_eq!(*machine.reset(), Machine::new());

    program.execute_on(&mut machine).unwrap();
    assert_eq!(machine.accumulator, 5);
}

#[test]
fn bad_input_is_reported() {
    assert_eq!(
        solve("nop +0\nhcf +1\n"),
        Err(Error::AtLine {
            line: 2,
            source: Box::new(Error::InvalidInstruction("hcf".into())),
        })
    );
    assert!(matches!(solve("acc\n"), Err(Error::AtLine { line: 1, .. })));
}

#[test]
fn accumulator_overflow_is_reported() {
    assert!(matches!(
        solve("acc +9223372036854775807\nacc +1\n"),
        Err(Error::AccumulatorOverflow { pc: 1, .. })
    ));
}
