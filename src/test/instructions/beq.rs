use super::*;

#[test]
fn taken_forward() {
    instruction_jumps! {
        instr_rri!(BEQ, R1, R2, 5),
        [R1 = 9, R2 = 9] => [],
        constants::OUTPUT_BASE + 6
    };
}

#[test]
fn taken_backward() {
    instruction_jumps! {
        instr_rri!(BEQ, R1, R2, -2),
        [R1 = 9, R2 = 9] => [],
        constants::OUTPUT_BASE - 1
    };
}

#[test]
fn not_taken() {
    instruction_runs! {
        instr_rri!(BEQ, R1, R2, 5),
        [R1 = 1, R2 = 2] => []
    };
}

#[test]
fn zero_against_zero_always_taken() {
    instruction_jumps! {
        instr_rri!(BEQ, ZERO, ZERO, 63),
        [] => [],
        constants::OUTPUT_BASE + 64
    };
}

#[test]
fn self_branch_stays_put() {
    instruction_jumps! {
        instr_rri!(BEQ, ZERO, ZERO, -1),
        [] => [],
        constants::OUTPUT_BASE
    };
}
