use super::*;

#[test]
fn positive_immediate() {
    instruction_runs! {
        instr_rri!(ADDI, R2, R1, 63),
        [R1 = 100] => [R2 = 163]
    };
}

#[test]
fn negative_immediate() {
    instruction_runs! {
        instr_rri!(ADDI, R2, R1, -64),
        [R1 = 100] => [R2 = 36]
    };
}

#[test]
fn wraps_below_zero() {
    instruction_runs! {
        instr_rri!(ADDI, R2, R1, -1),
        [R1 = 0] => [R2 = 0xFFFF]
    };
}

#[test]
fn loads_small_constant_through_zero() {
    instruction_runs! {
        instr_rri!(ADDI, R2, ZERO, 17),
        [] => [R2 = 17]
    };
}
