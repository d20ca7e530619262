use super::*;

#[test]
fn negated_conjunction() {
    instruction_runs! {
        instr_rrr!(NAND, R3, R1, R2),
        [R1 = 0b1100, R2 = 0b1010] => [R3 = !0b1000]
    };
}

#[test]
fn self_nand_is_complement() {
    instruction_runs! {
        instr_rrr!(NAND, R2, R1, R1),
        [R1 = 0x00FF] => [R2 = 0xFF00]
    };
}

#[test]
fn zero_operand_yields_all_ones() {
    instruction_runs! {
        instr_rrr!(NAND, R2, R1, ZERO),
        [R1 = 0xBEEF] => [R2 = 0xFFFF]
    };
}
