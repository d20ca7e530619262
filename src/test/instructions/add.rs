use super::*;

#[test]
fn sums_registers() {
    instruction_runs! {
        instr_rrr!(ADD, R3, R1, R2),
        [R1 = 42, R2 = 64] => [R3 = 106]
    };
}

#[test]
fn wraps_on_overflow() {
    instruction_runs! {
        instr_rrr!(ADD, R3, R1, R2),
        [R1 = 0xFFFF, R2 = 2] => [R3 = 1]
    };
}

#[test]
fn doubles_through_shared_source() {
    instruction_runs! {
        instr_rrr!(ADD, R1, R1, R1),
        [R1 = 0x0101] => [R1 = 0x0202]
    };
}

#[test]
fn unused_middle_bits_are_ignored() {
    instruction_runs! {
        instr_rrr!(ADD, R3, R1, R2) | 0b0000_0000_0111_1000,
        [R1 = 5, R2 = 6] => [R3 = 11]
    };
}
