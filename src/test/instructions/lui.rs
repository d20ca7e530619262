use super::*;

#[test]
fn shifts_into_upper_bits() {
    instruction_runs! {
        instr_ri!(LUI, R1, 0x48),
        [] => [R1 = 0x1200]
    };
}

#[test]
fn maximum_immediate() {
    instruction_runs! {
        instr_ri!(LUI, R1, 0x3FF),
        [] => [R1 = 0xFFC0]
    };
}

#[test]
fn clears_low_six_bits() {
    instruction_runs! {
        instr_ri!(LUI, R1, 1),
        [R1 = 0x003F] => [R1 = 0x0040]
    };
}

#[test]
fn zero_register_discards_result() {
    instruction_runs! {
        instr_ri!(LUI, ZERO, 0x3FF),
        [] => []
    };
}
