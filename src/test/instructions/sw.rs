use super::*;

#[test]
fn stores_at_base_plus_offset() {
    instruction_runs! {
        instr_rri!(SW, R1, R2, 4),
        [R1 = 23, R2 = 0x1000] => [],
        [] => [(0x1004, 23)]
    };
}

#[test]
fn negative_offset() {
    instruction_runs! {
        instr_rri!(SW, R1, R2, -4),
        [R1 = 23, R2 = 0x1000] => [],
        [] => [(0x0FFC, 23)]
    };
}

#[test]
fn effective_address_wraps() {
    instruction_runs! {
        instr_rri!(SW, R1, ZERO, -1),
        [R1 = 0xABCD] => [],
        [] => [(0xFFFF, 0xABCD)]
    };
}

#[test]
fn overwrites_previous_value() {
    instruction_runs! {
        instr_rri!(SW, R1, R2, 0),
        [R1 = 7, R2 = 0x1800] => [],
        [(0x1800, 99)] => [(0x1800, 7)]
    };
}
