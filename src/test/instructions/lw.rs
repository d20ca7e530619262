use super::*;

#[test]
fn loads_from_base_plus_offset() {
    instruction_runs! {
        instr_rri!(LW, R1, R2, 4),
        [R2 = 0x1000] => [R1 = 77],
        [(0x1004, 77)] => [(0x1004, 77)]
    };
}

#[test]
fn negative_offset() {
    instruction_runs! {
        instr_rri!(LW, R1, R2, -1),
        [R2 = 0x1000] => [R1 = 5],
        [(0x0FFF, 5)] => [(0x0FFF, 5)]
    };
}

#[test]
fn effective_address_wraps() {
    instruction_runs! {
        instr_rri!(LW, R1, ZERO, -2),
        [] => [R1 = 0x0102],
        [(0xFFFE, 0x0102)] => [(0xFFFE, 0x0102)]
    };
}

#[test]
fn zero_register_discards_load() {
    instruction_runs! {
        instr_rri!(LW, ZERO, R2, 0),
        [R2 = 0x1000] => [],
        [(0x1000, 1234)] => [(0x1000, 1234)]
    };
}
