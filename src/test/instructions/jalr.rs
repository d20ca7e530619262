use super::*;

#[test]
fn links_and_jumps() {
    instruction_jumps! {
        instr_jalr!(R1, R2),
        [R2 = 0x3000] => [R1 = constants::OUTPUT_BASE + 1],
        0x3000
    };
}

#[test]
fn zero_register_discards_link() {
    instruction_jumps! {
        instr_jalr!(ZERO, R2),
        [R2 = 0x1234] => [],
        0x1234
    };
}

#[test]
fn link_written_before_target_read() {
    instruction_jumps! {
        instr_jalr!(R1, R1),
        [R1 = 0x7777] => [R1 = constants::OUTPUT_BASE + 1],
        constants::OUTPUT_BASE + 1
    };
}

#[test]
fn nonzero_a_field_is_never_an_interrupt() {
    // The low bits match the interrupt tail, but the destination is not the
    // zero register, so this is an ordinary jump-and-link.
    instruction_jumps! {
        instr_jalr!(R1, R2) | 0b0000001,
        [R2 = 0x2345] => [R1 = constants::OUTPUT_BASE + 1],
        0x2345
    };
}

#[test]
fn interrupt_tail_must_match_exactly() {
    // Zero destination and a set low bit, but the low seven bits are not
    // exactly the interrupt tail: still a jump.
    instruction_jumps! {
        instr_jalr!(ZERO, R2) | 0b0000011,
        [R2 = 0x4242] => [],
        0x4242
    };
}
