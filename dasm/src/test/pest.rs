use crate::parser::{DasmParser, Rule};
use ::pest::*;

#[test]
fn comment() {
    parses_to! {
        parser: DasmParser,
        input: "# duel scripts are tiny",
        rule: Rule::COMMENT,
        tokens: []
    };
}

#[test]
fn dec_int() {
    parses_to! {
        parser: DasmParser,
        input: "4492",
        rule: Rule::dec_int,
        tokens: [dec_int(0, 4)]
    };

    parses_to! {
        parser: DasmParser,
        input: "-63",
        rule: Rule::dec_int,
        tokens: [dec_int(0, 3)]
    };
}

#[test]
fn bin_uint() {
    parses_to! {
        parser: DasmParser,
        input: "0b01011",
        rule: Rule::bin_uint,
        tokens: [bin_uint(0, 7, [ bin_lit(2, 7) ])]
    };
}

#[test]
fn oct_uint() {
    parses_to! {
        parser: DasmParser,
        input: "0o1726",
        rule: Rule::oct_uint,
        tokens: [oct_uint(0, 6, [ oct_lit(2, 6) ])]
    };
}

#[test]
fn hex_uint() {
    parses_to! {
        parser: DasmParser,
        input: "0x2FfE",
        rule: Rule::hex_uint,
        tokens: [hex_uint(0, 6, [ hex_lit(2, 6) ])]
    };
}

#[test]
fn identifier() {
    parses_to! {
        parser: DasmParser,
        input: "some label",
        rule: Rule::identifier,
        tokens: [ identifier(0, 4) ]
    };

    fails_with! {
        parser: DasmParser,
        input: "9lives",
        rule: Rule::identifier,
        positives: vec![Rule::identifier],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn register() {
    parses_to! {
        parser: DasmParser,
        input: "$r3",
        rule: Rule::register,
        tokens: [ register(0, 3, [ identifier(1, 3) ]) ]
    };
}

#[test]
fn label() {
    parses_to! {
        parser: DasmParser,
        input: "loop:",
        rule: Rule::label,
        tokens: [ label(0, 5, [ identifier(0, 4) ]) ]
    };
}

#[test]
fn instruction_rrr() {
    parses_to! {
        parser: DasmParser,
        input: "nand $r1, $r2, $r3",
        rule: Rule::instruction,
        tokens: [
            instruction(0, 18, [
                instruction_rrr(0, 18, [
                    rrr_op(0, 4),
                    register(5, 8, [ identifier(6, 8) ]),
                    register(10, 13, [ identifier(11, 13) ]),
                    register(15, 18, [ identifier(16, 18) ])
                ])
            ])
        ]
    };
}

#[test]
fn instruction_irq() {
    parses_to! {
        parser: DasmParser,
        input: "irq yield",
        rule: Rule::instruction,
        tokens: [
            instruction(0, 9, [
                instruction_irq(0, 9, [
                    identifier(4, 9)
                ])
            ])
        ]
    };
}

#[test]
fn addi_prefers_rri_over_rrr() {
    parses_to! {
        parser: DasmParser,
        input: "addi $r1, $r2, -4",
        rule: Rule::instruction,
        tokens: [
            instruction(0, 17, [
                instruction_rri(0, 17, [
                    rri_op(0, 4),
                    register(5, 8, [ identifier(6, 8) ]),
                    register(10, 13, [ identifier(11, 13) ]),
                    int(15, 17, [ dec_int(15, 17) ])
                ])
            ])
        ]
    };
}
