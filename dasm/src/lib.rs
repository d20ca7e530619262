//! Assembler for the [dvm](../dvm/index.html) virtual machine.
//!
//! The heart of this crate is the [`Assembler`](struct.Assembler.html): a
//! streaming encoder that appends one instruction at a time and resolves
//! symbolic [`Label`](struct.Label.html)s to program-counter values, whether
//! they are bound before or after the jumps that target them. [`assemble`]
//! and [`assemble_addressed`] layer a small text language on top of it, and
//! the [`disasm`](disasm/index.html) types go the other way.
//!
//! # Assembly language
//!
//! One instruction per statement; `#` starts a comment; `name:` binds a
//! label. Registers are written `$r0`..`$r7` (or `$zero`), case-insensitive.
//! Integer literals can be signed decimal, hexadecimal (`0x`), octal (`0o`)
//! or binary (`0b`).
//!
//! Mnemonic | Syntax | Effect
//! ---------|--------|-------
//! `add`    | `add $a, $b, $c`     | `a = b + c`
//! `addi`   | `addi $a, $b, imm7`  | `a = b + imm7`
//! `nand`   | `nand $a, $b, $c`    | `a = ~(b & c)`
//! `lui`    | `lui $a, imm10`      | `a = imm10 << 6`
//! `sw`     | `sw $a, $b, imm7`    | `mem[b + imm7] = a`
//! `lw`     | `lw $a, $b, imm7`    | `a = mem[b + imm7]`
//! `beq`    | `beq $a, $b, imm7`   | branch by `imm7` when `a == b`
//! `jalr`   | `jalr $a, $b`        | `a = pc + 1`, jump to `b`
//! `irq`    | `irq kind`           | raise `success`, `yield` or `failure`
//! `movi`   | `movi $a, imm16`     | expands to `lui` + `addi`
//! `nop`    | `nop`                | `add $r0, $r0, $r0`
//! `jmp`    | `jmp name`           | one-word branch to a label
//! `farjmp` | `farjmp $a, name`    | three-word absolute jump through `$a`
//!
//! Every violation is fatal: out-of-range immediates, unknown registers,
//! unknown interrupt kinds, short jumps that resolve too far, and labels
//! still unbound when the image is rendered.
//!
//! [`assemble`]: fn.assemble.html
//! [`assemble_addressed`]: fn.assemble_addressed.html

mod assembler;
pub mod disasm;
mod error;
mod instructions;
mod int_util;
mod parser;


pub use crate::assembler::{Assembler, Label};
pub use crate::disasm::{decode, disassemble, Instruction};
pub use crate::error::{AssembleError, Error, Result};
pub use crate::parser::Rule;

use crate::parser::DasmParser;
use dvm::constants;
use dvm::Word;
use pest::iterators::Pair;
use pest::{Parser, Span};

/// Assembles source text into a big-endian script image, resolving absolute
/// addresses against the given load origin.
pub fn assemble_addressed(input: &str, origin: Word) -> Result<Vec<u8>> {
    let pair = parse(input)?;
    let mut assembler = Assembler::with_origin(origin);
    instructions::process_program(pair, &mut assembler)?;
    assembler.finish().map_err(Error::from)
}

/// Assembles source text for the output-script region at word `0x2000`.
pub fn assemble(input: &str) -> Result<Vec<u8>> {
    assemble_addressed(input, constants::OUTPUT_BASE)
}

fn parse(input: &str) -> Result<Pair<Rule>> {
    Ok(DasmParser::parse(Rule::program, input)
        .map_err(|err| Error::Parse(Box::new(err)))?
        .next()
        .unwrap())
}

pub(crate) fn new_parser_error(span: Span, message: String) -> Error {
    Error::Parse(Box::new(pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError { message },
        span,
    )))
}
