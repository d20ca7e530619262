//! Typed view of encoded instruction words.
//!
//! [`decode`](fn.decode.html) never fails: every 16-bit word is some
//! instruction, mirroring the machine's own decoder. Encoding a decoded word
//! normalizes the unused bits, so `decode(i.encode()) == i` holds for every
//! [`Instruction`](enum.Instruction.html) value.

use byteorder::ByteOrder;
use dvm::constants;
use dvm::{
    make_irq_instruction, make_jalr_instruction, make_ri_instruction, make_rri_instruction,
    make_rrr_instruction, Endian, Immediate, Interrupt, Opcode, RegisterId, Word,
};
use num_traits::FromPrimitive;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Add { a: RegisterId, b: RegisterId, c: RegisterId },
    Addi { a: RegisterId, b: RegisterId, immediate: Immediate },
    Nand { a: RegisterId, b: RegisterId, c: RegisterId },
    Lui { a: RegisterId, immediate: Word },
    Sw { a: RegisterId, b: RegisterId, immediate: Immediate },
    Lw { a: RegisterId, b: RegisterId, immediate: Immediate },
    Beq { a: RegisterId, b: RegisterId, immediate: Immediate },
    Jalr { a: RegisterId, b: RegisterId },
    Irq { kind: Interrupt },
}

fn register(field: Word) -> RegisterId {
    // The field is three bits wide, so every value names a register.
    RegisterId::from_u16(field).unwrap_or(RegisterId::ZERO)
}

fn field_a(word: Word) -> RegisterId {
    register((word & constants::RA_MASK) >> constants::RA_OFFSET)
}

fn field_b(word: Word) -> RegisterId {
    register((word & constants::RB_MASK) >> constants::RB_OFFSET)
}

fn field_c(word: Word) -> RegisterId {
    register((word & constants::RC_MASK) >> constants::RC_OFFSET)
}

fn imm7(word: Word) -> Immediate {
    // Shift the 7-bit field into the top of an i8 and back down to extend
    // the sign.
    ((((word & constants::IMM7_MASK) as u8) << 1) as i8) >> 1
}

/// Decodes one instruction word.
pub fn decode(word: Word) -> Instruction {
    let op_code = (word & constants::OPCODE_MASK) >> constants::OPCODE_OFFSET;

    match Opcode::from_u16(op_code) {
        Some(Opcode::ADD) => Instruction::Add {
            a: field_a(word),
            b: field_b(word),
            c: field_c(word),
        },
        Some(Opcode::ADDI) => Instruction::Addi {
            a: field_a(word),
            b: field_b(word),
            immediate: imm7(word),
        },
        Some(Opcode::NAND) => Instruction::Nand {
            a: field_a(word),
            b: field_b(word),
            c: field_c(word),
        },
        Some(Opcode::LUI) => Instruction::Lui {
            a: field_a(word),
            immediate: word & constants::IMM10_MASK,
        },
        Some(Opcode::SW) => Instruction::Sw {
            a: field_a(word),
            b: field_b(word),
            immediate: imm7(word),
        },
        Some(Opcode::LW) => Instruction::Lw {
            a: field_a(word),
            b: field_b(word),
            immediate: imm7(word),
        },
        Some(Opcode::BEQ) => Instruction::Beq {
            a: field_a(word),
            b: field_b(word),
            immediate: imm7(word),
        },
        Some(Opcode::JALR) => {
            if field_a(word) == RegisterId::ZERO
                && (word & constants::IRQ_TAIL_MASK) == constants::IRQ_TAIL
            {
                let kind = (word & constants::RB_MASK) >> constants::RB_OFFSET;
                Instruction::Irq {
                    kind: Interrupt::from_u16(kind).unwrap_or(Interrupt::FAILURE),
                }
            } else {
                Instruction::Jalr {
                    a: field_a(word),
                    b: field_b(word),
                }
            }
        }
        None => unreachable!(),
    }
}

impl Instruction {
    /// Encodes the instruction back into a word with all unused bits clear.
    pub fn encode(&self) -> Word {
        match *self {
            Instruction::Add { a, b, c } => make_rrr_instruction(Opcode::ADD, a, b, c),
            Instruction::Addi { a, b, immediate } => {
                make_rri_instruction(Opcode::ADDI, a, b, immediate)
            }
            Instruction::Nand { a, b, c } => make_rrr_instruction(Opcode::NAND, a, b, c),
            Instruction::Lui { a, immediate } => make_ri_instruction(Opcode::LUI, a, immediate),
            Instruction::Sw { a, b, immediate } => {
                make_rri_instruction(Opcode::SW, a, b, immediate)
            }
            Instruction::Lw { a, b, immediate } => {
                make_rri_instruction(Opcode::LW, a, b, immediate)
            }
            Instruction::Beq { a, b, immediate } => {
                make_rri_instruction(Opcode::BEQ, a, b, immediate)
            }
            Instruction::Jalr { a, b } => make_jalr_instruction(a, b),
            Instruction::Irq { kind } => make_irq_instruction(kind),
        }
    }
}

fn reg(id: RegisterId) -> String {
    format!("${}", id.to_string().to_lowercase())
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Instruction::Add { a, b, c } => {
                write!(f, "add {}, {}, {}", reg(a), reg(b), reg(c))
            }
            Instruction::Addi { a, b, immediate } => {
                write!(f, "addi {}, {}, {}", reg(a), reg(b), immediate)
            }
            Instruction::Nand { a, b, c } => {
                write!(f, "nand {}, {}, {}", reg(a), reg(b), reg(c))
            }
            Instruction::Lui { a, immediate } => write!(f, "lui {}, {}", reg(a), immediate),
            Instruction::Sw { a, b, immediate } => {
                write!(f, "sw {}, {}, {}", reg(a), reg(b), immediate)
            }
            Instruction::Lw { a, b, immediate } => {
                write!(f, "lw {}, {}, {}", reg(a), reg(b), immediate)
            }
            Instruction::Beq { a, b, immediate } => {
                write!(f, "beq {}, {}, {}", reg(a), reg(b), immediate)
            }
            Instruction::Jalr { a, b } => write!(f, "jalr {}, {}", reg(a), reg(b)),
            Instruction::Irq { kind } => {
                write!(f, "irq {}", kind.to_string().to_lowercase())
            }
        }
    }
}

/// Decodes a big-endian script image. A trailing odd byte is read the way
/// the machine's loader would place it, in the high half of a final word.
pub fn disassemble(image: &[u8]) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity((image.len() + 1) / constants::WORD_BYTES);
    let mut chunks = image.chunks_exact(constants::WORD_BYTES);
    for chunk in &mut chunks {
        instructions.push(decode(Endian::read_u16(chunk)));
    }
    if let [byte] = chunks.remainder() {
        instructions.push(decode(Word::from(*byte) << 8));
    }
    instructions
}
