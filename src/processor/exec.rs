use num_traits::FromPrimitive;
use std::num::Wrapping;

use crate::{constants, Interrupt, Memory, Opcode, RegisterFile, Word};

pub enum TickResult {
    Next,
    Jump(Word),
    Stop(Interrupt),
}

/// Sign-extends the low seven bits of an instruction word to a full word in
/// two's complement.
#[inline]
fn sext7(instruction: Word) -> Word {
    let imm = instruction & constants::IMM7_MASK;
    if imm & constants::IMM7_SIGN_MASK != 0 {
        imm | !constants::IMM7_MASK
    } else {
        imm
    }
}

/// Decodes and executes a single instruction word. Every 16-bit word decodes
/// to something; there is no fault path.
pub fn tick(
    registers: &mut RegisterFile,
    memory: &mut Memory,
    instruction: Word,
    program_counter: Word,
) -> TickResult {
    let op_code = (instruction & constants::OPCODE_MASK) >> constants::OPCODE_OFFSET;
    let op_code = Opcode::from_u16(op_code);

    let ra = ((instruction & constants::RA_MASK) >> constants::RA_OFFSET) as usize;
    let rb = ((instruction & constants::RB_MASK) >> constants::RB_OFFSET) as usize;
    let rc = ((instruction & constants::RC_MASK) >> constants::RC_OFFSET) as usize;

    let b = Wrapping(registers.read(rb));
    let c = Wrapping(registers.read(rc));
    let imm7 = Wrapping(sext7(instruction));
    let pc = Wrapping(program_counter);

    match op_code {
        Some(Opcode::ADD) => {
            registers.write(ra, (b + c).0);
            TickResult::Next
        }

        Some(Opcode::ADDI) => {
            registers.write(ra, (b + imm7).0);
            TickResult::Next
        }

        Some(Opcode::NAND) => {
            registers.write(ra, !(b.0 & c.0));
            TickResult::Next
        }

        Some(Opcode::LUI) => {
            registers.write(
                ra,
                (instruction & constants::IMM10_MASK) << constants::LUI_SHIFT,
            );
            TickResult::Next
        }

        Some(Opcode::SW) => {
            memory.write((b + imm7).0, registers.read(ra));
            TickResult::Next
        }

        Some(Opcode::LW) => {
            registers.write(ra, memory.read((b + imm7).0));
            TickResult::Next
        }

        Some(Opcode::BEQ) => {
            if registers.read(ra) == b.0 {
                TickResult::Jump((pc + Wrapping(1) + imm7).0)
            } else {
                TickResult::Next
            }
        }

        Some(Opcode::JALR) => {
            if ra == 0 && (instruction & constants::IRQ_TAIL_MASK) == constants::IRQ_TAIL {
                let kind = (instruction & constants::RB_MASK) >> constants::RB_OFFSET;
                // Kinds beyond the three defined ones terminate as failure.
                return TickResult::Stop(
                    Interrupt::from_u16(kind).unwrap_or(Interrupt::FAILURE),
                );
            }

            // The link is written before the target is read, so with a == b
            // the jump lands on the following instruction.
            registers.write(ra, (pc + Wrapping(1)).0);
            TickResult::Jump(registers.read(rb))
        }

        // The opcode field is three bits wide and all eight values are
        // covered above.
        None => unreachable!(),
    }
}
