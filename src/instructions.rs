use crate::{constants, Immediate, Word};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::ToPrimitive;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

/// Machine instruction set.
///
/// Instruction Formats:
///
/// | Format | Bits 15-13 | Bits 12-10 | Bits 9-7 | Bits 6-3 | Bits 2-0 |
/// |--------|------------|------------|----------|----------|----------|
/// | RRR    | opcode     | Ra         | Rb       | unused   | Rc       |
/// | RRI    | opcode     | Ra         | Rb       | imm7     | imm7     |
/// | RI     | opcode     | Ra         | imm10    | imm10    | imm10    |
/// | JALR   | opcode     | Ra         | Rb       | zero     | zero     |
///
/// An interrupt request shares opcode 7 with [`JALR`](#variant.JALR); the two
/// are told apart by the A field and the low seven bits, never by the low bit
/// alone (see [`make_irq_instruction`](fn.make_irq_instruction.html)).
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive)]
pub enum Opcode {
    /// Add.
    ///
    /// Format: `RRR`.
    /// Sets `Ra` to `Rb + Rc` (wrapping).
    ADD,
    /// Add immediate.
    ///
    /// Format: `RRI`.
    /// Sets `Ra` to `Rb + sext(imm7)` (wrapping).
    ADDI,
    /// Not-and.
    ///
    /// Format: `RRR`.
    /// Sets `Ra` to `~(Rb & Rc)`.
    NAND,
    /// Load upper immediate.
    ///
    /// Format: `RI`.
    /// Sets `Ra` to `imm10 << 6`; the low six bits end up clear.
    LUI,
    /// Store word.
    ///
    /// Format: `RRI`.
    /// Writes `Ra` to memory at word address `Rb + sext(imm7)` (wrapping).
    SW,
    /// Load word.
    ///
    /// Format: `RRI`.
    /// Sets `Ra` to the memory word at address `Rb + sext(imm7)` (wrapping).
    LW,
    /// Branch if equal.
    ///
    /// Format: `RRI`.
    /// If `Ra == Rb`, sets the program counter to `PC + 1 + sext(imm7)`.
    BEQ,
    /// Jump and link register, or interrupt request.
    ///
    /// Format: `JALR`.
    /// Sets `Ra` to `PC + 1`, then the program counter to `Rb`. Since writes
    /// to the zero register vanish, `jalr $r0, $rX` is a plain indirect jump.
    JALR,
}

/// Interrupt kinds, doubling as the terminal state of a thread.
///
/// The kind is encoded in the B field of an interrupt-request word. Only the
/// success interrupt makes a verdict true; yielding ends the thread without
/// success.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive)]
pub enum Interrupt {
    /// The thread halted claiming success.
    SUCCESS,
    /// The thread gave up its remaining ticks.
    YIELD,
    /// The thread halted claiming failure.
    FAILURE,
}

/// List of available registers. `R0` always reads zero and discards writes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive)]
pub enum RegisterId {
    /// Always zero (read only).
    ZERO,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

#[inline]
pub fn enum_to_word<T: ToPrimitive + Copy>(val: T) -> Word {
    val.to_u16().unwrap()
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl std::fmt::Display for $e {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(Opcode);
impl_enum_display!(Interrupt);
impl_enum_display!(RegisterId);

#[inline]
pub fn register_index(id: RegisterId) -> usize {
    enum_to_word(id) as usize
}

/// Error type for parsing the instruction-set enums from text.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseEnumError {
    pub value: String,
    pub enum_name: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Failed to parse \"{}\" as {}.",
            &self.value, &self.enum_name
        )
    }
}

impl StdError for ParseEnumError {}

impl FromStr for RegisterId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<RegisterId, ParseEnumError> {
        match s {
            "ZERO" | "R0" => Ok(RegisterId::ZERO),
            "R1" => Ok(RegisterId::R1),
            "R2" => Ok(RegisterId::R2),
            "R3" => Ok(RegisterId::R3),
            "R4" => Ok(RegisterId::R4),
            "R5" => Ok(RegisterId::R5),
            "R6" => Ok(RegisterId::R6),
            "R7" => Ok(RegisterId::R7),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "RegisterId",
            }),
        }
    }
}

impl FromStr for Opcode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Opcode, ParseEnumError> {
        match s {
            "ADD" => Ok(Opcode::ADD),
            "ADDI" => Ok(Opcode::ADDI),
            "NAND" => Ok(Opcode::NAND),
            "LUI" => Ok(Opcode::LUI),
            "SW" => Ok(Opcode::SW),
            "LW" => Ok(Opcode::LW),
            "BEQ" => Ok(Opcode::BEQ),
            "JALR" => Ok(Opcode::JALR),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "Opcode",
            }),
        }
    }
}

impl FromStr for Interrupt {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Interrupt, ParseEnumError> {
        match s {
            "SUCCESS" => Ok(Interrupt::SUCCESS),
            "YIELD" => Ok(Interrupt::YIELD),
            "FAILURE" => Ok(Interrupt::FAILURE),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "Interrupt",
            }),
        }
    }
}

/// Constructs an RRR-format instruction.
#[inline]
pub fn make_rrr_instruction(
    oc: Opcode,
    a: RegisterId,
    b: RegisterId,
    c: RegisterId,
) -> Word {
    ((enum_to_word(oc) << constants::OPCODE_OFFSET) & constants::OPCODE_MASK)
        | ((enum_to_word(a) << constants::RA_OFFSET) & constants::RA_MASK)
        | ((enum_to_word(b) << constants::RB_OFFSET) & constants::RB_MASK)
        | ((enum_to_word(c) << constants::RC_OFFSET) & constants::RC_MASK)
}

/// Constructs an RRR-format instruction.
#[macro_export]
macro_rules! instr_rrr {
    ($opcode:ident, $a:ident, $b:ident, $c:ident) => {
        $crate::make_rrr_instruction(
            $crate::Opcode::$opcode,
            $crate::RegisterId::$a,
            $crate::RegisterId::$b,
            $crate::RegisterId::$c,
        )
    };
}

/// Constructs an RRI-format instruction. The immediate is masked to seven
/// bits; range checking is the assembler's concern.
#[inline]
pub fn make_rri_instruction(
    oc: Opcode,
    a: RegisterId,
    b: RegisterId,
    immediate: Immediate,
) -> Word {
    ((enum_to_word(oc) << constants::OPCODE_OFFSET) & constants::OPCODE_MASK)
        | ((enum_to_word(a) << constants::RA_OFFSET) & constants::RA_MASK)
        | ((enum_to_word(b) << constants::RB_OFFSET) & constants::RB_MASK)
        | (((immediate as Word) << constants::IMM7_OFFSET) & constants::IMM7_MASK)
}

/// Constructs an RRI-format instruction.
#[macro_export]
macro_rules! instr_rri {
    ($opcode:ident, $a:ident, $b:ident, $imm:expr) => {
        $crate::make_rri_instruction(
            $crate::Opcode::$opcode,
            $crate::RegisterId::$a,
            $crate::RegisterId::$b,
            $imm,
        )
    };
}

/// Constructs an RI-format instruction. The immediate is masked to ten bits.
#[inline]
pub fn make_ri_instruction(oc: Opcode, a: RegisterId, immediate: Word) -> Word {
    ((enum_to_word(oc) << constants::OPCODE_OFFSET) & constants::OPCODE_MASK)
        | ((enum_to_word(a) << constants::RA_OFFSET) & constants::RA_MASK)
        | ((immediate << constants::IMM10_OFFSET) & constants::IMM10_MASK)
}

/// Constructs an RI-format instruction.
#[macro_export]
macro_rules! instr_ri {
    ($opcode:ident, $a:ident, $imm:expr) => {
        $crate::make_ri_instruction(
            $crate::Opcode::$opcode,
            $crate::RegisterId::$a,
            $imm,
        )
    };
}

/// Constructs a jump-and-link instruction. The low seven bits are zero, so
/// the word can never be mistaken for an interrupt request.
#[inline]
pub fn make_jalr_instruction(a: RegisterId, b: RegisterId) -> Word {
    ((enum_to_word(Opcode::JALR) << constants::OPCODE_OFFSET) & constants::OPCODE_MASK)
        | ((enum_to_word(a) << constants::RA_OFFSET) & constants::RA_MASK)
        | ((enum_to_word(b) << constants::RB_OFFSET) & constants::RB_MASK)
}

/// Constructs a jump-and-link instruction.
#[macro_export]
macro_rules! instr_jalr {
    ($a:ident, $b:ident) => {
        $crate::make_jalr_instruction($crate::RegisterId::$a, $crate::RegisterId::$b)
    };
}

/// Constructs an interrupt-request instruction: opcode 7 with a zero A field,
/// the kind in the B field and IRQ_TAIL in the low seven bits.
#[inline]
pub fn make_irq_instruction(kind: Interrupt) -> Word {
    ((enum_to_word(Opcode::JALR) << constants::OPCODE_OFFSET) & constants::OPCODE_MASK)
        | ((enum_to_word(kind) << constants::RB_OFFSET) & constants::RB_MASK)
        | constants::IRQ_TAIL
}

/// Constructs an interrupt-request instruction.
#[macro_export]
macro_rules! irq {
    ($kind:ident) => {
        $crate::make_irq_instruction($crate::Interrupt::$kind)
    };
}

/// Constructs the canonical no-op, `add $r0, $r0, $r0`.
#[macro_export]
macro_rules! nop {
    () => {
        $crate::instr_rrr!(ADD, ZERO, ZERO, ZERO)
    };
}
