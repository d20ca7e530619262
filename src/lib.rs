//! The duel virtual machine: a deterministic 16-bit register machine used to
//! validate transaction spends.
//!
//! A transaction output carries a script image, and spending it supplies a
//! second script image. Both are loaded into one shared memory and executed
//! as two cooperating threads; the spend is valid exactly when the output
//! thread terminates through the success interrupt. See [`Machine`] for the
//! scheduling protocol and [`verify`] for the one-call entry point.
//!
//! [`Machine`]: struct.Machine.html
//! [`verify`]: fn.verify.html

pub mod constants;
#[macro_use]
mod instructions;
mod machine;
mod memory;
mod processor;
mod register;

pub use crate::instructions::*;
pub use crate::machine::{verify, Error, Machine};
pub use crate::memory::Memory;
pub use crate::processor::Processor;
pub use crate::register::RegisterFile;

/// The machine word. All registers, memory cells and instructions are one
/// word wide; arithmetic wraps modulo 2¹⁶.
pub type Word = u16;

/// A sign-extended 7-bit instruction operand.
pub type Immediate = i8;

/// Byte order of every external image and encoding.
pub type Endian = byteorder::BigEndian;

/// Converts instruction words into the byte image the loaders consume.
pub fn image_from_words(words: &[Word]) -> Vec<u8> {
    use byteorder::ByteOrder;

    let mut image = vec![0; words.len() * constants::WORD_BYTES];
    Endian::write_u16_into(words, &mut image);
    image
}
