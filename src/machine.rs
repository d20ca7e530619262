use std::error::Error as StdError;
use std::fmt;

use crate::{constants, Interrupt, Memory, Processor};

/// Errors produced while loading job images. These are the machine's only
/// fallible operations; once images are in memory, execution cannot fault.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The transaction hash was not exactly 32 bytes long.
    HashLength(usize),
    /// A script image exceeded the 8 KiB region reserved for it.
    ScriptLength(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::HashLength(length) => write!(
                f,
                "transaction hash must be {} bytes, got {}",
                constants::HASH_BYTES,
                length
            ),
            Error::ScriptLength(length) => write!(
                f,
                "script image must be at most {} bytes, got {}",
                constants::SCRIPT_BYTES_MAX,
                length
            ),
        }
    }
}

impl StdError for Error {}

fn check_script(image: &[u8]) -> Result<(), Error> {
    if image.len() > constants::SCRIPT_BYTES_MAX {
        Err(Error::ScriptLength(image.len()))
    } else {
        Ok(())
    }
}

/// One verification machine: a shared memory and the two execution contexts
/// that duel over it.
///
/// The output thread (the defender) enters at word `0x2000`, the input
/// thread (the spender) at word `0x4000`. A job runs in two phases:
///
/// 1. *Pre-run*: the output thread alone, for up to `MAX_INIT_TICKS` ticks.
///    If it finishes here, the input script is never even loaded.
/// 2. *Co-run*: the input image is loaded and both threads run in lockstep
///    for up to `MAX_TICKS` global ticks. Within one global tick the output
///    thread always steps first, so its memory writes are visible to the
///    input thread in the same tick.
///
/// The verdict is `true` exactly when the output thread stops with the
/// success interrupt. Yielding, failing and running out of ticks all lose.
pub struct Machine {
    memory: Memory,
    output_thread: Processor,
    input_thread: Processor,
    ticks: u64,
}

impl Machine {
    /// Builds a machine with the hash and output images in place.
    pub fn new(hash: &[u8], output: &[u8]) -> Result<Machine, Error> {
        if hash.len() != constants::HASH_BYTES {
            return Err(Error::HashLength(hash.len()));
        }
        check_script(output)?;

        let mut memory = Memory::new();
        memory.load_image(constants::HASH_BASE, hash);
        memory.load_image(constants::OUTPUT_BASE, output);

        Ok(Machine {
            memory,
            output_thread: Processor::new(constants::OUTPUT_BASE),
            input_thread: Processor::new(constants::INPUT_BASE),
            ticks: 0,
        })
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn output_thread(&self) -> &Processor {
        &self.output_thread
    }

    pub fn input_thread(&self) -> &Processor {
        &self.input_thread
    }

    /// Total number of thread steps executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs the pre-run phase: the output thread alone, up to
    /// `MAX_INIT_TICKS` ticks or until it is done.
    pub fn prerun(&mut self) -> Option<Interrupt> {
        let mut remaining = constants::MAX_INIT_TICKS;
        while remaining > 0 && !self.output_thread.is_done() {
            self.output_thread.tick(&mut self.memory);
            self.ticks += 1;
            remaining -= 1;
        }
        self.output_thread.state()
    }

    /// Loads the input image and runs the lockstep phase to a verdict.
    pub fn corun(&mut self, input: &[u8]) -> Result<bool, Error> {
        check_script(input)?;
        self.memory.load_image(constants::INPUT_BASE, input);

        for _ in 0..constants::MAX_TICKS {
            self.output_thread.tick(&mut self.memory);
            self.ticks += 1;
            if self.output_thread.is_done() {
                return Ok(self.output_thread.is_success());
            }
            if !self.input_thread.is_done() {
                self.input_thread.tick(&mut self.memory);
                self.ticks += 1;
            }
        }

        Ok(false)
    }

    /// Runs the full two-phase schedule to a verdict.
    pub fn run(&mut self, input: &[u8]) -> Result<bool, Error> {
        if self.prerun().is_some() {
            return Ok(self.output_thread.is_success());
        }
        self.corun(input)
    }
}

/// Verifies one job. The verdict depends only on the three images; two runs
/// of the same job always agree.
pub fn verify(hash: &[u8], output: &[u8], input: &[u8]) -> Result<bool, Error> {
    Machine::new(hash, output)?.run(input)
}
