use crate::Rule;
use dvm::constants;
use pest::error::Error as PestError;
use std::error::Error as StdError;
use std::fmt;

/// Fatal conditions raised by the streaming encoder itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssembleError {
    /// A 7-bit signed operand was outside `[-64, 63]`.
    ImmediateRange(i32),
    /// A 10-bit operand was outside `[0, 1023]`.
    WideImmediateRange(u32),
    /// A short jump resolved to a delta outside `[-64, 63]`.
    JumpOutOfRange(i32),
    /// A label with pending jumps was never bound.
    UnboundLabel(usize),
    /// A label was bound twice.
    LabelRebound(usize),
    /// The emitted script exceeds the words one script region can hold.
    ProgramTooLong(usize),
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AssembleError::ImmediateRange(value) => write!(
                f,
                "Immediate {} does not fit in 7 signed bits.",
                value
            ),
            AssembleError::WideImmediateRange(value) => {
                write!(f, "Immediate {} does not fit in 10 bits.", value)
            }
            AssembleError::JumpOutOfRange(distance) => write!(
                f,
                "Short jump distance {} is outside [{}, {}].",
                distance,
                constants::IMM7_MIN,
                constants::IMM7_MAX
            ),
            AssembleError::UnboundLabel(label) => {
                write!(f, "Label {} is targeted by jumps but never bound.", label)
            }
            AssembleError::LabelRebound(label) => {
                write!(f, "Label {} was bound twice.", label)
            }
            AssembleError::ProgramTooLong(words) => write!(
                f,
                "Script is {} words long, the limit is {}.",
                words,
                constants::SCRIPT_WORDS_MAX
            ),
        }
    }
}

impl StdError for AssembleError {}

#[derive(Clone, Debug)]
pub enum Error {
    Parse(Box<PestError<Rule>>),
    Assemble(AssembleError),
}

impl From<AssembleError> for Error {
    fn from(err: AssembleError) -> Error {
        Error::Assemble(err)
    }
}

impl From<PestError<Rule>> for Error {
    fn from(err: PestError<Rule>) -> Error {
        Error::Parse(Box::new(err))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "{}", err),
            Error::Assemble(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for Error {}

pub type Result<T> = std::result::Result<T, Error>;
