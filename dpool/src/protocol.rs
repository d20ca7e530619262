//! Wire format between the host and a worker process.
//!
//! One JSON object per line in each direction. A request carries the three
//! job images hex-encoded; the reply carries the verdict, plus an error
//! string when the worker could not produce a real one. Hex over JSON keeps
//! the messages deterministic and size-bounded.

use djob::Job;
use dvm::constants::HASH_BYTES;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::io::{self, BufRead, Write};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Request {
    pub hash: String,
    pub output: String,
    pub input: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Reply {
    pub result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reply {
    pub fn ok(result: bool) -> Reply {
        Reply {
            result,
            error: None,
        }
    }

    /// An error reply; the verdict of a job that could not be verified is
    /// always `false`.
    pub fn err<S: Into<String>>(message: S) -> Reply {
        Reply {
            result: false,
            error: Some(message.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProtocolError {
    Hex(hex::FromHexError),
    HashLength(usize),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProtocolError::Hex(err) => write!(f, "invalid hex field: {}", err),
            ProtocolError::HashLength(length) => write!(
                f,
                "hash must be {} bytes, got {}",
                HASH_BYTES, length
            ),
        }
    }
}

impl StdError for ProtocolError {}

impl From<hex::FromHexError> for ProtocolError {
    fn from(err: hex::FromHexError) -> ProtocolError {
        ProtocolError::Hex(err)
    }
}

impl Request {
    pub fn from_job(job: &Job) -> Request {
        Request {
            hash: hex::encode(job.hash()),
            output: hex::encode(job.output()),
            input: hex::encode(job.input()),
        }
    }

    pub fn to_job(&self) -> Result<Job, ProtocolError> {
        let hash = hex::decode(&self.hash)?;
        if hash.len() != HASH_BYTES {
            return Err(ProtocolError::HashLength(hash.len()));
        }
        let mut fixed = [0; HASH_BYTES];
        fixed.copy_from_slice(&hash);

        Ok(Job::from(
            fixed,
            hex::decode(&self.output)?,
            hex::decode(&self.input)?,
        ))
    }
}

/// Writes one message as a single JSON line and flushes it.
pub fn write_message<W: Write, T: Serialize>(writer: &mut W, message: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, message)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Reads one message line. `Ok(None)` signals a clean end of stream; a line
/// that is not valid JSON for `T` is an `InvalidData` error.
pub fn read_message<R: BufRead, T: DeserializeOwned>(reader: &mut R) -> io::Result<Option<T>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    serde_json::from_str(line.trim_end())
        .map(Some)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
