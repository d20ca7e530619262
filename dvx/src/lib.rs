use dvm::constants;
use dvm::Word;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Error {
    Io(io::Error, PathBuf),
    Asm(dasm::Error),
    Vm(dvm::Error),
    Hash(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err, path) => {
                write!(f, "Accessing \"{}\" failed: {}", path.display(), err)
            }
            Error::Asm(err) => write!(f, "Assembling failed: {}", err),
            Error::Vm(err) => write!(f, "Running the job failed: {}", err),
            Error::Hash(message) => write!(f, "Invalid hash: {}", message),
        }
    }
}

/// Parses a transaction hash given as 64 hex digits.
pub fn parse_hash(text: &str) -> Result<[u8; constants::HASH_BYTES], Error> {
    let bytes = hex::decode(text).map_err(|err| Error::Hash(err.to_string()))?;
    if bytes.len() != constants::HASH_BYTES {
        return Err(Error::Hash(format!(
            "expected {} bytes, got {}",
            constants::HASH_BYTES,
            bytes.len()
        )));
    }
    let mut hash = [0; constants::HASH_BYTES];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// Loads a script image: raw bytes, or assembly text lowered against the
/// given load origin.
pub fn load_script<P: AsRef<Path>>(
    path: P,
    assemble: bool,
    origin: Word,
) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    if assemble {
        let source =
            fs::read_to_string(path).map_err(|err| Error::Io(err, path.to_owned()))?;
        dasm::assemble_addressed(&source, origin).map_err(Error::Asm)
    } else {
        fs::read(path).map_err(|err| Error::Io(err, path.to_owned()))
    }
}

/// Verifies a job file in-process and returns the verdict.
pub fn verify_job_file<P: AsRef<Path>>(path: P) -> Result<bool, Error> {
    let job =
        djob::read_file(&path).map_err(|err| Error::Io(err, path.as_ref().to_owned()))?;
    dvm::verify(job.hash(), job.output(), job.input()).map_err(Error::Vm)
}

/// Verifies a script pair in-process and returns the verdict.
pub fn verify_scripts(
    hash: &[u8; constants::HASH_BYTES],
    output: &[u8],
    input: &[u8],
) -> Result<bool, Error> {
    dvm::verify(hash, output, input).map_err(Error::Vm)
}

/// Renders a disassembly listing of a script image, one instruction per
/// line, addressed from the given origin.
pub fn listing<P: AsRef<Path>>(path: P, origin: Word) -> Result<String, Error> {
    let path = path.as_ref();
    let image = fs::read(path).map_err(|err| Error::Io(err, path.to_owned()))?;

    let lines = dasm::disassemble(&image)
        .iter()
        .enumerate()
        .map(|(offset, instruction)| {
            format!(
                "{:#06X}  {}",
                origin.wrapping_add(offset as Word),
                instruction
            )
        })
        .collect::<Vec<_>>();
    Ok(lines.join("\n"))
}
