use byteorder::{ReadBytesExt, WriteBytesExt};
use dvm::constants::HASH_BYTES;
use dvm::Endian;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One verification job: the transaction hash and the two script images.
///
/// The container itself is just a carrier; size limits are enforced by the
/// machine when the images are loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    hash: [u8; HASH_BYTES],
    output: Vec<u8>,
    input: Vec<u8>,
}

impl Job {
    pub fn from(hash: [u8; HASH_BYTES], output: Vec<u8>, input: Vec<u8>) -> Job {
        Job {
            hash,
            output,
            input,
        }
    }

    pub fn copy_from(hash: &[u8; HASH_BYTES], output: &[u8], input: &[u8]) -> Job {
        Job {
            hash: *hash,
            output: Vec::from(output),
            input: Vec::from(input),
        }
    }

    pub fn hash(&self) -> &[u8; HASH_BYTES] {
        &self.hash
    }

    pub fn output(&self) -> &[u8] {
        &self.output[..]
    }

    pub fn input(&self) -> &[u8] {
        &self.input[..]
    }
}

pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Job> {
    let output_length = reader.read_u32::<Endian>()?;
    let input_length = reader.read_u32::<Endian>()?;

    let mut hash = [0; HASH_BYTES];
    reader.read_exact(&mut hash)?;

    let mut output = vec![0; output_length as usize];
    let mut input = vec![0; input_length as usize];

    reader.read_exact(&mut output)?;
    reader.read_exact(&mut input)?;

    Ok(Job::from(hash, output, input))
}

pub fn write<W: Write>(writer: &mut W, job: &Job) -> std::io::Result<()> {
    writer.write_u32::<Endian>(job.output.len() as u32)?;
    writer.write_u32::<Endian>(job.input.len() as u32)?;
    writer.write_all(&job.hash[..])?;
    writer.write_all(&job.output[..])?;
    writer.write_all(&job.input[..])?;
    Ok(())
}

pub trait ReadJobExt: Read + Sized {
    fn read_job(&mut self) -> std::io::Result<Job> {
        read(self)
    }
}

impl<R: Read + Sized> ReadJobExt for R {}

pub trait WriteJobExt: Write + Sized {
    fn write_job(&mut self, job: &Job) -> std::io::Result<()> {
        write(self, job)
    }
}

impl<W: Write + Sized> WriteJobExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Job> {
    BufReader::new(File::open(path)?).read_job()
}

pub fn write_file<P: AsRef<Path>>(path: P, job: &Job) -> std::io::Result<()> {
    BufWriter::new(File::create(path)?).write_job(job)
}
