#[macro_use]
extern crate clap;

use clap::Arg;
use dvm::{constants, Word};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum IOErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Dasm(dasm::Error),
    Io(std::io::Error, IOErrorContext, PathBuf),
    Origin(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err, context, path) => writeln!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IOErrorContext::ReadInput => "Reading input",
                    IOErrorContext::WriteOutput => "Writing output",
                },
                path.display(),
                err
            ),
            Error::Dasm(err) => {
                writeln!(f, "Assembling input failed:")?;
                write!(f, "{}", err)
            }
            Error::Origin(text) => write!(f, "Invalid origin address \"{}\"", text),
        }
    }
}

fn main() {
    // Parse command line arguments
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .help("Sets the output file to write to"),
        )
        .arg(
            Arg::with_name("origin")
                .long("origin")
                .takes_value(true)
                .value_name("ORIGIN")
                .help("Word address the script will be loaded at (defaults to the output region)"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("output");
    let origin = matches.value_of("origin");

    if let Err(err) = run(input, output, origin) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn parse_origin(text: Option<&str>) -> Result<Word, Error> {
    let text = match text {
        Some(text) => text,
        None => return Ok(constants::OUTPUT_BASE),
    };
    let parsed = if text.starts_with("0x") || text.starts_with("0X") {
        Word::from_str_radix(&text[2..], 16)
    } else {
        text.parse()
    };
    parsed.map_err(|_| Error::Origin(text.to_owned()))
}

fn run(input: &str, output: Option<&str>, origin: Option<&str>) -> Result<(), Error> {
    let input_path = Path::new(input);
    let origin = parse_origin(origin)?;

    let source = fs::read_to_string(input_path)
        .map_err(|err| Error::Io(err, IOErrorContext::ReadInput, input_path.to_owned()))?;

    let image = dasm::assemble_addressed(&source, origin).map_err(Error::Dasm)?;

    let output_path: PathBuf = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input_path.with_extension("bin"));

    fs::write(&output_path, &image)
        .map_err(|err| Error::Io(err, IOErrorContext::WriteOutput, output_path.clone()))?;

    Ok(())
}
