#[macro_use]
extern crate clap;

use clap::{Arg, ArgGroup, ArgMatches};
use dvm::constants;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("JOB")
                .help("Sets the job file to verify")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .help("Sets the output-script file to verify"),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("INPUT")
                .help("Sets the input-script file to verify with"),
        )
        .arg(
            Arg::with_name("asm")
                .short("a")
                .long("asm")
                .help("Treats script files as assembly text instead of raw images"),
        )
        .arg(
            Arg::with_name("hash")
                .long("hash")
                .takes_value(true)
                .value_name("HASH")
                .help("Sets the transaction hash as 64 hex digits (defaults to zero)"),
        )
        .arg(
            Arg::with_name("list")
                .short("l")
                .long("list")
                .takes_value(true)
                .value_name("SCRIPT")
                .help("Prints a disassembly listing of a script image"),
        )
        .group(
            ArgGroup::with_name("source")
                .args(&["JOB", "output", "list"])
                .required(true),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), dvx::Error> {
    if let Some(path) = matches.value_of("list") {
        println!("{}", dvx::listing(path, constants::OUTPUT_BASE)?);
        return Ok(());
    }

    let verdict = match matches.value_of("JOB") {
        Some(path) => dvx::verify_job_file(path)?,

        None => {
            let assemble = matches.is_present("asm");
            let hash = match matches.value_of("hash") {
                Some(text) => dvx::parse_hash(text)?,
                None => [0; constants::HASH_BYTES],
            };

            let output = dvx::load_script(
                matches.value_of("output").unwrap(),
                assemble,
                constants::OUTPUT_BASE,
            )?;
            let input = match matches.value_of("input") {
                Some(path) => dvx::load_script(path, assemble, constants::INPUT_BASE)?,
                None => Vec::new(),
            };

            dvx::verify_scripts(&hash, &output, &input)?
        }
    };

    println!("Verdict: {}", verdict);
    Ok(())
}
