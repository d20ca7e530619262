//! Verification worker: reads one JSON request per stdin line, runs the
//! machine, writes one JSON reply per stdout line. Runs until its input
//! stream closes. All logging goes to stderr so the protocol stream stays
//! clean.

use dpool::protocol::{read_message, write_message, Reply, Request};
use log::debug;
use std::io;

fn run_request(request: &Request) -> Reply {
    let job = match request.to_job() {
        Ok(job) => job,
        Err(err) => return Reply::err(format!("bad request: {}", err)),
    };

    match dvm::verify(job.hash(), job.output(), job.input()) {
        Ok(result) => Reply::ok(result),
        Err(err) => Reply::err(err.to_string()),
    }
}

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();

    loop {
        let reply = match read_message::<_, Request>(&mut reader) {
            Ok(Some(request)) => {
                debug!("verifying job for hash {}", request.hash);
                run_request(&request)
            }
            Ok(None) => break,
            Err(ref err) if err.kind() == io::ErrorKind::InvalidData => {
                Reply::err(format!("bad request: {}", err))
            }
            Err(_) => break,
        };

        if write_message(&mut writer, &reply).is_err() {
            break;
        }
    }
}
