use crate::pool::{Event, WorkerId};
use crate::protocol::{self, Reply, Request};
use log::debug;
use std::io::{self, BufReader};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread;

/// Handle to one worker process: the child, its request pipe, and a reader
/// thread that turns its reply stream into pool events.
pub(crate) struct Worker {
    child: Child,
    stdin: ChildStdin,
}

impl Worker {
    /// Spawns the worker executable with piped standard streams. Stderr is
    /// inherited so worker logs reach the host's stderr directly.
    pub fn spawn(id: WorkerId, program: &Path, events: Sender<Event>) -> io::Result<Worker> {
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let stdin = match child.stdin.take() {
            Some(stdin) => stdin,
            None => return Err(io::Error::new(io::ErrorKind::Other, "worker stdin missing")),
        };
        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "worker stdout missing",
                ))
            }
        };

        thread::spawn(move || {
            let mut reader = BufReader::new(stdout);
            loop {
                match protocol::read_message::<_, Reply>(&mut reader) {
                    Ok(Some(reply)) => {
                        if events.send(Event::Reply(id, reply)).is_err() {
                            return;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        // A garbled stream cannot be trusted for further
                        // replies; surface the error and let the pool
                        // restart the worker.
                        debug!("worker {} reply stream garbled: {}", id, err);
                        let reply = Reply::err(format!("malformed worker reply: {}", err));
                        let _ = events.send(Event::Reply(id, reply));
                        break;
                    }
                }
            }
            let _ = events.send(Event::Exited(id));
        });

        Ok(Worker { child, stdin })
    }

    pub fn send(&mut self, request: &Request) -> io::Result<()> {
        protocol::write_message(&mut self.stdin, request)
    }

    pub fn kill(&mut self) {
        let _ = self.child.kill();
    }

    /// Waits the child out so it does not linger as a zombie.
    pub fn reap(&mut self) {
        let _ = self.child.wait();
    }
}
