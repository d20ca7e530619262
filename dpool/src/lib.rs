//! Process-isolated verification workers for the
//! [dvm](../dvm/index.html) machine.
//!
//! A [`Pool`](struct.Pool.html) owns a fixed number of `dworker` child
//! processes and a FIFO queue of pending jobs. Each worker runs one job at a
//! time in its own address space, so a hostile or crashing script can never
//! corrupt the host or a sibling job: a dead worker is reaped, respawned,
//! and its in-flight job is re-run with the original callback.
//!
//! Host and workers speak newline-delimited JSON over the worker's standard
//! streams; see the [`protocol`](protocol/index.html) module.

mod pool;
pub mod protocol;
mod worker;

pub use crate::pool::{default_worker_path, Callback, Pool, PoolConfig, WorkerId};
pub use crate::protocol::{Reply, Request};
