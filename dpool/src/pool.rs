use crate::protocol::{Reply, Request};
use crate::worker::Worker;
use djob::Job;
use log::{error, info, warn};
use std::collections::{HashMap, VecDeque};
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

pub type WorkerId = u32;

/// Completion callback for a submitted job. Runs on the supervisor thread,
/// exactly once, so it should hand its result off rather than block.
pub type Callback = Box<dyn FnOnce(Reply) + Send + 'static>;

pub(crate) enum Event {
    Submit(Job, Callback),
    Reply(WorkerId, Reply),
    Exited(WorkerId),
    KillWorkers,
    Shutdown,
}

/// Locates the worker executable: the `DPOOL_WORKER` environment variable if
/// set, otherwise `dworker` next to the current executable.
pub fn default_worker_path() -> PathBuf {
    if let Some(path) = env::var_os("DPOOL_WORKER") {
        return PathBuf::from(path);
    }
    let mut path = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    path.push(format!("dworker{}", env::consts::EXE_SUFFIX));
    path
}

#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Number of worker processes. At least one is always spawned.
    pub size: usize,
    /// Path of the worker executable.
    pub worker: PathBuf,
    /// Upper bound on the pending-job queue. `None` leaves it unbounded;
    /// with a bound, overflowing jobs are rejected through their callback
    /// with a queue-full error reply.
    pub queue_limit: Option<usize>,
}

impl PoolConfig {
    pub fn new(size: usize) -> PoolConfig {
        PoolConfig {
            size,
            worker: default_worker_path(),
            queue_limit: None,
        }
    }
}

/// A fixed-size pool of isolated verification workers.
///
/// Jobs are dispatched to free workers in submission order; the rest queue
/// FIFO. All pool state is owned by a single supervisor thread, which is the
/// only place callbacks run. A worker that exits for any reason is reaped
/// and replaced, and its in-flight job goes back to the head of the queue,
/// so a misbehaving script can neither lose a callback nor permanently eat a
/// pool slot.
pub struct Pool {
    events: Sender<Event>,
    supervisor: Option<JoinHandle<()>>,
}

impl Pool {
    /// Spawns the workers and the supervisor. Fails if any initial worker
    /// cannot be started.
    pub fn new(config: PoolConfig) -> io::Result<Pool> {
        let (events, inbox) = channel();
        let mut supervisor = Supervisor::new(config, events.clone(), inbox)?;
        let handle = thread::Builder::new()
            .name("dpool-supervisor".to_owned())
            .spawn(move || supervisor.run())?;

        Ok(Pool {
            events,
            supervisor: Some(handle),
        })
    }

    /// Submits a job. The callback fires exactly once with the reply, even
    /// if workers crash and the job has to be re-run elsewhere.
    pub fn submit<F>(&self, job: Job, callback: F)
    where
        F: FnOnce(Reply) + Send + 'static,
    {
        let _ = self.events.send(Event::Submit(job, Box::new(callback)));
    }

    /// Blocking convenience wrapper around [`submit`](#method.submit).
    pub fn verify(&self, job: Job) -> Reply {
        let (tx, rx) = channel();
        self.submit(job, move |reply| {
            let _ = tx.send(reply);
        });
        rx.recv()
            .unwrap_or_else(|_| Reply::err("pool supervisor gone"))
    }

    /// Kills every worker process. Recovery is the ordinary crash path:
    /// replacements are spawned and in-flight jobs re-run.
    pub fn kill_workers(&self) {
        let _ = self.events.send(Event::KillWorkers);
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        let _ = self.events.send(Event::Shutdown);
        if let Some(handle) = self.supervisor.take() {
            let _ = handle.join();
        }
    }
}

struct InFlight {
    job: Job,
    callback: Callback,
}

struct Supervisor {
    config: PoolConfig,
    events: Sender<Event>,
    inbox: Receiver<Event>,
    workers: HashMap<WorkerId, Worker>,
    free: Vec<WorkerId>,
    busy: HashMap<WorkerId, InFlight>,
    queue: VecDeque<(Job, Callback)>,
    next_id: WorkerId,
}

impl Supervisor {
    fn new(
        config: PoolConfig,
        events: Sender<Event>,
        inbox: Receiver<Event>,
    ) -> io::Result<Supervisor> {
        let mut supervisor = Supervisor {
            config,
            events,
            inbox,
            workers: HashMap::new(),
            free: Vec::new(),
            busy: HashMap::new(),
            queue: VecDeque::new(),
            next_id: 0,
        };

        for _ in 0..supervisor.config.size.max(1) {
            supervisor.spawn_worker()?;
        }

        Ok(supervisor)
    }

    fn spawn_worker(&mut self) -> io::Result<()> {
        let id = self.next_id;
        self.next_id += 1;

        let worker = Worker::spawn(id, &self.config.worker, self.events.clone())?;
        self.workers.insert(id, worker);
        self.free.push(id);
        Ok(())
    }

    fn run(&mut self) {
        while let Ok(event) = self.inbox.recv() {
            match event {
                Event::Submit(job, callback) => self.submit(job, callback),
                Event::Reply(id, reply) => self.complete(id, reply),
                Event::Exited(id) => self.restart(id),
                Event::KillWorkers => {
                    for worker in self.workers.values_mut() {
                        worker.kill();
                    }
                }
                Event::Shutdown => break,
            }
        }
        self.shutdown();
    }

    fn submit(&mut self, job: Job, callback: Callback) {
        if let Some(limit) = self.config.queue_limit {
            if self.free.is_empty() && self.queue.len() >= limit {
                callback(Reply::err("job queue is full"));
                return;
            }
        }
        self.queue.push_back((job, callback));
        self.dispatch();
    }

    /// Pairs queued jobs with free workers until one side runs dry.
    fn dispatch(&mut self) {
        while !self.queue.is_empty() {
            let id = match self.free.pop() {
                Some(id) => id,
                None => return,
            };
            let (job, callback) = match self.queue.pop_front() {
                Some(entry) => entry,
                None => {
                    self.free.push(id);
                    return;
                }
            };

            let request = Request::from_job(&job);
            let sent = match self.workers.get_mut(&id) {
                Some(worker) => worker.send(&request).is_ok(),
                None => false,
            };

            if sent {
                self.busy.insert(id, InFlight { job, callback });
            } else {
                // A broken pipe means the worker is on its way out; its exit
                // event will respawn it. Keep the job at the head.
                warn!("worker {} rejected a job, waiting for its restart", id);
                self.queue.push_front((job, callback));
            }
        }
    }

    fn complete(&mut self, id: WorkerId, reply: Reply) {
        match self.busy.remove(&id) {
            Some(inflight) => {
                (inflight.callback)(reply);
                if self.workers.contains_key(&id) {
                    self.free.push(id);
                }
                self.dispatch();
            }
            None => warn!("worker {} sent a reply with no job in flight", id),
        }
    }

    fn restart(&mut self, id: WorkerId) {
        let mut worker = match self.workers.remove(&id) {
            Some(worker) => worker,
            None => return,
        };
        worker.kill();
        worker.reap();
        self.free.retain(|&free_id| free_id != id);

        if let Some(inflight) = self.busy.remove(&id) {
            warn!("worker {} exited with a job in flight, resubmitting", id);
            self.queue.push_front((inflight.job, inflight.callback));
        } else {
            info!("worker {} exited, restarting", id);
        }

        if let Err(err) = self.spawn_worker() {
            error!("failed to respawn worker: {}", err);
        }
        self.dispatch();
    }

    /// Kills and reaps every worker, then fails all remaining callbacks
    /// rather than dropping them.
    fn shutdown(&mut self) {
        for worker in self.workers.values_mut() {
            worker.kill();
        }
        for (_, mut worker) in self.workers.drain() {
            worker.reap();
        }
        for (_, inflight) in self.busy.drain() {
            (inflight.callback)(Reply::err("pool shut down"));
        }
        for (_, callback) in self.queue.drain(..) {
            callback(Reply::err("pool shut down"));
        }
    }
}
