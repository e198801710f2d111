use super::state::LookupRequest;
use crate::data_model::AuthoritativeTime;
use crate::error::{ClockError, NetworkErrorKind};
use crate::features::lookup::TimeLookup;
use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

#[derive(Clone, Debug)]
pub enum ControlMessage {
    Lookup(LookupRequest),
    Stop,
}

#[derive(Debug)]
pub struct LookupOutcome {
    pub request: LookupRequest,
    pub result: Result<AuthoritativeTime, ClockError>,
}

/// Background thread performing lookups in submission order.
pub struct WorkerHandle {
    sender: Sender<ControlMessage>,
    join: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a lookup. Returns `false` once the worker has exited.
    pub fn submit(&self, request: LookupRequest) -> bool {
        self.sender.send(ControlMessage::Lookup(request)).is_ok()
    }

    /// Stops the worker and waits for the lookup in flight, if any.
    pub fn shutdown(mut self) {
        let _ = self.sender.send(ControlMessage::Stop);
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            error!("lookup worker panicked");
        }
    }
}

impl Drop for WorkerHandle {
    // Does not join: a lookup without a timeout may block indefinitely.
    fn drop(&mut self) {
        let _ = self.sender.send(ControlMessage::Stop);
    }
}

/// Spawns the worker. `make_lookup` runs on the worker thread; if it fails,
/// every queued request settles with a network error carrying the reason.
pub fn spawn_lookup_worker<F, L, E>(
    make_lookup: F,
    outcome_tx: Sender<LookupOutcome>,
) -> WorkerHandle
where
    F: FnOnce() -> Result<L, E> + Send + 'static,
    L: TimeLookup,
    E: std::fmt::Display,
{
    let (tx, rx) = crossbeam_channel::unbounded();
    let join = thread::Builder::new()
        .name("tzclock-lookup".to_string())
        .spawn(move || match make_lookup() {
            Ok(lookup) => run_worker(lookup, rx, outcome_tx),
            Err(err) => {
                error!("lookup client init failed: {err}");
                drain_with_error(format!("lookup client init failed: {err}"), rx, outcome_tx);
            }
        })
        .map_err(|err| error!("failed to spawn lookup worker: {err}"))
        .ok();
    WorkerHandle { sender: tx, join }
}

fn run_worker<L: TimeLookup>(
    mut lookup: L,
    control_rx: Receiver<ControlMessage>,
    outcome_tx: Sender<LookupOutcome>,
) {
    loop {
        match control_rx.recv() {
            Ok(ControlMessage::Lookup(request)) => {
                debug!(token = request.token.id(), "lookup started");
                let result = lookup.lookup(&request.query);
                if outcome_tx.send(LookupOutcome { request, result }).is_err() {
                    break;
                }
            }
            Ok(ControlMessage::Stop) | Err(_) => break,
        }
    }
}

fn drain_with_error(
    message: String,
    control_rx: Receiver<ControlMessage>,
    outcome_tx: Sender<LookupOutcome>,
) {
    loop {
        match control_rx.recv() {
            Ok(ControlMessage::Lookup(request)) => {
                let result = Err(ClockError::network(NetworkErrorKind::Io, message.clone()));
                if outcome_tx.send(LookupOutcome { request, result }).is_err() {
                    break;
                }
            }
            Ok(ControlMessage::Stop) | Err(_) => break,
        }
    }
}
