mod headless;
mod runtime;
mod state;

pub use headless::run_headless;
pub use runtime::{ControlMessage, LookupOutcome, WorkerHandle, spawn_lookup_worker};
pub use state::{ClockWidget, LOADING_TEXT, LookupRequest, Phase, RequestToken};
