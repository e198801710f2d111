mod common;
mod features;

pub mod config;
pub mod data_model;
pub mod error;
pub mod logging;
pub mod settings;

pub use common::time::{Clock, SystemClock};
pub use features::{app, lookup, ticker, ui};
