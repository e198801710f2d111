mod client;
mod helpers;
mod response;

pub use client::CurlTimeLookup;
pub use response::{parse_datetime, parse_response_body};

use crate::data_model::{AuthoritativeTime, TimeQuery};
use crate::error::ClockError;

/// Source of authoritative time for a region/city.
pub trait TimeLookup {
    fn lookup(&mut self, query: &TimeQuery) -> Result<AuthoritativeTime, ClockError>;
}

impl<L: TimeLookup + ?Sized> TimeLookup for Box<L> {
    fn lookup(&mut self, query: &TimeQuery) -> Result<AuthoritativeTime, ClockError> {
        (**self).lookup(query)
    }
}
