use super::state::ClockWidget;
use crate::common::time::Clock;
use crate::data_model::TimeQuery;
use crate::features::lookup::TimeLookup;
use std::io::{self, Write};
use std::thread;
use std::time::Instant;

/// Performs one lookup, prints the result and then every tick to `out`.
/// Stops after `ticks` ticks, or never when `None`. Fails if the lookup failed.
pub fn run_headless<C, L, W>(
    widget: &mut ClockWidget<C>,
    lookup: &mut L,
    query: TimeQuery,
    ticks: Option<u64>,
    out: &mut W,
) -> io::Result<()>
where
    C: Clock,
    L: TimeLookup + ?Sized,
    W: Write,
{
    widget.request_time(lookup, query);
    writeln!(out, "{}", widget.display())?;
    out.flush()?;

    if let Some(err) = widget.last_error() {
        return Err(io::Error::other(err.to_string()));
    }

    let mut printed = 0u64;
    while ticks.is_none_or(|limit| printed < limit) {
        let Some(deadline) = widget.next_deadline() else {
            break;
        };
        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        if widget.poll_tick() {
            writeln!(out, "{}", widget.display())?;
            out.flush()?;
            printed += 1;
        }
    }
    Ok(())
}
