use crate::common::time::{Clock, SystemClock};
use chrono::{NaiveDateTime, TimeDelta};
use std::time::{Duration, Instant};
use tracing::debug;

/// Wall-clock spacing between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Identifies one started ticker. Never reused by the same [`Ticker`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TickerHandle(u64);

impl TickerHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

struct Running {
    handle: TickerHandle,
    anchor: NaiveDateTime,
    started_at: Instant,
    ticks: u64,
}

/// The single repeating one-second action advancing the fetched time.
///
/// The shown time is always `anchor + ticks` seconds, where `ticks` counts whole
/// intervals elapsed on the monotonic clock since [`Ticker::start`]. Late polls
/// therefore catch up instead of drifting.
pub struct Ticker<C: Clock = SystemClock> {
    clock: C,
    next_handle: u64,
    running: Option<Running>,
}

impl<C: Clock> Ticker<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_handle: 1,
            running: None,
        }
    }

    /// Starts ticking from `anchor`, stopping whatever ran before.
    pub fn start(&mut self, anchor: NaiveDateTime) -> TickerHandle {
        if let Some(previous) = self.stop() {
            debug!(ticker = previous.id(), "replacing running ticker");
        }
        let handle = TickerHandle(self.next_handle);
        self.next_handle += 1;
        self.running = Some(Running {
            handle,
            anchor,
            started_at: self.clock.now(),
            ticks: 0,
        });
        debug!(ticker = handle.id(), %anchor, "ticker started");
        handle
    }

    pub fn stop(&mut self) -> Option<TickerHandle> {
        self.running.take().map(|running| running.handle)
    }

    pub fn active(&self) -> Option<TickerHandle> {
        self.running.as_ref().map(|running| running.handle)
    }

    pub fn current(&self) -> Option<NaiveDateTime> {
        self.running.as_ref().map(Running::current)
    }

    /// Applies every tick that came due since the last call.
    /// Returns the new time when at least one tick fired.
    pub fn advance(&mut self) -> Option<NaiveDateTime> {
        let now = self.clock.now();
        let running = self.running.as_mut()?;
        let elapsed = now.saturating_duration_since(running.started_at);
        let due = (elapsed.as_millis() / TICK_INTERVAL.as_millis()) as u64;
        if due <= running.ticks {
            return None;
        }
        running.ticks = due;
        Some(running.current())
    }

    /// When the next tick comes due, if a ticker runs.
    pub fn next_deadline(&self) -> Option<Instant> {
        let running = self.running.as_ref()?;
        let next = u32::try_from(running.ticks + 1).unwrap_or(u32::MAX);
        running.started_at.checked_add(TICK_INTERVAL * next)
    }
}

impl Running {
    /// Saturates at the last representable instant instead of wrapping.
    fn current(&self) -> NaiveDateTime {
        i64::try_from(self.ticks)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|step| self.anchor.checked_add_signed(step))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::{TICK_INTERVAL, Ticker};
    use crate::common::time::ManualClock;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use std::time::Duration;

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(23, 59, 58))
            .expect("valid date")
    }

    #[test]
    fn new_ticker_is_idle() {
        let mut ticker = Ticker::new(ManualClock::new());
        assert!(ticker.active().is_none());
        assert!(ticker.current().is_none());
        assert!(ticker.advance().is_none());
        assert!(ticker.next_deadline().is_none());
    }

    #[test]
    fn one_interval_adds_one_second() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(clock.clone());
        ticker.start(anchor());

        assert_eq!(ticker.current(), Some(anchor()));
        assert!(ticker.advance().is_none());

        clock.advance(TICK_INTERVAL);
        assert_eq!(ticker.advance(), Some(anchor() + TimeDelta::seconds(1)));
        assert!(ticker.advance().is_none());
    }

    #[test]
    fn n_seconds_yield_anchor_plus_n_across_midnight() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(clock.clone());
        ticker.start(anchor());

        for n in 1..=5 {
            clock.advance(Duration::from_secs(1));
            assert_eq!(ticker.advance(), Some(anchor() + TimeDelta::seconds(n)));
        }
        assert_eq!(
            ticker.current().map(|time| time.to_string()),
            Some("2024-03-10 00:00:03".to_string())
        );
    }

    #[test]
    fn late_poll_catches_up_without_drift() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(clock.clone());
        ticker.start(anchor());

        clock.advance(Duration::from_millis(999));
        assert!(ticker.advance().is_none());
        clock.advance(Duration::from_millis(3_500));
        assert_eq!(ticker.advance(), Some(anchor() + TimeDelta::seconds(4)));
    }

    #[test]
    fn restart_replaces_previous_handle() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(clock.clone());
        let first = ticker.start(anchor());
        clock.advance(Duration::from_secs(3));

        let later = anchor() + TimeDelta::hours(1);
        let second = ticker.start(later);
        assert_ne!(first, second);
        assert_eq!(ticker.active(), Some(second));
        assert_eq!(ticker.current(), Some(later));

        clock.advance(Duration::from_secs(1));
        assert_eq!(ticker.advance(), Some(later + TimeDelta::seconds(1)));
    }

    #[test]
    fn stop_releases_handle() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(clock.clone());
        let handle = ticker.start(anchor());

        assert_eq!(ticker.stop(), Some(handle));
        assert!(ticker.stop().is_none());
        clock.advance(Duration::from_secs(2));
        assert!(ticker.advance().is_none());
    }

    #[test]
    fn ticks_past_the_calendar_end_hold_at_the_last_instant() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(clock.clone());
        let near_end = NaiveDateTime::MAX - TimeDelta::seconds(1);
        ticker.start(near_end);

        clock.advance(Duration::from_secs(1));
        assert_eq!(ticker.advance(), Some(NaiveDateTime::MAX));

        let mut previous = NaiveDateTime::MAX;
        for _ in 0..3 {
            clock.advance(Duration::from_secs(1));
            let now = ticker.advance().expect("tick");
            assert!(now >= previous);
            assert_eq!(now, NaiveDateTime::MAX);
            previous = now;
        }
    }

    #[test]
    fn next_deadline_tracks_applied_ticks() {
        let clock = ManualClock::new();
        let mut ticker = Ticker::new(clock.clone());
        ticker.start(anchor());
        let first = ticker.next_deadline().expect("deadline");

        clock.advance(Duration::from_millis(1_200));
        ticker.advance();
        let second = ticker.next_deadline().expect("deadline");
        assert_eq!(second - first, TICK_INTERVAL);
    }
}
