use crate::common::time::{Clock, SystemClock};
use crate::config::GlobalConfig;
use crate::data_model::{AuthoritativeTime, TimeQuery, ZoneInfo};
use crate::error::{ClockError, LOOKUP_FAILED_MESSAGE};
use crate::features::lookup::TimeLookup;
use crate::features::ticker::{Ticker, TickerHandle};
use chrono::NaiveDateTime;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const LOADING_TEXT: &str = "Loading...";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Fetching,
    Displaying,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Fetching => "fetching",
            Phase::Displaying => "displaying",
        }
    }
}

/// Issued per request; only the most recent one may settle the widget.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LookupRequest {
    pub token: RequestToken,
    pub query: TimeQuery,
}

/// Owns the displayed clock: loading flag, display text and the active ticker.
pub struct ClockWidget<C: Clock = SystemClock> {
    display_format: String,
    ticker: Ticker<C>,
    display: String,
    loading: bool,
    pending: Option<RequestToken>,
    next_token: u64,
    query: Option<TimeQuery>,
    zone: ZoneInfo,
    last_error: Option<ClockError>,
    failed: bool,
}

impl ClockWidget<SystemClock> {
    pub fn new(global: &GlobalConfig) -> Self {
        Self::with_clock(global, SystemClock)
    }
}

impl<C: Clock> ClockWidget<C> {
    pub fn with_clock(global: &GlobalConfig, clock: C) -> Self {
        Self {
            display_format: global.display_format.clone(),
            ticker: Ticker::new(clock),
            display: String::new(),
            loading: false,
            pending: None,
            next_token: 1,
            query: None,
            zone: ZoneInfo::default(),
            last_error: None,
            failed: false,
        }
    }

    /// Synchronous half of a request: flags loading and shows the placeholder.
    /// The running ticker, if any, keeps going until a response replaces it.
    pub fn begin_request(&mut self, query: TimeQuery) -> LookupRequest {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        if let Some(previous) = self.pending.replace(token) {
            debug!(
                superseded = previous.id(),
                token = token.id(),
                "request issued while another is in flight"
            );
        }
        self.loading = true;
        self.failed = false;
        self.display = LOADING_TEXT.to_string();
        info!(token = token.id(), location = %query, "requesting time");
        LookupRequest { token, query }
    }

    /// Settles a request. Returns `false` when the token is stale and the
    /// outcome was dropped without touching any state.
    pub fn complete_request(
        &mut self,
        request: &LookupRequest,
        result: Result<AuthoritativeTime, ClockError>,
    ) -> bool {
        if self.pending != Some(request.token) {
            debug!(
                token = request.token.id(),
                ok = result.is_ok(),
                "discarding stale lookup outcome"
            );
            return false;
        }
        self.pending = None;

        match result {
            Ok(time) => {
                let handle = self.ticker.start(time.local);
                info!(
                    token = request.token.id(),
                    ticker = handle.id(),
                    time = %time.local,
                    "time fetched"
                );
                self.query = Some(request.query.clone());
                self.zone = time.zone;
                self.last_error = None;
                self.failed = false;
                self.display = self.render(time.local);
            }
            Err(err) => {
                warn!(
                    token = request.token.id(),
                    location = %request.query,
                    kind = err.label(),
                    "lookup failed: {err}"
                );
                self.last_error = Some(err);
                self.failed = true;
                self.display = LOOKUP_FAILED_MESSAGE.to_string();
            }
        }

        self.loading = false;
        true
    }

    /// Runs a whole request against `lookup` on the calling thread.
    pub fn request_time<L: TimeLookup + ?Sized>(&mut self, lookup: &mut L, query: TimeQuery) {
        let request = self.begin_request(query);
        let result = lookup.lookup(&request.query);
        self.complete_request(&request, result);
    }

    /// Applies due ticks. Returns `true` when the display changed.
    pub fn poll_tick(&mut self) -> bool {
        match self.ticker.advance() {
            Some(time) => {
                self.failed = false;
                self.display = self.render(time);
                true
            }
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.next_deadline()
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::Fetching
        } else if self.ticker.active().is_some() {
            Phase::Displaying
        } else {
            Phase::Idle
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while the display shows the failure message of the last lookup.
    pub fn is_error(&self) -> bool {
        self.failed
    }

    pub fn active_ticker(&self) -> Option<TickerHandle> {
        self.ticker.active()
    }

    pub fn current_time(&self) -> Option<NaiveDateTime> {
        self.ticker.current()
    }

    /// Query behind the time currently ticking.
    pub fn query(&self) -> Option<&TimeQuery> {
        self.query.as_ref()
    }

    pub fn zone(&self) -> &ZoneInfo {
        &self.zone
    }

    pub fn last_error(&self) -> Option<&ClockError> {
        self.last_error.as_ref()
    }

    fn render(&self, time: NaiveDateTime) -> String {
        time.format(&self.display_format).to_string()
    }
}
