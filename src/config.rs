use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://timezone.abstractapi.com/v1/current_time/";
/// Month/day/year with a 12-hour clock, the common browser default rendering.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p";
pub const DEFAULT_REFRESH_HZ: u16 = 10;
/// Upper bound on the lookup response body.
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct GlobalConfig {
    pub ui_refresh_hz: u16,
    pub display_format: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            ui_refresh_hz: DEFAULT_REFRESH_HZ,
            display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LookupConfig {
    pub endpoint: Url,
    pub api_key: SecretString,
    /// `None` leaves the request without a deadline.
    pub timeout: Option<Duration>,
}

#[derive(Clone, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
