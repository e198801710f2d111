use thiserror::Error;

/// Text shown on the display surface for every failed lookup.
pub const LOOKUP_FAILED_MESSAGE: &str = "Invalid region/city or API error!";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NetworkErrorKind {
    Dns,
    Connect,
    Tls,
    Timeout,
    Io,
}

impl NetworkErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            NetworkErrorKind::Dns => "dns",
            NetworkErrorKind::Connect => "connect",
            NetworkErrorKind::Tls => "tls",
            NetworkErrorKind::Timeout => "timeout",
            NetworkErrorKind::Io => "io",
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ClockError {
    #[error("network error ({}): {message}", .kind.label())]
    Network {
        kind: NetworkErrorKind,
        message: String,
    },
    #[error("Error {status}: {status_text}")]
    Lookup { status: u16, status_text: String },
    #[error("unusable lookup response: {reason}")]
    Parse { reason: String },
}

impl ClockError {
    pub fn network(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        ClockError::Network {
            kind,
            message: message.into(),
        }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        ClockError::Parse {
            reason: reason.into(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClockError::Network { .. } => "network_error",
            ClockError::Lookup { .. } => "lookup_error",
            ClockError::Parse { .. } => "parse_error",
        }
    }
}
