use crate::config::SecretString;
use crate::data_model::TimeQuery;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub query: Option<TimeQuery>,
    pub api_url: Url,
    pub api_key: SecretString,
    pub timeout: Option<Duration>,
    pub display_format: String,
    pub refresh_hz: u16,
    pub headless: bool,
    pub ticks: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}
