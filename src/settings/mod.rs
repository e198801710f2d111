use crate::common::net::parse_endpoint_url;
use crate::config::{
    DEFAULT_API_URL, DEFAULT_DISPLAY_FORMAT, DEFAULT_REFRESH_HZ, GlobalConfig, LookupConfig,
    SecretString,
};
use crate::data_model::TimeQuery;
use crate::data_model::settings::AppSettings;
use chrono::format::{Item, StrftimeItems};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "tzclock")]
#[command(about = "Fetch the time for a region/city and keep it ticking locally", long_about = None)]
pub struct CliArgs {
    /// Region part of the location, e.g. Europe
    #[arg(short, long)]
    region: Option<String>,

    /// City part of the location, e.g. Berlin
    #[arg(short, long)]
    city: Option<String>,

    /// Time lookup API key
    #[arg(long, env = "TZCLOCK_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Time lookup endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds (0 disables)
    #[arg(long, default_value_t = 0)]
    timeout_secs: u64,

    /// strftime pattern for the displayed date and time
    #[arg(long, default_value = DEFAULT_DISPLAY_FORMAT)]
    format: String,

    /// UI refresh rate (Hz)
    #[arg(long, default_value_t = DEFAULT_REFRESH_HZ)]
    refresh_hz: u16,

    /// Print the ticking clock to stdout instead of opening the UI
    #[arg(long)]
    headless: bool,

    /// Stop after this many ticks (headless only)
    #[arg(long, requires = "headless")]
    ticks: Option<u64>,

    /// Log file path (defaults to the user data directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("ui refresh rate must be greater than zero (got {value})")]
    InvalidRefreshHz { value: u16 },
    #[error("an API key is required (pass --api-key or set TZCLOCK_API_KEY)")]
    MissingApiKey,
    #[error("invalid lookup endpoint: {value}")]
    InvalidApiUrl { value: String },
    #[error("invalid display format: {value}")]
    InvalidFormat { value: String },
    #[error("--headless needs both --region and --city")]
    MissingQuery,
}

pub fn load_from_cli() -> Result<AppSettings, SettingsError> {
    let args = CliArgs::parse();
    from_args(args)
}

pub fn from_args(args: CliArgs) -> Result<AppSettings, SettingsError> {
    if args.refresh_hz == 0 {
        return Err(SettingsError::InvalidRefreshHz {
            value: args.refresh_hz,
        });
    }

    let api_key = args
        .api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(SettingsError::MissingApiKey)?;

    let api_url = parse_endpoint_url(&args.api_url).ok_or_else(|| SettingsError::InvalidApiUrl {
        value: args.api_url.clone(),
    })?;

    if !is_valid_format(&args.format) {
        return Err(SettingsError::InvalidFormat { value: args.format });
    }

    let query = match (&args.region, &args.city) {
        (Some(region), Some(city)) => Some(TimeQuery::from_inputs(region, city)),
        _ => None,
    };
    if args.headless && query.is_none() {
        return Err(SettingsError::MissingQuery);
    }

    let timeout = (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs));

    Ok(AppSettings {
        query,
        api_url,
        api_key: SecretString::new(api_key),
        timeout,
        display_format: args.format,
        refresh_hz: args.refresh_hz,
        headless: args.headless,
        ticks: args.ticks,
        log_file: args.log_file,
        verbose: args.verbose,
    })
}

pub fn apply_global(settings: &AppSettings, global: &mut GlobalConfig) {
    global.ui_refresh_hz = settings.refresh_hz;
    global.display_format = settings.display_format.clone();
}

pub fn lookup_config(settings: &AppSettings) -> LookupConfig {
    LookupConfig {
        endpoint: settings.api_url.clone(),
        api_key: settings.api_key.clone(),
        timeout: settings.timeout,
    }
}

fn is_valid_format(pattern: &str) -> bool {
    !pattern.trim().is_empty()
        && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, SettingsError, apply_global, from_args, lookup_config};
    use crate::config::{DEFAULT_API_URL, DEFAULT_DISPLAY_FORMAT, GlobalConfig};
    use std::time::Duration;

    fn base_args() -> CliArgs {
        CliArgs {
            region: None,
            city: None,
            api_key: Some("key".to_string()),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 0,
            format: DEFAULT_DISPLAY_FORMAT.to_string(),
            refresh_hz: 10,
            headless: false,
            ticks: None,
            log_file: None,
            verbose: false,
        }
    }

    #[test]
    fn from_args_defaults_without_query_or_timeout() {
        let settings = from_args(base_args()).expect("settings");

        assert!(settings.query.is_none());
        assert!(settings.timeout.is_none());
        assert_eq!(settings.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(settings.api_key.expose(), "key");
    }

    #[test]
    fn from_args_trims_query_inputs() {
        let settings = from_args(CliArgs {
            region: Some(" America ".to_string()),
            city: Some(" New_York".to_string()),
            ..base_args()
        })
        .expect("settings");

        let query = settings.query.expect("query");
        assert_eq!(query.location(), "America/New_York");
    }

    #[test]
    fn from_args_rejects_zero_refresh_hz() {
        let err = from_args(CliArgs {
            refresh_hz: 0,
            ..base_args()
        })
        .expect_err("should error");

        assert!(matches!(err, SettingsError::InvalidRefreshHz { value: 0 }));
    }

    #[test]
    fn from_args_requires_non_blank_api_key() {
        let err = from_args(CliArgs {
            api_key: Some("   ".to_string()),
            ..base_args()
        })
        .expect_err("should error");

        assert!(matches!(err, SettingsError::MissingApiKey));
    }

    #[test]
    fn from_args_rejects_malformed_format() {
        let err = from_args(CliArgs {
            format: "%Y-%".to_string(),
            ..base_args()
        })
        .expect_err("should error");

        assert!(matches!(err, SettingsError::InvalidFormat { .. }));
    }

    #[test]
    fn from_args_rejects_non_http_endpoint() {
        let err = from_args(CliArgs {
            api_url: "ftp://example.com".to_string(),
            ..base_args()
        })
        .expect_err("should error");

        assert!(matches!(err, SettingsError::InvalidApiUrl { .. }));
    }

    #[test]
    fn from_args_headless_needs_query() {
        let err = from_args(CliArgs {
            headless: true,
            city: Some("Paris".to_string()),
            ..base_args()
        })
        .expect_err("should error");

        assert!(matches!(err, SettingsError::MissingQuery));
    }

    #[test]
    fn timeout_and_global_are_applied() {
        let settings = from_args(CliArgs {
            timeout_secs: 5,
            refresh_hz: 4,
            format: "%H:%M:%S".to_string(),
            ..base_args()
        })
        .expect("settings");

        let mut global = GlobalConfig::default();
        apply_global(&settings, &mut global);
        assert_eq!(global.ui_refresh_hz, 4);
        assert_eq!(global.display_format, "%H:%M:%S");

        let lookup = lookup_config(&settings);
        assert_eq!(lookup.timeout, Some(Duration::from_secs(5)));
    }
}
