use tzclock::app::{ClockWidget, run_headless, spawn_lookup_worker};
use tzclock::config::GlobalConfig;
use tzclock::logging::{self, LogSink};
use tzclock::lookup::CurlTimeLookup;
use tzclock::settings::{apply_global, load_from_cli, lookup_config};
use tzclock::ui::run_ui;

fn main() -> std::io::Result<()> {
    let settings = load_from_cli()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()))?;

    let sink = if settings.headless {
        LogSink::Stderr
    } else {
        LogSink::File(
            settings
                .log_file
                .clone()
                .unwrap_or_else(logging::default_log_path),
        )
    };
    let _log_guard = logging::init(settings.verbose, sink)?;

    let mut global = GlobalConfig::default();
    apply_global(&settings, &mut global);
    let lookup = lookup_config(&settings);
    let widget = ClockWidget::new(&global);

    if settings.headless {
        let mut client = CurlTimeLookup::new(lookup)
            .map_err(|err| std::io::Error::other(format!("lookup client init failed: {err}")))?;
        let query = settings.query.ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "missing region/city")
        })?;
        let mut widget = widget;
        let mut stdout = std::io::stdout().lock();
        return run_headless(&mut widget, &mut client, query, settings.ticks, &mut stdout);
    }

    let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
    let worker = spawn_lookup_worker(move || CurlTimeLookup::new(lookup), outcome_tx);
    run_ui(widget, &global, worker, outcome_rx, settings.query)
}
