use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FOLIO_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

pub enum LogTarget {
    Stderr,
    /// Used while the terminal preview owns the screen.
    File(File),
    /// The preview owns the screen and no log file could be opened.
    Discard,
}

/// Installs the global subscriber. Failure leaves logging disabled.
pub fn init_logging(target: LogTarget) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(file) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        LogTarget::Discard => builder.with_writer(std::io::sink).try_init(),
    };
    if let Err(err) = result {
        eprintln!("warning: logging disabled: {err}");
    }
}
