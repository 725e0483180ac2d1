//! Tracing subscriber setup for the `plag` binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter, e.g. `PLAGCHECK_LOG=plagcheck=debug`
pub const LOG_ENV: &str = "PLAGCHECK_LOG";

/// Default filter directive for a `-v` count
pub fn level_for(verbosity: u8) -> &'static str
{
    match verbosity
    {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber, writing to stderr so stdout stays machine-readable.
///
/// Calling twice is harmless; the second install is ignored.
pub fn init(
    verbosity: u8,
    no_color: bool,
)
{
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .try_init();
}
