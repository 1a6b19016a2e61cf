use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable selecting the log level (`error` .. `trace`).
pub const LOG_ENV: &str = "OCTOSPACE_LOG";

/// Parses a level name, case-insensitively. Unknown names give `None`.
pub fn parse_level(name: &str) -> Option<Level> {
    name.trim().parse().ok()
}

/// Installs a stderr fmt subscriber at the level read from [`LOG_ENV`]
/// (`info` when unset or unparsable).
///
/// Returns `false` if a global subscriber was already installed.
pub fn init() -> bool {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(Level::INFO);
    init_with_level(level)
}

pub fn init_with_level(level: Level) -> bool {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
