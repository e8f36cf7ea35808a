use tracing::subscriber::DefaultGuard;
use tracing::Level;

/// Install a stderr subscriber for the current thread until the guard drops.
///
/// The threshold is passed in by the caller instead of read from the
/// environment, so library code never configures logging itself.
pub fn init_logging(level: Level) -> DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
