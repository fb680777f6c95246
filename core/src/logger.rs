//----------------------------------------------------------------------------------------- std lib
use std::io::Write;
use std::time::Instant;
//--------------------------------------------------------------------------------- other libraries
use env_logger::fmt::style::Style;
use log::info;
use once_cell::sync::Lazy;
use tracing_subscriber::layer::SubscriberExt as _;

use crate::format_duration;

/// When logging started, log lines are stamped relative to it.
pub static INIT_INSTANT: Lazy<Instant> = Lazy::new(Instant::now);

/// The filter used when `RUST_LOG` isn't set: silence every crate but our own.
#[must_use]
pub fn default_filter(filter: log::LevelFilter) -> String {
    format!("off,setlist={filter}")
}

//---------------------------------------------------------------------------------------------------- Logger init function
#[allow(clippy::module_name_repetitions)]
/// Initializes the logger.
///
/// This enables console logging on all the internals of `Setlist`.
///
/// Functionality is provided by [`log`].
///
/// The levels are:
/// - ERROR
/// - WARN
/// - INFO
/// - DEBUG
/// - TRACE
///
/// If `RUST_LOG` is set it takes precedence over `filter`.
///
/// # Errors
///
/// Fails if a global logger has already been installed.
pub fn init_logger(filter: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    // Initialize timer.
    let now = Lazy::force(&INIT_INSTANT);

    let env = std::env::var("RUST_LOG").ok().filter(|e| !e.is_empty());

    let mut builder = env_logger::Builder::new();
    builder
        .format(move |buf, record| {
            let level_style = buf.default_level_style(record.level()).bold();
            let dimmed = Style::new().dimmed();
            let level = match record.level() {
                log::Level::Debug => "D",
                log::Level::Trace => "T",
                log::Level::Info => "I",
                log::Level::Warn => "W",
                log::Level::Error => "E",
            };
            writeln!(
                buf,
                // Longest PATH in the repo: `storage/src/db/schemas/playlist.rs` - `34` characters
                // Longest file in the repo: `core/src/playlist/mod.rs`           - `3` digits
                //
                //      Longest PATH ---|        |--- Longest file
                //                      |        |
                //                      v        v
                "| {}{level}{} | {}{}{} | {}{: >34} @ {: <4}{} | {}",
                level_style.render(),
                level_style.render_reset(),
                dimmed.render(),
                format_duration(&now.elapsed()),
                dimmed.render_reset(),
                dimmed.render(),
                record.file_static().unwrap_or("???"),
                record.line().unwrap_or(0),
                dimmed.render_reset(),
                record.args(),
            )
        })
        .write_style(env_logger::WriteStyle::Auto);

    match &env {
        Some(env) => builder.parse_filters(env),
        None => builder.parse_filters(&default_filter(filter)),
    };

    builder.try_init()?;

    match env {
        Some(env) => info!("Log Level (RUST_LOG) ... {env}"),
        None => info!("Log Level (Flag) ... {filter}"),
    }

    Ok(())
}

/// Initializes the tracing layer.
///
/// Spans are written to stderr when they close, filtered by the `SETLIST_TRACE` environment
/// variable (an [`tracing_subscriber::EnvFilter`] directive). Nothing is traced by default.
#[must_use]
pub fn init_tracing() -> impl tracing::Subscriber + Send + Sync {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SETLIST_TRACE")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));

    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(log::LevelFilter::Info, "off,setlist=INFO")]
    #[case(log::LevelFilter::Trace, "off,setlist=TRACE")]
    #[case(log::LevelFilter::Off, "off,setlist=OFF")]
    fn test_default_filter(#[case] filter: log::LevelFilter, #[case] expected: &str) {
        assert_eq!(default_filter(filter), expected);
    }
}
