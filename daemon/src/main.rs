//! This is the binary that runs the setlist daemon.
//! there are no tests or anything else in this file because the only thing it does is read the
//! settings and start the daemon with functions from the `setlist_daemon` library crate (which is tested).

use std::path::PathBuf;

use setlist_core::config::Settings;
use setlist_daemon::start_daemon;

use clap::Parser;

#[cfg(not(feature = "cli"))]
compile_error!("The cli feature is required to build the daemon binary");

/// Options configurable via the CLI.
#[derive(Parser)]
#[command(version, about)]
struct Flags {
    /// config file path
    #[clap(long)]
    config: Option<PathBuf>,
    /// log level
    #[clap(long)]
    log_level: Option<log::LevelFilter>,
}

fn main() -> anyhow::Result<()> {
    let flags = Flags::try_parse()?;

    let config_file = match flags.config {
        Some(config) => config,
        None => Settings::get_config_path()?,
    };

    let settings = Settings::init(config_file, flags.log_level)?;

    start_daemon(settings)
}
