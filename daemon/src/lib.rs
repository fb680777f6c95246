//----------------------------------------------------------------------------------------- std lib
use std::{
    io::{BufRead, Write},
    sync::Arc,
};
//--------------------------------------------------------------------------------- other libraries
use log::{debug, info, warn};
//------------------------------------------------------------------------------- SETLIST libraries
use setlist_core::{
    config::Settings,
    logger::{init_logger, init_tracing},
};

pub mod controller;
pub mod errors;
pub mod request;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use crate::{
    controller::LibraryController, errors::ServiceError, request::handle_line, state::Library,
};

/// Run the daemon
///
/// Initializes the logger and tracing, builds the library, then answers requests from stdin
/// on stdout until stdin closes.
///
/// # Errors
///
/// If a logger is already set, or reading stdin / writing stdout fails.
pub fn start_daemon(settings: Settings) -> anyhow::Result<()> {
    init_logger(settings.daemon.log_level)?;
    tracing::subscriber::set_global_default(init_tracing())?;

    let library = Arc::new(Library::new(settings.daemon.history_capacity));
    let controller = LibraryController::new(library);
    info!("Setlist daemon ready, reading requests from stdin");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(&controller, stdin.lock(), stdout.lock())?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Answer every request line of `input` with a response line on `output`.
///
/// Blank lines are skipped, lines that aren't valid UTF-8 get a 400 like any other malformed
/// request.
///
/// # Errors
///
/// If reading `input` or writing `output` fails.
pub fn serve<R, W>(controller: &LibraryController, mut input: R, mut output: W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(controller, line),
            Err(e) => {
                warn!("Received a request that isn't valid UTF-8: {e}");
                ServiceError::MalformedRequest(format!("request is not valid UTF-8: {e}")).into()
            }
        };
        debug!("Responding with status {}", response.status());
        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }
    Ok(())
}
