pub mod config;
pub mod errors;
pub mod logger;
pub mod playlist;
#[cfg(test)]
pub mod test_utils;

use std::{path::PathBuf, time::Duration};

use errors::DirectoryError;

/// Get the config directory for setlist, e.g. `~/.config/setlist` on linux.
///
/// # Errors
///
/// Returns [`DirectoryError::Config`] if the system has no home directory to base it on.
#[inline]
pub fn get_config_dir() -> Result<PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "setlist")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(DirectoryError::Config)
}

/// Format a [`Duration`] as `SS.mmm`, or `MM:SS.mmm` past the minute mark.
#[must_use]
pub fn format_duration(duration: &Duration) -> String {
    let total = duration.as_secs();
    let millis = duration.subsec_millis();
    let (minutes, seconds) = (total / 60, total % 60);
    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{millis:03}")
    } else {
        format!("{seconds}.{millis:03}")
    }
}
