use serde::{Deserialize, Serialize};
use thiserror::Error;

use setlist_storage::db::schemas::{playlist::PlaylistId, song::SongId};

/// Ways a request to the library can be turned away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Song not found: {0}")]
    SongNotFound(SongId),
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),
    #[error("Song {song} is already in playlist {playlist}")]
    SongAlreadyInPlaylist { playlist: PlaylistId, song: SongId },
    #[error("Song {song} not found in playlist {playlist}")]
    SongNotInPlaylist { playlist: PlaylistId, song: SongId },
    #[error("Invalid sort key {0:?}, expected one of: name, artist, genre")]
    InvalidSortKey(String),
    /// An id that doesn't parse can't name anything, so it is reported as not found.
    #[error("No {kind} with id {id:?}: {source}")]
    InvalidId {
        kind: &'static str,
        id: String,
        source: setlist_storage::errors::Error,
    },
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl ServiceError {
    /// The HTTP-style status code for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::SongNotFound(_)
            | Self::PlaylistNotFound(_)
            | Self::SongNotInPlaylist { .. }
            | Self::InvalidId { .. } => 404,
            Self::SongAlreadyInPlaylist { .. }
            | Self::InvalidSortKey(_)
            | Self::MalformedRequest(_) => 400,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedRequest(e.to_string())
    }
}

/// A [`ServiceError`] flattened for the wire.
#[derive(Error, Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[error("{message}")]
pub struct SerializableServiceError {
    pub status: u16,
    pub message: String,
}

impl From<ServiceError> for SerializableServiceError {
    fn from(e: ServiceError) -> Self {
        Self {
            status: e.status(),
            message: e.to_string(),
        }
    }
}
