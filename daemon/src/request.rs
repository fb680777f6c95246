//! The line-oriented JSON interface to the [`LibraryController`].
//!
//! Each request is a JSON object tagged by its `"command"`:
//!
//! ```json
//! {"command": "playlist_sort", "playlist_id": "01J...", "sort_key": "artist"}
//! ```
//!
//! and is answered by either `{"status": 200, "body": ...}` or `{"status": 404, "error": "..."}`.

use std::str::FromStr;

use log::{debug, error};
use serde::{Deserialize, Serialize};

use setlist_storage::db::schemas::{
    playlist::PlaylistId,
    song::{SongChangeSet, SongId},
};

use crate::{
    controller::LibraryController,
    errors::{SerializableServiceError, ServiceError},
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    SongCreate {
        name: String,
        artist: String,
        genre: String,
    },
    SongGet {
        id: String,
    },
    SongUpdate {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        artist: Option<String>,
        #[serde(default)]
        genre: Option<String>,
    },
    SongDelete {
        id: String,
    },
    SongList,
    PlaylistCreate {
        name: String,
    },
    PlaylistGet {
        id: String,
    },
    PlaylistList,
    PlaylistDelete {
        id: String,
    },
    PlaylistAddSong {
        playlist_id: String,
        song_id: String,
    },
    PlaylistRemoveSong {
        playlist_id: String,
        song_id: String,
    },
    PlaylistSort {
        playlist_id: String,
        #[serde(default = "default_sort_key")]
        sort_key: String,
    },
    PlaylistPlaySong {
        playlist_id: String,
        song_id: String,
    },
}

fn default_sort_key() -> String {
    "name".to_string()
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Response {
    Failure {
        status: u16,
        error: String,
    },
    Success {
        status: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<serde_json::Value>,
    },
}

impl Response {
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Failure { status, .. } | Self::Success { status, .. } => *status,
        }
    }

    fn ok<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self::Success {
                status,
                body: Some(body),
            },
            Err(e) => {
                error!("Failed to serialize response body: {e}");
                Self::Failure {
                    status: 500,
                    error: format!("Failed to serialize response body: {e}"),
                }
            }
        }
    }

    const fn no_content() -> Self {
        Self::Success {
            status: 204,
            body: None,
        }
    }
}

impl From<SerializableServiceError> for Response {
    fn from(e: SerializableServiceError) -> Self {
        Self::Failure {
            status: e.status,
            error: e.message,
        }
    }
}

impl From<ServiceError> for Response {
    fn from(e: ServiceError) -> Self {
        SerializableServiceError::from(e).into()
    }
}

impl<T: Serialize> From<Result<T, ServiceError>> for Response {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(body) => Self::ok(200, &body),
            Err(e) => e.into(),
        }
    }
}

fn parse_id<I>(kind: &'static str, id: &str) -> Result<I, ServiceError>
where
    I: FromStr<Err = setlist_storage::errors::Error>,
{
    id.parse().map_err(|source| ServiceError::InvalidId {
        kind,
        id: id.to_string(),
        source,
    })
}

fn song_id(id: &str) -> Result<SongId, ServiceError> {
    parse_id("song", id)
}

fn playlist_id(id: &str) -> Result<PlaylistId, ServiceError> {
    parse_id("playlist", id)
}

/// Run a request against the controller.
#[must_use]
pub fn dispatch(controller: &LibraryController, request: Request) -> Response {
    debug!("Dispatching {request:?}");
    match request {
        Request::SongCreate {
            name,
            artist,
            genre,
        } => Response::ok(201, &controller.song_create(&name, &artist, &genre)),
        Request::SongGet { id } => song_id(&id).and_then(|id| controller.song_get(id)).into(),
        Request::SongUpdate {
            id,
            name,
            artist,
            genre,
        } => {
            let changes = SongChangeSet {
                name: name.map(Into::into),
                artist: artist.map(Into::into),
                genre: genre.map(Into::into),
            };
            song_id(&id)
                .and_then(|id| controller.song_update(id, changes))
                .into()
        }
        Request::SongDelete { id } => {
            match song_id(&id).and_then(|id| controller.song_delete(id)) {
                Ok(()) => Response::no_content(),
                Err(e) => e.into(),
            }
        }
        Request::SongList => Response::ok(200, &controller.song_list()),
        Request::PlaylistCreate { name } => Response::ok(201, &controller.playlist_create(&name)),
        Request::PlaylistGet { id } => playlist_id(&id)
            .and_then(|id| controller.playlist_get(id))
            .into(),
        Request::PlaylistList => Response::ok(200, &controller.playlist_list()),
        Request::PlaylistDelete { id } => {
            match playlist_id(&id).and_then(|id| controller.playlist_delete(id)) {
                Ok(()) => Response::no_content(),
                Err(e) => e.into(),
            }
        }
        Request::PlaylistAddSong {
            playlist_id: pid,
            song_id: sid,
        } => playlist_id(&pid)
            .and_then(|pid| Ok((pid, song_id(&sid)?)))
            .and_then(|(pid, sid)| controller.playlist_add_song(pid, sid))
            .into(),
        Request::PlaylistRemoveSong {
            playlist_id: pid,
            song_id: sid,
        } => playlist_id(&pid)
            .and_then(|pid| Ok((pid, song_id(&sid)?)))
            .and_then(|(pid, sid)| controller.playlist_remove_song(pid, sid))
            .into(),
        Request::PlaylistSort {
            playlist_id: pid,
            sort_key,
        } => playlist_id(&pid)
            .and_then(|pid| controller.playlist_sort(pid, &sort_key))
            .into(),
        Request::PlaylistPlaySong {
            playlist_id: pid,
            song_id: sid,
        } => playlist_id(&pid)
            .and_then(|pid| Ok((pid, song_id(&sid)?)))
            .and_then(|(pid, sid)| controller.playlist_play_song(pid, sid))
            .into(),
    }
}

/// Parse one line of input and run it, malformed lines get a 400.
#[must_use]
pub fn handle_line(controller: &LibraryController, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(controller, request),
        Err(e) => ServiceError::from(e).into(),
    }
}
