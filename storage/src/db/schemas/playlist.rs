use std::sync::Arc;

use serde::{Deserialize, Serialize};

define_id!(
    /// The unique identifier of a playlist.
    PlaylistId
);

pub const TABLE_NAME: &str = "playlist";

/// A summary of a playlist, used when listing the playlist catalog.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaylistBrief {
    pub id: PlaylistId,
    pub name: Arc<str>,
    /// Number of songs in the playlist.
    pub songs: usize,
}
