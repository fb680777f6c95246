#![allow(clippy::module_name_repetitions)]
//----------------------------------------------------------------------------------------- std lib
use std::sync::{Arc, RwLock, Weak};
//--------------------------------------------------------------------------------- other libraries
use serde::{Deserialize, Serialize};

define_id!(
    /// The unique identifier of a [`Song`].
    SongId
);

pub const TABLE_NAME: &str = "song";

/// A shared, owning handle to a [`Song`], as held by the song catalog.
///
/// Writes through the handle are visible to everything else that references the song.
pub type SongHandle = Arc<RwLock<Song>>;

/// A non-owning reference to a [`Song`], as held by playlists.
///
/// Fails to upgrade once the catalog has dropped the song.
pub type SongRef = Weak<RwLock<Song>>;

/// This struct holds all the metadata about a particular [`Song`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Song {
    /// The unique identifier for this [`Song`], fixed at creation.
    id: SongId,
    /// Title of the [`Song`].
    pub name: Arc<str>,
    /// Artist of the [`Song`].
    pub artist: Arc<str>,
    /// Genre of the [`Song`].
    pub genre: Arc<str>,
}

impl Song {
    /// Create a new [`Song`] with a freshly generated id.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, artist: impl Into<Arc<str>>, genre: impl Into<Arc<str>>) -> Self {
        Self {
            id: SongId::generate(),
            name: name.into(),
            artist: artist.into(),
            genre: genre.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> SongId {
        self.id
    }

    /// Apply the given changes, leaving fields that aren't set in the changeset untouched.
    pub fn apply(&mut self, changes: SongChangeSet) {
        let SongChangeSet {
            name,
            artist,
            genre,
        } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(artist) = artist {
            self.artist = artist;
        }
        if let Some(genre) = genre {
            self.genre = genre;
        }
    }

    /// Wrap this song in a shared handle.
    #[must_use]
    pub fn into_handle(self) -> SongHandle {
        Arc::new(RwLock::new(self))
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SongChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<Arc<str>>,
}

impl SongChangeSet {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.artist.is_none() && self.genre.is_none()
    }
}

/// The presentation shape of a [`Song`]: `{id, name, artist, genre}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SongBrief {
    pub id: SongId,
    pub name: Arc<str>,
    pub artist: Arc<str>,
    pub genre: Arc<str>,
}

impl From<&Song> for SongBrief {
    fn from(song: &Song) -> Self {
        Self {
            id: song.id,
            name: song.name.clone(),
            artist: song.artist.clone(),
            genre: song.genre.clone(),
        }
    }
}

impl From<Song> for SongBrief {
    fn from(song: Song) -> Self {
        Self::from(&song)
    }
}
