//! The library: every song and every playlist the daemon knows about.

use std::num::NonZeroUsize;

use log::{debug, info};
use tracing::instrument;

use setlist_core::playlist::{Playlist, PlaylistHandle, history::DEFAULT_CAPACITY};
use setlist_storage::{
    db::{
        Table,
        crud::song::SongCatalog,
        schemas::{
            playlist::{PlaylistId, TABLE_NAME as PLAYLIST_TABLE_NAME},
            song::{SongHandle, SongId},
        },
    },
    errors::Error,
    util::lock,
};

/// The process-wide store, constructed once and shared with the controller.
///
/// Lock order: a playlist lock may be held while the song catalog is read, never the other
/// way around. [`Library::delete_song`] releases the catalog before it walks the playlists.
#[derive(Debug)]
pub struct Library {
    songs: SongCatalog,
    playlists: Table<PlaylistId, PlaylistHandle>,
    history_capacity: NonZeroUsize,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Library {
    /// An empty library whose playlists remember `history_capacity` plays each.
    #[must_use]
    pub const fn new(history_capacity: NonZeroUsize) -> Self {
        Self {
            songs: SongCatalog::new(),
            playlists: Table::new(PLAYLIST_TABLE_NAME),
            history_capacity,
        }
    }

    #[must_use]
    pub const fn songs(&self) -> &SongCatalog {
        &self.songs
    }

    #[must_use]
    pub const fn history_capacity(&self) -> NonZeroUsize {
        self.history_capacity
    }

    /// Delete a song from the catalog, and from every playlist it is in.
    ///
    /// Play histories keep their handles, so the song lives on there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no song with the given id.
    #[instrument(skip(self))]
    pub fn delete_song(&self, id: SongId) -> Result<SongHandle, Error> {
        let handle = self.songs.delete(id)?;

        let mut removed_from = 0usize;
        for playlist in self.playlists.values() {
            if lock(&playlist).remove_song(id) {
                removed_from += 1;
            }
        }
        debug!("Removed song {id} from {removed_from} playlist(s)");

        Ok(handle)
    }

    /// Create an empty playlist.
    #[instrument(skip(self))]
    pub fn create_playlist(&self, name: &str) -> PlaylistHandle {
        let playlist = Playlist::with_history_capacity(name, self.history_capacity);
        let id = playlist.id();
        let handle = playlist.into_handle();
        self.playlists.insert(id, handle.clone());
        info!("Created playlist {id}");
        handle
    }

    #[must_use]
    pub fn playlist(&self, id: PlaylistId) -> Option<PlaylistHandle> {
        self.playlists.get(&id)
    }

    /// Every playlist, in id order.
    #[must_use]
    pub fn playlists(&self) -> Vec<PlaylistHandle> {
        self.playlists.values()
    }

    /// Delete a playlist, its songs and history go with it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no playlist with the given id.
    #[instrument(skip(self))]
    pub fn delete_playlist(&self, id: PlaylistId) -> Result<PlaylistHandle, Error> {
        let handle = self.playlists.remove(&id).ok_or(Error::NotFound)?;
        info!("Deleted playlist {id}");
        Ok(handle)
    }
}
