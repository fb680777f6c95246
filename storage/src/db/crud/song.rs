//! CRUD operations for the song table

use log::{debug, info};
use tracing::instrument;

use crate::{
    db::{
        Table,
        schemas::song::{Song, SongBrief, SongChangeSet, SongHandle, SongId, TABLE_NAME},
    },
    errors::Error,
    util::{read, write},
};

/// The authoritative owner of every [`Song`] in the library.
///
/// The catalog hands out [`SongHandle`]s; playlists downgrade them to weak references,
/// while play histories keep them.
#[derive(Debug)]
pub struct SongCatalog {
    table: Table<SongId, SongHandle>,
}

impl Default for SongCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SongCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: Table::new(TABLE_NAME),
        }
    }

    /// Create a new song with a freshly generated id and add it to the catalog.
    #[instrument(skip(self))]
    pub fn create(&self, name: &str, artist: &str, genre: &str) -> SongHandle {
        self.insert(Song::new(name, artist, genre))
    }

    /// Add an already constructed song to the catalog.
    pub fn insert(&self, song: Song) -> SongHandle {
        let id = song.id();
        let handle = song.into_handle();
        self.table.insert(id, handle.clone());
        info!("Created song {id}");
        handle
    }

    #[must_use]
    pub fn read(&self, id: SongId) -> Option<SongHandle> {
        self.table.get(&id)
    }

    /// Read a song and project it into its presentation shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no song with the given id.
    pub fn read_brief(&self, id: SongId) -> Result<SongBrief, Error> {
        let handle = self.read(id).ok_or(Error::NotFound)?;
        let brief = SongBrief::from(&*read(&handle));
        Ok(brief)
    }

    #[must_use]
    pub fn read_all(&self) -> Vec<SongBrief> {
        self.table
            .values()
            .iter()
            .map(|handle| SongBrief::from(&*read(handle)))
            .collect()
    }

    /// Update a song in place; every playlist referencing it sees the change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no song with the given id.
    #[instrument(skip(self))]
    pub fn update(&self, id: SongId, changes: SongChangeSet) -> Result<SongBrief, Error> {
        let handle = self.read(id).ok_or(Error::NotFound)?;
        let mut song = write(&handle);
        if changes.is_empty() {
            debug!("Empty changeset for song {id}");
        }
        song.apply(changes);
        Ok(SongBrief::from(&*song))
    }

    /// Remove a song from the catalog.
    ///
    /// The song itself lives on for as long as something else (say, a play history) still
    /// holds its handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no song with the given id.
    #[instrument(skip(self))]
    pub fn delete(&self, id: SongId) -> Result<SongHandle, Error> {
        let handle = self.table.remove(&id).ok_or(Error::NotFound)?;
        info!("Deleted song {id}");
        Ok(handle)
    }

    #[must_use]
    pub fn contains(&self, id: SongId) -> bool {
        self.table.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
