//! Helpers for building songs and catalogs in tests.

use crate::db::{
    crud::song::SongCatalog,
    schemas::song::{Song, SongHandle},
};

/// A song whose fields are all derived from `n`: "Song n", "Artist n", "Genre n".
#[must_use]
pub fn song_case(n: u8) -> Song {
    Song::new(format!("Song {n}"), format!("Artist {n}"), format!("Genre {n}"))
}

/// A free-standing song handle, not owned by any catalog.
#[must_use]
pub fn song_handle(name: &str, artist: &str, genre: &str) -> SongHandle {
    Song::new(name, artist, genre).into_handle()
}

/// A catalog holding (clones of) the given songs, along with their handles in the given order.
#[must_use]
pub fn catalog_with(songs: &[Song]) -> (SongCatalog, Vec<SongHandle>) {
    let catalog = SongCatalog::new();
    let handles = songs
        .iter()
        .cloned()
        .map(|song| catalog.insert(song))
        .collect();
    (catalog, handles)
}
