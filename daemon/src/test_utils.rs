//! Fixtures for the daemon's tests.

use rstest::fixture;

use setlist_storage::{db::schemas::song::SongHandle, test_utils::song_case};

use crate::{controller::LibraryController, state::Library};

#[fixture]
pub fn library() -> Library {
    Library::default()
}

/// A library holding "Song 0", "Song 1" and "Song 2", with their handles.
#[fixture]
pub fn library_with_songs() -> (Library, Vec<SongHandle>) {
    let library = Library::default();
    let songs = (0..3)
        .map(|n| library.songs().insert(song_case(n)))
        .collect();
    (library, songs)
}

#[fixture]
pub fn controller() -> LibraryController {
    LibraryController::default()
}
