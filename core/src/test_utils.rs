use setlist_storage::{
    db::schemas::song::{SongHandle, SongId},
    test_utils::{song_case, song_handle},
    util::read,
};

use crate::playlist::list::SongEntry;

/// `n` free-standing songs, "Song 0" through "Song n-1".
pub fn handles(n: u8) -> Vec<SongHandle> {
    (0..n).map(|i| song_case(i).into_handle()).collect()
}

pub fn song(name: &str, artist: &str, genre: &str) -> SongHandle {
    song_handle(name, artist, genre)
}

/// A song where only the name matters.
pub fn named(name: &str) -> SongHandle {
    song_handle(name, "Artist", "Genre")
}

pub fn entries(handles: &[SongHandle]) -> Vec<SongEntry> {
    handles.iter().map(SongEntry::new).collect()
}

pub fn song_ids(handles: &[SongHandle]) -> Vec<SongId> {
    handles.iter().map(|h| read(h).id()).collect()
}
