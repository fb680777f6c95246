//! Playlists: an ordered song list, an id index that mirrors it, and a play history.
//!
//! [`Playlist`] is the only type that mutates the list and the index, and every mutation
//! touches both in one step, so outside this module `id in index <=> id in list` always holds.
//!
//! Songs are referenced, not copied: the catalog owns them, the list and index hold weak
//! references, and the play history holds strong ones. A reference that no longer resolves
//! reads as absent.
#![allow(clippy::module_name_repetitions)]

pub mod history;
pub mod index;
pub mod list;
pub mod sort;

//----------------------------------------------------------------------------------------- std lib
use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};
//--------------------------------------------------------------------------------- other libraries
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
//----------------------------------------------------------------------------------- local modules
use setlist_storage::{
    db::schemas::{
        playlist::{PlaylistBrief, PlaylistId},
        song::{SongBrief, SongHandle, SongId},
    },
    util::read,
};

use self::{
    history::RecentlyPlayed,
    index::SongIndex,
    list::{OrderedSongList, SongEntry},
    sort::{SortKey, quicksort_by},
};

/// A playlist as stored in the playlist catalog, one lock per playlist.
pub type PlaylistHandle = Arc<Mutex<Playlist>>;

#[derive(Debug)]
pub struct Playlist {
    id: PlaylistId,
    name: Arc<str>,
    songs: OrderedSongList,
    index: SongIndex,
    recently_played: RecentlyPlayed,
}

/// The read-only presentation of a [`Playlist`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSnapshot {
    pub id: PlaylistId,
    pub name: Arc<str>,
    /// The songs of the playlist, in order.
    pub songs: Vec<SongBrief>,
    /// The most recent plays, oldest first.
    pub recently_played: Vec<SongBrief>,
}

impl Playlist {
    /// Create an empty playlist with a freshly generated id and the default history capacity.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_history_capacity(name, history::DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_history_capacity(name: impl Into<Arc<str>>, capacity: NonZeroUsize) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            songs: OrderedSongList::new(),
            index: SongIndex::new(),
            recently_played: RecentlyPlayed::with_capacity(capacity),
        }
    }

    /// Wrap this playlist in a shared, lockable handle.
    #[must_use]
    pub fn into_handle(self) -> PlaylistHandle {
        Arc::new(Mutex::new(self))
    }

    #[must_use]
    pub const fn id(&self) -> PlaylistId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<Arc<str>>) {
        self.name = name.into();
    }

    /// Number of songs in the playlist, including any the catalog has since deleted.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: SongId) -> bool {
        self.index.contains(id)
    }

    /// Add a song to the end of the playlist.
    ///
    /// Returns `false`, changing nothing, if the song is already in the playlist.
    pub fn add_song(&mut self, song: &SongHandle) -> bool {
        let entry = SongEntry::new(song);
        let id = entry.id();
        if self.index.contains(id) {
            debug!("Song {id} is already in playlist {}", self.id);
            return false;
        }

        self.index.insert(id, entry.song_ref());
        self.songs.append(entry);
        debug_assert!(self.is_consistent());
        trace!("Added song {id} to playlist {}", self.id);
        true
    }

    /// Remove a song from the playlist.
    ///
    /// Returns `false` if the song isn't in the playlist.
    ///
    /// # Panics
    ///
    /// Panics if the song is indexed but missing from the song list, which means the
    /// playlist's invariants were already broken.
    pub fn remove_song(&mut self, id: SongId) -> bool {
        if !self.index.contains(id) {
            debug!("Song {id} is not in playlist {}", self.id);
            return false;
        }

        assert!(
            self.songs.remove(id),
            "playlist {}: song {id} is indexed but missing from the song list",
            self.id
        );
        self.index.delete(id);
        debug_assert!(self.is_consistent());
        trace!("Removed song {id} from playlist {}", self.id);
        true
    }

    /// Look up a song by id, through the index only.
    ///
    /// `None` if the song isn't in the playlist, or has been deleted from the catalog.
    #[must_use]
    pub fn get_song(&self, id: SongId) -> Option<SongHandle> {
        self.index.get(id)
    }

    /// Record a play of the song in the history.
    ///
    /// A song that isn't in the playlist is silently ignored; callers that care should check
    /// [`Playlist::contains`] first.
    pub fn play_song(&mut self, id: SongId) {
        match self.get_song(id) {
            Some(song) => {
                trace!("Playing song {id} from playlist {}", self.id);
                self.recently_played.record(song);
            }
            None => debug!("Ignoring play of song {id}, not in playlist {}", self.id),
        }
    }

    /// Reorder the playlist by the given field.
    ///
    /// Lexicographic, not stable (see [`sort`]). The song list is rebuilt from the sorted
    /// snapshot; songs the catalog has deleted are dropped from the list and the index
    /// together.
    pub fn sort_songs(&mut self, key: SortKey) {
        let sequence = self.songs.to_ordered_sequence();
        let mut keyed = Vec::with_capacity(sequence.len());
        let mut dangling = Vec::new();
        for entry in sequence {
            match entry.upgrade() {
                Some(song) => {
                    let field = key.field(&read(&song)).clone();
                    keyed.push((field, entry));
                }
                None => dangling.push(entry.id()),
            }
        }

        quicksort_by(&mut keyed, |(a, _), (b, _)| a.cmp(b));

        self.songs = keyed.into_iter().map(|(_, entry)| entry).collect();
        for id in &dangling {
            self.index.delete(*id);
        }
        if !dangling.is_empty() {
            warn!(
                "Dropped {} deleted song(s) from playlist {} while sorting",
                dangling.len(),
                self.id
            );
        }
        debug_assert!(self.is_consistent());
        debug!("Sorted playlist {} by {key}", self.id);
    }

    /// Drop every song the catalog has deleted, from the list and the index together.
    ///
    /// Returns how many were dropped.
    pub fn prune_dangling(&mut self) -> usize {
        let dangling = self
            .songs
            .iter()
            .filter(|entry| entry.upgrade().is_none())
            .map(SongEntry::id)
            .collect::<Vec<_>>();
        for id in &dangling {
            self.remove_song(*id);
        }
        dangling.len()
    }

    /// The live songs of the playlist, in order.
    #[must_use]
    pub fn songs(&self) -> Vec<SongHandle> {
        self.songs.iter().filter_map(SongEntry::upgrade).collect()
    }

    /// The ids in the song list, in order, including songs the catalog has since deleted.
    #[must_use]
    pub fn song_ids(&self) -> Vec<SongId> {
        self.songs.ids()
    }

    #[must_use]
    pub const fn recently_played(&self) -> &RecentlyPlayed {
        &self.recently_played
    }

    /// Project the playlist into its presentation shape.
    #[must_use]
    pub fn to_snapshot(&self) -> PlaylistSnapshot {
        PlaylistSnapshot {
            id: self.id,
            name: self.name.clone(),
            songs: self.songs().iter().map(brief).collect(),
            recently_played: self.recently_played.iter().map(brief).collect(),
        }
    }

    #[must_use]
    pub fn brief(&self) -> PlaylistBrief {
        PlaylistBrief {
            id: self.id,
            name: self.name.clone(),
            songs: self.len(),
        }
    }

    /// Whether the index and the song list hold exactly the same ids.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.index.len() == self.songs.len()
            && self.songs.iter().all(|entry| self.index.contains(entry.id()))
    }
}

fn brief(song: &SongHandle) -> SongBrief {
    SongBrief::from(&*read(song))
}
