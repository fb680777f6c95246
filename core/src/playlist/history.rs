use std::{collections::VecDeque, num::NonZeroUsize};

use setlist_storage::db::schemas::song::SongHandle;

/// How many plays a history remembers unless configured otherwise.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// A bounded, oldest-first log of played songs.
///
/// Entries are strong handles: the history outlives the song's membership in the playlist,
/// and its presence in the catalog.
#[derive(Clone, Debug)]
pub struct RecentlyPlayed {
    entries: VecDeque<SongHandle>,
    capacity: NonZeroUsize,
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentlyPlayed {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Push a play onto the back, evicting the oldest play if we're full.
    pub fn record(&mut self, song: SongHandle) {
        if self.entries.len() == self.capacity.get() {
            self.entries.pop_front();
        }
        self.entries.push_back(song);
    }

    /// The plays we remember, oldest to newest.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SongHandle> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SongHandle> + ExactSizeIterator {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
