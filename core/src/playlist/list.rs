//! The ordered song sequence backing a playlist.
//!
//! A doubly-linked list whose nodes live in an arena (`Vec` of slots) and link to each other
//! by slot index, which gives us the linked-list costs (O(1) append, splice-out removal with
//! no shifting) without any `unsafe` or `Rc<RefCell<_>>` juggling. Slots freed by removal are
//! reused by later appends.

use std::sync::{Arc, Weak};

use setlist_storage::db::schemas::song::{SongHandle, SongId, SongRef};
use setlist_storage::util::read;

/// A non-owning reference to a song, tagged with the song's id.
///
/// The id is kept alongside the weak reference so the entry can still be found (and
/// removed) after the catalog has dropped the song.
#[derive(Clone, Debug)]
pub struct SongEntry {
    id: SongId,
    song: SongRef,
}

impl SongEntry {
    #[must_use]
    pub fn new(song: &SongHandle) -> Self {
        Self {
            id: read(song).id(),
            song: Arc::downgrade(song),
        }
    }

    #[must_use]
    pub const fn id(&self) -> SongId {
        self.id
    }

    #[must_use]
    pub fn song_ref(&self) -> SongRef {
        Weak::clone(&self.song)
    }

    /// Resolve the entry, `None` if the song no longer exists.
    #[must_use]
    pub fn upgrade(&self) -> Option<SongHandle> {
        self.song.upgrade()
    }
}

#[derive(Clone, Debug)]
struct Node {
    entry: SongEntry,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct OrderedSongList {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl OrderedSongList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert at the tail.
    ///
    /// Doesn't check for duplicates, that's up to the caller.
    pub fn append(&mut self, entry: SongEntry) {
        let node = Node {
            entry,
            prev: self.tail,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Remove the first node holding `id`, scanning from the head.
    ///
    /// Returns `false` if no node matches.
    pub fn remove(&mut self, id: SongId) -> bool {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = self.node(slot);
            if node.entry.id == id {
                self.unlink(slot);
                return true;
            }
            cursor = node.next;
        }
        false
    }

    /// Copy the list out, head to tail.
    ///
    /// The returned sequence is independent of the list, so it can be reordered freely.
    #[must_use]
    pub fn to_ordered_sequence(&self) -> Vec<SongEntry> {
        self.iter().cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, id: SongId) -> bool {
        self.iter().any(|entry| entry.id == id)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<SongId> {
        self.iter().map(SongEntry::id).collect()
    }

    #[must_use]
    pub fn front(&self) -> Option<&SongEntry> {
        self.head.map(|slot| &self.node(slot).entry)
    }

    #[must_use]
    pub fn back(&self) -> Option<&SongEntry> {
        self.tail.map(|slot| &self.node(slot).entry)
    }

    #[must_use]
    pub const fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Splice the node at `slot` out by relinking its neighbours, then free the slot.
    fn unlink(&mut self, slot: usize) {
        let Some(node) = self.slots[slot].take() else {
            return;
        };

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(slot);
        self.len -= 1;
    }

    /// Every slot reachable through a link is occupied.
    fn node(&self, slot: usize) -> &Node {
        self.slots[slot]
            .as_ref()
            .unwrap_or_else(|| unreachable!("link to vacant slot {slot}"))
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node {
        self.slots[slot]
            .as_mut()
            .unwrap_or_else(|| unreachable!("link to vacant slot {slot}"))
    }
}

impl FromIterator<SongEntry> for OrderedSongList {
    fn from_iter<I: IntoIterator<Item = SongEntry>>(iter: I) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.append(entry);
        }
        list
    }
}

impl<'a> IntoIterator for &'a OrderedSongList {
    type Item = &'a SongEntry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`OrderedSongList`], head to tail (or tail to head when reversed).
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    list: &'a OrderedSongList,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a SongEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.entry)
    }
}

impl ExactSizeIterator for Iter<'_> {}
