use std::collections::HashMap;

use setlist_storage::db::schemas::song::{SongHandle, SongId, SongRef};

/// Id to song lookup for a playlist, mirroring the membership of its song list.
#[derive(Clone, Debug, Default)]
pub struct SongIndex {
    entries: HashMap<SongId, SongRef>,
}

impl SongIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: SongId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Look up a song, `None` if it isn't indexed or no longer exists.
    #[must_use]
    pub fn get(&self, id: SongId) -> Option<SongHandle> {
        self.entries.get(&id).and_then(SongRef::upgrade)
    }

    pub fn insert(&mut self, id: SongId, song: SongRef) {
        self.entries.insert(id, song);
    }

    /// Returns whether the id was indexed.
    pub fn delete(&mut self, id: SongId) -> bool {
        self.entries.remove(&id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SongId> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::handles;

    use pretty_assertions::assert_eq;
    use setlist_storage::util::read;
    use std::{collections::HashSet, sync::Arc};

    #[test]
    fn test_insert_get_delete() {
        let handles = handles(2);
        let (a, b) = (read(&handles[0]).id(), read(&handles[1]).id());
        let mut index = SongIndex::new();
        assert!(index.is_empty());

        index.insert(a, Arc::downgrade(&handles[0]));
        index.insert(b, Arc::downgrade(&handles[1]));
        assert_eq!(index.len(), 2);
        assert!(index.contains(a));
        assert!(Arc::ptr_eq(&index.get(b).unwrap(), &handles[1]));
        assert_eq!(index.ids().collect::<HashSet<_>>(), HashSet::from([a, b]));

        assert!(index.delete(a));
        assert!(!index.delete(a));
        assert!(!index.contains(a));
        assert!(index.get(a).is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_dangling_reference_reads_as_absent() {
        let mut handles = handles(1);
        let id = read(&handles[0]).id();
        let mut index = SongIndex::new();
        index.insert(id, Arc::downgrade(&handles[0]));

        handles.clear();
        assert!(index.contains(id));
        assert!(index.get(id).is_none());
    }
}
