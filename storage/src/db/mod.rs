pub mod crud;
pub mod schemas;

//----------------------------------------------------------------------------------------- std lib
use std::{collections::BTreeMap, fmt::Debug, sync::RwLock};
//--------------------------------------------------------------------------------- other libraries
use log::trace;
//----------------------------------------------------------------------------------- local modules
use crate::util::{read, write};

/// An in-memory, id-keyed table of shared handles.
///
/// Rows are kept in id order; our ids are ULIDs, so that is creation order down to the millisecond.
/// The table guarantees nothing beyond uniqueness of ids; the handles it stores carry
/// their own locks, and the map lock is never held while one of them is taken.
#[derive(Debug)]
pub struct Table<K, V> {
    name: &'static str,
    rows: RwLock<BTreeMap<K, V>>,
}

impl<K, V> Table<K, V>
where
    K: Ord + Copy + Debug,
    V: Clone,
{
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Insert a row, returning the row it replaced (if any).
    pub fn insert(&self, id: K, value: V) -> Option<V> {
        trace!("{}: insert {id:?}", self.name);
        write(&self.rows).insert(id, value)
    }

    #[must_use]
    pub fn get(&self, id: &K) -> Option<V> {
        read(&self.rows).get(id).cloned()
    }

    pub fn remove(&self, id: &K) -> Option<V> {
        trace!("{}: remove {id:?}", self.name);
        write(&self.rows).remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        read(&self.rows).contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.rows).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        read(&self.rows).is_empty()
    }

    /// Snapshot of every row, in id order.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        read(&self.rows).values().cloned().collect()
    }
}
