//! Sorting playlists.
//!
//! Playlists are sorted with an in-place partition-exchange sort (quicksort, Lomuto
//! partition). The pivot is the median of the first, middle, and last elements, swapped into
//! the last slot before partitioning, so already sorted and reverse sorted playlists don't
//! hit the quadratic worst case. Adversarial inputs still can.
//!
//! The sort is **not stable**: songs that compare equal may come out in any order.

use std::{cmp::Ordering, sync::Arc};

use serde::{Deserialize, Serialize};
use setlist_storage::db::schemas::song::Song;
use strum::{Display, EnumIter, EnumString};

/// The field a playlist can be sorted by.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Artist,
    Genre,
}

impl SortKey {
    /// The field of `song` this key sorts by.
    #[must_use]
    pub const fn field<'a>(&self, song: &'a Song) -> &'a Arc<str> {
        match self {
            Self::Name => &song.name,
            Self::Artist => &song.artist,
            Self::Genre => &song.genre,
        }
    }
}

/// Sort `items` in place with `compare`.
pub fn quicksort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quicksort(items, &mut compare);
}

fn quicksort<T, F>(mut items: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // recurse into the smaller side and loop on the larger, so the stack stays O(log n)
    while items.len() > 1 {
        let pivot = partition(items, compare);
        let (left, right) = std::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quicksort(left, compare);
            items = right;
        } else {
            quicksort(right, compare);
            items = left;
        }
    }
}

/// Lomuto partition around the last element, returning the pivot's final position.
///
/// Everything left of the returned index compares less than or equal to the pivot,
/// everything right of it compares greater.
fn partition<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let last = items.len() - 1;
    if items.len() >= 3 {
        let median = median_of_three(items, 0, last / 2, last, compare);
        items.swap(median, last);
    }

    let mut store = 0;
    for j in 0..last {
        if compare(&items[j], &items[last]) != Ordering::Greater {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, last);
    store
}

fn median_of_three<T, F>(items: &[T], a: usize, b: usize, c: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let a_le_b = compare(&items[a], &items[b]) != Ordering::Greater;
    let b_le_c = compare(&items[b], &items[c]) != Ordering::Greater;
    let a_le_c = compare(&items[a], &items[c]) != Ordering::Greater;
    match (a_le_b, b_le_c, a_le_c) {
        (true, true, _) | (false, false, _) => b,
        (true, false, true) | (false, true, false) => c,
        _ => a,
    }
}
