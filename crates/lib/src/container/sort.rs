//! The sorting family.
//!
//! Every sort reorders storage in place and returns the container for chaining. Sorts
//! are stable. A sort first computes a permutation of entry positions and only then
//! rebuilds storage, so a comparator that panics or fails leaves storage untouched.
//!
//! | method                          | compares | keys                  |
//! |---------------------------------|----------|-----------------------|
//! | `sort_by_value_keep_keys`       | values   | kept with their value |
//! | `sort_by_key_ascending`         | keys     | kept                  |
//! | `sort_by_key_descending`        | keys     | kept                  |
//! | `sort_values_ascending`         | values   | reindexed `0..n`      |
//! | `sort_values_descending`        | values   | reindexed `0..n`      |
//! | `sort_by_key_with`              | keys     | kept                  |
//! | `sort_by_value_with`            | values   | kept with their value |
//! | `natural_sort`                  | values   | kept with their value |

use std::{cmp::Ordering, convert::Infallible};

use super::OrderedContainer;
use crate::{
    Key, Storage, Value,
    compare::{SortFlags, compare_keys, compare_values},
};

impl OrderedContainer {
    /// Sort by value, keeping each key with its value.
    pub fn sort_by_value_keep_keys(&mut self, flags: SortFlags) -> &mut Self {
        let order = self.value_order(|a, b| compare_values(a, b, flags));
        self.apply_order(&order);
        self
    }

    /// Sort by key, ascending.
    pub fn sort_by_key_ascending(&mut self, flags: SortFlags) -> &mut Self {
        let order = self.key_order(|a, b| compare_keys(a, b, flags));
        self.apply_order(&order);
        self
    }

    /// Sort by key, descending.
    pub fn sort_by_key_descending(&mut self, flags: SortFlags) -> &mut Self {
        let order = self.key_order(|a, b| compare_keys(b, a, flags));
        self.apply_order(&order);
        self
    }

    /// Sort by value, ascending, discarding keys and reindexing from 0.
    pub fn sort_values_ascending(&mut self, flags: SortFlags) -> &mut Self {
        let order = self.value_order(|a, b| compare_values(a, b, flags));
        self.apply_order(&order);
        self.reindex();
        self
    }

    /// Sort by value, descending, discarding keys and reindexing from 0.
    pub fn sort_values_descending(&mut self, flags: SortFlags) -> &mut Self {
        let order = self.value_order(|a, b| compare_values(b, a, flags));
        self.apply_order(&order);
        self.reindex();
        self
    }

    /// Sort by key with a caller-supplied comparator. Keys are kept.
    pub fn sort_by_key_with<F>(&mut self, cmp: F) -> &mut Self
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let order = self.key_order(cmp);
        self.apply_order(&order);
        self
    }

    /// Sort by value with a caller-supplied comparator, keeping each key with its value.
    pub fn sort_by_value_with<F>(&mut self, cmp: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let order = self.value_order(cmp);
        self.apply_order(&order);
        self
    }

    /// Like [`sort_by_key_with`](Self::sort_by_key_with) with a fallible comparator.
    ///
    /// The first comparator error is returned as is and storage is left untouched.
    pub fn try_sort_by_key_with<F, E>(&mut self, mut cmp: F) -> Result<&mut Self, E>
    where
        F: FnMut(&Key, &Key) -> Result<Ordering, E>,
    {
        let keys: Vec<&Key> = self.storage.keys().collect();
        let order = merge_sort(keys.len(), |a, b| cmp(keys[a], keys[b]))?;
        self.apply_order(&order);
        Ok(self)
    }

    /// Like [`sort_by_value_with`](Self::sort_by_value_with) with a fallible comparator.
    ///
    /// The first comparator error is returned as is and storage is left untouched.
    pub fn try_sort_by_value_with<F, E>(&mut self, mut cmp: F) -> Result<&mut Self, E>
    where
        F: FnMut(&Value, &Value) -> Result<Ordering, E>,
    {
        let storage = &self.storage;
        let order = merge_sort(storage.len(), |a, b| cmp(&storage[a], &storage[b]))?;
        self.apply_order(&order);
        Ok(self)
    }

    /// Natural-order sort over values ("img2" before "img10"), keeping each key with
    /// its value.
    pub fn natural_sort(&mut self, case_insensitive: bool) -> &mut Self {
        let flags = if case_insensitive {
            SortFlags::NaturalCaseInsensitive
        } else {
            SortFlags::Natural
        };
        tracing::trace!(case_insensitive, "Natural sort");
        self.sort_by_value_keep_keys(flags)
    }

    fn key_order<F>(&self, mut cmp: F) -> Vec<usize>
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let keys: Vec<&Key> = self.storage.keys().collect();
        infallible(merge_sort(keys.len(), |a, b| Ok(cmp(keys[a], keys[b]))))
    }

    fn value_order<F>(&self, mut cmp: F) -> Vec<usize>
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let storage = &self.storage;
        infallible(merge_sort(storage.len(), |a, b| {
            Ok(cmp(&storage[a], &storage[b]))
        }))
    }

    /// Rebuild storage so that position `i` holds the entry previously at `order[i]`.
    fn apply_order(&mut self, order: &[usize]) {
        tracing::trace!(entries = order.len(), "Reordering container storage");
        let mut entries: Vec<Option<(Key, Value)>> = std::mem::take(&mut self.storage)
            .into_iter()
            .map(Some)
            .collect();
        self.storage = order.iter().filter_map(|&i| entries[i].take()).collect();
    }

    /// Replace every key with its position.
    fn reindex(&mut self) {
        let storage: Storage = std::mem::take(&mut self.storage)
            .into_values()
            .enumerate()
            .map(|(i, v)| (Key::from(i), v))
            .collect();
        self.replace_storage(storage);
    }
}

fn infallible(order: Result<Vec<usize>, Infallible>) -> Vec<usize> {
    match order {
        Ok(order) => order,
        Err(never) => match never {},
    }
}

/// Stable top-down merge sort of the positions `0..len`.
///
/// Stops at the first comparator error. The standard library sort cannot be aborted
/// from inside the comparator.
fn merge_sort<E, F>(len: usize, mut cmp: F) -> Result<Vec<usize>, E>
where
    F: FnMut(usize, usize) -> Result<Ordering, E>,
{
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch = order.clone();
    sort_range(&mut order, &mut scratch, &mut cmp)?;
    Ok(order)
}

fn sort_range<E, F>(items: &mut [usize], scratch: &mut [usize], cmp: &mut F) -> Result<(), E>
where
    F: FnMut(usize, usize) -> Result<Ordering, E>,
{
    let len = items.len();
    if len <= 1 {
        return Ok(());
    }
    let mid = len / 2;
    {
        let (left, right) = items.split_at_mut(mid);
        let (scratch_left, scratch_right) = scratch.split_at_mut(mid);
        sort_range(left, scratch_left, cmp)?;
        sort_range(right, scratch_right, cmp)?;
    }

    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < mid && j < len {
        // Take from the right run only when strictly less, to keep the sort stable
        if cmp(items[j], items[i])? == Ordering::Less {
            scratch[k] = items[j];
            j += 1;
        } else {
            scratch[k] = items[i];
            i += 1;
        }
        k += 1;
    }
    scratch[k..k + (mid - i)].copy_from_slice(&items[i..mid]);
    k += mid - i;
    scratch[k..].copy_from_slice(&items[j..]);
    items.copy_from_slice(scratch);
    Ok(())
}
