//! Bounded rolling window
//!
//! A fixed-capacity ordered sequence. Appending beyond capacity evicts from
//! the front, so the window always holds the most recent `N` items in
//! insertion order.

use std::collections::VecDeque;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-capacity FIFO window
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedWindow<T, const N: usize> {
    items: VecDeque<T>,
}

impl<T, const N: usize> BoundedWindow<T, N> {
    /// Maximum number of retained items
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(N),
        }
    }

    /// Append one item, evicting the oldest if the window is full
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        self.trim();
    }

    /// Append in order; only the last `N` of the combined sequence survive
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
        self.trim();
    }

    fn trim(&mut self) {
        while self.items.len() > N {
            self.items.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == N
    }

    /// Oldest retained item
    pub fn first(&self) -> Option<&T> {
        self.items.front()
    }

    /// Most recent item
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone, const N: usize> BoundedWindow<T, N> {
    /// Copy out oldest-first, e.g. for chart series
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T, const N: usize> Default for BoundedWindow<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> FromIterator<T> for BoundedWindow<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut window = Self::new();
        window.extend(iter);
        window
    }
}

// Serialized as a plain sequence so renderers see an array.
impl<T: Serialize, const N: usize> Serialize for BoundedWindow<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for BoundedWindow<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Ok(items.into_iter().collect())
    }
}
