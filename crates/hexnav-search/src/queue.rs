//! Min-heap with positional index, supporting removal of arbitrary keys.
//!
//! Entries are ordered by an `f32` priority; ties are left in whatever
//! order the heap happens to hold them. Each key's heap slot is tracked in
//! a side table so [`PriorityQueue::remove`] runs in O(log n) instead of
//! scanning the heap.

use std::marker::PhantomData;

use crate::error::SearchError;

const ABSENT: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: usize,
    priority: f32,
}

/// A min-oriented priority queue over small integer keys.
///
/// Keys convert to `usize` and index the slot table directly, so they
/// should be dense (arena handles, cell indices).
#[derive(Debug, Clone)]
pub struct PriorityQueue<K> {
    heap: Vec<Entry>,
    /// `slots[key]` is the heap position of `key`, or `ABSENT`.
    slots: Vec<usize>,
    _key: PhantomData<K>,
}

impl<K> Default for PriorityQueue<K> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            slots: Vec::new(),
            _key: PhantomData,
        }
    }
}

impl<K: Copy + Into<usize> + From<usize>> PriorityQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `key` is currently queued.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.slot(key.into()).is_some()
    }

    /// Priority `key` was queued with, if present.
    pub fn priority(&self, key: K) -> Option<f32> {
        self.slot(key.into()).map(|i| self.heap[i].priority)
    }

    /// Queue `key` with `priority`.
    ///
    /// A key that is already queued is repositioned to the new priority.
    pub fn push(&mut self, key: K, priority: f32) {
        let key = key.into();
        if let Some(i) = self.slot(key) {
            let old = self.heap[i].priority;
            self.heap[i].priority = priority;
            if priority < old {
                self.sift_up(i);
            } else {
                self.sift_down(i);
            }
            return;
        }
        if key >= self.slots.len() {
            self.slots.resize(key + 1, ABSENT);
        }
        let i = self.heap.len();
        self.heap.push(Entry { key, priority });
        self.slots[key] = i;
        self.sift_up(i);
    }

    /// The key with the lowest priority, without removing it.
    #[inline]
    pub fn peek_min(&self) -> Option<K> {
        self.heap.first().map(|e| K::from(e.key))
    }

    /// Remove and return the key with the lowest priority.
    pub fn pop_min(&mut self) -> Result<K, SearchError> {
        self.take(0)
            .map(|e| K::from(e.key))
            .ok_or(SearchError::EmptyQueue)
    }

    /// Remove `key` wherever it sits in the heap. Returns its priority, or
    /// `None` if it was not queued.
    pub fn remove(&mut self, key: K) -> Option<f32> {
        let i = self.slot(key.into())?;
        self.take(i).map(|e| e.priority)
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        for e in &self.heap {
            self.slots[e.key] = ABSENT;
        }
        self.heap.clear();
    }

    /// Iterate over queued keys in heap order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.heap.iter().map(|e| K::from(e.key))
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    #[inline]
    fn slot(&self, key: usize) -> Option<usize> {
        match self.slots.get(key) {
            Some(&i) if i != ABSENT => Some(i),
            _ => None,
        }
    }

    /// Remove the entry at heap position `i`, restoring the heap property.
    fn take(&mut self, i: usize) -> Option<Entry> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(i, last);
        let e = self.heap.pop()?;
        self.slots[e.key] = ABSENT;
        if i < self.heap.len() {
            // The moved entry may belong above or below its new slot.
            let i = self.sift_up(i);
            self.sift_down(i);
        }
        Some(e)
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots[self.heap[a].key] = a;
        self.slots[self.heap[b].key] = b;
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].priority >= self.heap[parent].priority {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < n && self.heap[right].priority < self.heap[left].priority {
                child = right;
            }
            if self.heap[child].priority >= self.heap[i].priority {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].priority <= self.heap[i].priority)
            && self
                .heap
                .iter()
                .enumerate()
                .all(|(i, e)| self.slots[e.key] == i)
    }
}
