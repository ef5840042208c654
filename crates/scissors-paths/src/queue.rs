//! Indexed binary min-heap.
//!
//! [`IndexedPriorityQueue`] holds a *set* of distinct keys, each with a
//! mutable priority. A hash table maps every key to its slot in the heap so
//! that priorities can be raised or lowered in `O(log n)`.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Returned by the read/extract operations of an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyQueueError;

impl fmt::Display for EmptyQueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("priority queue is empty")
    }
}

impl std::error::Error for EmptyQueueError {}

#[derive(Debug, Clone)]
struct Entry<K, P> {
    key: K,
    priority: P,
}

/// A min-priority queue of distinct keys with updatable priorities.
///
/// Invariants:
/// - `heap[i].priority >= heap[(i - 1) / 2].priority` for every `i > 0`;
/// - `index[k] == i` exactly when `heap[i].key == k`, and both tables have
///   the same length.
///
/// Ties between equal priorities are broken arbitrarily.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<K, P = u64> {
    heap: Vec<Entry<K, P>>,
    index: HashMap<K, usize>,
}

impl<K, P> Default for IndexedPriorityQueue<K, P>
where
    K: Clone + Eq + Hash,
    P: Copy + PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> IndexedPriorityQueue<K, P>
where
    K: Clone + Eq + Hash,
    P: Copy + PartialOrd,
{
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty queue with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether `key` is currently queued.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// The priority currently associated with `key`, if queued.
    pub fn priority(&self, key: &K) -> Option<P> {
        self.index.get(key).map(|&i| self.heap[i].priority)
    }

    /// A key of minimum priority: the one [`remove`](Self::remove) would
    /// return next.
    pub fn get(&self) -> Result<&K, EmptyQueueError> {
        self.heap.first().map(|e| &e.key).ok_or(EmptyQueueError)
    }

    /// The smallest priority in the queue.
    pub fn min_priority(&self) -> Result<P, EmptyQueueError> {
        self.heap.first().map(|e| e.priority).ok_or(EmptyQueueError)
    }

    /// Insert `key` with `priority`, or replace the priority of `key` if it
    /// is already queued.
    pub fn add_or_update(&mut self, key: K, priority: P) {
        debug_assert!(
            priority.partial_cmp(&priority).is_some(),
            "priority must be comparable with itself"
        );
        match self.index.get(&key) {
            None => {
                let i = self.heap.len();
                self.index.insert(key.clone(), i);
                self.heap.push(Entry { key, priority });
                self.bubble_up(i);
            }
            Some(&i) => {
                let old = self.heap[i].priority;
                self.heap[i].priority = priority;
                if priority < old {
                    self.bubble_up(i);
                } else if old < priority {
                    self.bubble_down(i);
                }
            }
        }
        debug_assert_eq!(self.index.len(), self.heap.len());
    }

    /// Remove and return a key of minimum priority.
    pub fn remove(&mut self) -> Result<K, EmptyQueueError> {
        self.pop().map(|(key, _)| key)
    }

    /// Remove and return a key of minimum priority along with that priority.
    pub fn pop(&mut self) -> Result<(K, P), EmptyQueueError> {
        if self.heap.is_empty() {
            return Err(EmptyQueueError);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let Some(entry) = self.heap.pop() else {
            return Err(EmptyQueueError);
        };
        self.index.remove(&entry.key);
        if !self.heap.is_empty() {
            self.bubble_down(0);
        }
        debug_assert_eq!(self.index.len(), self.heap.len());
        Ok((entry.key, entry.priority))
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Full `O(n)` check of the heap and index invariants.
    pub fn validate(&self) -> bool {
        if self.index.len() != self.heap.len() {
            return false;
        }
        self.heap.iter().enumerate().all(|(i, e)| {
            let ordered = i == 0 || !(e.priority < self.heap[(i - 1) / 2].priority);
            ordered && self.index.get(&e.key) == Some(&i)
        })
    }

    /// Exchange heap slots `i` and `j`, keeping `index` in step.
    ///
    /// Every heap reordering goes through here.
    fn swap(&mut self, i: usize, j: usize) {
        debug_assert!(i < self.heap.len() && j < self.heap.len());
        if i == j {
            return;
        }
        self.heap.swap(i, j);
        for slot in [i, j] {
            let moved = self.index.get_mut(&self.heap[slot].key);
            debug_assert!(moved.is_some(), "heap key missing from index");
            if let Some(pos) = moved {
                *pos = slot;
            }
        }
    }

    /// Move the entry at `i` towards the root while it is smaller than its
    /// parent.
    fn bubble_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !(self.heap[i].priority < self.heap[parent].priority) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    /// Move the entry at `i` towards the leaves while one of its children is
    /// smaller.
    fn bubble_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.heap[left].priority < self.heap[smallest].priority {
                smallest = left;
            }
            if right < len && self.heap[right].priority < self.heap[smallest].priority {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}
