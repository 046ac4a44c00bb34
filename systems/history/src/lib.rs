#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded undo history built from whole-document snapshots.

use std::collections::VecDeque;

use tilemap_editor_document::Document;

/// Sliding window of document snapshots, oldest first.
///
/// Pushing beyond capacity evicts the oldest snapshot.
#[derive(Clone, Debug)]
pub struct History {
    capacity: usize,
    snapshots: VecDeque<Document>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Number of snapshots retained unless configured otherwise.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Creates an empty history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty history retaining at most `capacity` snapshots.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            snapshots: VecDeque::new(),
        }
    }

    /// Deep-copies the document onto the top of the history.
    pub fn snapshot(&mut self, document: &Document) {
        self.snapshots.push_back(document.clone());
        while self.snapshots.len() > self.capacity {
            let _ = self.snapshots.pop_front();
        }
    }

    /// Removes and returns the most recent snapshot.
    ///
    /// Returns `None` when nothing is left to undo.
    pub fn undo(&mut self) -> Option<Document> {
        self.snapshots.pop_back()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether there is nothing to undo.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Maximum number of retained snapshots.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates the retained snapshots, most recent first.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Document> {
        self.snapshots.iter().rev()
    }
}
