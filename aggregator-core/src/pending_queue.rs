// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use alloc::collections::VecDeque;

/// Unbounded FIFO of values waiting to be combined.
///
/// Values leave in exactly the order they arrived; nothing is deduplicated or
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQueue<T> {
    items: VecDeque<T>,
}

impl<T> PendingQueue<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Appends `value` at the tail.
    pub fn push(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Removes the head, if any.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates head to tail without consuming.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for PendingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::PendingQueue;
    use alloc::vec::Vec;

    #[test]
    fn test_pops_in_insertion_order() {
        let mut queue = PendingQueue::new();
        queue.push(3);
        queue.push(1);
        queue.push(2);

        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_keeps_duplicates() {
        let mut queue = PendingQueue::new();
        queue.push("a");
        queue.push("a");

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), ["a", "a"]);
    }

    #[test]
    fn test_grows_without_limit() {
        let mut queue = PendingQueue::default();
        for i in 0..10_000 {
            queue.push(i);
        }

        assert_eq!(queue.len(), 10_000);
        assert!(!queue.is_empty());
    }
}
