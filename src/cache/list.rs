//! Recency List Module
//!
//! Doubly linked list of cache entries kept in a dense arena.
//!
//! Entries are addressed by stable slot numbers. Slots `HEAD` and `TAIL` are
//! permanent sentinels; freed slots go onto a free list and are reused before
//! the arena grows. Front = most recently used, back = least recently used.

use crate::cache::entry::{Entry, Node, HEAD, TAIL};

// == Recency List ==
/// Arena-backed recency list owning every resident entry.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    /// Arena of nodes, sentinels at `HEAD` and `TAIL`
    nodes: Vec<Node<K, V>>,
    /// Reclaimed slots available for reuse
    free: Vec<usize>,
    /// Number of occupied slots
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates an empty list: `head <-> tail`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel(HEAD, TAIL), Node::sentinel(HEAD, TAIL)],
            free: Vec::new(),
            len: 0,
        }
    }

    // == Reserve ==
    /// Makes sure the next `push_front` will not allocate.
    ///
    /// Called before any link is touched so an allocation failure leaves the list as it was.
    pub fn reserve(&mut self) {
        if self.free.is_empty() {
            self.nodes.reserve(1);
        }
    }

    // == Push Front ==
    /// Stores a new entry and links it as the most recently used. Returns its slot.
    pub fn push_front(&mut self, key: K, value: V) -> usize {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Node::occupied(slot, key, value);
                slot
            }
            None => {
                let slot = self.nodes.len();
                self.nodes.push(Node::occupied(slot, key, value));
                slot
            }
        };
        self.len += 1;
        self.link_after_head(slot);
        slot
    }

    // == Refill ==
    /// Reuses an unlinked, still occupied slot (typically one returned by
    /// `evict_lru`) for a new entry and links it as the most recently used.
    ///
    /// The previous entry in the slot is dropped.
    pub fn refill(&mut self, slot: usize, key: K, value: V) {
        debug_assert!(slot != HEAD && slot != TAIL);
        self.nodes[slot].entry = Some(Entry { key, value });
        self.link_after_head(slot);
    }

    // == Link After Head ==
    /// Splices `slot` in directly after the head sentinel.
    ///
    /// Touches exactly four links: head.next, slot.prev, slot.next, old_front.prev.
    pub fn link_after_head(&mut self, slot: usize) {
        let old_front = self.nodes[HEAD].next;
        self.nodes[slot].prev = HEAD;
        self.nodes[slot].next = old_front;
        self.nodes[old_front].prev = slot;
        self.nodes[HEAD].next = slot;
    }

    // == Unlink ==
    /// Joins the neighbours of `slot` directly. The slot's own links are left stale.
    pub fn unlink(&mut self, slot: usize) {
        debug_assert!(slot != HEAD && slot != TAIL, "sentinels are never unlinked");
        let prev = self.nodes[slot].prev;
        let next = self.nodes[slot].next;
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    // == Promote ==
    /// Moves `slot` to the front of the list.
    pub fn promote(&mut self, slot: usize) {
        if self.nodes[HEAD].next == slot {
            return;
        }
        self.unlink(slot);
        self.link_after_head(slot);
    }

    // == Evict LRU ==
    /// Unlinks the least recently used entry and returns its slot.
    ///
    /// The slot stays occupied so the caller can read the key for index removal,
    /// then either `refill` or `release` it. Returns None if the list is empty.
    pub fn evict_lru(&mut self) -> Option<usize> {
        let slot = self.back()?;
        self.unlink(slot);
        Some(slot)
    }

    // == Release ==
    /// Takes the entry out of an unlinked slot and puts the slot on the free list.
    pub fn release(&mut self, slot: usize) -> Option<Entry<K, V>> {
        let entry = self.nodes[slot].entry.take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(entry)
    }

    // == Remove ==
    /// Unlinks `slot` and releases it.
    pub fn remove(&mut self, slot: usize) -> Option<Entry<K, V>> {
        if self.nodes.get(slot).map_or(true, Node::is_vacant) {
            return None;
        }
        // Free list growth happens before the unlink so a failed allocation changes nothing.
        self.free.reserve(1);
        self.unlink(slot);
        self.release(slot)
    }

    // == Accessors ==
    /// Slot of the most recently used entry.
    pub fn front(&self) -> Option<usize> {
        let slot = self.nodes[HEAD].next;
        (slot != TAIL).then_some(slot)
    }

    /// Slot of the least recently used entry.
    pub fn back(&self) -> Option<usize> {
        let slot = self.nodes[TAIL].prev;
        (slot != HEAD).then_some(slot)
    }

    pub fn entry(&self, slot: usize) -> Option<&Entry<K, V>> {
        self.nodes.get(slot).and_then(|node| node.entry.as_ref())
    }

    pub fn entry_mut(&mut self, slot: usize) -> Option<&mut Entry<K, V>> {
        self.nodes.get_mut(slot).and_then(|node| node.entry.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.nodes[HEAD].next,
            remaining: self.len,
        }
    }

    // == Clear ==
    /// Drops every entry and returns the arena to its initial two sentinels.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::sentinel(HEAD, TAIL);
        self.nodes[TAIL] = Node::sentinel(HEAD, TAIL);
        self.free.clear();
        self.len = 0;
    }

    /// Slots in list order from front to back, walking `next` links.
    #[cfg(test)]
    pub fn slots_forward(&self) -> Vec<usize> {
        let mut slots = Vec::new();
        let mut cursor = self.nodes[HEAD].next;
        while cursor != TAIL {
            slots.push(cursor);
            assert!(slots.len() <= self.nodes.len(), "cycle in recency list");
            cursor = self.nodes[cursor].next;
        }
        slots
    }

    /// Slots in list order from front to back, built by walking `prev` links from the tail.
    #[cfg(test)]
    pub fn slots_backward(&self) -> Vec<usize> {
        let mut slots = Vec::new();
        let mut cursor = self.nodes[TAIL].prev;
        while cursor != HEAD {
            slots.push(cursor);
            assert!(slots.len() <= self.nodes.len(), "cycle in recency list");
            cursor = self.nodes[cursor].prev;
        }
        slots.reverse();
        slots
    }

    #[cfg(test)]
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }
}

// == Iterator ==
/// Front-to-back iterator over resident entries.
pub(crate) struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL || self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.cursor];
        self.cursor = node.next;
        self.remaining -= 1;
        node.entry.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
