//! Cache Entry Module
//!
//! Defines the arena node that carries one resident entry and its recency links.

// == Slot Constants ==
/// Arena slot of the head sentinel. `nodes[HEAD].next` is the most recently used entry.
pub(crate) const HEAD: usize = 0;

/// Arena slot of the tail sentinel. `nodes[TAIL].prev` is the least recently used entry.
pub(crate) const TAIL: usize = 1;

// == Entry ==
/// A resident key/value pair.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    /// The key, also held by the index
    pub key: K,
    /// The stored value
    pub value: V,
}

// == Node ==
/// One arena slot in the recency list.
///
/// `entry` is `None` for the two sentinels and for slots sitting on the free list.
/// Links are slot numbers, never references.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub prev: usize,
    pub next: usize,
    pub entry: Option<Entry<K, V>>,
}

impl<K, V> Node<K, V> {
    // == Constructors ==
    /// Creates a data-free sentinel node with the given links.
    pub fn sentinel(prev: usize, next: usize) -> Self {
        Self {
            prev,
            next,
            entry: None,
        }
    }

    /// Creates an unlinked node holding `key` and `value`.
    ///
    /// Links point at the node's own slot until it is spliced into the list.
    pub fn occupied(slot: usize, key: K, value: V) -> Self {
        Self {
            prev: slot,
            next: slot,
            entry: Some(Entry { key, value }),
        }
    }

    // == Is Sentinel Or Free ==
    /// Returns true if the slot carries no user data.
    pub fn is_vacant(&self) -> bool {
        self.entry.is_none()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_vacant() {
        let head: Node<u32, u32> = Node::sentinel(HEAD, TAIL);
        assert!(head.is_vacant());
        assert_eq!(head.next, TAIL);
    }

    #[test]
    fn test_occupied_node_self_linked() {
        let node = Node::occupied(7, "k", Some(3));
        assert!(!node.is_vacant());
        assert_eq!((node.prev, node.next), (7, 7));

        let entry = node.entry.unwrap();
        assert_eq!(entry.key, "k");
        assert_eq!(entry.value, Some(3));
    }

    #[test]
    fn test_entry_value_may_be_none() {
        let node: Node<&str, Option<String>> = Node::occupied(2, "null", None);
        assert_eq!(node.entry.map(|e| e.value), Some(None));
    }
}
