//! Batch trie construction
//!
//! Turns a frozen key set into the canonical trie image. Construction is a
//! single-shot operation: the builder drains its key store on the first
//! `build` call and refuses a second one.
//!
//! The build pipeline: group the sorted key set recursively by the next
//! byte into a temporary arena, reorder siblings per the ordering policy,
//! assign key ids in depth-first pre-order, then emit the LOUDS bits,
//! labels, terminal bits and id arrays in level order. The assembled image
//! goes through the same validated decode path as a loaded file.

use crate::error::{Result, TrieError};
use crate::succinct::BitVector;
use crate::trie::format::{padded8, Header};
use crate::trie::keyset::KeySet;
use crate::trie::louds::LoudsTrie;
use crate::trie::Order;
use std::collections::VecDeque;

struct ArenaNode {
    label: u8,
    terminal: bool,
    weight: u64,
    children: Vec<u32>,
}

/// Builds an immutable trie from a collection of keys
///
/// # Examples
///
/// ```rust
/// use keytrie::trie::{Order, TrieBuilder};
///
/// let mut builder = TrieBuilder::new(Order::Label);
/// builder.push(b"foo");
/// builder.push(b"bar");
/// let trie = builder.build()?;
///
/// assert!(trie.contains(b"foo"));
/// assert_eq!(trie.len(), 2);
/// # Ok::<(), keytrie::TrieError>(())
/// ```
#[derive(Debug, Default)]
pub struct TrieBuilder {
    keys: KeySet,
    order: Order,
    finished: bool,
}

impl TrieBuilder {
    /// Create a builder with the given ordering policy
    pub fn new(order: Order) -> Self {
        Self {
            keys: KeySet::new(),
            order,
            finished: false,
        }
    }

    /// Create a builder pre-filled from an iterator of keys
    pub fn with_keys<I, K>(keys: I, order: Order) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let mut builder = Self::new(order);
        for key in keys {
            builder.push(key);
        }
        builder
    }

    /// Add a key with the default weight
    pub fn push<K: AsRef<[u8]>>(&mut self, key: K) {
        self.keys.push(key);
    }

    /// Add a key with an explicit weight (meaningful under weight order)
    pub fn push_weighted<K: AsRef<[u8]>>(&mut self, key: K, weight: u64) {
        self.keys.push_weighted(key, weight);
    }

    /// The ordering policy this builder was created with
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of keys pushed so far (before deduplication)
    pub fn num_pushed(&self) -> usize {
        self.keys.len()
    }

    /// Construct the trie, draining the key store.
    ///
    /// Single-shot: a second call fails with a state error. Zero keys
    /// produce a valid empty trie.
    pub fn build(&mut self) -> Result<LoudsTrie> {
        if self.finished {
            return Err(TrieError::state(
                "build() called twice on the same builder",
            ));
        }
        self.finished = true;

        let entries = self.keys.freeze();
        let image = build_image(&entries, self.order)?;
        LoudsTrie::from_image(image)
    }
}

/// Assemble the canonical image for a sorted, deduplicated entry list
fn build_image(entries: &[(Vec<u8>, u64)], order: Order) -> Result<Vec<u8>> {
    let num_keys = entries.len();

    // Weight prefix sums make subtree weights O(1) per arena node.
    let mut weight_prefix = Vec::with_capacity(num_keys + 1);
    weight_prefix.push(0u64);
    for (_, w) in entries {
        let last = *weight_prefix.last().expect("prefix sums are non-empty");
        weight_prefix.push(last.saturating_add(*w));
    }
    let range_weight = |lo: usize, hi: usize| weight_prefix[hi] - weight_prefix[lo];

    // Group the sorted keys recursively by the next byte. The worklist
    // replaces recursion so key length never bounds the stack.
    let mut arena: Vec<ArenaNode> = Vec::new();
    arena.push(ArenaNode {
        label: 0,
        terminal: false,
        weight: range_weight(0, num_keys),
        children: Vec::new(),
    });

    let mut work: Vec<(u32, usize, usize, usize)> = vec![(0, 0, num_keys, 0)];
    while let Some((node_idx, mut lo, hi, depth)) = work.pop() {
        if lo < hi && entries[lo].0.len() == depth {
            arena[node_idx as usize].terminal = true;
            lo += 1;
        }
        let mut group_start = lo;
        while group_start < hi {
            let byte = entries[group_start].0[depth];
            let mut group_end = group_start + 1;
            while group_end < hi && entries[group_end].0[depth] == byte {
                group_end += 1;
            }

            let child_idx = arena.len() as u32;
            arena.push(ArenaNode {
                label: byte,
                terminal: false,
                weight: range_weight(group_start, group_end),
                children: Vec::new(),
            });
            arena[node_idx as usize].children.push(child_idx);
            work.push((child_idx, group_start, group_end, depth + 1));
            group_start = group_end;
        }
    }

    // Sibling order per policy. Lexicographic grouping already leaves
    // children label-ascending, so only weight order reorders.
    if order == Order::Weight {
        let weights: Vec<u64> = arena.iter().map(|n| n.weight).collect();
        let labels: Vec<u8> = arena.iter().map(|n| n.label).collect();
        for node in arena.iter_mut() {
            node.children.sort_by(|&a, &b| {
                weights[b as usize]
                    .cmp(&weights[a as usize])
                    .then(labels[a as usize].cmp(&labels[b as usize]))
            });
        }
    }

    // Key ids in depth-first pre-order over the policy-ordered arena.
    // Under label order this is exactly the lexicographic rank.
    let mut key_id_of: Vec<u32> = vec![u32::MAX; arena.len()];
    let mut next_id = 0u32;
    let mut dfs: Vec<u32> = vec![0];
    while let Some(node_idx) = dfs.pop() {
        let node = &arena[node_idx as usize];
        if node.terminal {
            key_id_of[node_idx as usize] = next_id;
            next_id += 1;
        }
        for &child in node.children.iter().rev() {
            dfs.push(child);
        }
    }
    debug_assert_eq!(next_id as usize, num_keys);

    // Level-order emission of the succinct sections.
    let num_nodes = arena.len();
    let mut louds = BitVector::with_capacity(2 * num_nodes + 1);
    louds.push(true); // super root
    louds.push(false);

    let mut term = BitVector::with_capacity(num_nodes);
    let mut labels: Vec<u8> = Vec::with_capacity(num_nodes.saturating_sub(1));
    let mut term_to_key: Vec<u32> = Vec::with_capacity(num_keys);
    let mut key_to_node: Vec<u32> = vec![0; num_keys];

    let mut queue: VecDeque<u32> = VecDeque::new();
    queue.push_back(0);
    let mut level_number = 0u32; // 1-based node numbers assigned on dequeue
    while let Some(node_idx) = queue.pop_front() {
        level_number += 1;
        let node = &arena[node_idx as usize];

        term.push(node.terminal);
        if node.terminal {
            let id = key_id_of[node_idx as usize];
            term_to_key.push(id);
            key_to_node[id as usize] = level_number;
        }

        for &child in &node.children {
            louds.push(true);
            labels.push(arena[child as usize].label);
            queue.push_back(child);
        }
        louds.push(false);
    }

    // Serialize: header, then the 8-byte-aligned sections.
    let header = Header {
        order,
        num_keys,
        num_nodes,
        louds_bits: louds.len(),
    };
    let layout = header.layout()?;

    let mut image = Vec::with_capacity(layout.total_len);
    header.write(&mut image);
    for word in louds.words() {
        image.extend_from_slice(&word.to_le_bytes());
    }
    for word in term.words() {
        image.extend_from_slice(&word.to_le_bytes());
    }
    image.extend_from_slice(&labels);
    image.resize(padded8(image.len())?, 0);
    for id in &term_to_key {
        image.extend_from_slice(&id.to_le_bytes());
    }
    image.resize(padded8(image.len())?, 0);
    for node in &key_to_node {
        image.extend_from_slice(&node.to_le_bytes());
    }
    image.resize(padded8(image.len())?, 0);

    debug_assert_eq!(image.len(), layout.total_len);
    Ok(image)
}
