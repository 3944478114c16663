//! LOUDS (Level-Order Unary Degree Sequence) trie
//!
//! The static trie core. The tree shape lives in a LOUDS bit sequence, edge
//! labels and terminal markers in flat arrays, and two u32 arrays map
//! between terminal nodes and key ids. Child pointers are replaced by
//! rank/select arithmetic over the bit sequence.
//!
//! An instance is a parsed view over one contiguous image
//! ([`crate::trie::format`]): building, loading from a buffer or file, and
//! memory-mapping all produce the same structure through the same validated
//! decode path. After that everything is read-only, so a single instance
//! can serve any number of concurrent readers.
//!
//! # Node numbering
//!
//! Nodes are numbered 1..=M in level order; 0 is the super root ("no
//! node"). With `rank1(pos)` counting set bits in `[0, pos)` and 0-indexed
//! select:
//!
//! - node bit of `v`: `select1(v - 1)`
//! - first child slot of `v`: `select0(v - 1) + 1`, children are the 1-run
//!   that follows, and the child whose bit sits at `p` is node
//!   `rank1(p) + 1`
//! - `parent(v) = select1(v - 1) - (v - 1)`

use std::path::Path;

use crate::error::{Result, TrieError};
use crate::io::{ByteRegion, ByteView, DataOutput, FileDataOutput, U32View, WordsView};
use crate::succinct::{BitsView, RankSelectIndex};
use crate::trie::format::{Header, Layout};
use crate::trie::Order;
use crate::KeyId;

/// Statistics about a built trie
#[derive(Debug, Clone, Default)]
pub struct TrieStats {
    /// Number of keys stored
    pub num_keys: usize,
    /// Number of trie nodes (including the root)
    pub num_nodes: usize,
    /// Total number of edges
    pub num_transitions: usize,
    /// Size of the persisted image in bytes
    pub image_bytes: usize,
    /// Heap bytes used by the rank/select caches
    pub cache_bytes: usize,
    /// Space efficiency (image bits per key)
    pub bits_per_key: f64,
}

/// Succinct static trie over a set of byte-string keys
///
/// Immutable once constructed; see [`crate::trie::TrieBuilder`] for
/// construction and the `load`/`mmap`/`from_bytes` constructors for
/// revival from a persisted image.
#[derive(Debug, Clone)]
pub struct LoudsTrie {
    region: ByteRegion,
    order: Order,
    num_keys: usize,
    num_nodes: usize,
    louds: RankSelectIndex,
    term: RankSelectIndex,
    labels: ByteView,
    term_to_key: U32View,
    key_to_node: U32View,
}

impl LoudsTrie {
    // ------------------------------------------------------------------
    // Construction from images
    // ------------------------------------------------------------------

    /// Parse a trie from the front of a region; returns the instance and
    /// the number of bytes consumed. Layered formats continue after that.
    pub(crate) fn parse_prefix(region: &ByteRegion) -> Result<(Self, usize)> {
        let header = Header::parse(region.as_slice())?;
        let layout = header.layout()?;
        if layout.total_len > region.len() {
            return Err(TrieError::format(format!(
                "image of {} bytes truncated: header wants {}",
                region.len(),
                layout.total_len
            )));
        }

        let trie = Self::assemble(region, header, layout)?;
        Ok((trie, layout.total_len))
    }

    fn assemble(region: &ByteRegion, header: Header, layout: Layout) -> Result<Self> {
        let louds_words =
            WordsView::new(region.slice(layout.louds_off, layout.louds_len)?)?;
        let term_words = WordsView::new(region.slice(layout.term_off, layout.term_len)?)?;
        let labels = ByteView::new(
            region.slice(layout.labels_off, layout.labels_len)?,
            layout.labels_len,
        )?;
        let ids_len = header.num_keys * 4;
        let term_to_key =
            U32View::new(region.slice(layout.term_to_key_off, ids_len)?, header.num_keys)?;
        let key_to_node =
            U32View::new(region.slice(layout.key_to_node_off, ids_len)?, header.num_keys)?;

        let louds_bits = BitsView::new(louds_words, header.louds_bits);
        let term_bits = BitsView::new(term_words, header.num_nodes);

        if !louds_bits.padding_is_zero() || !term_bits.padding_is_zero() {
            return Err(TrieError::format("nonzero padding bits"));
        }
        // Byte padding must be zero too, keeping the image canonical for
        // its (key set, policy) pair so equality can compare bytes.
        for (start, end) in [
            (layout.labels_off + layout.labels_len, layout.term_to_key_off),
            (layout.term_to_key_off + ids_len, layout.key_to_node_off),
            (layout.key_to_node_off + ids_len, layout.total_len),
        ] {
            let pad = region.slice(start, end - start)?;
            if pad.as_slice().iter().any(|&b| b != 0) {
                return Err(TrieError::format("nonzero padding bytes"));
            }
        }
        validate_louds_shape(&louds_bits, header.num_nodes)?;
        if term_bits.count_ones() != header.num_keys {
            return Err(TrieError::format(format!(
                "terminal count {} disagrees with key count {}",
                term_bits.count_ones(),
                header.num_keys
            )));
        }

        let louds = RankSelectIndex::new(louds_bits)?;
        let term = RankSelectIndex::new(term_bits)?;

        let trie = Self {
            region: region.slice(0, layout.total_len)?,
            order: header.order,
            num_keys: header.num_keys,
            num_nodes: header.num_nodes,
            louds,
            term,
            labels,
            term_to_key,
            key_to_node,
        };
        trie.validate_id_arrays()?;
        Ok(trie)
    }

    /// Wrap an owned image produced by the builder
    pub(crate) fn from_image(image: Vec<u8>) -> Result<Self> {
        Self::from_region(ByteRegion::from_vec(image))
    }

    fn from_region(region: ByteRegion) -> Result<Self> {
        let (trie, consumed) = Self::parse_prefix(&region)?;
        if consumed != region.len() {
            return Err(TrieError::format(format!(
                "{} trailing bytes after trie image",
                region.len() - consumed
            )));
        }
        Ok(trie)
    }

    /// Deserialize from an in-memory byte buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_region(ByteRegion::from_vec(bytes.to_vec()))
    }

    /// Deserialize by reading a `Read` source to its end
    pub fn read_from<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_region(ByteRegion::from_vec(bytes))
    }

    /// Load an image file into memory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_region(ByteRegion::read_path(path)?)
    }

    /// Map an image file read-only and parse it zero-copy
    #[cfg(feature = "mmap")]
    pub fn mmap<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_region(ByteRegion::map_path(path)?)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Write the image to a data output
    pub fn write_to<O: DataOutput>(&self, out: &mut O) -> Result<()> {
        out.write_bytes(self.region.as_slice())
    }

    /// The image as an owned byte buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        self.region.as_slice().to_vec()
    }

    /// Save the image to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = FileDataOutput::create(path)?;
        self.write_to(&mut out)?;
        out.flush()
    }

    // ------------------------------------------------------------------
    // Basic accessors
    // ------------------------------------------------------------------

    /// Number of keys
    pub fn len(&self) -> usize {
        self.num_keys
    }

    /// True if the trie stores no keys
    pub fn is_empty(&self) -> bool {
        self.num_keys == 0
    }

    /// The ordering policy the trie was built under
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of nodes, including the root
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Structure statistics
    pub fn stats(&self) -> TrieStats {
        let image_bytes = self.region.len();
        let mut stats = TrieStats {
            num_keys: self.num_keys,
            num_nodes: self.num_nodes,
            num_transitions: self.labels.len(),
            image_bytes,
            cache_bytes: self.louds.cache_size() + self.term.cache_size(),
            bits_per_key: 0.0,
        };
        if self.num_keys > 0 {
            stats.bits_per_key = (image_bytes * 8) as f64 / self.num_keys as f64;
        }
        stats
    }

    // ------------------------------------------------------------------
    // Navigation (validated images make every select in-range)
    // ------------------------------------------------------------------

    #[inline]
    fn label_of(&self, v: usize) -> u8 {
        self.labels.get(v - 2)
    }

    #[inline]
    fn is_terminal(&self, v: usize) -> bool {
        self.term.get(v - 1) == Some(true)
    }

    fn parent(&self, v: usize) -> Result<usize> {
        Ok(self.louds.select1(v - 1)? - (v - 1))
    }

    /// Child of `v` along `byte`, if any. Linear scan over the sibling
    /// run; weight-ordered siblings are not label-sorted, so binary
    /// search is not available in general.
    fn transition(&self, v: usize, byte: u8) -> Result<Option<usize>> {
        let mut pos = self.louds.select0(v - 1)? + 1;
        if self.louds.get(pos) != Some(true) {
            return Ok(None);
        }
        let mut child = self.louds.rank1(pos) + 1;
        loop {
            if self.label_of(child) == byte {
                return Ok(Some(child));
            }
            pos += 1;
            child += 1;
            if self.louds.get(pos) != Some(true) {
                return Ok(None);
            }
        }
    }

    /// Walk the trie consuming `key`; `None` when a transition is missing
    fn walk(&self, key: &[u8]) -> Result<Option<usize>> {
        let mut v = 1usize;
        for &byte in key {
            match self.transition(v, byte)? {
                Some(child) => v = child,
                None => return Ok(None),
            }
        }
        Ok(Some(v))
    }

    /// Children of `v` with their labels, in sibling order
    fn collect_children(&self, v: usize, out: &mut Vec<(usize, u8)>) -> Result<()> {
        out.clear();
        let mut pos = self.louds.select0(v - 1)? + 1;
        if self.louds.get(pos) != Some(true) {
            return Ok(());
        }
        let mut child = self.louds.rank1(pos) + 1;
        while self.louds.get(pos) == Some(true) {
            out.push((child, self.label_of(child)));
            pos += 1;
            child += 1;
        }
        Ok(())
    }

    fn terminal_key_id(&self, v: usize) -> KeyId {
        let t = self.term.rank1(v - 1);
        self.term_to_key.get(t) as KeyId
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// True iff `key` is stored in the trie
    pub fn contains(&self, key: &[u8]) -> bool {
        matches!(self.walk(key), Ok(Some(v)) if self.is_terminal(v))
    }

    /// The id assigned to `key`; fails with a not-found error when absent
    pub fn key_id(&self, key: &[u8]) -> Result<KeyId> {
        match self.walk(key)? {
            Some(v) if self.is_terminal(v) => Ok(self.terminal_key_id(v)),
            _ => Err(TrieError::not_found(format!(
                "key {:?} not in trie",
                String::from_utf8_lossy(key)
            ))),
        }
    }

    /// Probe variant of [`key_id`](Self::key_id); never fails
    pub fn get_key_id(&self, key: &[u8]) -> Option<KeyId> {
        match self.walk(key) {
            Ok(Some(v)) if self.is_terminal(v) => Some(self.terminal_key_id(v)),
            _ => None,
        }
    }

    /// Reconstruct the key with the given id; fails with an out-of-range
    /// error for ids outside `[0, len)`
    pub fn restore_key(&self, id: KeyId) -> Result<Vec<u8>> {
        if id >= self.num_keys {
            return Err(TrieError::out_of_range(id, self.num_keys));
        }
        let mut v = self.key_to_node.get(id) as usize;
        let mut bytes = Vec::new();
        while v > 1 {
            bytes.push(self.label_of(v));
            v = self.parent(v)?;
        }
        bytes.reverse();
        Ok(bytes)
    }

    /// True iff at least one stored key starts with `prefix`
    pub fn has_keys_with_prefix(&self, prefix: &[u8]) -> bool {
        self.num_keys > 0 && matches!(self.walk(prefix), Ok(Some(_)))
    }

    /// Stored keys that are prefixes of `query`, shortest first
    pub fn prefixes(&self, query: &[u8]) -> Vec<Vec<u8>> {
        self.iter_prefixes(query).collect()
    }

    /// Lazy variant of [`prefixes`](Self::prefixes); stops at the first
    /// failed transition and never walks past `query.len()`
    pub fn iter_prefixes<'a>(&'a self, query: &'a [u8]) -> PrefixIter<'a> {
        PrefixIter {
            trie: self,
            query,
            node: 1,
            pos: 0,
            check_current: true,
            done: self.num_nodes == 0,
        }
    }

    /// Stored keys starting with `prefix`, in key-id order
    pub fn keys(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.iter_keys(prefix).collect()
    }

    /// `(key, id)` pairs for keys starting with `prefix`, in key-id order
    pub fn items(&self, prefix: &[u8]) -> Vec<(Vec<u8>, KeyId)> {
        self.iter_items(prefix).collect()
    }

    /// Lazy variant of [`keys`](Self::keys)
    pub fn iter_keys<'a>(&'a self, prefix: &'a [u8]) -> KeyIter<'a> {
        KeyIter {
            inner: self.iter_items(prefix),
        }
    }

    /// Lazy variant of [`items`](Self::items)
    pub fn iter_items<'a>(&'a self, prefix: &'a [u8]) -> ItemIter<'a> {
        let start = match self.walk(prefix) {
            Ok(Some(v)) => Some(v),
            _ => None,
        };
        let mut stack = Vec::new();
        if let Some(v) = start {
            stack.push((v, prefix.len(), None));
        }
        ItemIter {
            trie: self,
            buf: prefix.to_vec(),
            stack,
            scratch: Vec::new(),
        }
    }

    /// Lazy enumeration of every stored key, in key-id order
    pub fn iter_all(&self) -> KeyIter<'_> {
        self.iter_keys(b"")
    }

    // ------------------------------------------------------------------
    // Load-time validation
    // ------------------------------------------------------------------

    /// Check that the id arrays are a bijection consistent with the
    /// terminal bits. After this holds, restore/lookup arithmetic can
    /// never leave the image.
    fn validate_id_arrays(&self) -> Result<()> {
        for id in 0..self.num_keys {
            let node = self.key_to_node.get(id) as usize;
            if node < 1 || node > self.num_nodes {
                return Err(TrieError::format(format!(
                    "key {} maps to node {} outside 1..={}",
                    id, node, self.num_nodes
                )));
            }
            if !self.is_terminal(node) {
                return Err(TrieError::format(format!(
                    "key {} maps to non-terminal node {}",
                    id, node
                )));
            }
            let t = self.term.rank1(node - 1);
            if self.term_to_key.get(t) as usize != id {
                return Err(TrieError::format(format!(
                    "id arrays disagree at key {}",
                    id
                )));
            }
        }
        Ok(())
    }
}

/// The LOUDS sequence must describe a tree whose parents precede their
/// children in level order; one linear scan checks it. Guarantees that
/// parent walks strictly descend and terminate.
fn validate_louds_shape(bits: &BitsView, num_nodes: usize) -> Result<()> {
    let mut ones = 0usize;
    let mut zeros = 0usize;
    for pos in 0..bits.len() {
        if bits.get(pos) == Some(true) {
            ones += 1;
            let v = ones;
            let parent = zeros;
            if v == 1 {
                if parent != 0 {
                    return Err(TrieError::format("root is not the first louds bit"));
                }
            } else if parent == 0 || parent >= v {
                return Err(TrieError::format(format!(
                    "node {} has parent {} out of level order",
                    v, parent
                )));
            }
        } else {
            zeros += 1;
        }
    }
    if ones != num_nodes || zeros != num_nodes + 1 {
        return Err(TrieError::format(format!(
            "louds popcount {}/{} disagrees with {} nodes",
            ones, zeros, num_nodes
        )));
    }
    Ok(())
}

/// Two tries are equal iff they store the same key set under the same
/// ordering policy with the same id assignment. The image is canonical
/// for exactly that tuple, so byte comparison decides it.
///
/// Ordering between tries is undefined; `PartialOrd` is deliberately not
/// implemented.
impl PartialEq for LoudsTrie {
    fn eq(&self, other: &Self) -> bool {
        self.region.as_slice() == other.region.as_slice()
    }
}

impl Eq for LoudsTrie {}

/// Lazy prefix enumeration: stored keys that are prefixes of a query
pub struct PrefixIter<'a> {
    trie: &'a LoudsTrie,
    query: &'a [u8],
    node: usize,
    pos: usize,
    check_current: bool,
    done: bool,
}

impl<'a> Iterator for PrefixIter<'a> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if self.check_current {
                self.check_current = false;
                if self.trie.is_terminal(self.node) {
                    return Some(self.query[..self.pos].to_vec());
                }
            }
            if self.pos == self.query.len() {
                self.done = true;
                return None;
            }
            match self.trie.transition(self.node, self.query[self.pos]) {
                Ok(Some(child)) => {
                    self.node = child;
                    self.pos += 1;
                    self.check_current = true;
                }
                _ => {
                    self.done = true;
                    return None;
                }
            }
        }
        None
    }
}

/// Lazy `(key, id)` enumeration in key-id order
///
/// Pull-based depth-first traversal over an explicit stack of trie
/// positions; restartable per call and safe to abandon at any point.
pub struct ItemIter<'a> {
    trie: &'a LoudsTrie,
    buf: Vec<u8>,
    stack: Vec<(usize, usize, Option<u8>)>,
    scratch: Vec<(usize, u8)>,
}

impl<'a> Iterator for ItemIter<'a> {
    type Item = (Vec<u8>, KeyId);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth, label)) = self.stack.pop() {
            self.buf.truncate(depth);
            if let Some(byte) = label {
                self.buf.push(byte);
            }

            if self.trie.collect_children(node, &mut self.scratch).is_err() {
                return None;
            }
            let depth_here = self.buf.len();
            for &(child, byte) in self.scratch.iter().rev() {
                self.stack.push((child, depth_here, Some(byte)));
            }

            if self.trie.is_terminal(node) {
                let id = self.trie.terminal_key_id(node);
                return Some((self.buf.clone(), id));
            }
        }
        None
    }
}

/// Lazy key enumeration in key-id order
pub struct KeyIter<'a> {
    inner: ItemIter<'a>,
}

impl<'a> Iterator for KeyIter<'a> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::TrieBuilder;

    fn build(keys: &[&[u8]]) -> LoudsTrie {
        TrieBuilder::with_keys(keys.iter().copied(), Order::Label)
            .build()
            .unwrap()
    }

    #[test]
    fn test_contains_and_lookup() {
        let trie = build(&[b"cat", b"car", b"card"]);
        assert!(trie.contains(b"cat"));
        assert!(trie.contains(b"car"));
        assert!(trie.contains(b"card"));
        assert!(!trie.contains(b"ca"));
        assert!(!trie.contains(b"care"));
        assert!(!trie.contains(b"dog"));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn test_key_id_restore_round_trip() {
        let keys: Vec<&[u8]> = vec![b"f", b"foo", b"foobar", b"bar"];
        let trie = build(&keys);
        for key in &keys {
            let id = trie.key_id(key).unwrap();
            assert_eq!(trie.restore_key(id).unwrap(), *key);
        }
    }

    #[test]
    fn test_restore_out_of_range() {
        let trie = build(&[b"a", b"b"]);
        let err = trie.restore_key(2).unwrap_err();
        assert_eq!(err.category(), "not_found");
        assert!(trie.restore_key(usize::MAX).is_err());
    }

    #[test]
    fn test_key_id_not_found() {
        let trie = build(&[b"foo"]);
        assert_eq!(trie.key_id(b"bar").unwrap_err().category(), "not_found");
        assert_eq!(trie.get_key_id(b"bar"), None);
        assert!(trie.get_key_id(b"foo").is_some());
    }

    #[test]
    fn test_prefixes() {
        let trie = build(&[b"foo", b"f", b"foobar", b"bar"]);
        let p: Vec<Vec<u8>> = trie.prefixes(b"foobar");
        assert_eq!(p, vec![b"f".to_vec(), b"foo".to_vec(), b"foobar".to_vec()]);
        assert_eq!(trie.prefixes(b"foo"), vec![b"f".to_vec(), b"foo".to_vec()]);
        assert_eq!(trie.prefixes(b"bar"), vec![b"bar".to_vec()]);
        assert!(trie.prefixes(b"b").is_empty());
    }

    #[test]
    fn test_prefixes_empty_query() {
        let trie = build(&[b"foo"]);
        assert!(trie.prefixes(b"").is_empty());

        let with_empty = build(&[b"", b"foo"]);
        assert_eq!(with_empty.prefixes(b""), vec![b"".to_vec()]);
    }

    #[test]
    fn test_keys_with_prefix() {
        let trie = build(&[b"foo", b"f", b"foobar", b"bar"]);
        assert_eq!(trie.keys(b"fo"), vec![b"foo".to_vec(), b"foobar".to_vec()]);
        assert!(trie.keys(b"foobarz").is_empty());

        // Full enumeration follows key-id (lexicographic) order.
        assert_eq!(
            trie.keys(b""),
            vec![b"bar".to_vec(), b"f".to_vec(), b"foo".to_vec(), b"foobar".to_vec()]
        );
    }

    #[test]
    fn test_items_follow_id_order() {
        let trie = build(&[b"foo", b"f", b"foobar", b"bar"]);
        let items = trie.items(b"");
        let ids: Vec<usize> = items.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        for (key, id) in items {
            assert_eq!(trie.key_id(&key).unwrap(), id);
        }
    }

    #[test]
    fn test_has_keys_with_prefix() {
        let trie = build(&[b"apple", b"pear", b"peach"]);
        assert!(trie.has_keys_with_prefix(b""));
        assert!(trie.has_keys_with_prefix(b"a"));
        assert!(trie.has_keys_with_prefix(b"pe"));
        assert!(trie.has_keys_with_prefix(b"pear"));
        assert!(!trie.has_keys_with_prefix(b"x"));

        let empty = build(&[]);
        assert!(!empty.has_keys_with_prefix(b""));
        assert!(!empty.has_keys_with_prefix(b"ab"));
    }

    #[test]
    fn test_iterators_are_restartable() {
        let trie = build(&[b"aa", b"ab", b"b"]);
        let first: Vec<Vec<u8>> = trie.iter_keys(b"").collect();
        let second: Vec<Vec<u8>> = trie.iter_keys(b"").collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_equality() {
        let a = build(&[b"foo", b"bar"]);
        let b = build(&[b"bar", b"foo"]);
        let c = build(&[b"foo", b"boo"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(build(&[]), build(&[]));
    }

    #[test]
    fn test_equality_differs_across_orders() {
        let keys: Vec<&[u8]> = vec![b"foo", b"bar"];
        let lo = TrieBuilder::with_keys(keys.iter().copied(), Order::Label)
            .build()
            .unwrap();
        let wo = TrieBuilder::with_keys(keys.iter().copied(), Order::Weight)
            .build()
            .unwrap();
        assert_ne!(lo, wo);
    }

    #[test]
    fn test_stats() {
        let trie = build(&[b"cat", b"car", b"card"]);
        let stats = trie.stats();
        assert_eq!(stats.num_keys, 3);
        assert!(stats.num_nodes >= 5);
        assert!(stats.image_bytes > 0);
        assert!(stats.bits_per_key > 0.0);
    }

    #[test]
    fn test_binary_keys_with_all_byte_values() {
        let keys: Vec<Vec<u8>> = (0u8..=255).map(|b| vec![b, 0xFF, 0x00]).collect();
        let trie = TrieBuilder::with_keys(keys.iter(), Order::Label)
            .build()
            .unwrap();
        assert_eq!(trie.len(), 256);
        for key in &keys {
            assert!(trie.contains(key));
        }
    }
}
