//! Multi-value layer
//!
//! Associates zero or more opaque byte payloads with each key by storing
//! `key ++ separator ++ value` as synthetic keys in an underlying
//! [`LoudsTrie`]. The separator is a byte that must not occur in any key
//! (validated at build time); values may contain any bytes, including the
//! separator, because the split is always at the first occurrence.
//!
//! Every read path orders results by synthetic key-id. With the default
//! label order this means values for one key come back sorted bytewise and
//! keys enumerate in synthetic lexicographic order; original insertion
//! order is not preserved. This tie-break is fixed and tested.

use std::path::Path;

use crate::error::{Result, TrieError};
use crate::io::{ByteRegion, DataOutput, FileDataOutput, VecDataOutput};
use crate::trie::format::LAYER_TAG_BYTES;
use crate::trie::louds::KeyIter;
use crate::trie::{LoudsTrie, Order, TrieBuilder};

/// Default value separator; safe for UTF-8 text keys, which never contain 0xFF
pub const DEFAULT_SEPARATOR: u8 = 0xFF;

/// Static trie mapping byte-string keys to multisets of byte payloads
///
/// # Examples
///
/// ```rust
/// use keytrie::BytesTrie;
///
/// let trie = BytesTrie::build([("foo", b"x".as_slice()), ("fo", b"y".as_slice()), ("foo", b"a".as_slice())])?;
/// assert_eq!(trie.values(b"foo")?, vec![b"a".to_vec(), b"x".to_vec()]);
/// assert_eq!(trie.values(b"fo")?, vec![b"y".to_vec()]);
/// assert!(trie.values(b"food").is_err());
/// # Ok::<(), keytrie::TrieError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesTrie {
    trie: LoudsTrie,
    separator: u8,
}

impl BytesTrie {
    /// Build from `(key, value)` pairs with label order and the default
    /// separator
    pub fn build<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        Self::build_with(pairs, Order::Label, DEFAULT_SEPARATOR)
    }

    /// Build with an explicit ordering policy and separator byte
    ///
    /// Fails with a validation error if any key contains the separator.
    /// Exact duplicate pairs collapse to one entry.
    pub fn build_with<I, K, V>(pairs: I, order: Order, separator: u8) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let mut builder = TrieBuilder::new(order);
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref();
            if key.contains(&separator) {
                return Err(TrieError::validation(format!(
                    "key {:?} contains the separator byte 0x{:02X}",
                    String::from_utf8_lossy(key),
                    separator
                )));
            }
            let mut synthetic = Vec::with_capacity(key.len() + 1 + value.len());
            synthetic.extend_from_slice(key);
            synthetic.push(separator);
            synthetic.extend_from_slice(value);
            builder.push(synthetic);
        }
        Ok(Self {
            trie: builder.build()?,
            separator,
        })
    }

    /// Reassemble from an already-parsed trie and separator (record layer)
    pub(crate) fn from_parts(trie: LoudsTrie, separator: u8) -> Self {
        Self { trie, separator }
    }

    /// The separator byte in use
    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// The ordering policy of the underlying trie
    pub fn order(&self) -> Order {
        self.trie.order()
    }

    /// Number of stored `(key, value)` entries
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// The underlying synthetic-key trie
    pub fn as_trie(&self) -> &LoudsTrie {
        &self.trie
    }

    fn scan_prefix(&self, key: &[u8]) -> Vec<u8> {
        let mut prefix = Vec::with_capacity(key.len() + 1);
        prefix.extend_from_slice(key);
        prefix.push(self.separator);
        prefix
    }

    /// True iff the key has at least one value
    pub fn contains(&self, key: &[u8]) -> bool {
        self.trie.has_keys_with_prefix(&self.scan_prefix(key))
    }

    /// All values for `key` in synthetic key-id order; fails with a
    /// not-found error when the key has no values
    pub fn values(&self, key: &[u8]) -> Result<Vec<Vec<u8>>> {
        self.get_values(key).ok_or_else(|| {
            TrieError::not_found(format!(
                "key {:?} has no values",
                String::from_utf8_lossy(key)
            ))
        })
    }

    /// Probe variant of [`values`](Self::values); `None` when the key is
    /// absent, never an error
    pub fn get_values(&self, key: &[u8]) -> Option<Vec<Vec<u8>>> {
        let prefix = self.scan_prefix(key);
        let skip = prefix.len();
        let values: Vec<Vec<u8>> = self
            .trie
            .iter_keys(&prefix)
            .map(|synthetic| synthetic[skip..].to_vec())
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// `(key, value)` pairs whose key starts with `prefix`, in synthetic
    /// key-id order; values for one key appear contiguously
    pub fn items(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.iter_items(prefix).collect()
    }

    /// Keys (repeated once per value) starting with `prefix`
    pub fn keys(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.iter_keys(prefix).collect()
    }

    /// Lazy variant of [`items`](Self::items)
    pub fn iter_items<'a>(&'a self, prefix: &'a [u8]) -> BytesItemIter<'a> {
        BytesItemIter {
            inner: self.trie.iter_keys(prefix),
            separator: self.separator,
        }
    }

    /// Lazy variant of [`keys`](Self::keys)
    pub fn iter_keys<'a>(&'a self, prefix: &'a [u8]) -> BytesKeyIter<'a> {
        BytesKeyIter {
            inner: self.iter_items(prefix),
        }
    }

    // ------------------------------------------------------------------
    // Persistence: the underlying trie image plus a thin layer footer
    // ------------------------------------------------------------------

    /// Write the persisted form to a data output
    pub fn write_to<O: DataOutput>(&self, out: &mut O) -> Result<()> {
        self.trie.write_to(out)?;
        out.write_u8(LAYER_TAG_BYTES)?;
        out.write_u8(self.separator)
    }

    /// The persisted form as an owned buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = VecDataOutput::new();
        self.write_to(&mut out).expect("buffer writes cannot fail");
        out.into_vec()
    }

    /// Save the persisted form to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = FileDataOutput::create(path)?;
        self.write_to(&mut out)?;
        out.flush()
    }

    fn from_region(region: ByteRegion) -> Result<Self> {
        let (trie, consumed) = LoudsTrie::parse_prefix(&region)?;
        let footer = region.slice(consumed, region.len() - consumed)?;
        let footer = footer.as_slice();
        if footer.len() != 2 {
            return Err(TrieError::format(format!(
                "multi-value layer footer has {} bytes, expected 2",
                footer.len()
            )));
        }
        if footer[0] != LAYER_TAG_BYTES {
            return Err(TrieError::format(format!(
                "layer tag 0x{:02X} is not a multi-value image",
                footer[0]
            )));
        }
        Ok(Self {
            trie,
            separator: footer[1],
        })
    }

    /// Deserialize from an in-memory byte buffer
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_region(ByteRegion::from_vec(bytes.to_vec()))
    }

    /// Load a persisted file into memory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_region(ByteRegion::read_path(path)?)
    }

    /// Map a persisted file read-only and parse it zero-copy
    #[cfg(feature = "mmap")]
    pub fn mmap<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_region(ByteRegion::map_path(path)?)
    }
}

fn split_synthetic(synthetic: Vec<u8>, separator: u8) -> (Vec<u8>, Vec<u8>) {
    match synthetic.iter().position(|&b| b == separator) {
        Some(at) => {
            let value = synthetic[at + 1..].to_vec();
            let mut key = synthetic;
            key.truncate(at);
            (key, value)
        }
        // Every stored synthetic key carries a separator; this arm only
        // serves adversarial prefixes that dig past one.
        None => (synthetic, Vec::new()),
    }
}

/// Lazy `(key, value)` enumeration in synthetic key-id order
pub struct BytesItemIter<'a> {
    inner: KeyIter<'a>,
    separator: u8,
}

impl<'a> Iterator for BytesItemIter<'a> {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|synthetic| split_synthetic(synthetic, self.separator))
    }
}

/// Lazy key enumeration (one entry per value) in synthetic key-id order
pub struct BytesKeyIter<'a> {
    inner: BytesItemIter<'a>,
}

impl<'a> Iterator for BytesKeyIter<'a> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BytesTrie {
        BytesTrie::build([
            ("foo", b"x".as_slice()),
            ("fo", b"y".as_slice()),
            ("foo", b"a".as_slice()),
        ])
        .unwrap()
    }

    #[test]
    fn test_values_multiple() {
        let trie = sample();
        assert_eq!(trie.values(b"fo").unwrap(), vec![b"y".to_vec()]);
        assert_eq!(
            trie.values(b"foo").unwrap(),
            vec![b"a".to_vec(), b"x".to_vec()]
        );
    }

    #[test]
    fn test_missing_key() {
        let trie = sample();
        assert_eq!(trie.values(b"food").unwrap_err().category(), "not_found");
        assert_eq!(trie.get_values(b"food"), None);
        assert!(!trie.contains(b"food"));

        let empty = BytesTrie::build(std::iter::empty::<(&[u8], &[u8])>()).unwrap();
        assert!(empty.values(b"missing").is_err());
    }

    #[test]
    fn test_contains() {
        let trie = sample();
        assert!(trie.contains(b"foo"));
        assert!(trie.contains(b"fo"));
        assert!(!trie.contains(b"f"));
    }

    #[test]
    fn test_keys_order() {
        let trie = sample();
        // Synthetic lexicographic order: "foo\xFFa" < "foo\xFFx" < "fo\xFFy"
        // because 'o' (0x6F) sorts before the 0xFF separator.
        let expected = vec![b"foo".to_vec(), b"foo".to_vec(), b"fo".to_vec()];
        assert_eq!(trie.keys(b""), expected);
        assert_eq!(trie.keys(b"f"), expected);
        assert_eq!(trie.keys(b"fo"), expected);
        assert_eq!(trie.keys(b"foo"), vec![b"foo".to_vec(), b"foo".to_vec()]);
        assert!(trie.keys(b"food").is_empty());
        assert!(trie.keys(b"bar").is_empty());
    }

    #[test]
    fn test_items_group_values_contiguously() {
        let trie = sample();
        assert_eq!(
            trie.items(b""),
            vec![
                (b"foo".to_vec(), b"a".to_vec()),
                (b"foo".to_vec(), b"x".to_vec()),
                (b"fo".to_vec(), b"y".to_vec()),
            ]
        );
        assert_eq!(
            trie.items(b"foo"),
            vec![
                (b"foo".to_vec(), b"a".to_vec()),
                (b"foo".to_vec(), b"x".to_vec()),
            ]
        );
    }

    #[test]
    fn test_values_may_contain_separator_and_nul() {
        let value = b"\x00\x00bar\x00\xFFtail";
        let trie = BytesTrie::build([(b"foo".as_slice(), value.as_slice())]).unwrap();
        assert_eq!(trie.values(b"foo").unwrap(), vec![value.to_vec()]);
    }

    #[test]
    fn test_separator_in_key_rejected() {
        let err = BytesTrie::build([(b"fo\xFFo".as_slice(), b"x".as_slice())]).unwrap_err();
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn test_custom_separator() {
        let trie = BytesTrie::build_with(
            [(b"binary\xFFkey".as_slice(), b"v".as_slice())],
            Order::Label,
            0x00,
        )
        .unwrap();
        assert_eq!(trie.values(b"binary\xFFkey").unwrap(), vec![b"v".to_vec()]);
        assert_eq!(trie.separator(), 0x00);
    }

    #[test]
    fn test_duplicate_pairs_collapse() {
        let trie = BytesTrie::build([
            (b"k".as_slice(), b"v".as_slice()),
            (b"k".as_slice(), b"v".as_slice()),
        ])
        .unwrap();
        assert_eq!(trie.values(b"k").unwrap(), vec![b"v".to_vec()]);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_equality() {
        assert_eq!(sample(), sample());
        let other = BytesTrie::build([("foo", b"x".as_slice())]).unwrap();
        assert_ne!(sample(), other);
    }
}
