//! Record layer
//!
//! Interprets every payload of a multi-value trie as a fixed binary record
//! described by a [`Schema`]. The schema is external metadata carried
//! alongside the trie (and in its persisted form), not derivable from the
//! trie itself.

pub mod schema;

pub use schema::{ByteOrder, FieldType, Schema, Value};

use std::path::Path;

use crate::bytes_trie::BytesTrie;
use crate::error::{Result, TrieError};
use crate::io::{
    ByteRegion, DataInput, DataOutput, FileDataOutput, SliceDataInput, VarInt, VecDataOutput,
};
use crate::trie::format::LAYER_TAG_RECORD;
use crate::trie::{LoudsTrie, Order};
use crate::DEFAULT_SEPARATOR;

/// Static trie mapping byte-string keys to tuples of scalar values
///
/// # Examples
///
/// ```rust
/// use keytrie::{RecordTrie, Value};
///
/// let trie = RecordTrie::build(
///     "<H?",
///     [
///         ("one", vec![Value::U16(1), Value::Bool(true)]),
///         ("two", vec![Value::U16(2), Value::Bool(false)]),
///     ],
/// )?;
///
/// let records = trie.records(b"one")?;
/// assert_eq!(records, vec![vec![Value::U16(1), Value::Bool(true)]]);
/// # Ok::<(), keytrie::TrieError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTrie {
    bytes: BytesTrie,
    schema: Schema,
}

impl RecordTrie {
    /// Build from `(key, record)` pairs with label order and the default
    /// separator
    pub fn build<I, K>(descriptor: &str, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<Value>)>,
        K: AsRef<[u8]>,
    {
        Self::build_with(descriptor, pairs, Order::Label, DEFAULT_SEPARATOR)
    }

    /// Build with an explicit ordering policy and separator byte
    pub fn build_with<I, K>(
        descriptor: &str,
        pairs: I,
        order: Order,
        separator: u8,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<Value>)>,
        K: AsRef<[u8]>,
    {
        let schema = Schema::parse(descriptor)?;
        let mut encoded: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
        for (key, record) in pairs {
            encoded.push((key.as_ref().to_vec(), schema.encode(&record)?));
        }
        Ok(Self {
            bytes: BytesTrie::build_with(encoded, order, separator)?,
            schema,
        })
    }

    /// The record schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The ordering policy of the underlying trie
    pub fn order(&self) -> Order {
        self.bytes.order()
    }

    /// The separator byte in use
    pub fn separator(&self) -> u8 {
        self.bytes.separator()
    }

    /// Number of stored `(key, record)` entries
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The underlying synthetic-key trie
    pub fn as_trie(&self) -> &LoudsTrie {
        self.bytes.as_trie()
    }

    /// True iff the key has at least one record
    pub fn contains(&self, key: &[u8]) -> bool {
        self.bytes.contains(key)
    }

    /// All records for `key`; fails with a not-found error when the key
    /// has no records
    pub fn records(&self, key: &[u8]) -> Result<Vec<Vec<Value>>> {
        let payloads = self.bytes.values(key)?;
        payloads.iter().map(|p| self.schema.decode(p)).collect()
    }

    /// Probe variant of [`records`](Self::records): `Ok(None)` when the
    /// key is absent. A payload that disagrees with the schema still
    /// fails, since that is corruption rather than a miss.
    pub fn get_records(&self, key: &[u8]) -> Result<Option<Vec<Vec<Value>>>> {
        match self.bytes.get_values(key) {
            None => Ok(None),
            Some(payloads) => payloads
                .iter()
                .map(|p| self.schema.decode(p))
                .collect::<Result<Vec<_>>>()
                .map(Some),
        }
    }

    /// `(key, record)` pairs whose key starts with `prefix`, in synthetic
    /// key-id order
    pub fn items(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<Value>)>> {
        self.bytes
            .iter_items(prefix)
            .map(|(key, payload)| Ok((key, self.schema.decode(&payload)?)))
            .collect()
    }

    /// Keys (repeated once per record) starting with `prefix`
    pub fn keys(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.bytes.keys(prefix)
    }

    // ------------------------------------------------------------------
    // Persistence: the multi-value form plus the schema tag
    // ------------------------------------------------------------------

    /// Write the persisted form to a data output
    pub fn write_to<O: DataOutput>(&self, out: &mut O) -> Result<()> {
        self.bytes.as_trie().write_to(out)?;
        out.write_u8(LAYER_TAG_RECORD)?;
        out.write_u8(self.bytes.separator())?;
        let descriptor = self.schema.descriptor().as_bytes();
        out.write_var_int(descriptor.len() as u64)?;
        out.write_bytes(descriptor)
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
        let footer_region = region.slice(consumed, region.len() - consumed)?;
        let footer = footer_region.as_slice();
        let mut input = SliceDataInput::new(footer);

        let tag = input.read_u8()?;
        if tag != LAYER_TAG_RECORD {
            return Err(TrieError::format(format!(
                "layer tag 0x{:02X} is not a record image",
                tag
            )));
        }
        let separator = input.read_u8()?;
        let descriptor_len = VarInt::read_from(&mut input)? as usize;
        let descriptor_bytes = input.read_vec(descriptor_len)?;
        if input.remaining() != 0 {
            return Err(TrieError::format(format!(
                "{} trailing bytes after record image",
                input.remaining()
            )));
        }
        let descriptor = String::from_utf8(descriptor_bytes)
            .map_err(|_| TrieError::format("stored schema descriptor is not UTF-8"))?;
        let schema = Schema::parse(&descriptor)
            .map_err(|e| TrieError::format(format!("stored schema is invalid: {}", e)))?;

        Ok(Self {
            bytes: BytesTrie::from_parts(trie, separator),
            schema,
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
