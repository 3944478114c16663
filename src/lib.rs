//! # keytrie: Static Succinct Ordered Key Index
//!
//! A static, immutable, memory-efficient ordered key index: build once from
//! a finite set of byte-string keys, then serve exact lookups, prefix
//! queries, and key-id translation at high throughput from a bit-packed
//! LOUDS representation with no per-node pointer overhead.
//!
//! ## Key Features
//!
//! - **Succinct storage**: tree topology in a LOUDS bit sequence navigated
//!   by rank/select arithmetic, labels and terminal markers in flat arrays
//! - **Dense key ids**: every key gets an id in `[0, N)`; both directions
//!   (`key_id`, `restore_key`) are O(key length)
//! - **Ordering policies**: label order for lexicographic ids, weight order
//!   to bias frequent keys toward short paths and small ids
//! - **Prefix queries**: `prefixes`, `has_keys_with_prefix`, `keys`,
//!   `items`, each with a lazy iterator variant
//! - **Multi-value and record layers**: [`BytesTrie`] associates any number
//!   of byte payloads per key; [`RecordTrie`] decodes payloads through a
//!   fixed `struct`-style schema
//! - **Stable persistence**: one self-describing binary image, loadable
//!   from a buffer, a file, or a read-only memory map (zero-copy), with
//!   strict validation of adversarial input
//! - **Concurrent reads**: instances are `Send + Sync`; queries never
//!   mutate shared state
//!
//! ## Quick Start
//!
//! ```rust
//! use keytrie::{Order, TrieBuilder};
//!
//! let mut builder = TrieBuilder::new(Order::Label);
//! builder.push(b"foo");
//! builder.push(b"f");
//! builder.push(b"foobar");
//! builder.push(b"bar");
//! let trie = builder.build()?;
//!
//! assert!(trie.contains(b"foo"));
//! assert_eq!(trie.prefixes(b"foobar"), vec![b"f".to_vec(), b"foo".to_vec(), b"foobar".to_vec()]);
//!
//! let id = trie.key_id(b"foo")?;
//! assert_eq!(trie.restore_key(id)?, b"foo");
//! # Ok::<(), keytrie::TrieError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod bytes_trie;
pub mod error;
pub mod io;
pub mod record;
pub mod succinct;
pub mod trie;

/// Dense key identifier assigned at build time; valid range is `[0, len)`
pub type KeyId = usize;

pub use bytes_trie::{BytesTrie, DEFAULT_SEPARATOR};
pub use error::{Result, TrieError};
pub use record::{RecordTrie, Schema, Value};
pub use trie::{KeySet, LoudsTrie, Order, TrieBuilder, TrieStats};
