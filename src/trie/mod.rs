//! Succinct trie core
//!
//! Batch construction ([`TrieBuilder`] over a [`KeySet`]), the static
//! [`LoudsTrie`] itself, the sibling [`Order`] policy, and the persisted
//! image layout ([`format`]).

pub mod builder;
pub mod format;
pub mod keyset;
pub mod louds;
pub mod order;

pub use builder::TrieBuilder;
pub use keyset::KeySet;
pub use louds::{ItemIter, KeyIter, LoudsTrie, PrefixIter, TrieStats};
pub use order::Order;
