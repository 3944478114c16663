//! Succinct data structure primitives
//!
//! Bit-packed storage and rank/select navigation shared by the trie core:
//! [`BitVector`] assembles bit sequences during construction, [`BitsView`]
//! reads them back out of a frozen image, and [`RankSelectIndex`] provides
//! the rank/select arithmetic that replaces child pointers.

pub mod bit_vector;
pub mod rank_select;

pub use bit_vector::{BitVector, BitsView};
pub use rank_select::RankSelectIndex;
