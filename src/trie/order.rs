//! Sibling ordering policy
//!
//! The policy fixes the order of children at every branch, which in turn
//! fixes key-id assignment and enumeration order. It is chosen at build
//! time, carried in the persisted image, and never changes afterwards.

use crate::error::{Result, TrieError};

/// Sibling order inside the trie, fixed per instance at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Children sorted by branching byte; key ids are lexicographic ranks
    #[default]
    Label,
    /// Children sorted by descending subtree weight (ties by label byte);
    /// frequent keys sit on shorter traversal paths and get smaller ids
    Weight,
}

impl Order {
    /// Persisted tag value
    pub(crate) fn tag(self) -> u64 {
        match self {
            Order::Label => 0,
            Order::Weight => 1,
        }
    }

    /// Decode a persisted tag value
    pub(crate) fn from_tag(tag: u64) -> Result<Self> {
        match tag {
            0 => Ok(Order::Label),
            1 => Ok(Order::Weight),
            other => Err(TrieError::format(format!(
                "unknown ordering policy tag {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Label => write!(f, "label"),
            Order::Weight => write!(f, "weight"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        assert_eq!(Order::from_tag(Order::Label.tag()).unwrap(), Order::Label);
        assert_eq!(Order::from_tag(Order::Weight.tag()).unwrap(), Order::Weight);
    }

    #[test]
    fn test_unknown_tag_is_format_error() {
        let err = Order::from_tag(7).unwrap_err();
        assert!(err.to_string().contains("FORMAT_ERROR"));
    }

    #[test]
    fn test_default_is_label() {
        assert_eq!(Order::default(), Order::Label);
    }
}
