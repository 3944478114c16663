//! Binary image layout
//!
//! The persisted form of a trie is one contiguous, self-describing image:
//! a fixed header followed by 8-byte-aligned sections. The image carries no
//! host addresses, so the same bytes are valid in any process, whether read
//! into heap memory or mapped read-only from a file.
//!
//! ```text
//! 0   magic        6 bytes  b"ktrie\0"
//! 6   version      u16      1
//! 8   order tag    u64      0 = label, 1 = weight
//! 16  num_keys     u64      N
//! 24  num_nodes    u64      M (>= 1, < 2^32)
//! 32  louds_bits   u64      2*M + 1
//! 40  louds words  ceil(louds_bits/64) * 8
//!     term words   ceil(M/64) * 8
//!     labels       M - 1 bytes, zero-padded to 8
//!     term_to_key  N u32 values, zero-padded to 8
//!     key_to_node  N u32 values, zero-padded to 8
//! ```

use crate::error::{Result, TrieError};
use crate::trie::Order;

/// Identifies an image as this codec's format
pub const MAGIC: [u8; 6] = *b"ktrie\0";
/// Image format version
pub const VERSION: u16 = 1;
/// Fixed header length in bytes
pub const HEADER_LEN: usize = 40;

/// Layer tag appended after a core image by the multi-value layer
pub const LAYER_TAG_BYTES: u8 = b'B';
/// Layer tag appended after a core image by the record layer
pub const LAYER_TAG_RECORD: u8 = b'R';

/// Parsed image header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Ordering policy the image was built under
    pub order: Order,
    /// Number of keys
    pub num_keys: usize,
    /// Number of trie nodes (including the root)
    pub num_nodes: usize,
    /// Length of the LOUDS bit sequence
    pub louds_bits: usize,
}

/// Byte offsets and lengths of every section in an image
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// LOUDS bit words
    pub louds_off: usize,
    /// LOUDS section length in bytes
    pub louds_len: usize,
    /// Terminal bit words
    pub term_off: usize,
    /// Terminal section length in bytes
    pub term_len: usize,
    /// Edge labels
    pub labels_off: usize,
    /// Label count (unpadded)
    pub labels_len: usize,
    /// Terminal-index -> key-id array
    pub term_to_key_off: usize,
    /// Key-id -> node array
    pub key_to_node_off: usize,
    /// Total image length in bytes
    pub total_len: usize,
}

/// Round a byte length up to the next multiple of 8
pub fn padded8(len: usize) -> Result<usize> {
    len.checked_add(7)
        .map(|n| n & !7usize)
        .ok_or_else(|| TrieError::format("section length overflows"))
}

/// Number of u64 words needed for a bit count
pub fn words_for_bits(bits: usize) -> usize {
    (bits + 63) / 64
}

impl Header {
    /// Parse and sanity-check the fixed header
    pub fn parse(bytes: &[u8]) -> Result<Header> {
        if bytes.len() < HEADER_LEN {
            return Err(TrieError::format(format!(
                "image too short for header: {} bytes",
                bytes.len()
            )));
        }
        if bytes[0..6] != MAGIC {
            return Err(TrieError::format("bad magic, not a trie image"));
        }
        let version = u16::from_le_bytes([bytes[6], bytes[7]]);
        if version != VERSION {
            return Err(TrieError::format(format!(
                "unsupported image version {}",
                version
            )));
        }

        let read_u64 = |off: usize| u64::from_le_bytes(bytes[off..off + 8].try_into().unwrap());
        let order = Order::from_tag(read_u64(8))?;
        let num_keys = read_u64(16);
        let num_nodes = read_u64(24);
        let louds_bits = read_u64(32);

        if num_nodes == 0 {
            return Err(TrieError::format("node count is zero"));
        }
        if num_nodes >= u32::MAX as u64 {
            return Err(TrieError::format(format!(
                "node count {} exceeds the supported range",
                num_nodes
            )));
        }
        if num_keys >= num_nodes + 1 {
            return Err(TrieError::format(format!(
                "key count {} inconsistent with {} nodes",
                num_keys, num_nodes
            )));
        }
        let expected_bits = num_nodes
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| TrieError::format("louds bit count overflows"))?;
        if louds_bits != expected_bits {
            return Err(TrieError::format(format!(
                "louds bit count {} disagrees with {} nodes",
                louds_bits, num_nodes
            )));
        }

        Ok(Header {
            order,
            num_keys: num_keys as usize,
            num_nodes: num_nodes as usize,
            louds_bits: louds_bits as usize,
        })
    }

    /// Compute the section layout implied by this header
    pub fn layout(&self) -> Result<Layout> {
        let louds_len = words_for_bits(self.louds_bits)
            .checked_mul(8)
            .ok_or_else(|| TrieError::format("louds section overflows"))?;
        let term_len = words_for_bits(self.num_nodes)
            .checked_mul(8)
            .ok_or_else(|| TrieError::format("terminal section overflows"))?;
        let labels_len = self.num_nodes - 1;
        let ids_len = self
            .num_keys
            .checked_mul(4)
            .ok_or_else(|| TrieError::format("id section overflows"))?;

        let louds_off = HEADER_LEN;
        let term_off = louds_off
            .checked_add(louds_len)
            .ok_or_else(|| TrieError::format("image size overflows"))?;
        let labels_off = term_off
            .checked_add(term_len)
            .ok_or_else(|| TrieError::format("image size overflows"))?;
        let term_to_key_off = labels_off
            .checked_add(padded8(labels_len)?)
            .ok_or_else(|| TrieError::format("image size overflows"))?;
        let key_to_node_off = term_to_key_off
            .checked_add(padded8(ids_len)?)
            .ok_or_else(|| TrieError::format("image size overflows"))?;
        let total_len = key_to_node_off
            .checked_add(padded8(ids_len)?)
            .ok_or_else(|| TrieError::format("image size overflows"))?;

        Ok(Layout {
            louds_off,
            louds_len,
            term_off,
            term_len,
            labels_off,
            labels_len,
            term_to_key_off,
            key_to_node_off,
            total_len,
        })
    }

    /// Serialize the fixed header
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&self.order.tag().to_le_bytes());
        out.extend_from_slice(&(self.num_keys as u64).to_le_bytes());
        out.extend_from_slice(&(self.num_nodes as u64).to_le_bytes());
        out.extend_from_slice(&(self.louds_bits as u64).to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        Header {
            order: Order::Label,
            num_keys: 3,
            num_nodes: 7,
            louds_bits: 15,
        }
    }

    #[test]
    fn test_header_round_trip() {
        let header = sample_header();
        let mut bytes = Vec::new();
        header.write(&mut bytes);
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(Header::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = Vec::new();
        sample_header().write(&mut bytes);
        bytes[0] = b'X';
        let err = Header::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("FORMAT_ERROR"));
    }

    #[test]
    fn test_bad_version() {
        let mut bytes = Vec::new();
        sample_header().write(&mut bytes);
        bytes[6] = 0xEE;
        assert!(Header::parse(&bytes).is_err());
    }

    #[test]
    fn test_inconsistent_louds_bits() {
        let mut header = sample_header();
        header.louds_bits = 14;
        let mut bytes = Vec::new();
        header.write(&mut bytes);
        let err = Header::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("FORMAT_ERROR"));
    }

    #[test]
    fn test_zero_nodes_rejected() {
        let mut header = sample_header();
        header.num_nodes = 0;
        header.louds_bits = 1;
        let mut bytes = Vec::new();
        header.write(&mut bytes);
        assert!(Header::parse(&bytes).is_err());
    }

    #[test]
    fn test_too_many_keys_rejected() {
        let mut header = sample_header();
        header.num_keys = 8; // more keys than nodes
        let mut bytes = Vec::new();
        header.write(&mut bytes);
        assert!(Header::parse(&bytes).is_err());
    }

    #[test]
    fn test_layout_offsets_aligned() {
        let layout = sample_header().layout().unwrap();
        assert_eq!(layout.louds_off % 8, 0);
        assert_eq!(layout.term_off % 8, 0);
        assert_eq!(layout.labels_off % 8, 0);
        assert_eq!(layout.term_to_key_off % 8, 0);
        assert_eq!(layout.key_to_node_off % 8, 0);
        assert_eq!(layout.total_len % 8, 0);
    }

    #[test]
    fn test_truncated_header() {
        assert!(Header::parse(&[0u8; 10]).is_err());
    }
}
