//! Shared read-only byte regions
//!
//! A [`ByteRegion`] is the backing storage for a parsed trie image: either a
//! heap buffer or a memory-mapped file, shared behind an `Arc` so that views
//! into the image are cheap to clone and safe to hand across threads. All
//! section views ([`WordsView`], [`U32View`], [`ByteView`]) resolve to plain
//! offset arithmetic over one contiguous region, never raw pointers, so the
//! same image bytes are valid in any process that maps them.

use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, TrieError};

#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};

#[derive(Clone)]
enum Source {
    Heap(Arc<[u8]>),
    #[cfg(feature = "mmap")]
    Mapped(Arc<Mmap>),
}

impl Source {
    #[inline]
    fn bytes(&self) -> &[u8] {
        match self {
            Source::Heap(b) => b,
            #[cfg(feature = "mmap")]
            Source::Mapped(m) => m,
        }
    }
}

/// A shared, immutable window into heap or memory-mapped bytes
#[derive(Clone)]
pub struct ByteRegion {
    source: Source,
    offset: usize,
    len: usize,
}

impl ByteRegion {
    /// Wrap an owned buffer
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self {
            source: Source::Heap(Arc::from(bytes.into_boxed_slice())),
            offset: 0,
            len,
        }
    }

    /// Memory-map a file read-only
    ///
    /// The mapping is shared state: the region (and every view derived from
    /// it) only ever reads, so independent mappings of the same file by
    /// different threads or processes cannot interfere.
    #[cfg(feature = "mmap")]
    pub fn map_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let mmap = unsafe {
            MmapOptions::new()
                .map(&file)
                .map_err(|e| TrieError::Io(e))?
        };
        let len = mmap.len();
        Ok(Self {
            source: Source::Mapped(Arc::new(mmap)),
            offset: 0,
            len,
        })
    }

    /// Read an entire file into a heap-backed region
    pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_vec(bytes))
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the region holds no bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The region's bytes
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.source.bytes()[self.offset..self.offset + self.len]
    }

    /// A sub-window of this region; fails if it would exceed the bounds
    pub fn slice(&self, offset: usize, len: usize) -> Result<ByteRegion> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| TrieError::format("section range overflows"))?;
        if end > self.len {
            return Err(TrieError::format(format!(
                "section [{}, {}) exceeds image size {}",
                offset, end, self.len
            )));
        }
        Ok(ByteRegion {
            source: self.source.clone(),
            offset: self.offset + offset,
            len,
        })
    }
}

impl std::fmt::Debug for ByteRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.source {
            Source::Heap(_) => "heap",
            #[cfg(feature = "mmap")]
            Source::Mapped(_) => "mmap",
        };
        f.debug_struct("ByteRegion")
            .field("kind", &kind)
            .field("len", &self.len)
            .finish()
    }
}

/// View of a region as little-endian u64 words
///
/// The region length must be a multiple of 8; constructors enforce this.
#[derive(Debug, Clone)]
pub struct WordsView {
    region: ByteRegion,
}

impl WordsView {
    /// Interpret a region as u64 words
    pub fn new(region: ByteRegion) -> Result<Self> {
        if region.len() % 8 != 0 {
            return Err(TrieError::format(format!(
                "word section length {} is not a multiple of 8",
                region.len()
            )));
        }
        Ok(Self { region })
    }

    /// Number of words
    #[inline]
    pub fn len(&self) -> usize {
        self.region.len() / 8
    }

    /// True if the view holds no words
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// Word at index `i`; callers stay in bounds per the parse-time checks
    #[inline]
    pub fn get(&self, i: usize) -> u64 {
        let bytes = self.region.as_slice();
        let off = i * 8;
        u64::from_le_bytes(bytes[off..off + 8].try_into().unwrap())
    }

    /// Iterate all words
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

/// View of a region as little-endian u32 values
#[derive(Debug, Clone)]
pub struct U32View {
    region: ByteRegion,
    len: usize,
}

impl U32View {
    /// Interpret the first `len` u32 slots of a region
    pub fn new(region: ByteRegion, len: usize) -> Result<Self> {
        let needed = len
            .checked_mul(4)
            .ok_or_else(|| TrieError::format("u32 section length overflows"))?;
        if needed > region.len() {
            return Err(TrieError::format(format!(
                "u32 section needs {} bytes, region holds {}",
                needed,
                region.len()
            )));
        }
        Ok(Self { region, len })
    }

    /// Number of values
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the view holds no values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value at index `i`
    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        let bytes = self.region.as_slice();
        let off = i * 4;
        u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap())
    }
}

/// View of a region as raw bytes (edge labels)
#[derive(Debug, Clone)]
pub struct ByteView {
    region: ByteRegion,
    len: usize,
}

impl ByteView {
    /// Interpret the first `len` bytes of a region
    pub fn new(region: ByteRegion, len: usize) -> Result<Self> {
        if len > region.len() {
            return Err(TrieError::format(format!(
                "byte section needs {} bytes, region holds {}",
                len,
                region.len()
            )));
        }
        Ok(Self { region, len })
    }

    /// Number of bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the view holds no bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte at index `i`
    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        self.region.as_slice()[i]
    }

    /// The viewed bytes
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.region.as_slice()[..self.len]
    }
}
