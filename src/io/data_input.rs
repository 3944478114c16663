//! Data input abstractions and implementations
//!
//! Traits and implementations for reading structured little-endian data from
//! byte slices and `Read` sources. The persistence codec consumes whole
//! images through these, so file and buffer loads share one decode path.

use std::io::Read;

use crate::error::{Result, TrieError};
use crate::io::var_int::VarInt;

/// Trait for reading structured data from various sources
pub trait DataInput {
    /// Read a single byte
    fn read_u8(&mut self) -> Result<u8>;

    /// Read a 16-bit unsigned integer in little-endian format
    fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_bytes(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a 32-bit unsigned integer in little-endian format
    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Read a 64-bit unsigned integer in little-endian format
    fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Read a variable-length encoded integer
    fn read_var_int(&mut self) -> Result<u64>
    where
        Self: Sized,
    {
        VarInt::read_from(self)
    }

    /// Read exact number of bytes into the provided buffer
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read a vector of bytes with the specified length
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }
}

/// DataInput implementation over a byte slice
pub struct SliceDataInput<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceDataInput<'a> {
    /// Create a new input over the given slice
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current read position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }
}

impl<'a> DataInput for SliceDataInput<'a> {
    fn read_u8(&mut self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(TrieError::format("unexpected end of input"));
        }
        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self
            .position
            .checked_add(buf.len())
            .ok_or_else(|| TrieError::format("read length overflows"))?;
        if end > self.data.len() {
            return Err(TrieError::format("unexpected end of input"));
        }
        buf.copy_from_slice(&self.data[self.position..end]);
        self.position = end;
        Ok(())
    }
}

/// DataInput implementation over any `Read` source
pub struct ReaderDataInput<R: Read> {
    reader: R,
}

impl<R: Read> ReaderDataInput<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the rest of the source into a buffer
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read> DataInput for ReaderDataInput<R> {
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_exact(buf)?;
        Ok(())
    }
}

/// Convenience: input over a slice
pub fn from_slice(data: &[u8]) -> SliceDataInput<'_> {
    SliceDataInput::new(data)
}

/// Convenience: input over a reader
pub fn from_reader<R: Read>(reader: R) -> ReaderDataInput<R> {
    ReaderDataInput::new(reader)
}
