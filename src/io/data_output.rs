//! Data output abstractions and implementations
//!
//! Traits and implementations for writing structured little-endian data to
//! buffers, files, and arbitrary `Write` sinks. The persistence codec emits
//! whole images through these.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::io::var_int::VarInt;

/// Trait for writing structured data to various sinks
pub trait DataOutput {
    /// Write a single byte
    fn write_u8(&mut self, value: u8) -> Result<()>;

    /// Write a 16-bit unsigned integer in little-endian format
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a 32-bit unsigned integer in little-endian format
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a 64-bit unsigned integer in little-endian format
    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write a variable-length encoded integer
    fn write_var_int(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&VarInt::encode(value))
    }

    /// Write raw bytes
    fn write_bytes(&mut self, data: &[u8]) -> Result<()>;

    /// Flush buffered output to the underlying sink
    fn flush(&mut self) -> Result<()>;
}

/// DataOutput implementation collecting into a `Vec<u8>`
pub struct VecDataOutput {
    buffer: Vec<u8>,
}

impl VecDataOutput {
    /// Create an empty output buffer
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create an output buffer with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if nothing was written yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the accumulated bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// The accumulated bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for VecDataOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl DataOutput for VecDataOutput {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buffer.push(value);
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// DataOutput implementation over a buffered file
pub struct FileDataOutput {
    writer: BufWriter<File>,
}

impl FileDataOutput {
    /// Create (truncating) a file at the given path
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl DataOutput for FileDataOutput {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_all(&[value])?;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// DataOutput implementation over any `Write` sink
pub struct WriterDataOutput<W: Write> {
    writer: W,
}

impl<W: Write> WriterDataOutput<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DataOutput for WriterDataOutput<W> {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_all(&[value])?;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Convenience: output into a fresh `Vec<u8>`
pub fn to_vec() -> VecDataOutput {
    VecDataOutput::new()
}

/// Convenience: output into a new file
pub fn to_file<P: AsRef<Path>>(path: P) -> Result<FileDataOutput> {
    FileDataOutput::create(path)
}

/// Convenience: output into a writer
pub fn to_writer<W: Write>(writer: W) -> WriterDataOutput<W> {
    WriterDataOutput::new(writer)
}
