//! I/O primitives for the persistence codec
//!
//! Structured little-endian readers/writers plus shared read-only byte
//! regions. File, buffer, and memory-mapped trie loads all funnel through
//! [`ByteRegion`] so they share a single validated decode path.

pub mod data_input;
pub mod data_output;
pub mod region;
pub mod var_int;

pub use data_input::{from_reader, from_slice, DataInput, ReaderDataInput, SliceDataInput};
pub use data_output::{
    to_file, to_vec, to_writer, DataOutput, FileDataOutput, VecDataOutput, WriterDataOutput,
};
pub use region::{ByteRegion, ByteView, U32View, WordsView};
pub use var_int::VarInt;
