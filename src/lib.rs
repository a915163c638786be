#![doc = include_str!("../README.md")]

pub mod array;
mod block;
pub mod codec;
mod compression;
mod grid;
pub mod mesh;
pub mod prelude;
mod traits;
mod xml_writer;

pub use traits::{Array, Attributes, DataType, Numeric};

pub use block::{DataBlock, EncodedBlock};
pub use compression::Compression;

pub use grid::{write, Location, UnstructuredGrid};
pub use mesh::CellType;

pub use xml_writer::XmlWriter;

#[cfg(feature = "derive")]
pub use vtu_derive::Attributes;

pub use ndarray;

use std::path::PathBuf;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not open `{}` for writing: `{source}`", .path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write XML data to file: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    #[error("{0}")]
    Compression(#[from] CompressionFailed),
}

/// A caller supplied value that violates the contract of the operation it was passed to.
///
/// These are always reported before any bytes are written or any block is stored.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("data length {len} is not divisible by the number of components ({components})")]
    ComponentMismatch { len: usize, components: u32 },
    #[error("{location} data `{name}` has {actual} elements, expected {expected}")]
    LengthMismatch {
        name: String,
        location: Location,
        expected: u64,
        actual: usize,
    },
    #[error("{location} data `{name}` must have at least one component")]
    ZeroComponents { name: String, location: Location },
    #[error("unsupported number of {what}: {count} exceeds {max}")]
    TooMany {
        what: &'static str,
        count: usize,
        max: u64,
    },
    #[error("compression block size must be at least one byte")]
    BlockSize,
    #[error("compression level {0} is outside the valid range 0-9")]
    Level(u8),
    #[error("structural block `{name}` does not match the compression of the grid (block compressed: {compressed})")]
    CompressionMismatch { name: String, compressed: bool },
    #[error("{what} of {size} bytes does not fit a 32 bit header")]
    Overflow { what: &'static str, size: u64 },
}

/// A single chunk could not be compressed.
///
/// Carries the codec status so the failure can be diagnosed.
#[derive(derive_more::Display, Debug, Clone, PartialEq, Eq, derive_more::Constructor)]
#[display(
    fmt = "zlib compression failed for block {index} of {len} bytes with status {status}"
)]
pub struct CompressionFailed {
    pub index: usize,
    pub len: usize,
    pub status: i32,
}

impl std::error::Error for CompressionFailed {}
