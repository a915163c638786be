//! Common traits and types that are useful for building and writing grids
#![allow(unused_imports)]

pub use crate::traits::{Array, Attributes, DataType, Numeric};
pub use crate::{CellType, Compression, DataBlock, Error, Location, UnstructuredGrid};
