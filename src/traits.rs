//! # Traits
//!
//! These are the traits that connect user data to the writer. [`Numeric`] fixes which
//! element types may be written and which VTK type tag each one carries, [`Array`]
//! describes a container of such elements along with its number of components, and
//! [`Attributes`] attaches a whole set of arrays to a grid at once. With the `derive`
//! feature `Attributes` can be derived for structs whose fields all implement `Array`.

use crate::grid::{Location, UnstructuredGrid};
use crate::Error;

use num_traits::ToBytes;
use std::borrow::Cow;
use std::fmt;

/// The element type of a `DataArray`, as named by the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Float32,
    Float64,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int8 => "Int8",
            Self::UInt8 => "UInt8",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
        }
    }

    /// width of one element in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Float32 | Self::Int32 | Self::UInt32 => 4,
            Self::Float64 | Self::Int64 | Self::UInt64 => 8,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A numeric element type that can be stored in a `DataArray`.
///
/// Implemented for the eight fixed width integers and for `f32` / `f64`. Signedness is
/// part of the tag: `i32` and `u32` share a width but map to `Int32` and `UInt32`. The trait
/// is sealed, so any other element type is rejected at compile time.
pub trait Numeric: ToBytes + Copy + sealed::Sealed {
    const DATA_TYPE: DataType;
}

macro_rules! numeric {
    ($($num:ty => $tag:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $num {}

            impl Numeric for $num {
                const DATA_TYPE: DataType = DataType::$tag;
            }
        )*
    };
}

numeric! {
    f32 => Float32,
    f64 => Float64,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
}

/// A container of numeric elements that can be attached to a grid as point or cell data.
///
/// `elements` must return the values in the order they are written to the file: all
/// components of the first point (or cell), then all components of the second, and so on.
pub trait Array {
    type Elem: Numeric;

    fn elements(&self) -> Cow<'_, [Self::Elem]>;

    /// number of values stored per point / cell
    fn components(&self) -> usize {
        1
    }
}

/// A set of named arrays that are attached to a grid together.
///
/// The recommended way of using this trait is deriving it:
///
/// ```ignore
/// #[derive(vtu::Attributes)]
/// struct Flow {
///     pressure: Vec<f64>,
///     // written as `Velocity` instead of `velocity`
///     #[vtu(name = "Velocity")]
///     velocity: ndarray::Array2<f32>,
/// }
///
/// grid.add_attributes(vtu::Location::Point, &flow)?;
/// ```
///
/// which attaches every field, in declaration order, through
/// [`UnstructuredGrid::add_array`].
pub trait Attributes {
    fn attach(&self, grid: &mut UnstructuredGrid, location: Location) -> Result<(), Error>;
}
