//! # Mesh construction
//!
//! Turns a list of points and a list of cells into the four structural arrays of an
//! unstructured grid:
//!
//! * the point coordinates, flattened into one unnamed 3 component `Float32` array
//! * `connectivity`: the point indices of every cell, one cell after the other
//! * `offsets`: for every cell, the index one past its last entry in `connectivity`
//! * `types`: the VTK cell type code of every cell
//!
//! The three cell arrays are written without a `NumberOfComponents` attribute. The vertex
//! count and the index range of the cells are not checked against `cell_type`.

use crate::{Compression, DataBlock, Error, InvalidArgument, UnstructuredGrid};

/// The linear VTK cell types.
///
/// The discriminants are the codes VTK uses in the `types` array, see
/// <https://vtk.org/doc/nightly/html/vtkCellType_8h.html>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellType {
    Vertex = 1,
    PolyVertex = 2,
    Line = 3,
    PolyLine = 4,
    Triangle = 5,
    TriangleStrip = 6,
    Polygon = 7,
    Pixel = 8,
    Quad = 9,
    Tetra = 10,
    Voxel = 11,
    Hexahedron = 12,
    Wedge = 13,
    Pyramid = 14,
}

impl CellType {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl UnstructuredGrid {
    /// Build a grid in which every cell has the same `cell_type`.
    ///
    /// Empty point and cell lists are accepted and produce an empty grid. Fails if there are
    /// more than `u32::MAX` points or cells, or more than `i32::MAX` connectivity entries.
    ///
    /// ```
    /// use vtu::{CellType, Compression, UnstructuredGrid};
    ///
    /// let points = [[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]];
    /// let grid = UnstructuredGrid::from_cells(&points, CellType::Quad, &[[0, 1, 2, 3]], Compression::NONE)?;
    ///
    /// assert_eq!(grid.point_count(), 4);
    /// assert_eq!(grid.cell_count(), 1);
    /// # Ok::<(), vtu::Error>(())
    /// ```
    pub fn from_cells<C: AsRef<[i32]>>(
        points: &[[f32; 3]],
        cell_type: CellType,
        cells: &[C],
        compression: Compression,
    ) -> Result<UnstructuredGrid, Error> {
        let point_count = count(points.len(), "points")?;
        let cell_count = count(cells.len(), "cells")?;

        let coordinates: Vec<f32> = points.iter().flatten().copied().collect();

        let connectivity_len: usize = cells.iter().map(|cell| cell.as_ref().len()).sum();
        if connectivity_len > i32::MAX as usize {
            return Err(InvalidArgument::TooMany {
                what: "connectivity entries",
                count: connectivity_len,
                max: i32::MAX as u64,
            }
            .into());
        }

        let mut connectivity = Vec::with_capacity(connectivity_len);
        let mut offsets = Vec::with_capacity(cells.len());
        for cell in cells {
            connectivity.extend_from_slice(cell.as_ref());
            // bounded by the connectivity length check above
            offsets.push(connectivity.len() as i32);
        }
        let types = vec![cell_type.code(); cells.len()];

        let points = DataBlock::build("", &coordinates, 3, &compression)?;
        let connectivity = DataBlock::build("connectivity", &connectivity, 0, &compression)?;
        let offsets = DataBlock::build("offsets", &offsets, 0, &compression)?;
        let types = DataBlock::build("types", &types, 0, &compression)?;

        UnstructuredGrid::new(
            point_count,
            points,
            cell_count,
            connectivity,
            offsets,
            types,
            compression,
        )
    }
}

fn count(len: usize, what: &'static str) -> Result<u32, InvalidArgument> {
    u32::try_from(len).map_err(|_| InvalidArgument::TooMany {
        what,
        count: len,
        max: u64::from(u32::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataType;

    fn payload_words(block: &DataBlock) -> Vec<i32> {
        block.payload()[4..]
            .chunks(4)
            .map(|word| i32::from_ne_bytes(word.try_into().unwrap()))
            .collect()
    }

    #[test]
    fn cell_codes() {
        assert_eq!(CellType::Vertex.code(), 1);
        assert_eq!(CellType::Quad.code(), 9);
        assert_eq!(CellType::Tetra.code(), 10);
        assert_eq!(CellType::Pyramid.code(), 14);
    }

    #[test]
    fn structural_blocks() {
        let points = [[0., 0., 0.], [1., 0., 0.], [0., 1., 0.], [1., 1., 0.]];
        let cells = vec![vec![0, 1, 2], vec![1, 3, 2]];
        let grid =
            UnstructuredGrid::from_cells(&points, CellType::Triangle, &cells, Compression::NONE)
                .unwrap();

        assert_eq!(grid.point_count(), 4);
        assert_eq!(grid.cell_count(), 2);

        assert_eq!(grid.points().name(), "");
        assert_eq!(grid.points().components(), 3);
        assert_eq!(grid.points().data_type(), DataType::Float32);
        assert_eq!(grid.points().encoded_len(), 4 + 12 * 4);

        assert_eq!(grid.connectivity().name(), "connectivity");
        assert_eq!(grid.connectivity().components(), 0);
        assert_eq!(grid.connectivity().data_type(), DataType::Int32);
        assert_eq!(payload_words(grid.connectivity()), vec![0, 1, 2, 1, 3, 2]);

        assert_eq!(grid.offsets().name(), "offsets");
        assert_eq!(grid.offsets().data_type(), DataType::Int32);
        assert_eq!(payload_words(grid.offsets()), vec![3, 6]);

        assert_eq!(grid.types().name(), "types");
        assert_eq!(grid.types().data_type(), DataType::UInt8);
        assert_eq!(&grid.types().payload()[4..], &[5u8, 5]);
    }

    #[test]
    fn mixed_cell_lengths() {
        let points = [[0.; 3]; 5];
        let cells: Vec<Vec<i32>> = vec![vec![0], vec![1, 2, 3, 4], vec![4, 0]];
        let grid =
            UnstructuredGrid::from_cells(&points, CellType::PolyLine, &cells, Compression::NONE)
                .unwrap();
        assert_eq!(payload_words(grid.offsets()), vec![1, 5, 7]);
    }

    #[test]
    fn empty_grid() {
        let cells: [[i32; 3]; 0] = [];
        let grid =
            UnstructuredGrid::from_cells(&[], CellType::Triangle, &cells, Compression::ZLIB)
                .unwrap();
        assert_eq!(grid.point_count(), 0);
        assert_eq!(grid.cell_count(), 0);
        assert!(grid.write_to(Vec::new()).is_ok());
    }
}
