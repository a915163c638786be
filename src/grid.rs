use crate::xml_writer::XmlWriter;
use crate::{Array, Attributes, Compression, DataBlock, Error, InvalidArgument, Numeric};

use std::fmt;
use std::io::Write;
use std::path::Path;

/// Whether an attribute array holds one entry per point or one entry per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Point,
    Cell,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => f.write_str("point"),
            Self::Cell => f.write_str("cell"),
        }
    }
}

/// An unstructured grid: points, cells and any number of point / cell attribute arrays,
/// all encoded and ready to be written to a `.vtu` file.
///
/// Every array is encoded as soon as it is added, so writing the grid only has to lay the
/// already encoded blocks out in the file. Attributes are written in the order they were
/// added.
///
/// Most grids are created with [`UnstructuredGrid::from_cells`]. A grid may also be assembled
/// from blocks built by hand with [`UnstructuredGrid::new`].
#[derive(Debug, Clone)]
pub struct UnstructuredGrid {
    point_count: u32,
    cell_count: u32,
    points: DataBlock,
    connectivity: DataBlock,
    offsets: DataBlock,
    types: DataBlock,
    point_data: Vec<DataBlock>,
    cell_data: Vec<DataBlock>,
    compression: Compression,
}

impl UnstructuredGrid {
    /// Assemble a grid from its four structural blocks.
    ///
    /// `compression` is used for every attribute array added afterwards and decides whether
    /// the file declares a compressor. Fails if any of the structural blocks was encoded with
    /// compression switched the other way.
    pub fn new(
        point_count: u32,
        points: DataBlock,
        cell_count: u32,
        connectivity: DataBlock,
        offsets: DataBlock,
        types: DataBlock,
        compression: Compression,
    ) -> Result<Self, Error> {
        for block in [&points, &connectivity, &offsets, &types] {
            if block.is_compressed() != compression.is_active() {
                return Err(InvalidArgument::CompressionMismatch {
                    name: block.name().to_string(),
                    compressed: block.is_compressed(),
                }
                .into());
            }
        }

        Ok(Self {
            point_count,
            cell_count,
            points,
            connectivity,
            offsets,
            types,
            point_data: Vec::new(),
            cell_data: Vec::new(),
            compression,
        })
    }

    pub fn point_count(&self) -> u32 {
        self.point_count
    }

    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// the flattened point coordinates
    pub fn points(&self) -> &DataBlock {
        &self.points
    }

    pub fn connectivity(&self) -> &DataBlock {
        &self.connectivity
    }

    pub fn offsets(&self) -> &DataBlock {
        &self.offsets
    }

    pub fn types(&self) -> &DataBlock {
        &self.types
    }

    pub fn point_data(&self) -> &[DataBlock] {
        &self.point_data
    }

    pub fn cell_data(&self) -> &[DataBlock] {
        &self.cell_data
    }

    /// Attach an array with `components` values per point.
    ///
    /// `data.len()` must equal `point_count * components`.
    pub fn add_point_data<T: Numeric>(
        &mut self,
        name: &str,
        data: &[T],
        components: u32,
    ) -> Result<(), Error> {
        self.add_data(Location::Point, name, data, components)
    }

    /// Attach an array with `components` values per cell.
    ///
    /// `data.len()` must equal `cell_count * components`.
    pub fn add_cell_data<T: Numeric>(
        &mut self,
        name: &str,
        data: &[T],
        components: u32,
    ) -> Result<(), Error> {
        self.add_data(Location::Cell, name, data, components)
    }

    /// Attach anything implementing [`Array`], using the number of components it reports.
    pub fn add_array<A: Array + ?Sized>(
        &mut self,
        location: Location,
        name: &str,
        array: &A,
    ) -> Result<(), Error> {
        let components = u32::try_from(array.components()).map_err(|_| InvalidArgument::TooMany {
            what: "components",
            count: array.components(),
            max: u64::from(u32::MAX),
        })?;

        let elements = array.elements();
        self.add_data(location, name, &elements, components)
    }

    /// Attach every array of an [`Attributes`] set.
    pub fn add_attributes<A: Attributes + ?Sized>(
        &mut self,
        location: Location,
        attributes: &A,
    ) -> Result<(), Error> {
        attributes.attach(self, location)
    }

    fn add_data<T: Numeric>(
        &mut self,
        location: Location,
        name: &str,
        data: &[T],
        components: u32,
    ) -> Result<(), Error> {
        if components == 0 {
            return Err(InvalidArgument::ZeroComponents {
                name: name.to_string(),
                location,
            }
            .into());
        }

        let count = match location {
            Location::Point => self.point_count,
            Location::Cell => self.cell_count,
        };
        let expected = u64::from(count) * u64::from(components);

        if data.len() as u64 != expected {
            return Err(InvalidArgument::LengthMismatch {
                name: name.to_string(),
                location,
                expected,
                actual: data.len(),
            }
            .into());
        }

        let block = DataBlock::build(name, data, components, &self.compression)?;

        match location {
            Location::Point => self.point_data.push(block),
            Location::Cell => self.cell_data.push(block),
        }

        Ok(())
    }

    /// The element sections of the file and the blocks they describe, in file order.
    ///
    /// Both the headers and the appended section are written from this list, which keeps
    /// the recorded offsets in step with the appended bytes.
    fn sections(&self) -> [(&'static str, Vec<&DataBlock>); 4] {
        [
            ("Points", vec![&self.points]),
            (
                "Cells",
                vec![&self.connectivity, &self.offsets, &self.types],
            ),
            ("PointData", self.point_data.iter().collect()),
            ("CellData", self.cell_data.iter().collect()),
        ]
    }

    /// Write the grid to the file at `path`, replacing it if it exists.
    ///
    /// If writing fails part way through, the partially written file is left in place.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = XmlWriter::create(path)?;
        self.write_document(&mut writer)?;
        writer.finish()?;
        Ok(())
    }

    /// Write the grid to any writer and return it once everything has been flushed.
    pub fn write_to<W: Write>(&self, inner: W) -> Result<W, Error> {
        let mut writer = XmlWriter::new(inner);
        self.write_document(&mut writer)?;
        writer.finish()
    }

    fn write_document<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<(), Error> {
        let sections = self.sections();

        tracing::debug!(
            points = self.point_count,
            cells = self.cell_count,
            point_arrays = self.point_data.len(),
            cell_arrays = self.cell_data.len(),
            compressed = self.compression.is_active(),
            "writing unstructured grid"
        );

        let byte_order = byte_order();
        let mut attributes = vec![
            ("type", "UnstructuredGrid"),
            ("version", "0.1"),
            ("byte_order", byte_order),
        ];
        if let Some(compressor) = self.compression.compressor_name() {
            attributes.push(("compressor", compressor));
        }
        writer.open_element("VTKFile", &attributes)?;

        writer.open_element("UnstructuredGrid", &[])?;
        writer.open_element(
            "Piece",
            &[
                ("NumberOfPoints", self.point_count.to_string().as_str()),
                ("NumberOfCells", self.cell_count.to_string().as_str()),
            ],
        )?;

        let mut offset = RunningOffset::default();
        for (section, blocks) in &sections {
            writer.open_element(section, &[])?;
            for block in blocks {
                writer.write_data_array(block, offset.advance(block)?)?;
            }
            writer.close_element()?;
        }

        // Piece
        writer.close_element()?;
        // UnstructuredGrid
        writer.close_element()?;

        writer.open_element("AppendedData", &[("encoding", "raw")])?;
        writer.write_content("_", true, false)?;
        for block in sections.iter().flat_map(|(_, blocks)| blocks) {
            writer.write_raw(block.payload())?;
        }
        writer.write_content("", false, true)?;
        writer.close_element()?;

        // VTKFile
        writer.close_element()?;

        tracing::debug!(appended_bytes = offset.0, "finished unstructured grid");

        Ok(())
    }
}

/// Byte position in the appended section where the next block starts.
#[derive(Debug, Default)]
struct RunningOffset(u32);

impl RunningOffset {
    /// return the offset of `block` and move past it
    fn advance(&mut self, block: &DataBlock) -> Result<u32, InvalidArgument> {
        let start = self.0;
        let end = u32::try_from(block.encoded_len())
            .ok()
            .and_then(|len| start.checked_add(len))
            .ok_or(InvalidArgument::Overflow {
                what: "appended data",
                size: u64::from(start) + block.encoded_len() as u64,
            })?;
        self.0 = end;
        Ok(start)
    }
}

fn byte_order() -> &'static str {
    if cfg!(target_endian = "little") {
        "LittleEndian"
    } else {
        "BigEndian"
    }
}

/// Write `grid` to the file at `path`. Same as [`UnstructuredGrid::write`].
pub fn write<P: AsRef<Path>>(grid: &UnstructuredGrid, path: P) -> Result<(), Error> {
    grid.write(path)
}
