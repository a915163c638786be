//! Writes a unit cube split into six tetrahedra to `out.vtu`.
//!
//! Run with `RUST_LOG=trace` to see the blocks being encoded.

use vtu::{CellType, Compression, UnstructuredGrid};

fn main() -> Result<(), vtu::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let points = [
        [0., 0., 0.],
        [1., 0., 0.],
        [0., 1., 0.],
        [0., 0., 1.],
        [1., 0., 1.],
        [1., 1., 0.],
        [0., 1., 1.],
        [1., 1., 1.],
    ];
    let cells = [
        [0, 1, 5, 7],
        [0, 1, 7, 4],
        [5, 7, 6, 0],
        [5, 0, 6, 2],
        [0, 7, 3, 6],
        [7, 3, 0, 4],
    ];

    let mut grid =
        UnstructuredGrid::from_cells(&points, CellType::Tetra, &cells, Compression::default())?;

    // distance of every point from the origin
    let u: Vec<f32> = points
        .iter()
        .map(|p| p.iter().map(|x| x * x).sum::<f32>().sqrt())
        .collect();
    grid.add_point_data("u", &u, 1)?;
    grid.add_cell_data("number", &[0u8, 1, 2, 3, 4, 5], 1)?;

    grid.write("out.vtu")
}
