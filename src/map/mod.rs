//! ASCII world map: template grid, bundled asset and projection

pub mod asset;
mod grid;
pub mod projection;

pub use asset::{MapSource, load_bundled, load_file};
pub use grid::MapGrid;
pub use projection::{GeoCoordinate, MarkerCell, center_cell, project, project_onto};
