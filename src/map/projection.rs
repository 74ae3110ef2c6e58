//! Latitude/longitude to grid cell projection
//!
//! LAT (rows):    90 (top)   .. -90 (bottom)
//! LON (columns): -180 (left) .. 180 (right)
//!
//! This is a plain linear mapping, not a real cartographic projection. It only
//! has to agree with how the map template was drawn.

use super::grid::MapGrid;

pub const LAT_RANGE: f64 = 90.0;
pub const LON_RANGE: f64 = 180.0;

/// A geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components lie within their valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-LAT_RANGE..=LAT_RANGE).contains(&self.latitude)
            && (-LON_RANGE..=LON_RANGE).contains(&self.longitude)
    }

    /// Pull the coordinate back into range. Non-finite components become 0.
    pub fn clamped(&self) -> Self {
        Self {
            latitude: clamp_finite(self.latitude, LAT_RANGE),
            longitude: clamp_finite(self.longitude, LON_RANGE),
        }
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)
    }
}

fn clamp_finite(value: f64, range: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-range, range)
    } else {
        0.0
    }
}

/// A `(row, column)` position inside a [`MapGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerCell {
    pub row: usize,
    pub column: usize,
}

impl MarkerCell {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Map a coordinate onto the grid.
///
/// `column = round((lon + 180) / 360 * width)`,
/// `row = round((90 - lat) / 180 * height)`, both clamped into the grid.
pub fn project(coord: GeoCoordinate, grid: &MapGrid) -> MarkerCell {
    project_onto(coord, grid.height(), grid.width())
}

/// Same as [`project`] but for bare dimensions.
pub fn project_onto(coord: GeoCoordinate, height: usize, width: usize) -> MarkerCell {
    let coord = coord.clamped();

    let lon_normalized = (coord.longitude + LON_RANGE) / (LON_RANGE * 2.0);
    let lat_normalized = (LAT_RANGE - coord.latitude) / (LAT_RANGE * 2.0);

    MarkerCell {
        row: scale_to_index(lat_normalized, height),
        column: scale_to_index(lon_normalized, width),
    }
}

/// The cell `(0, 0)` projects to: `(round(h / 2), round(w / 2))`
pub fn center_cell(grid: &MapGrid) -> MarkerCell {
    MarkerCell {
        row: scale_to_index(0.5, grid.height()),
        column: scale_to_index(0.5, grid.width()),
    }
}

fn scale_to_index(normalized: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let idx = (normalized * len as f64).round();
    (idx.max(0.0) as usize).min(len - 1)
}
