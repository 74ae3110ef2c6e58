//! Map template loading
//!
//! The default world map ships inside the binary via RustEmbed. It was
//! rasterised onto a 120x40 equirectangular grid (3° of longitude per column,
//! 4.5° of latitude per row), which is the same linear mapping `project` uses.

use std::path::Path;

use rust_embed::Embed;
use tracing::{debug, trace};

use super::grid::MapGrid;
use crate::errors::{MapIpError, Result};

/// 编译期嵌入的地图资源
#[derive(Embed)]
#[folder = "assets/"]
struct MapAssets;

/// File name of the bundled world map inside `assets/`
pub const BUNDLED_MAP: &str = "worldmap.txt";

/// Where the map template comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MapSource {
    #[default]
    Bundled,
    File(String),
}

impl MapSource {
    pub fn load(&self) -> Result<MapGrid> {
        match self {
            MapSource::Bundled => load_bundled(),
            MapSource::File(path) => load_file(path),
        }
    }
}

/// Load the world map embedded in the binary
pub fn load_bundled() -> Result<MapGrid> {
    let file = MapAssets::get(BUNDLED_MAP).ok_or_else(|| {
        MapIpError::map_asset(format!("bundled map '{}' is missing", BUNDLED_MAP))
    })?;
    let text = std::str::from_utf8(&file.data)
        .map_err(|e| MapIpError::map_asset(format!("bundled map is not UTF-8: {}", e)))?;

    let grid = MapGrid::parse(text)?;
    trace!(
        "Loaded bundled map: {}x{}",
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

/// Load a user-supplied ASCII map from disk
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<MapGrid> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        MapIpError::map_asset(format!("cannot read map file {}: {}", path.display(), e))
    })?;

    let grid = MapGrid::parse(&text)?;
    debug!(
        "Loaded map from {}: {}x{}",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_map_dimensions() {
        let grid = load_bundled().unwrap();
        assert_eq!(grid.width(), 120);
        assert_eq!(grid.height(), 40);
    }

    #[test]
    fn test_bundled_map_has_no_default_marker() {
        let grid = load_bundled().unwrap();
        assert_eq!(grid.count('X'), 0);
        assert!(grid.count('#') > 0);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  ##  ").unwrap();
        writeln!(file, " #### ").unwrap();

        let grid = MapSource::File(file.path().to_string_lossy().into_owned())
            .load()
            .unwrap();
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file("/definitely/not/here/map.txt").unwrap_err();
        assert!(matches!(err, MapIpError::MapAsset(_)));
        assert!(err.message().contains("map.txt"));
    }
}
