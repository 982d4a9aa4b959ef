//! CSV map layers.
//!
//! A map is four CSV grids exported from the tile editor, one per layer.
//! Every cell is a numeric code; `-1` means empty. Cell `(row, column)` maps
//! to world position `(column * TILE_SIZE, row * TILE_SIZE)`.
//!
//! | file                  | layer      | codes                          |
//! |-----------------------|------------|--------------------------------|
//! | `map_FloorBlocks.csv` | boundary   | any non-empty code blocks      |
//! | `map_Grass.csv`       | grass      | any non-empty code spawns grass|
//! | `map_Objects.csv`     | objects    | index into `graphics/objects`  |
//! | `map_Entities.csv`    | entities   | 394 player, 390–393 enemies    |

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::error::MapError;
use crate::resources::gamedata::TILE_SIZE;

/// Rows of trimmed cell strings.
pub type Layout = Vec<Vec<String>>;

/// Marker for an empty cell.
pub const EMPTY_CELL: &str = "-1";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapLayers {
    pub boundary: Layout,
    pub grass: Layout,
    pub objects: Layout,
    pub entities: Layout,
}

impl MapLayers {
    /// Reads the four layers from `dir`. A missing or unreadable file is
    /// logged and yields an empty layer.
    pub fn load(dir: &Path) -> Self {
        let read = |file: &str| match load_csv_layout(&dir.join(file)) {
            Ok(layout) => layout,
            Err(e) => {
                warn!("{}; using an empty layer", e);
                Layout::new()
            }
        };
        let layers = Self {
            boundary: read("map_FloorBlocks.csv"),
            grass: read("map_Grass.csv"),
            objects: read("map_Objects.csv"),
            entities: read("map_Entities.csv"),
        };
        info!(
            "Loaded map from {:?}: {}x{} cells",
            dir,
            layers.width(),
            layers.height()
        );
        layers
    }

    /// Widest row over all layers, in cells.
    pub fn width(&self) -> usize {
        [&self.boundary, &self.grass, &self.objects, &self.entities]
            .iter()
            .flat_map(|layout| layout.iter().map(Vec::len))
            .max()
            .unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        [&self.boundary, &self.grass, &self.objects, &self.entities]
            .iter()
            .map(|layout| layout.len())
            .max()
            .unwrap_or(0)
    }
}

pub fn parse_csv_layout(text: &str) -> Layout {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(',').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

pub fn load_csv_layout(path: &Path) -> Result<Layout, MapError> {
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_csv_layout(&text))
}

/// Numeric code of a cell, `None` for an empty cell.
pub fn parse_cell(
    layer: &'static str,
    row: usize,
    column: usize,
    cell: &str,
) -> Result<Option<i32>, MapError> {
    if cell == EMPTY_CELL || cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<i32>()
        .map(Some)
        .map_err(|_| MapError::InvalidCell {
            layer,
            row,
            column,
            cell: cell.to_string(),
        })
}

/// Every non-empty cell of `layout` as `(row, column, code)`.
pub fn occupied_cells(
    layer: &'static str,
    layout: &Layout,
) -> Result<Vec<(usize, usize, i32)>, MapError> {
    let mut cells = Vec::new();
    for (row, line) in layout.iter().enumerate() {
        for (column, cell) in line.iter().enumerate() {
            if let Some(code) = parse_cell(layer, row, column, cell)? {
                cells.push((row, column, code));
            }
        }
    }
    Ok(cells)
}

/// World position of a cell's top-left corner.
pub fn cell_origin(row: usize, column: usize) -> (i32, i32) {
    (column as i32 * TILE_SIZE, row as i32 * TILE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_trimmed_and_blank_lines_skipped() {
        let layout = parse_csv_layout("-1, 395 ,-1\n\n394,-1,-1\r\n");
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0][1], "395");
        assert_eq!(layout[1][2], "-1");
    }

    #[test]
    fn occupied_cells_skip_empty_codes() {
        let layout = parse_csv_layout("-1,7\n3,-1\n");
        let cells = occupied_cells("objects", &layout).unwrap();
        assert_eq!(cells, vec![(0, 1, 7), (1, 0, 3)]);
        assert_eq!(cell_origin(1, 0), (0, 64));
        assert_eq!(cell_origin(0, 1), (64, 0));
    }

    #[test]
    fn malformed_cell_is_rejected() {
        let layout = parse_csv_layout("-1,x\n");
        let err = occupied_cells("grass", &layout).unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidCell { layer: "grass", row: 0, column: 1, .. }
        ));
    }

    #[test]
    fn missing_files_load_as_empty_layers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("map_Entities.csv"), "394,-1\n-1,393\n").unwrap();
        let layers = MapLayers::load(dir.path());
        assert!(layers.boundary.is_empty());
        assert_eq!(layers.entities.len(), 2);
        assert_eq!((layers.width(), layers.height()), (2, 2));
    }
}
