//! Export-only JSON snapshot.
//!
//! ```json
//! {
//!   "tilemap": { "width": 2, "height": 1, "data": [[{ "typeX": 0, "typeY": 0 }, ...]] },
//!   "objects": [{ "X": 1, "Y": 0, "Type": "door", "Param": "" }]
//! }
//! ```

use std::path::Path;

use serde::Serialize;
use tilemap_editor_document::Document;

use crate::{fs, PersistError};

/// Root of the exported JSON document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JsonExport {
    /// Tile layer.
    pub tilemap: JsonTilemap,
    /// Every object in row-major cell order, oldest first within a cell.
    pub objects: Vec<JsonObject>,
}

/// Exported tile layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JsonTilemap {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Tiles as rows of columns.
    pub data: Vec<Vec<JsonTile>>,
}

/// Exported tile reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct JsonTile {
    /// Tile-set column.
    #[serde(rename = "typeX")]
    pub type_x: u32,
    /// Tile-set row.
    #[serde(rename = "typeY")]
    pub type_y: u32,
}

/// Exported map object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JsonObject {
    /// Column of the owning cell.
    #[serde(rename = "X")]
    pub x: u32,
    /// Row of the owning cell.
    #[serde(rename = "Y")]
    pub y: u32,
    /// Object type text.
    #[serde(rename = "Type")]
    pub kind: String,
    /// Object parameter text.
    #[serde(rename = "Param")]
    pub param: String,
}

impl JsonExport {
    /// Captures the export shape of the document.
    ///
    /// Object coordinates come from the owning cell, not from the coordinates
    /// stored inside the object.
    #[must_use]
    pub fn capture(document: &Document) -> Self {
        let data = document
            .tile_grid()
            .iter_rows()
            .map(|row| {
                row.iter()
                    .map(|tile| JsonTile {
                        type_x: tile.x(),
                        type_y: tile.y(),
                    })
                    .collect()
            })
            .collect();

        let objects = document
            .object_grid()
            .iter_cells()
            .flat_map(|(cell, list)| {
                list.iter().map(move |object| JsonObject {
                    x: cell.column(),
                    y: cell.row(),
                    kind: object.kind.clone(),
                    param: object.param.clone(),
                })
            })
            .collect();

        Self {
            tilemap: JsonTilemap {
                width: document.columns(),
                height: document.rows(),
                data,
            },
            objects,
        }
    }
}

/// Renders the JSON export as pretty-printed text.
pub fn to_string(document: &Document) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&JsonExport::capture(document))?)
}

/// Writes the JSON export to `path` without leaving a partial file on failure.
pub fn export(path: &Path, document: &Document) -> Result<(), PersistError> {
    let text = to_string(document)?;
    fs::write_atomically(path, text.as_bytes())
}
