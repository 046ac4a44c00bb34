#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative document state for the tile map editor.
//!
//! A [`Document`] pairs a grid of tile references with a grid of per-cell
//! object lists. Both grids always share the same dimensions and never shrink
//! below a single cell.

mod grid;

pub use grid::Grid;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilemap_editor_core::{CellCoord, CellRect, Command, Event, MapObject, Resize, TileRef};

/// Reasons a pair of grids cannot form a valid document.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A grid has no area.
    #[error("grid must be at least 1x1 (received {columns}x{rows})")]
    EmptyGrid {
        /// Declared number of columns.
        columns: u32,
        /// Declared number of rows.
        rows: u32,
    },
    /// A grid stores a different number of cells than its dimensions declare.
    #[error("grid declares {columns}x{rows} cells but stores {cells}")]
    CellCountMismatch {
        /// Declared number of columns.
        columns: u32,
        /// Declared number of rows.
        rows: u32,
        /// Number of cells actually stored.
        cells: usize,
    },
    /// The tile grid and object grid disagree on their dimensions.
    #[error("tile grid is {tiles:?} but object grid is {objects:?}")]
    DimensionMismatch {
        /// Columns and rows of the tile grid.
        tiles: (u32, u32),
        /// Columns and rows of the object grid.
        objects: (u32, u32),
    },
}

/// Editable map state: tiles plus ordered object lists per cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentParts")]
pub struct Document {
    tiles: Grid<TileRef>,
    objects: Grid<Vec<MapObject>>,
}

#[derive(Deserialize)]
struct DocumentParts {
    tiles: Grid<TileRef>,
    objects: Grid<Vec<MapObject>>,
}

impl TryFrom<DocumentParts> for Document {
    type Error = DocumentError;

    fn try_from(parts: DocumentParts) -> Result<Self, Self::Error> {
        Self::from_grids(parts.tiles, parts.objects)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a 1x1 document holding the default tile and no objects.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dimensions(1, 1)
    }

    /// Creates a document of the given size filled with default cells.
    ///
    /// Dimensions below one are raised to one.
    #[must_use]
    pub fn with_dimensions(columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            tiles: Grid::filled(columns, rows, TileRef::default()),
            objects: Grid::filled(columns, rows, Vec::new()),
        }
    }

    /// Assembles a document from existing grids after validating them.
    pub fn from_grids(
        tiles: Grid<TileRef>,
        objects: Grid<Vec<MapObject>>,
    ) -> Result<Self, DocumentError> {
        tiles.validate()?;
        objects.validate()?;
        if tiles.dimensions() != objects.dimensions() {
            return Err(DocumentError::DimensionMismatch {
                tiles: tiles.dimensions(),
                objects: objects.dimensions(),
            });
        }
        Ok(Self { tiles, objects })
    }

    /// Number of columns in the map.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.tiles.columns()
    }

    /// Number of rows in the map.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.tiles.rows()
    }

    /// Columns and rows of the map.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        self.tiles.dimensions()
    }

    /// Reports whether the cell lies inside the map.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.tiles.contains(cell)
    }

    /// Grid of tile references.
    #[must_use]
    pub const fn tile_grid(&self) -> &Grid<TileRef> {
        &self.tiles
    }

    /// Grid of per-cell object lists.
    #[must_use]
    pub const fn object_grid(&self) -> &Grid<Vec<MapObject>> {
        &self.objects
    }

    /// Tile stored at the cell, if it lies inside the map.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<TileRef> {
        self.tiles.get(cell).copied()
    }

    /// Objects stored at the cell, oldest first.
    #[must_use]
    pub fn objects(&self, cell: CellCoord) -> Option<&[MapObject]> {
        self.objects.get(cell).map(Vec::as_slice)
    }

    /// Appends a default row at the bottom.
    pub fn expand_rows(&mut self) {
        self.tiles.push_row(TileRef::default());
        self.objects.push_row(Vec::new());
    }

    /// Appends a default column at the right edge.
    pub fn expand_columns(&mut self) {
        self.tiles.push_column(TileRef::default());
        self.objects.push_column(Vec::new());
    }

    /// Removes the bottom row; does nothing on a single-row map.
    ///
    /// Returns `false` when the map was left untouched.
    pub fn reduce_rows(&mut self) -> bool {
        if self.rows() <= 1 {
            return false;
        }
        self.tiles.pop_row() && self.objects.pop_row()
    }

    /// Removes the rightmost column; does nothing on a single-column map.
    ///
    /// Returns `false` when the map was left untouched.
    pub fn reduce_columns(&mut self) -> bool {
        if self.columns() <= 1 {
            return false;
        }
        self.tiles.pop_column() && self.objects.pop_column()
    }

    /// Replaces the tile at `cell`.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the map.
    pub fn set_tile(&mut self, cell: CellCoord, tile: TileRef) {
        let (columns, rows) = self.dimensions();
        match self.tiles.get_mut(cell) {
            Some(slot) => *slot = tile,
            None => out_of_bounds(cell, columns, rows),
        }
    }

    /// Replaces the tile of every cell in the inclusive rectangle.
    ///
    /// The whole rectangle is checked before any cell changes.
    ///
    /// # Panics
    ///
    /// Panics when the rectangle reaches outside the map.
    pub fn paint_rect(&mut self, rect: CellRect, tile: TileRef) {
        let Some(bottom_right) = rect.bottom_right() else {
            return;
        };
        if !self.contains(bottom_right) {
            out_of_bounds(bottom_right, self.columns(), self.rows());
        }
        for cell in rect.cells() {
            self.set_tile(cell, tile);
        }
    }

    /// Appends an object to the cell and returns the new object count.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the map.
    pub fn add_object(&mut self, cell: CellCoord, object: MapObject) -> usize {
        let list = self.object_list_mut(cell);
        list.push(object);
        list.len()
    }

    /// Removes and returns the newest object of the cell, if any.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the map.
    pub fn remove_last_object(&mut self, cell: CellCoord) -> Option<MapObject> {
        self.object_list_mut(cell).pop()
    }

    /// Removes every object of the cell and returns how many were dropped.
    ///
    /// # Panics
    ///
    /// Panics when `cell` lies outside the map.
    pub fn clear_objects(&mut self, cell: CellCoord) -> usize {
        let list = self.object_list_mut(cell);
        let removed = list.len();
        list.clear();
        removed
    }

    fn object_list_mut(&mut self, cell: CellCoord) -> &mut Vec<MapObject> {
        let (columns, rows) = self.dimensions();
        match self.objects.get_mut(cell) {
            Some(list) => list,
            None => out_of_bounds(cell, columns, rows),
        }
    }
}

fn out_of_bounds(cell: CellCoord, columns: u32, rows: u32) -> ! {
    panic!(
        "cell ({}, {}) lies outside the {columns}x{rows} document",
        cell.column(),
        cell.row()
    )
}

/// Applies the provided command to the document and reports what changed.
///
/// [`Command::Checkpoint`] carries no mutation and produces no event.
///
/// # Panics
///
/// Panics when a command addresses a cell outside the document.
pub fn apply(document: &mut Document, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Checkpoint => {}
        Command::SetTile { cell, tile } => {
            document.set_tile(cell, tile);
            out_events.push(Event::TileSet { cell, tile });
        }
        Command::PaintRect { rect, tile } => {
            document.paint_rect(rect, tile);
            out_events.push(Event::RectPainted { rect, tile });
        }
        Command::AddObject { cell, object } => {
            let count = document.add_object(cell, object);
            out_events.push(Event::ObjectAdded { cell, count });
        }
        Command::RemoveLastObject { cell } => {
            if let Some(object) = document.remove_last_object(cell) {
                out_events.push(Event::ObjectRemoved { cell, object });
            }
        }
        Command::ClearObjects { cell } => {
            let removed = document.clear_objects(cell);
            out_events.push(Event::ObjectsCleared { cell, removed });
        }
        Command::Resize(resize) => {
            let changed = match resize {
                Resize::ExpandRows => {
                    document.expand_rows();
                    true
                }
                Resize::ExpandColumns => {
                    document.expand_columns();
                    true
                }
                Resize::ReduceRows => document.reduce_rows(),
                Resize::ReduceColumns => document.reduce_columns(),
            };
            if changed {
                out_events.push(Event::Resized {
                    columns: document.columns(),
                    rows: document.rows(),
                });
            } else {
                out_events.push(Event::ResizeIgnored { resize });
            }
        }
    }
}

/// Query functions that provide read-only access to the document.
pub mod query {
    use super::{Document, Grid};
    use tilemap_editor_core::{CellCoord, MapObject, TileRef};

    /// Columns and rows of the document.
    #[must_use]
    pub fn dimensions(document: &Document) -> (u32, u32) {
        document.dimensions()
    }

    /// Tile stored at the cell, if it lies inside the document.
    #[must_use]
    pub fn tile_at(document: &Document, cell: CellCoord) -> Option<TileRef> {
        document.tile(cell)
    }

    /// Objects stored at the cell; empty outside the document.
    #[must_use]
    pub fn objects_at(document: &Document, cell: CellCoord) -> &[MapObject] {
        document.objects(cell).unwrap_or(&[])
    }

    /// Number of objects stored at the cell; zero outside the document.
    #[must_use]
    pub fn object_count(document: &Document, cell: CellCoord) -> usize {
        objects_at(document, cell).len()
    }

    /// Captures a read-only view of the document.
    #[must_use]
    pub fn view(document: &Document) -> DocumentView<'_> {
        DocumentView { document }
    }

    /// Read-only view handed to systems and renderers.
    #[derive(Clone, Copy, Debug)]
    pub struct DocumentView<'a> {
        document: &'a Document,
    }

    impl<'a> DocumentView<'a> {
        /// Columns and rows of the viewed document.
        #[must_use]
        pub fn dimensions(&self) -> (u32, u32) {
            self.document.dimensions()
        }

        /// Reports whether the cell lies inside the viewed document.
        #[must_use]
        pub fn contains(&self, cell: CellCoord) -> bool {
            self.document.contains(cell)
        }

        /// Tile stored at the cell, if it lies inside the document.
        #[must_use]
        pub fn tile(&self, cell: CellCoord) -> Option<TileRef> {
            self.document.tile(cell)
        }

        /// Objects stored at the cell; empty outside the document.
        #[must_use]
        pub fn objects(&self, cell: CellCoord) -> &'a [MapObject] {
            objects_at(self.document, cell)
        }

        /// Number of objects stored at the cell.
        #[must_use]
        pub fn object_count(&self, cell: CellCoord) -> usize {
            self.objects(cell).len()
        }

        /// Grid of tile references.
        #[must_use]
        pub fn tiles(&self) -> &'a Grid<TileRef> {
            self.document.tile_grid()
        }

        /// Grid of per-cell object lists.
        #[must_use]
        pub fn object_lists(&self) -> &'a Grid<Vec<MapObject>> {
            self.document.object_grid()
        }
    }
}
