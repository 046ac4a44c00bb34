#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tile map editor.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative document, and pure systems. The tool system translates
//! pointer and keyboard intents into [`Command`] values, the document executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values describing what actually changed. A [`Command::Checkpoint`] in a
//! batch marks the point where the session captures an undo snapshot.

use serde::{Deserialize, Serialize};

/// Title shown for a document that has never been saved or loaded.
pub const UNTITLED_DOCUMENT: &str = "Untitled";

/// Commands that express all permissible document mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests an undo snapshot of the document as it is right now.
    ///
    /// Carries no mutation of its own; the session routes it to the history
    /// before forwarding the commands that follow it in the same batch.
    Checkpoint,
    /// Replaces the tile reference stored at a single cell.
    SetTile {
        /// Cell whose tile is replaced.
        cell: CellCoord,
        /// Tile reference written into the cell.
        tile: TileRef,
    },
    /// Replaces the tile reference of every cell inside an inclusive rectangle.
    PaintRect {
        /// Normalized rectangle covering the cells to paint.
        rect: CellRect,
        /// Tile reference written into every covered cell.
        tile: TileRef,
    },
    /// Appends an object to the end of a cell's object list.
    AddObject {
        /// Cell that receives the object.
        cell: CellCoord,
        /// Object appended to the list.
        object: MapObject,
    },
    /// Removes the most recently added object of a cell, if any.
    RemoveLastObject {
        /// Cell whose newest object is removed.
        cell: CellCoord,
    },
    /// Removes every object of a cell.
    ClearObjects {
        /// Cell whose object list is emptied.
        cell: CellCoord,
    },
    /// Grows or shrinks the grid by one trailing row or column.
    Resize(Resize),
}

/// Events broadcast by the document after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a single cell received a new tile reference.
    TileSet {
        /// Cell that was updated.
        cell: CellCoord,
        /// Tile reference now stored in the cell.
        tile: TileRef,
    },
    /// Confirms that a rectangle of cells received a new tile reference.
    RectPainted {
        /// Rectangle that was painted.
        rect: CellRect,
        /// Tile reference now stored in every covered cell.
        tile: TileRef,
    },
    /// Confirms that an object was appended to a cell.
    ObjectAdded {
        /// Cell that received the object.
        cell: CellCoord,
        /// Number of objects stored in the cell after the append.
        count: usize,
    },
    /// Confirms that the newest object of a cell was removed.
    ObjectRemoved {
        /// Cell the object was removed from.
        cell: CellCoord,
        /// Object that was removed.
        object: MapObject,
    },
    /// Confirms that a cell's object list was emptied.
    ObjectsCleared {
        /// Cell that was cleared.
        cell: CellCoord,
        /// Number of objects that were dropped.
        removed: usize,
    },
    /// Confirms that the grid dimensions changed.
    Resized {
        /// Number of columns after the resize.
        columns: u32,
        /// Number of rows after the resize.
        rows: u32,
    },
    /// Reports that a resize left the grid untouched because it would have
    /// shrunk a dimension below one cell.
    ResizeIgnored {
        /// Resize that had no effect.
        resize: Resize,
    },
}

/// Direction in which the grid grows or shrinks by a single trailing line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resize {
    /// Appends a row at the bottom of the grid (`S`).
    ExpandRows,
    /// Removes the bottom row of the grid (`W`).
    ReduceRows,
    /// Appends a column at the right edge of the grid (`D`).
    ExpandColumns,
    /// Removes the rightmost column of the grid (`A`).
    ReduceColumns,
}

impl Resize {
    /// Every resize direction in a stable order.
    pub const ALL: [Resize; 4] = [
        Resize::ExpandRows,
        Resize::ReduceRows,
        Resize::ExpandColumns,
        Resize::ReduceColumns,
    ];

    /// Reports whether the resize removes a line from the grid.
    #[must_use]
    pub const fn is_reduction(self) -> bool {
        matches!(self, Self::ReduceRows | Self::ReduceColumns)
    }

    /// Letter key bound to the resize.
    #[must_use]
    pub const fn shortcut_key(self) -> char {
        match self {
            Self::ExpandRows => 'S',
            Self::ReduceRows => 'W',
            Self::ExpandColumns => 'D',
            Self::ReduceColumns => 'A',
        }
    }

    /// Resolves the resize bound to a letter key, ignoring case.
    #[must_use]
    pub fn from_shortcut_key(key: char) -> Option<Self> {
        let key = key.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|resize| resize.shortcut_key() == key)
    }
}

/// Editing tools the user can switch between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Paints the selected tile into every cell dragged over.
    #[default]
    TilePen,
    /// Paints the selected tile into a dragged rectangle on release.
    TileRect,
    /// Adds objects with a left click and removes the newest with a right click.
    ObjectPen,
    /// Clears every object of a clicked cell.
    ObjectErase,
}

impl Tool {
    /// Every tool in the order the tool selector lists them.
    pub const ALL: [Tool; 4] = [
        Tool::TilePen,
        Tool::TileRect,
        Tool::ObjectPen,
        Tool::ObjectErase,
    ];

    /// Resolves a tool from its position in the tool selector.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of the tool in the tool selector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::TilePen => 0,
            Self::TileRect => 1,
            Self::ObjectPen => 2,
            Self::ObjectErase => 3,
        }
    }

    /// Human readable label shown by the tool selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TilePen => "Tile Pen",
            Self::TileRect => "Tile Rect",
            Self::ObjectPen => "Object Pen",
            Self::ObjectErase => "Object Erase",
        }
    }

    /// Reports whether the tool edits tiles rather than objects.
    #[must_use]
    pub const fn edits_tiles(self) -> bool {
        matches!(self, Self::TilePen | Self::TileRect)
    }
}

/// Mouse buttons the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
}

/// Cell-level pointer event resolved by the input adapter.
///
/// Adapters deliver at most one event per cell per frame and resolve
/// overlapping cells to the single hovered one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// The pointer rests over a cell during this frame.
    Hover {
        /// Cell under the pointer.
        cell: CellCoord,
    },
    /// A button went down over a cell.
    Press {
        /// Cell under the pointer.
        cell: CellCoord,
        /// Button that went down.
        button: PointerButton,
    },
    /// A button went up, possibly outside the grid.
    Release {
        /// Cell under the pointer, or `None` when released outside the grid.
        cell: Option<CellCoord>,
        /// Button that went up.
        button: PointerButton,
    },
}

/// Reference into the source tile-set image measured in whole tiles.
///
/// References are never validated against the image; an out-of-range
/// reference simply renders nothing.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileRef {
    x: u32,
    y: u32,
}

impl TileRef {
    /// Creates a tile reference pointing at the provided tile-set position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Column of the tile within the tile-set image.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Row of the tile within the tile-set image.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Free-form object placed into a map cell.
///
/// `x` and `y` record the owning cell at creation time. They are exported as
/// metadata but never used to locate the object; the grid position is the
/// only source of truth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapObject {
    /// Column of the owning cell when the object was created.
    pub x: u32,
    /// Row of the owning cell when the object was created.
    pub y: u32,
    /// Object type text; empty means no type was set.
    pub kind: String,
    /// Object parameter text; empty means no parameter was set.
    pub param: String,
}

impl MapObject {
    /// Creates an object recorded against the provided cell.
    #[must_use]
    pub fn at(cell: CellCoord, kind: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            x: cell.column(),
            y: cell.row(),
            kind: kind.into(),
            param: param.into(),
        }
    }
}

/// Location of a single map cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new map cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Inclusive axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Constructs the smallest rectangle containing both corners.
    ///
    /// The corners may be given in any order.
    #[must_use]
    pub fn from_corners(first: CellCoord, second: CellCoord) -> Self {
        let left = first.column().min(second.column());
        let top = first.row().min(second.row());
        let right = first.column().max(second.column());
        let bottom = first.row().max(second.row());
        Self {
            origin: CellCoord::new(left, top),
            size: CellRectSize::new(right - left + 1, bottom - top + 1),
        }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Lower-right cell covered by the rectangle.
    ///
    /// Returns `None` for a rectangle without area.
    #[must_use]
    pub fn bottom_right(&self) -> Option<CellCoord> {
        if self.size.width == 0 || self.size.height == 0 {
            return None;
        }
        Some(CellCoord::new(
            self.origin.column() + self.size.width - 1,
            self.origin.row() + self.size.height - 1,
        ))
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let column_offset = cell.column().wrapping_sub(self.origin.column());
        let row_offset = cell.row().wrapping_sub(self.origin.row());
        cell.column() >= self.origin.column()
            && cell.row() >= self.origin.row()
            && column_offset < self.size.width
            && row_offset < self.size.height
    }

    /// Iterates the covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let origin = self.origin;
        let size = self.size;
        (0..size.height).flat_map(move |row| {
            (0..size.width)
                .map(move |column| CellCoord::new(origin.column() + column, origin.row() + row))
        })
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellRect, CellRectSize, MapObject, Resize, TileRef, Tool};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn rect_from_corners_ignores_corner_order() {
        let forward = CellRect::from_corners(CellCoord::new(0, 1), CellCoord::new(2, 2));
        let backward = CellRect::from_corners(CellCoord::new(2, 2), CellCoord::new(0, 1));
        let crossed = CellRect::from_corners(CellCoord::new(0, 2), CellCoord::new(2, 1));

        assert_eq!(forward, backward);
        assert_eq!(forward, crossed);
        assert_eq!(forward.origin(), CellCoord::new(0, 1));
        assert_eq!(forward.size(), CellRectSize::new(3, 2));
        assert_eq!(forward.bottom_right(), Some(CellCoord::new(2, 2)));
    }

    #[test]
    fn single_cell_rect_covers_one_cell() {
        let cell = CellCoord::new(4, 7);
        let rect = CellRect::from_corners(cell, cell);

        assert_eq!(rect.cells().collect::<Vec<_>>(), vec![cell]);
        assert!(rect.contains(cell));
        assert!(!rect.contains(CellCoord::new(5, 7)));
        assert!(!rect.contains(CellCoord::new(3, 7)));
    }

    #[test]
    fn rect_cells_are_row_major() {
        let rect = CellRect::from_corners(CellCoord::new(1, 1), CellCoord::new(2, 2));
        let cells: Vec<_> = rect.cells().collect();

        assert_eq!(
            cells,
            vec![
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn empty_rect_has_no_bottom_right() {
        let rect = CellRect::from_origin_and_size(CellCoord::new(3, 3), CellRectSize::new(0, 2));
        assert_eq!(rect.bottom_right(), None);
        assert_eq!(rect.cells().count(), 0);
    }

    #[test]
    fn tool_indices_match_selector_order() {
        for (index, tool) in Tool::ALL.iter().enumerate() {
            assert_eq!(tool.index(), index);
            assert_eq!(Tool::from_index(index), Some(*tool));
        }
        assert_eq!(Tool::from_index(Tool::ALL.len()), None);
        assert_eq!(Tool::ObjectErase.label(), "Object Erase");
    }

    #[test]
    fn resize_keys_follow_wasd_layout() {
        assert_eq!(Resize::from_shortcut_key('s'), Some(Resize::ExpandRows));
        assert_eq!(Resize::from_shortcut_key('W'), Some(Resize::ReduceRows));
        assert_eq!(Resize::from_shortcut_key('d'), Some(Resize::ExpandColumns));
        assert_eq!(Resize::from_shortcut_key('a'), Some(Resize::ReduceColumns));
        assert_eq!(Resize::from_shortcut_key('z'), None);

        let reductions: Vec<Resize> = Resize::ALL
            .into_iter()
            .filter(|resize| resize.is_reduction())
            .collect();
        assert_eq!(reductions, vec![Resize::ReduceRows, Resize::ReduceColumns]);
    }

    #[test]
    fn tile_tools_come_first_in_selector() {
        let tile_tools: Vec<Tool> = Tool::ALL
            .into_iter()
            .filter(|tool| tool.edits_tiles())
            .collect();
        assert_eq!(tile_tools, vec![Tool::TilePen, Tool::TileRect]);
    }

    #[test]
    fn map_object_records_owning_cell() {
        let object = MapObject::at(CellCoord::new(3, 9), "door", "locked");
        assert_eq!((object.x, object.y), (3, 9));
        assert_eq!(object.kind, "door");
        assert_eq!(object.param, "locked");
    }

    #[test]
    fn tile_ref_round_trips_through_bincode() {
        assert_round_trip(&TileRef::new(12, 3));
    }

    #[test]
    fn map_object_with_empty_text_round_trips_through_bincode() {
        assert_round_trip(&MapObject::at(CellCoord::new(0, 0), "", ""));
    }
}
