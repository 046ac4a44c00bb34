use tilemap_editor_core::{CellCoord, MapObject, TileRef, Tool};
use tilemap_editor_document::query::DocumentView;
use tilemap_editor_system_tools::ToolController;

use crate::{object_tooltip, Color, HOVER_HIGHLIGHT};

/// Label drawn in the corner of a cell that holds objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectBadge {
    /// The cell holds exactly one object; carries its type text.
    Single(String),
    /// The cell holds several objects.
    Count(usize),
}

impl ObjectBadge {
    /// Text drawn for an object without a type.
    pub const UNTYPED_LABEL: &'static str = "(null)";

    /// Badge for a cell's object list, or `None` when the list is empty.
    #[must_use]
    pub fn for_objects(objects: &[MapObject]) -> Option<Self> {
        match objects {
            [] => None,
            [object] if object.kind.is_empty() => {
                Some(Self::Single(Self::UNTYPED_LABEL.to_owned()))
            }
            [object] => Some(Self::Single(object.kind.clone())),
            _ => Some(Self::Count(objects.len())),
        }
    }

    /// Text to draw.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Single(kind) => kind.clone(),
            Self::Count(count) => format!("x{count}"),
        }
    }

    /// Text color.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Single(_) => Color::WHITE,
            Self::Count(_) => Color::YELLOW,
        }
    }
}

/// Settings panel shown next to the tool selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolPanel {
    /// Tile size text box and scale slider.
    TileSettings,
    /// Object type and parameter text boxes.
    ObjectTemplate {
        /// Current type text.
        kind: String,
        /// Current parameter text.
        param: String,
    },
}

impl ToolPanel {
    /// Panel matching the active tool.
    #[must_use]
    pub fn for_tools(tools: &ToolController) -> Self {
        if tools.active_tool().edits_tiles() {
            return Self::TileSettings;
        }
        let template = tools.object_template();
        Self::ObjectTemplate {
            kind: template.kind.clone(),
            param: template.param.clone(),
        }
    }
}

/// What to draw for one map cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPresentation {
    /// Cell being described.
    pub cell: CellCoord,
    /// Tile to draw, including tool previews.
    pub tile: TileRef,
    /// Whether the pointer is over the cell.
    pub hovered: bool,
    /// Highlight drawn over the tile.
    pub overlay: Option<Color>,
    /// Object label, if the cell holds objects.
    pub badge: Option<ObjectBadge>,
}

/// Frame snapshot of the map area and the tool panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    panel: ToolPanel,
    columns: u32,
    rows: u32,
    cells: Vec<CellPresentation>,
    hovered: Option<CellCoord>,
    tooltip: Option<String>,
}

impl Scene {
    /// Captures the document as the active tool would show it this frame.
    ///
    /// The selected tile replaces the stored one under the tile pen and inside
    /// the tile rect preview.
    #[must_use]
    pub fn capture(document: DocumentView<'_>, tools: &ToolController) -> Self {
        let (columns, rows) = document.dimensions();
        let hovered = tools.hovered().filter(|cell| document.contains(*cell));
        let preview = match tools.active_tool() {
            Tool::TileRect => tools.preview(),
            Tool::TilePen | Tool::ObjectPen | Tool::ObjectErase => None,
        };

        let cells = document
            .tiles()
            .iter_cells()
            .map(|(cell, &stored)| {
                let is_hovered = hovered == Some(cell);
                let substituted = match tools.active_tool() {
                    Tool::TilePen => is_hovered,
                    Tool::TileRect => preview.is_some_and(|rect| rect.contains(cell)),
                    Tool::ObjectPen | Tool::ObjectErase => false,
                };
                CellPresentation {
                    cell,
                    tile: if substituted {
                        tools.selected_tile()
                    } else {
                        stored
                    },
                    hovered: is_hovered,
                    overlay: is_hovered.then_some(HOVER_HIGHLIGHT),
                    badge: ObjectBadge::for_objects(document.objects(cell)),
                }
            })
            .collect();

        let tooltip = hovered.and_then(|cell| object_tooltip(document.objects(cell)));

        Self {
            panel: ToolPanel::for_tools(tools),
            columns,
            rows,
            cells,
            hovered,
            tooltip,
        }
    }

    /// Settings panel for the active tool.
    #[must_use]
    pub const fn panel(&self) -> &ToolPanel {
        &self.panel
    }

    /// Columns and rows of the captured document.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellPresentation] {
        &self.cells
    }

    /// Presentation of a single cell.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&CellPresentation> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let index = cell.row() as usize * self.columns as usize + cell.column() as usize;
        self.cells.get(index)
    }

    /// Cell under the pointer, if it lies on the grid.
    #[must_use]
    pub const fn hovered(&self) -> Option<CellCoord> {
        self.hovered
    }

    /// Object tooltip for the hovered cell.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }
}
