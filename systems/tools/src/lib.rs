#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure tool system that translates pointer and resize intents into document commands.
//!
//! Every mutating batch starts with [`Command::Checkpoint`] so the session can
//! snapshot the document exactly once per user action. Continuous painting
//! while a button stays held emits further mutations without a checkpoint, so
//! a whole pen stroke undoes in one step.

use tilemap_editor_core::{
    CellCoord, CellRect, Command, MapObject, PointerButton, PointerEvent, Resize, TileRef, Tool,
};
use tilemap_editor_document::query::DocumentView;

/// Object type and parameter text currently entered in the editor UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectTemplate {
    /// Type text copied into new objects.
    pub kind: String,
    /// Parameter text copied into new objects.
    pub param: String,
}

impl ObjectTemplate {
    /// Creates a template from the provided texts.
    #[must_use]
    pub fn new(kind: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            param: param.into(),
        }
    }

    fn instantiate(&self, cell: CellCoord) -> MapObject {
        MapObject::at(cell, self.kind.clone(), self.param.clone())
    }
}

/// Conditions under which keyboard resize shortcuts are honoured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeGate {
    /// Whether a text field currently owns keyboard focus.
    pub text_input_focused: bool,
    /// Whether the modifier reserved for undo/save/load/export is held.
    pub shortcut_modifier_held: bool,
}

impl ResizeGate {
    /// Gate with no text focus and no reserved modifier.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            text_input_focused: false,
            shortcut_modifier_held: false,
        }
    }

    /// Reports whether resize shortcuts may run.
    #[must_use]
    pub const fn allows_resize(&self) -> bool {
        !self.text_input_focused && !self.shortcut_modifier_held
    }
}

/// A pointer button held down since it was pressed over `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldPress {
    /// Button being held.
    pub button: PointerButton,
    /// Cell the button went down over.
    pub origin: CellCoord,
    /// Whether the pointer has hovered another cell since the press.
    pub dragged: bool,
}

impl HeldPress {
    fn is_click_on(&self, cell: Option<CellCoord>) -> bool {
        !self.dragged && cell == Some(self.origin)
    }
}

/// State machine that owns the active tool and in-progress pointer interactions.
#[derive(Clone, Debug, Default)]
pub struct ToolController {
    active_tool: Tool,
    selected_tile: TileRef,
    template: ObjectTemplate,
    held_left: Option<HeldPress>,
    held_right: Option<HeldPress>,
    drag_anchor: Option<CellCoord>,
    hovered: Option<CellCoord>,
}

impl ToolController {
    /// Creates a controller with the tile pen active and tile `(0, 0)` selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tool whose rules currently apply.
    #[must_use]
    pub const fn active_tool(&self) -> Tool {
        self.active_tool
    }

    /// Switches tools, abandoning any in-progress press or rectangle drag.
    pub fn select_tool(&mut self, tool: Tool) {
        self.active_tool = tool;
        self.reset_interaction();
    }

    /// Tile painted by the tile tools.
    #[must_use]
    pub const fn selected_tile(&self) -> TileRef {
        self.selected_tile
    }

    /// Changes the tile painted by the tile tools.
    pub fn select_tile(&mut self, tile: TileRef) {
        self.selected_tile = tile;
    }

    /// Template copied into objects placed by the object pen.
    #[must_use]
    pub const fn object_template(&self) -> &ObjectTemplate {
        &self.template
    }

    /// Replaces the template copied into new objects.
    pub fn set_object_template(&mut self, template: ObjectTemplate) {
        self.template = template;
    }

    /// Press still held for `button`, if it went down over the grid.
    #[must_use]
    pub const fn held_press(&self, button: PointerButton) -> Option<HeldPress> {
        match button {
            PointerButton::Left => self.held_left,
            PointerButton::Right => self.held_right,
        }
    }

    /// Reports whether any pointer button is held.
    #[must_use]
    pub const fn is_pointer_held(&self) -> bool {
        self.held_left.is_some() || self.held_right.is_some()
    }

    /// First cell of the in-progress rectangle drag.
    #[must_use]
    pub const fn drag_anchor(&self) -> Option<CellCoord> {
        self.drag_anchor
    }

    /// Cell most recently reported under the pointer.
    #[must_use]
    pub const fn hovered(&self) -> Option<CellCoord> {
        self.hovered
    }

    /// Rectangle the tile rect tool would paint if released now.
    #[must_use]
    pub fn preview(&self) -> Option<CellRect> {
        let anchor = self.drag_anchor?;
        let corner = self.hovered.unwrap_or(anchor);
        Some(CellRect::from_corners(anchor, corner))
    }

    /// Drops any held press and the rectangle drag anchor.
    pub fn reset_interaction(&mut self) {
        self.held_left = None;
        self.held_right = None;
        self.drag_anchor = None;
    }

    /// Consumes a pointer event and emits the commands it triggers.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        document: DocumentView<'_>,
        out: &mut Vec<Command>,
    ) {
        match event {
            PointerEvent::Hover { cell } => self.hover(cell, document, out),
            PointerEvent::Press { cell, button } => self.press(cell, button, document, out),
            PointerEvent::Release { cell, button } => self.release(cell, button, document, out),
        }
    }

    /// Emits a checkpointed resize if the gate and grid dimensions allow it.
    ///
    /// Returns `false` when the request was rejected without emitting commands.
    pub fn request_resize(
        &self,
        resize: Resize,
        gate: ResizeGate,
        document: DocumentView<'_>,
        out: &mut Vec<Command>,
    ) -> bool {
        if !gate.allows_resize() {
            return false;
        }

        let (columns, rows) = document.dimensions();
        let lines = match resize {
            Resize::ExpandRows | Resize::ReduceRows => rows,
            Resize::ExpandColumns | Resize::ReduceColumns => columns,
        };
        if resize.is_reduction() && lines <= 1 {
            return false;
        }

        out.push(Command::Checkpoint);
        out.push(Command::Resize(resize));
        true
    }

    fn held_slot(&mut self, button: PointerButton) -> &mut Option<HeldPress> {
        match button {
            PointerButton::Left => &mut self.held_left,
            PointerButton::Right => &mut self.held_right,
        }
    }

    fn hover(&mut self, cell: CellCoord, document: DocumentView<'_>, out: &mut Vec<Command>) {
        if !document.contains(cell) {
            return;
        }
        self.hovered = Some(cell);

        for held in [&mut self.held_left, &mut self.held_right]
            .into_iter()
            .flatten()
        {
            if cell != held.origin {
                held.dragged = true;
            }
        }

        if self.active_tool == Tool::TilePen && self.held_left.is_some() {
            out.push(Command::SetTile {
                cell,
                tile: self.selected_tile,
            });
        }
    }

    fn press(
        &mut self,
        cell: CellCoord,
        button: PointerButton,
        document: DocumentView<'_>,
        out: &mut Vec<Command>,
    ) {
        if !document.contains(cell) {
            return;
        }
        self.hovered = Some(cell);
        *self.held_slot(button) = Some(HeldPress {
            button,
            origin: cell,
            dragged: false,
        });

        if button != PointerButton::Left {
            return;
        }
        match self.active_tool {
            Tool::TilePen => {
                out.push(Command::Checkpoint);
                out.push(Command::SetTile {
                    cell,
                    tile: self.selected_tile,
                });
            }
            Tool::TileRect => {
                out.push(Command::Checkpoint);
                self.drag_anchor = Some(cell);
            }
            Tool::ObjectPen | Tool::ObjectErase => {}
        }
    }

    fn release(
        &mut self,
        cell: Option<CellCoord>,
        button: PointerButton,
        document: DocumentView<'_>,
        out: &mut Vec<Command>,
    ) {
        let cell = cell.filter(|cell| document.contains(*cell));
        self.hovered = cell;

        // A left release anywhere ends the rectangle drag, matched press or not.
        let anchor = if button == PointerButton::Left {
            self.drag_anchor.take()
        } else {
            None
        };

        let Some(held) = self.held_slot(button).take() else {
            return;
        };

        match (self.active_tool, button) {
            (Tool::TileRect, PointerButton::Left) => {
                if let (Some(anchor), Some(corner)) = (anchor, cell) {
                    if document.contains(anchor) {
                        out.push(Command::PaintRect {
                            rect: CellRect::from_corners(anchor, corner),
                            tile: self.selected_tile,
                        });
                    }
                }
            }
            (Tool::ObjectPen, PointerButton::Left) if held.is_click_on(cell) => {
                out.push(Command::Checkpoint);
                out.push(Command::AddObject {
                    cell: held.origin,
                    object: self.template.instantiate(held.origin),
                });
            }
            (Tool::ObjectPen, PointerButton::Right) if held.is_click_on(cell) => {
                if document.object_count(held.origin) > 0 {
                    out.push(Command::Checkpoint);
                    out.push(Command::RemoveLastObject { cell: held.origin });
                }
            }
            (Tool::ObjectErase, PointerButton::Left) if held.is_click_on(cell) => {
                out.push(Command::Checkpoint);
                out.push(Command::ClearObjects { cell: held.origin });
            }
            _ => {}
        }
    }
}
