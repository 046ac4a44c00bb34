#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for tile-map editor front ends.
//!
//! Nothing here draws; front ends read these descriptors and translate screen
//! input back into cells and tiles through them.

mod scene;

pub use scene::{CellPresentation, ObjectBadge, Scene, ToolPanel};

use std::path::Path;

use glam::Vec2;
use tilemap_editor_core::{CellCoord, MapObject, TileRef, UNTITLED_DOCUMENT};

/// Tile size used when the tile-size text is empty, zero or not a number.
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Smallest integer display scale.
pub const MIN_SCALE: u32 = 1;

/// Largest integer display scale.
pub const MAX_SCALE: u32 = 8;

/// Distance the camera moves per pan step, in screen pixels.
pub const CAMERA_STEP: f32 = 10.0;

/// Top-left corner of the tile-set panel.
pub const TILE_SET_ORIGIN: Vec2 = Vec2::new(400.0, 0.0);

/// Minimum distance from the top of the window to the map area.
pub const MIN_MAP_AREA_TOP: f32 = 200.0;

const MAP_AREA_GAP: f32 = 20.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgba_u8(255, 255, 255, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::from_rgba_u8(255, 255, 0, 255);

    /// Creates a color from byte RGBA values.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }

    /// Same color with the alpha channel replaced.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self {
            alpha: alpha as f32 / 255.0,
            ..self
        }
    }
}

/// Overlay drawn on the map cell under the pointer.
pub const HOVER_HIGHLIGHT: Color = Color::YELLOW.with_alpha(64);

/// Overlay drawn on the tile-set entry that is currently selected.
pub const SELECTED_TILE_HIGHLIGHT: Color = Color::YELLOW.with_alpha(64);

/// Overlay drawn on the tile-set entry under the pointer.
pub const TILE_SET_HOVER_HIGHLIGHT: Color = Color::WHITE.with_alpha(128);

/// Parses the tile-size text box, falling back to [`DEFAULT_TILE_SIZE`].
#[must_use]
pub fn parse_tile_size(text: &str) -> u32 {
    match text.trim().parse::<u32>() {
        Ok(size) if size > 0 => size,
        _ => DEFAULT_TILE_SIZE,
    }
}

/// Converts the raw scale slider value into the integer display scale.
#[must_use]
pub fn scale_from_slider(raw: f32) -> u32 {
    if !raw.is_finite() {
        return MIN_SCALE;
    }
    raw.ceil().clamp(MIN_SCALE as f32, MAX_SCALE as f32) as u32
}

/// Vertical offset of the map area below the tile-set panel.
#[must_use]
pub fn map_area_top(tile_set_height: u32, scale: u32) -> f32 {
    let panel = tile_set_height.saturating_mul(scale) as f32 + MAP_AREA_GAP;
    panel.max(MIN_MAP_AREA_TOP)
}

/// Window title for the document at `path`.
#[must_use]
pub fn window_title(path: Option<&Path>, modified: bool) -> String {
    let mut title = path.map_or_else(
        || UNTITLED_DOCUMENT.to_owned(),
        |path| path.display().to_string(),
    );
    if modified {
        title.push_str(" *");
    }
    title
}

/// Tooltip listing every object of a cell, oldest first.
///
/// Returns `None` for a cell without objects.
#[must_use]
pub fn object_tooltip(objects: &[MapObject]) -> Option<String> {
    if objects.is_empty() {
        return None;
    }
    let lines: Vec<String> = objects
        .iter()
        .map(|object| format!("Type:{}\nParam:{}", object.kind, object.param))
        .collect();
    Some(lines.join("\n"))
}

/// Axis-aligned rectangle in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl ScreenRect {
    /// Bottom-right corner (exclusive).
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Reports whether the point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.y >= self.min.y && point.x < max.x && point.y < max.y
    }
}

/// Direction of a camera pan request, named after the arrow key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Reveals rows above the view.
    Up,
    /// Reveals rows below the view.
    Down,
    /// Reveals columns left of the view.
    Left,
    /// Reveals columns right of the view.
    Right,
}

impl PanDirection {
    fn camera_offset(self) -> Vec2 {
        match self {
            Self::Up => Vec2::Y,
            Self::Down => Vec2::NEG_Y,
            Self::Left => Vec2::X,
            Self::Right => Vec2::NEG_X,
        }
    }
}

/// Maps document cells to screen rectangles and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    /// Source tile edge in pixels.
    pub tile_size: u32,
    /// Integer display scale.
    pub scale: u32,
    /// Screen position of cell (0, 0) before the camera offset.
    pub origin: Vec2,
    /// Camera offset added to every cell position.
    pub camera: Vec2,
}

impl GridMetrics {
    /// Creates metrics with a centered camera; zero sizes are raised to one.
    #[must_use]
    pub fn new(tile_size: u32, scale: u32, origin: Vec2) -> Self {
        Self {
            tile_size: tile_size.max(1),
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            origin,
            camera: Vec2::ZERO,
        }
    }

    /// Edge length of one cell on screen.
    #[must_use]
    pub fn cell_length(&self) -> f32 {
        self.tile_size.saturating_mul(self.scale).max(1) as f32
    }

    /// Screen rectangle covered by the cell.
    #[must_use]
    pub fn cell_rect(&self, cell: CellCoord) -> ScreenRect {
        let length = self.cell_length();
        ScreenRect {
            min: self.origin
                + self.camera
                + Vec2::new(cell.column() as f32, cell.row() as f32) * length,
            size: Vec2::splat(length),
        }
    }

    /// Cell under the screen point, or `None` outside a grid of `dimensions`.
    #[must_use]
    pub fn cell_at(&self, point: Vec2, dimensions: (u32, u32)) -> Option<CellCoord> {
        let local = (point - self.origin - self.camera) / self.cell_length();
        if !(local.x >= 0.0 && local.y >= 0.0) {
            return None;
        }
        let column = local.x.floor() as u32;
        let row = local.y.floor() as u32;
        let (columns, rows) = dimensions;
        (column < columns && row < rows).then_some(CellCoord::new(column, row))
    }

    /// Moves the camera one step.
    pub fn pan(&mut self, direction: PanDirection) {
        self.camera += direction.camera_offset() * CAMERA_STEP;
    }
}

/// Pixel rectangle inside the tile-set image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width and height in pixels.
    pub size: u32,
}

/// Tile-set image split into selectable tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSetPresentation {
    width: u32,
    height: u32,
    tile_size: u32,
}

impl TileSetPresentation {
    /// Describes an image of `width` x `height` pixels cut into square tiles.
    #[must_use]
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            width,
            height,
            tile_size: tile_size.max(1),
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile edge in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Number of selectable tile columns, counting a partial trailing tile.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.width.div_ceil(self.tile_size)
    }

    /// Number of selectable tile rows, counting a partial trailing tile.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.height.div_ceil(self.tile_size)
    }

    /// Reports whether the reference names a selectable tile.
    #[must_use]
    pub fn contains(&self, tile: TileRef) -> bool {
        tile.x() < self.columns() && tile.y() < self.rows()
    }

    /// Every selectable tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileRef> {
        let columns = self.columns();
        (0..self.rows()).flat_map(move |y| (0..columns).map(move |x| TileRef::new(x, y)))
    }

    /// Source pixels for the tile; references outside the image are not checked.
    #[must_use]
    pub fn source_rect(&self, tile: TileRef) -> SourceRect {
        SourceRect {
            x: tile.x().saturating_mul(self.tile_size),
            y: tile.y().saturating_mul(self.tile_size),
            size: self.tile_size,
        }
    }

    /// Screen rectangle of the tile inside the panel at `origin`.
    #[must_use]
    pub fn display_rect(&self, tile: TileRef, scale: u32, origin: Vec2) -> ScreenRect {
        let length = self.display_length(scale);
        ScreenRect {
            min: origin + Vec2::new(tile.x() as f32, tile.y() as f32) * length,
            size: Vec2::splat(length),
        }
    }

    /// Selectable tile under the screen point, if any.
    #[must_use]
    pub fn tile_at(&self, point: Vec2, scale: u32, origin: Vec2) -> Option<TileRef> {
        let local = (point - origin) / self.display_length(scale);
        if !(local.x >= 0.0 && local.y >= 0.0) {
            return None;
        }
        let tile = TileRef::new(local.x.floor() as u32, local.y.floor() as u32);
        self.contains(tile).then_some(tile)
    }

    /// Overlays for a tile-set entry in drawing order.
    #[must_use]
    pub fn overlays(
        &self,
        tile: TileRef,
        selected: TileRef,
        hovered: Option<TileRef>,
    ) -> Vec<Color> {
        let mut overlays = Vec::new();
        if !self.contains(tile) {
            return overlays;
        }
        if hovered == Some(tile) {
            overlays.push(TILE_SET_HOVER_HIGHLIGHT);
        }
        if selected == tile {
            overlays.push(SELECTED_TILE_HIGHLIGHT);
        }
        overlays
    }

    fn display_length(&self, scale: u32) -> f32 {
        self.tile_size.saturating_mul(scale.max(1)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_size_text_falls_back_to_default() {
        assert_eq!(parse_tile_size("32"), 32);
        assert_eq!(parse_tile_size(" 8 "), 8);
        assert_eq!(parse_tile_size("0"), DEFAULT_TILE_SIZE);
        assert_eq!(parse_tile_size(""), DEFAULT_TILE_SIZE);
        assert_eq!(parse_tile_size("big"), DEFAULT_TILE_SIZE);
        assert_eq!(parse_tile_size("-4"), DEFAULT_TILE_SIZE);
    }

    #[test]
    fn slider_value_rounds_up_into_range() {
        assert_eq!(scale_from_slider(1.0), 1);
        assert_eq!(scale_from_slider(1.2), 2);
        assert_eq!(scale_from_slider(7.01), 8);
        assert_eq!(scale_from_slider(12.0), MAX_SCALE);
        assert_eq!(scale_from_slider(-3.0), MIN_SCALE);
        assert_eq!(scale_from_slider(f32::NAN), MIN_SCALE);
    }

    #[test]
    fn map_area_sits_below_tile_set() {
        assert_eq!(map_area_top(0, 2), MIN_MAP_AREA_TOP);
        assert_eq!(map_area_top(128, 2), 276.0);
    }

    #[test]
    fn title_marks_unsaved_changes() {
        assert_eq!(window_title(None, false), "Untitled");
        assert_eq!(window_title(None, true), "Untitled *");
        assert_eq!(
            window_title(Some(Path::new("maps/level.map")), true),
            "maps/level.map *"
        );
    }

    #[test]
    fn tooltip_lists_objects_oldest_first() {
        let cell = CellCoord::new(0, 0);
        let objects = [
            MapObject::at(cell, "door", "north"),
            MapObject::at(cell, "", "x"),
        ];

        assert_eq!(
            object_tooltip(&objects).as_deref(),
            Some("Type:door\nParam:north\nType:\nParam:x")
        );
        assert_eq!(object_tooltip(&[]), None);
    }

    #[test]
    fn cell_lookup_round_trips_through_rects() {
        let metrics = GridMetrics::new(16, 2, Vec2::new(0.0, 200.0));
        let rect = metrics.cell_rect(CellCoord::new(2, 1));

        assert_eq!(rect.min, Vec2::new(64.0, 232.0));
        assert_eq!(rect.size, Vec2::splat(32.0));
        assert_eq!(
            metrics.cell_at(rect.min + Vec2::splat(1.0), (3, 2)),
            Some(CellCoord::new(2, 1))
        );
        assert_eq!(metrics.cell_at(rect.max(), (3, 2)), None);
        assert_eq!(metrics.cell_at(Vec2::new(-1.0, 210.0), (3, 2)), None);
    }

    #[test]
    fn panning_moves_the_grid_by_fixed_steps() {
        let mut metrics = GridMetrics::new(16, 1, Vec2::ZERO);
        metrics.pan(PanDirection::Up);
        metrics.pan(PanDirection::Right);
        metrics.pan(PanDirection::Right);

        assert_eq!(metrics.camera, Vec2::new(-20.0, 10.0));
        assert_eq!(
            metrics.cell_rect(CellCoord::new(0, 0)).min,
            Vec2::new(-20.0, 10.0)
        );
        assert_eq!(
            metrics.cell_at(Vec2::new(-15.0, 12.0), (1, 1)),
            Some(CellCoord::new(0, 0))
        );
    }

    #[test]
    fn tile_set_counts_partial_tiles() {
        let tile_set = TileSetPresentation::new(40, 16, 16);

        assert_eq!((tile_set.columns(), tile_set.rows()), (3, 1));
        assert_eq!(tile_set.tiles().count(), 3);
        assert!(tile_set.contains(TileRef::new(2, 0)));
        assert!(!tile_set.contains(TileRef::new(0, 1)));
        assert_eq!(
            tile_set.source_rect(TileRef::new(2, 0)),
            SourceRect {
                x: 32,
                y: 0,
                size: 16
            }
        );
    }

    #[test]
    fn tile_set_picks_tile_under_pointer() {
        let tile_set = TileSetPresentation::new(64, 64, 16);

        let pointer = TILE_SET_ORIGIN + Vec2::new(70.0, 33.0);
        let picked = tile_set.tile_at(pointer, 2, TILE_SET_ORIGIN);
        assert_eq!(picked, Some(TileRef::new(2, 1)));
        assert_eq!(
            tile_set.tile_at(TILE_SET_ORIGIN + Vec2::new(130.0, 0.0), 2, TILE_SET_ORIGIN),
            None
        );
        assert_eq!(
            tile_set.display_rect(TileRef::new(1, 1), 2, TILE_SET_ORIGIN).min,
            TILE_SET_ORIGIN + Vec2::splat(32.0)
        );
    }

    #[test]
    fn tile_set_overlays_stack_hover_under_selection() {
        let tile_set = TileSetPresentation::new(32, 32, 16);
        let selected = TileRef::new(1, 0);

        assert_eq!(
            tile_set.overlays(selected, selected, Some(selected)),
            vec![TILE_SET_HOVER_HIGHLIGHT, SELECTED_TILE_HIGHLIGHT]
        );
        assert_eq!(
            tile_set.overlays(TileRef::new(0, 1), selected, Some(TileRef::new(0, 1))),
            vec![TILE_SET_HOVER_HIGHLIGHT]
        );
        assert!(tile_set.overlays(TileRef::new(0, 0), selected, None).is_empty());
        assert!(
            tile_set.overlays(TileRef::new(5, 5), TileRef::new(5, 5), None).is_empty(),
            "references outside the image get no overlay"
        );
        assert_eq!(SELECTED_TILE_HIGHLIGHT.alpha, 64.0 / 255.0);
    }
}
