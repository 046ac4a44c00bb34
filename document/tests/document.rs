use tilemap_editor_core::{CellCoord, CellRect, Command, Event, MapObject, Resize, TileRef};
use tilemap_editor_document::{self as document, query, Document};

fn apply_all(document: &mut Document, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        document::apply(document, command, &mut events);
    }
    events
}

#[test]
fn reduce_rows_on_single_row_document_is_noop() {
    let mut document = Document::with_dimensions(4, 1);
    let before = document.clone();

    assert!(!document.reduce_rows());
    assert_eq!(document, before, "a 4x1 document must keep its only row");
}

#[test]
fn reduce_columns_on_single_column_document_is_noop() {
    let mut document = Document::with_dimensions(1, 3);
    let before = document.clone();

    assert!(!document.reduce_columns());
    assert_eq!(document, before, "a 1x3 document must keep its only column");
}

#[test]
fn expansion_introduces_default_cells() {
    let mut document = Document::new();
    document.set_tile(CellCoord::new(0, 0), TileRef::new(3, 4));
    let _ = document.add_object(CellCoord::new(0, 0), MapObject::at(CellCoord::new(0, 0), "a", ""));

    document.expand_columns();
    document.expand_rows();

    assert_eq!(document.dimensions(), (2, 2));
    assert_eq!(document.tile(CellCoord::new(0, 0)), Some(TileRef::new(3, 4)));
    for cell in [CellCoord::new(1, 0), CellCoord::new(0, 1), CellCoord::new(1, 1)] {
        assert_eq!(document.tile(cell), Some(TileRef::new(0, 0)));
        assert_eq!(query::object_count(&document, cell), 0);
    }
    assert_eq!(query::object_count(&document, CellCoord::new(0, 0)), 1);
}

#[test]
fn reduce_drops_trailing_line_with_its_objects() {
    let mut document = Document::with_dimensions(3, 3);
    let corner = CellCoord::new(2, 2);
    let _ = document.add_object(corner, MapObject::at(corner, "chest", "gold"));
    document.set_tile(CellCoord::new(1, 1), TileRef::new(5, 5));

    assert!(document.reduce_columns());
    assert!(document.reduce_rows());
    document.expand_columns();
    document.expand_rows();

    assert_eq!(query::object_count(&document, corner), 0);
    assert_eq!(document.tile(CellCoord::new(1, 1)), Some(TileRef::new(5, 5)));
}

#[test]
fn paint_rect_ignores_corner_order() {
    let tile = TileRef::new(7, 1);
    let mut document = Document::with_dimensions(4, 4);

    document.paint_rect(
        CellRect::from_corners(CellCoord::new(2, 2), CellCoord::new(0, 1)),
        tile,
    );

    for row in 0..4 {
        for column in 0..4 {
            let cell = CellCoord::new(column, row);
            let inside = column <= 2 && (1..=2).contains(&row);
            let expected = if inside { tile } else { TileRef::default() };
            assert_eq!(
                document.tile(cell),
                Some(expected),
                "unexpected tile at ({column}, {row})"
            );
        }
    }
}

#[test]
fn objects_are_removed_newest_first() {
    let mut document = Document::with_dimensions(2, 2);
    let cell = CellCoord::new(1, 1);
    let first = MapObject::at(cell, "spawn", "");
    let second = MapObject::at(cell, "enemy", "slime");

    assert_eq!(document.add_object(cell, first.clone()), 1);
    assert_eq!(document.add_object(cell, second.clone()), 2);

    assert_eq!(document.remove_last_object(cell), Some(second));
    assert_eq!(document.remove_last_object(cell), Some(first));
    assert_eq!(document.remove_last_object(cell), None);
}

#[test]
fn clear_objects_empties_only_target_cell() {
    let mut document = Document::with_dimensions(2, 1);
    let left = CellCoord::new(0, 0);
    let right = CellCoord::new(1, 0);
    let _ = document.add_object(left, MapObject::at(left, "a", ""));
    let _ = document.add_object(left, MapObject::at(left, "b", ""));
    let _ = document.add_object(right, MapObject::at(right, "c", ""));

    assert_eq!(document.clear_objects(left), 2);
    assert_eq!(query::object_count(&document, left), 0);
    assert_eq!(query::object_count(&document, right), 1);
}

#[test]
fn apply_broadcasts_events_for_each_mutation() {
    let mut document = Document::new();
    let cell = CellCoord::new(0, 0);
    let object = MapObject::at(cell, "door", "north");

    let events = apply_all(
        &mut document,
        vec![
            Command::Resize(Resize::ExpandColumns),
            Command::SetTile {
                cell,
                tile: TileRef::new(1, 2),
            },
            Command::AddObject {
                cell,
                object: object.clone(),
            },
            Command::RemoveLastObject { cell },
            Command::ClearObjects { cell },
        ],
    );

    assert_eq!(
        events,
        vec![
            Event::Resized {
                columns: 2,
                rows: 1
            },
            Event::TileSet {
                cell,
                tile: TileRef::new(1, 2)
            },
            Event::ObjectAdded { cell, count: 1 },
            Event::ObjectRemoved { cell, object },
            Event::ObjectsCleared { cell, removed: 0 },
        ]
    );
}

#[test]
fn view_exposes_read_only_grids() {
    let mut document = Document::with_dimensions(2, 3);
    document.set_tile(CellCoord::new(1, 2), TileRef::new(9, 9));
    let view = query::view(&document);

    assert_eq!(view.dimensions(), (2, 3));
    assert!(view.contains(CellCoord::new(1, 2)));
    assert!(!view.contains(CellCoord::new(2, 0)));
    assert!(view.objects(CellCoord::new(5, 5)).is_empty());
    let last_row = view.tiles().iter_rows().last().expect("three rows");
    assert_eq!(last_row, &[TileRef::default(), TileRef::new(9, 9)]);
}
