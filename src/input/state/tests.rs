use super::*;
use crate::draw::color::BLACK;
use crate::draw::{MarkerKind, MarkerSymbol, ShapeKind, ShapeStyle, Symbol, WallSymbol};
use crate::geometry::Point;
use crate::input::{Key, Modifiers, MouseButton, RectangleMode, SnapRule, Tool};

fn session() -> EditorSession {
    EditorSession::new(EditorSettings::default())
}

fn click(session: &mut EditorSession, x: f64, y: f64) {
    session.on_pointer_down(MouseButton::Left, Point::new(x, y));
    session.on_pointer_up(MouseButton::Left);
}

fn drag(session: &mut EditorSession, from: (f64, f64), to: (f64, f64)) {
    session.on_pointer_down(MouseButton::Left, Point::from(from));
    session.on_pointer_move(Point::from(to));
    session.on_pointer_up(MouseButton::Left);
}

fn rect(a: (f64, f64), b: (f64, f64)) -> ShapeKind {
    ShapeKind::Rectangle {
        start: Point::from(a),
        end: Point::from(b),
        style: ShapeStyle::stroked(BLACK, 2.0),
    }
}

fn walls(session: &EditorSession) -> Vec<WallSymbol> {
    session.frame.walls().cloned().collect()
}

#[test]
fn test_horizontal_wall_from_two_clicks() {
    let mut state = session();
    state.set_tool(Tool::Wall);

    click(&mut state, 0.0, 0.0);
    assert_eq!(state.wall.start_point(), Some(Point::new(0.0, 0.0)));
    click(&mut state, 100.0, 0.0);

    let walls = walls(&state);
    assert_eq!(walls.len(), 1);
    assert_eq!(walls[0].start(), Point::new(0.0, 0.0));
    assert_eq!(walls[0].end(), Point::new(100.0, 0.0));
    assert_eq!(walls[0].rotation(), 0.0);
    assert_eq!(walls[0].size(), 100.0);
    assert_eq!(walls[0].thickness(), 5.0);
    assert_eq!(state.wall.start_point(), None);
    assert_eq!(state.take_pending_snapshots().len(), 1);
}

#[test]
fn test_diagonal_wall_keeps_45_degrees() {
    let mut state = session();
    state.set_tool(Tool::Wall);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 10.0, 10.0);

    let wall = &walls(&state)[0];
    assert!((wall.rotation() - 45.0).abs() < 1e-9);
    assert!((wall.size() - 200f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_wall_end_snaps_angle_and_preserves_length() {
    let mut state = session();
    state.set_tool(Tool::Wall);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 100.0, 10.0);

    let wall = &walls(&state)[0];
    let length = 10100f64.sqrt();
    assert!((wall.end().x - length).abs() < 1e-9);
    assert!(wall.end().y.abs() < 1e-9);
    assert!((wall.size() - length).abs() < 1e-9);
}

#[test]
fn test_wall_start_snaps_to_existing_endpoint() {
    let mut state = session();
    let wall = WallSymbol::new(Point::new(0.0, 0.0), Point::new(50.0, 50.0), 5.0);
    state.frame.add_symbol(Symbol::Wall(wall));
    state.set_tool(Tool::Wall);

    click(&mut state, 53.0, 52.0);
    assert_eq!(state.wall.start_point(), Some(Point::new(50.0, 50.0)));
}

#[test]
fn test_wall_snap_radius_shrinks_when_zoomed_in() {
    let mut state = session();
    let wall = WallSymbol::new(Point::new(0.0, 0.0), Point::new(50.0, 50.0), 5.0);
    state.frame.add_symbol(Symbol::Wall(wall));
    state.viewport.set_scale(2.0);
    state.set_tool(Tool::Wall);

    // 4 document units away: inside 10 / 2
    click(&mut state, 108.0, 100.0);
    assert_eq!(state.wall.start_point(), Some(Point::new(50.0, 50.0)));

    state.on_key(Key::Escape, Modifiers::NONE);
    // 6 document units away: outside
    click(&mut state, 112.0, 100.0);
    assert_eq!(state.wall.start_point(), Some(Point::new(56.0, 50.0)));
}

#[test]
fn test_leaving_wall_mode_clears_start_point() {
    let mut state = session();
    state.set_tool(Tool::Wall);
    click(&mut state, 10.0, 10.0);
    assert!(state.wall.start_point().is_some());

    state.set_tool(Tool::Select);
    assert!(!state.wall.is_active());
    state.set_tool(Tool::Wall);
    assert_eq!(state.wall.start_point(), None);
    assert!(walls(&state).is_empty());
}

#[test]
fn test_wall_preview_follows_cursor_with_snapping() {
    let mut state = session();
    state.set_tool(Tool::Wall);
    assert_eq!(state.wall_preview(), None);

    click(&mut state, 0.0, 0.0);
    state.on_pointer_move(Point::new(100.0, 3.0));
    let (start, end) = state.wall_preview().expect("preview");
    assert_eq!(start, Point::new(0.0, 0.0));
    assert!(end.y.abs() < 1e-9);
    assert!(state.needs_redraw);
}

#[test]
fn test_rectangle_drag_commits_on_release() {
    let mut state = session();
    state.set_tool(Tool::Rectangle);
    drag(&mut state, (10.0, 10.0), (50.0, 40.0));

    assert_eq!(state.frame.shapes.len(), 1);
    assert_eq!(state.frame.shapes[0].kind(), &rect((10.0, 10.0), (50.0, 40.0)));
    assert!(matches!(state.drawing, DrawingState::Idle));
}

#[test]
fn test_zero_length_line_is_still_committed() {
    let mut state = session();
    state.set_tool(Tool::Line);
    click(&mut state, 20.0, 20.0);

    assert_eq!(state.frame.shapes.len(), 1);
    match state.frame.shapes[0].kind() {
        ShapeKind::Line { start, end, .. } => assert_eq!(start, end),
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn test_free_line_collects_points_and_commits_on_leave() {
    let mut state = session();
    state.set_tool(Tool::FreeLine);
    state.on_pointer_down(MouseButton::Left, Point::new(0.0, 0.0));
    state.on_pointer_move(Point::new(5.0, 5.0));
    state.on_pointer_move(Point::new(10.0, 5.0));
    assert_eq!(state.drawing.current_points().len(), 3);

    state.on_pointer_leave();
    assert_eq!(state.frame.shapes.len(), 1);
    assert!(!state.drawing.is_active());
}

#[test]
fn test_text_tool_places_sample_text() {
    let mut state = session();
    state.set_tool(Tool::Text);
    click(&mut state, 30.0, 40.0);

    match state.frame.shapes[0].kind() {
        ShapeKind::Text {
            start,
            text,
            font_size,
            ..
        } => {
            assert_eq!(*start, Point::new(30.0, 40.0));
            assert_eq!(text, "Sample Text");
            assert_eq!(*font_size, 16.0);
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_tool_switch_mid_draw_discards_shape() {
    let mut state = session();
    state.set_tool(Tool::Rectangle);
    state.on_pointer_down(MouseButton::Left, Point::new(10.0, 10.0));
    state.on_pointer_move(Point::new(50.0, 50.0));
    assert!(state.drawing.is_drawing());

    state.set_tool(Tool::Line);
    state.on_pointer_up(MouseButton::Left);

    assert!(state.frame.shapes.is_empty());
    assert!(matches!(state.drawing, DrawingState::Idle));
}

#[test]
fn test_polygon_needs_three_vertices() {
    let mut state = session();
    state.set_tool(Tool::YellowPolygon);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 100.0, 0.0);

    state.on_key(Key::Return, Modifiers::NONE);
    assert!(state.frame.shapes.is_empty());
    assert!(state.drawing.is_polygon_mode());

    click(&mut state, 100.0, 100.0);
    state.on_key(Key::Return, Modifiers::NONE);

    assert_eq!(state.frame.shapes.len(), 1);
    match state.frame.shapes[0].kind() {
        ShapeKind::Polygon { points, style } => {
            assert_eq!(
                points,
                &vec![
                    Point::new(0.0, 0.0),
                    Point::new(100.0, 0.0),
                    Point::new(100.0, 100.0)
                ]
            );
            assert!(style.fill.is_some());
        }
        other => panic!("expected polygon, got {other:?}"),
    }
    assert!(!state.drawing.is_active());
}

#[test]
fn test_clicking_first_vertex_closes_polygon() {
    let mut state = session();
    state.set_tool(Tool::GreenPolygon);
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (3.0, 2.0)] {
        click(&mut state, x, y);
    }

    assert_eq!(state.frame.shapes.len(), 1);
    match state.frame.shapes[0].kind() {
        ShapeKind::Polygon { points, .. } => assert_eq!(points.len(), 3),
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn test_wall_polygon_vertices_snap_to_angles() {
    let mut state = session();
    state.set_tool(Tool::WallPolygon);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 100.0, 5.0);

    let points = state.drawing.polygon_points();
    assert_eq!(points.len(), 2);
    assert!(points[1].y.abs() < 1e-9);
    assert!((points[1].x - 10025f64.sqrt()).abs() < 1e-9);
}

fn lines(session: &EditorSession) -> Vec<(Point, Point, f64)> {
    session
        .frame
        .shapes
        .iter()
        .filter_map(|shape| match shape.kind() {
            ShapeKind::Line { start, end, style } => Some((*start, *end, style.line_width)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_wall_chain_of_two_points_commits_one_line() {
    let mut state = session();
    state.set_tool(Tool::WallPolygon);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 100.0, 0.0);
    state.on_key(Key::Return, Modifiers::NONE);

    assert_eq!(
        lines(&state),
        vec![(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 5.0)]
    );
    assert_eq!(state.frame.shapes.len(), 1);
    assert!(!state.drawing.is_active());
    assert_eq!(state.take_pending_snapshots().len(), 1);
}

#[test]
fn test_wall_chain_commits_lines_in_click_order() {
    let mut state = session();
    state.set_tool(Tool::WallPolygon);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 100.0, 0.0);
    click(&mut state, 100.0, 100.0);
    state.on_key(Key::Return, Modifiers::NONE);

    let committed = lines(&state);
    assert_eq!(committed.len(), 2);
    assert_eq!(committed[0].0, Point::new(0.0, 0.0));
    assert_eq!(committed[0].1, Point::new(100.0, 0.0));
    assert_eq!(committed[1].0, Point::new(100.0, 0.0));
    assert!(committed[1].1.approx_eq(Point::new(100.0, 100.0), 1e-9));
    assert!(state.frame.shapes.iter().all(|s| s.bounds().is_some()));
}

#[test]
fn test_wall_chain_needs_two_points() {
    let mut state = session();
    state.set_tool(Tool::WallPolygon);
    click(&mut state, 0.0, 0.0);
    state.on_key(Key::Return, Modifiers::NONE);

    assert!(state.frame.shapes.is_empty());
    assert!(state.drawing.is_polygon_mode());
}

#[test]
fn test_wall_chain_does_not_close_on_first_vertex() {
    let mut state = session();
    state.set_tool(Tool::WallPolygon);
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (2.0, 1.0)] {
        click(&mut state, x, y);
    }

    assert!(state.frame.shapes.is_empty());
    assert_eq!(state.drawing.polygon_points().len(), 4);
}

#[test]
fn test_double_click_finishes_wall_chain() {
    let mut state = session();
    state.set_tool(Tool::WallPolygon);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 0.0, 0.0);
    assert_eq!(state.drawing.polygon_points().len(), 1);

    click(&mut state, 0.0, 80.0);
    click(&mut state, 1.0, 81.0);

    let committed = lines(&state);
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].0, Point::new(0.0, 0.0));
    assert!(committed[0].1.approx_eq(Point::new(0.0, 80.0), 1e-9));
    assert!(!state.drawing.is_active());
}

#[test]
fn test_wall_chain_vertex_snaps_onto_line() {
    let mut state = session();
    state.frame.add_shape(ShapeKind::Line {
        start: Point::new(0.0, 50.0),
        end: Point::new(200.0, 50.0),
        style: ShapeStyle::stroked(BLACK, 5.0),
    });
    state.set_tool(Tool::WallPolygon);
    click(&mut state, 80.0, 54.0);
    assert_eq!(state.drawing.polygon_points(), &[Point::new(80.0, 50.0)]);

    state.on_key(Key::Escape, Modifiers::NONE);
    assert!(!state.toggle_snap(SnapRule::Lines));
    click(&mut state, 80.0, 54.0);
    assert_eq!(state.drawing.polygon_points(), &[Point::new(80.0, 54.0)]);
}

#[test]
fn test_wall_chain_edge_follows_perpendicular_extension() {
    let mut state = session();
    state.frame.add_shape(ShapeKind::Line {
        start: Point::new(0.0, 0.0),
        end: Point::new(100.0, 0.0),
        style: ShapeStyle::stroked(BLACK, 5.0),
    });
    state.set_tool(Tool::WallPolygon);
    assert!(!state.toggle_snap(SnapRule::Angle));
    click(&mut state, 50.0, 80.0);

    state.on_pointer_move(Point::new(103.0, 78.0));
    let (anchor, guided) = state.snap_guide().expect("extension guide");
    assert_eq!(anchor, Point::new(100.0, 0.0));
    assert!((guided.x - 100.0).abs() < 1e-9);

    state.on_pointer_down(MouseButton::Left, Point::new(103.0, 78.0));
    let vertex = state.drawing.polygon_points()[1];
    assert!((vertex.x - 100.0).abs() < 1e-9);
    assert!(vertex.y > 78.0 && vertex.y < 78.2);
    assert_eq!(state.snap_guide(), None);
}

#[test]
fn test_click_mode_rectangle_takes_two_clicks() {
    let mut state = session();
    state.set_tool(Tool::YellowRectangle);
    assert_eq!(state.toggle_rectangle_mode(), RectangleMode::Click);

    click(&mut state, 10.0, 10.0);
    assert!(state.drawing.is_drawing());
    state.on_pointer_move(Point::new(60.0, 40.0));
    assert!(state.frame.shapes.is_empty());

    click(&mut state, 60.0, 40.0);
    assert_eq!(state.frame.shapes.len(), 1);
    match state.frame.shapes[0].kind() {
        ShapeKind::Rectangle { start, end, style } => {
            assert_eq!(*start, Point::new(10.0, 10.0));
            assert_eq!(*end, Point::new(60.0, 40.0));
            assert!(style.fill.is_some());
        }
        other => panic!("expected rectangle, got {other:?}"),
    }
    assert!(!state.drawing.is_active());
}

#[test]
fn test_click_mode_leaves_plain_rectangles_dragged() {
    let mut state = session();
    state.set_rectangle_mode(RectangleMode::Click);
    state.set_tool(Tool::Rectangle);
    drag(&mut state, (10.0, 10.0), (30.0, 30.0));
    assert_eq!(state.frame.shapes.len(), 1);
}

#[test]
fn test_clear_shapes_keeps_symbols() {
    let mut state = session();
    let shape = state.frame.add_shape(rect((0.0, 0.0), (50.0, 50.0)));
    state.frame.add_shape(rect((60.0, 0.0), (90.0, 50.0)));
    state
        .frame
        .add_symbol(Symbol::Marker(MarkerSymbol::new(MarkerKind::Exit, Point::new(200.0, 200.0))));
    state.set_tool(Tool::Select);
    click(&mut state, 10.0, 10.0);
    assert_eq!(state.selection(), &[shape]);

    assert_eq!(state.clear_shapes(), 2);
    assert!(state.frame.shapes.is_empty());
    assert_eq!(state.frame.symbols.len(), 1);
    assert!(state.selection().is_empty());
    assert_eq!(state.take_pending_snapshots().len(), 1);

    assert_eq!(state.clear_shapes(), 0);
    assert!(!state.has_pending_snapshots());
}

#[test]
fn test_escape_cancels_polygon_and_wall_start() {
    let mut state = session();
    state.set_tool(Tool::YellowPolygon);
    click(&mut state, 0.0, 0.0);
    click(&mut state, 50.0, 0.0);
    state.on_key(Key::Escape, Modifiers::NONE);
    assert!(!state.drawing.is_active());

    state.set_tool(Tool::Wall);
    click(&mut state, 0.0, 0.0);
    state.on_key(Key::Escape, Modifiers::NONE);
    assert_eq!(state.wall.start_point(), None);
    assert!(state.wall.is_active());
    assert!(state.frame.is_empty());
}

#[test]
fn test_armed_marker_places_default_symbol() {
    let mut state = session();
    state.arm_marker(MarkerKind::Exit);
    click(&mut state, 40.0, 60.0);
    click(&mut state, 80.0, 60.0);

    assert_eq!(state.frame.symbols.len(), 2);
    match &state.frame.symbols[0] {
        Symbol::Marker(marker) => {
            assert_eq!(marker.kind, MarkerKind::Exit);
            assert_eq!(marker.center(), Point::new(40.0, 60.0));
            assert_eq!(marker.rotation, 0.0);
            assert_eq!(marker.size, 30.0);
        }
        other => panic!("expected marker, got {other:?}"),
    }
    let snapshots = state.take_pending_snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[1].symbols.len(), 2);
    assert!(!state.has_pending_snapshots());
}

#[test]
fn test_wall_mode_takes_priority_over_armed_marker() {
    let mut state = session();
    state.arm_marker(MarkerKind::FireAlarm);
    state.set_tool(Tool::Wall);
    click(&mut state, 0.0, 0.0);

    assert!(state.frame.symbols.is_empty());
    assert!(state.wall.start_point().is_some());
}

#[test]
fn test_symbol_drag_keeps_grab_offset_and_replays() {
    let mut state = session();
    let marker = MarkerSymbol::new(MarkerKind::FirstAid, Point::new(40.0, 40.0));
    let id = marker.id.clone();
    state.frame.add_symbol(Symbol::Marker(marker));

    state.on_pointer_down(MouseButton::Left, Point::new(45.0, 42.0));
    assert_eq!(state.selected_symbol(), Some(&id));
    for _ in 0..5 {
        state.on_pointer_move(Point::new(105.0, 102.0));
    }
    state.on_pointer_up(MouseButton::Left);

    let moved = state.frame.symbol(&id).expect("symbol");
    assert_eq!(moved.position(), Point::new(100.0, 100.0));
    let snapshots = state.take_pending_snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].symbols, state.frame.symbols);
}

#[test]
fn test_shape_move_keeps_index_and_id() {
    let mut state = session();
    let first = state.frame.add_shape(rect((0.0, 0.0), (50.0, 50.0)));
    state.frame.add_shape(rect((200.0, 200.0), (250.0, 250.0)));

    drag(&mut state, (10.0, 10.0), (20.0, 15.0));

    assert_eq!(state.selection(), &[first]);
    assert_eq!(state.frame.shapes[0].id(), first);
    assert_eq!(state.frame.shapes[0].kind(), &rect((10.0, 5.0), (60.0, 55.0)));
}

#[test]
fn test_marquee_selects_intersecting_shapes() {
    let mut state = session();
    let inside = state.frame.add_shape(rect((0.0, 0.0), (10.0, 10.0)));
    state.frame.add_shape(rect((100.0, 100.0), (110.0, 110.0)));

    state.on_pointer_down(MouseButton::Left, Point::new(50.0, 50.0));
    state.on_pointer_move(Point::new(-5.0, -5.0));
    let rect = state.selection_rect().expect("marquee");
    assert_eq!(rect.min, Point::new(-5.0, -5.0));
    state.on_pointer_up(MouseButton::Left);

    assert_eq!(state.selection(), &[inside]);
    assert_eq!(state.selection_rect(), None);
}

#[test]
fn test_delete_removes_selection_and_emits_snapshot() {
    let mut state = session();
    state.frame.add_shape(rect((0.0, 0.0), (10.0, 10.0)));
    click(&mut state, 5.0, 5.0);
    assert_eq!(state.selection().len(), 1);

    state.on_key(Key::Delete, Modifiers::NONE);
    assert!(state.frame.shapes.is_empty());
    assert!(state.selection().is_empty());
    assert_eq!(state.take_pending_snapshots().len(), 1);
}

#[test]
fn test_delete_selected_symbol() {
    let mut state = session();
    let marker = MarkerSymbol::new(MarkerKind::Exit, Point::new(20.0, 20.0));
    state.frame.add_symbol(Symbol::Marker(marker));
    click(&mut state, 20.0, 20.0);

    state.on_key(Key::Backspace, Modifiers::NONE);
    assert!(state.frame.symbols.is_empty());
    let snapshot = state.take_pending_snapshots().pop().expect("snapshot");
    assert!(snapshot.symbols.is_empty());
}

#[test]
fn test_ctrl_z_undoes_last_shape() {
    let mut state = session();
    state.set_tool(Tool::Line);
    drag(&mut state, (0.0, 0.0), (10.0, 0.0));
    drag(&mut state, (0.0, 5.0), (10.0, 5.0));

    state.on_key(Key::Char('z'), Modifiers::NONE);
    assert_eq!(state.frame.shapes.len(), 2);
    state.on_key(Key::Char('z'), Modifiers::CTRL);
    assert_eq!(state.frame.shapes.len(), 1);
}

#[test]
fn test_ctrl_wheel_zooms_and_zoom_out_resets_pan() {
    let mut state = session();
    assert!(!state.on_wheel(-100.0, Modifiers::NONE));
    assert!(state.on_wheel(-100.0, Modifiers::CTRL));
    assert!((state.viewport.scale() - 2.0).abs() < 1e-9);

    // Dragging empty space while zoomed pans instead of selecting
    drag(&mut state, (10.0, 10.0), (30.0, 40.0));
    assert_eq!(state.viewport.pan(), Point::new(20.0, 30.0));
    assert_eq!(state.selection_rect(), None);

    state.on_wheel(500.0, Modifiers::CTRL);
    assert_eq!(state.viewport.scale(), 1.0);
    assert_eq!(state.viewport.pan(), Point::ORIGIN);
}

#[test]
fn test_middle_button_pans_at_minimum_zoom() {
    let mut state = session();
    state.on_pointer_down(MouseButton::Middle, Point::new(0.0, 0.0));
    state.on_pointer_move(Point::new(15.0, -5.0));
    state.on_pointer_up(MouseButton::Middle);
    assert_eq!(state.viewport.pan(), Point::new(15.0, -5.0));
}

#[test]
fn test_pointer_maps_through_viewport() {
    let mut state = session();
    state.viewport.set_scale(2.0);
    state.viewport.pan_by(Point::new(10.0, 20.0));
    state.set_tool(Tool::Line);
    drag(&mut state, (10.0, 20.0), (110.0, 20.0));

    match state.frame.shapes[0].kind() {
        ShapeKind::Line { start, end, .. } => {
            assert_eq!(*start, Point::new(0.0, 0.0));
            assert_eq!(*end, Point::new(50.0, 0.0));
        }
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn test_pinch_zooms_session_viewport() {
    let mut state = session();
    let start = [Point::new(100.0, 100.0), Point::new(200.0, 100.0)];
    state.on_touch_start(&start, 0);
    let spread = [Point::new(50.0, 100.0), Point::new(250.0, 100.0)];
    assert!(state.on_touch_move(&spread, 16));
    assert!((state.viewport.scale() - 2.0).abs() < 1e-9);
    state.on_touch_end();
}

#[test]
fn test_render_paints_shapes_and_symbols() {
    let mut state = session();
    state.set_tool(Tool::YellowRectangle);
    drag(&mut state, (4.0, 4.0), (28.0, 28.0));
    state.set_tool(Tool::Wall);
    click(&mut state, 2.0, 40.0);
    click(&mut state, 60.0, 40.0);

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 64).expect("surface");
    let ctx = cairo::Context::new(&surface).expect("context");
    state.render(&ctx);
    drop(ctx);

    let mut surface = surface;
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().expect("surface data");
    let alpha_at = |x: usize, y: usize| data[y * stride + x * 4 + 3];
    assert!(alpha_at(16, 16) > 0);
    assert!(alpha_at(30, 40) > 0);
    assert_eq!(alpha_at(60, 10), 0);
}
