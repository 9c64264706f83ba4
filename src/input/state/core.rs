//! Editor session: the owned state every input handler works on.

use super::drawing::{DrawingDefaults, DrawingState};
use super::wall::{WallSession, WallSettings};
use crate::draw::color::{BLACK, GREEN_ZONE, YELLOW_ZONE};
use crate::draw::{Frame, MarkerKind, RenderOptions, ShapeId, SymbolId};
use crate::geometry::{Bounds, Point};
use crate::input::tool::{RectangleMode, Tool, ToolPalette};
use crate::project::ProjectSnapshot;
use crate::viewport::gestures::{GestureSettings, GestureTracker};
use crate::viewport::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, Viewport};
use log::debug;

/// Everything the session needs from configuration.
#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub drawing: DrawingDefaults,
    pub walls: WallSettings,
    pub gestures: GestureSettings,
    pub render: RenderOptions,
    /// Click radius (screen px) around the first vertex that closes a polygon
    pub polygon_close_distance: f64,
    pub rectangle_mode: RectangleMode,
    pub wheel_sensitivity: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            drawing: DrawingDefaults {
                palette: ToolPalette {
                    stroke: BLACK,
                    yellow_fill: YELLOW_ZONE,
                    green_fill: GREEN_ZONE,
                    line_width: 2.0,
                    wall_thickness: 5.0,
                },
                font_size: 16.0,
                text: "Sample Text".to_string(),
            },
            walls: WallSettings::default(),
            gestures: GestureSettings::default(),
            render: RenderOptions::default(),
            polygon_close_distance: 10.0,
            rectangle_mode: RectangleMode::Drag,
            wheel_sensitivity: 0.01,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

/// Pointer drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    /// Moving the view; `last` is in screen coordinates
    Pan { last: Point },
    /// Moving a symbol; `offset` is the grab point relative to its anchor
    Symbol { id: SymbolId, offset: Point },
    /// Moving a shape from `origin`; both points in document coordinates
    Shape {
        id: ShapeId,
        origin: Point,
        last: Point,
    },
    /// Rubber-band selection anchored at `origin` (document coordinates)
    Marquee { origin: Point },
}

/// Owned editing session.
///
/// Holds the plan being edited, the active tool, the drawing and wall state
/// machines, the viewport and the selection. Front ends feed events in and
/// check `needs_redraw`; persistence collaborators drain snapshots with
/// [`EditorSession::take_pending_snapshots`].
pub struct EditorSession {
    /// Shapes and symbols of the open plan
    pub frame: Frame,
    /// Pan and zoom of the canvas
    pub viewport: Viewport,
    /// Shape drawing state machine
    pub drawing: DrawingState,
    /// Two-click wall mode
    pub wall: WallSession,
    /// Whether the canvas needs to be repainted
    pub needs_redraw: bool,
    pub(super) tool: Tool,
    pub(super) settings: EditorSettings,
    pub(super) gestures: GestureTracker,
    pub(super) drag: Option<DragState>,
    pub(super) selection: Vec<ShapeId>,
    pub(super) selected_symbol: Option<SymbolId>,
    pub(super) selection_rect: Option<Bounds>,
    pub(super) armed_marker: Option<MarkerKind>,
    /// Last pointer position in document coordinates
    pub(super) cursor: Option<Point>,
    pub(super) rectangle_mode: RectangleMode,
    /// Extension guide behind the current wall chain vertex
    pub(super) snap_guide: Option<(Point, Point)>,
    pending_snapshots: Vec<ProjectSnapshot>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorSession {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            frame: Frame::new(),
            viewport: Viewport::new(settings.min_scale, settings.max_scale),
            drawing: DrawingState::Idle,
            wall: WallSession::default(),
            needs_redraw: true,
            tool: Tool::default(),
            gestures: GestureTracker::new(settings.gestures),
            rectangle_mode: settings.rectangle_mode,
            settings,
            drag: None,
            selection: Vec::new(),
            selected_symbol: None,
            selection_rect: None,
            armed_marker: None,
            cursor: None,
            snap_guide: None,
            pending_snapshots: Vec::new(),
        }
    }

    /// Starts a session on an existing plan.
    pub fn with_frame(settings: EditorSettings, frame: Frame) -> Self {
        let mut session = Self::new(settings);
        session.frame = frame;
        session
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches the active tool.
    ///
    /// Any in-progress shape, polygon or pending wall start is discarded; the
    /// committed collection is left untouched. Selecting [`Tool::Wall`]
    /// enables wall mode, any other tool disables it.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        if self.drawing.abort() {
            debug!("Discarded in-progress shape on switch to {tool}");
        }
        self.wall.toggle(tool == Tool::Wall);
        self.drag = None;
        self.selection_rect = None;
        self.snap_guide = None;
        self.tool = tool;
        self.needs_redraw = true;
    }

    /// Arms a marker type so the next canvas clicks place it.
    pub fn arm_marker(&mut self, kind: MarkerKind) {
        debug!("Armed marker {kind}");
        self.armed_marker = Some(kind);
    }

    pub fn disarm_marker(&mut self) {
        self.armed_marker = None;
    }

    pub fn armed_marker(&self) -> Option<&MarkerKind> {
        self.armed_marker.as_ref()
    }

    pub fn selection(&self) -> &[ShapeId] {
        &self.selection
    }

    pub fn selected_symbol(&self) -> Option<&SymbolId> {
        self.selected_symbol.as_ref()
    }

    /// Marquee rectangle while a rubber-band selection is being dragged.
    pub fn selection_rect(&self) -> Option<Bounds> {
        self.selection_rect
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn rectangle_mode(&self) -> RectangleMode {
        self.rectangle_mode
    }

    /// Reference endpoint and snapped point of an active extension snap.
    pub fn snap_guide(&self) -> Option<(Point, Point)> {
        self.snap_guide
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() || self.selected_symbol.is_some() {
            self.selection.clear();
            self.selected_symbol = None;
            self.needs_redraw = true;
        }
    }

    /// Replaces the plan wholesale, as after loading a project.
    pub fn load_frame(&mut self, frame: Frame) {
        self.frame = frame;
        self.drawing.abort();
        self.wall.cancel();
        self.drag = None;
        self.selection.clear();
        self.selected_symbol = None;
        self.selection_rect = None;
        self.snap_guide = None;
        self.needs_redraw = true;
    }

    /// Snapped rubber-band segment of the wall being placed, if any.
    pub fn wall_preview(&self) -> Option<(Point, Point)> {
        let cursor = self.cursor?;
        self.wall.preview(
            cursor,
            self.viewport.scale(),
            self.frame.wall_endpoints(),
            &self.settings.walls,
        )
    }

    /// Drains the snapshots queued by add/move/delete operations.
    pub fn take_pending_snapshots(&mut self) -> Vec<ProjectSnapshot> {
        std::mem::take(&mut self.pending_snapshots)
    }

    pub fn has_pending_snapshots(&self) -> bool {
        !self.pending_snapshots.is_empty()
    }

    pub(super) fn queue_snapshot(&mut self) {
        self.pending_snapshots
            .push(ProjectSnapshot::capture(&self.frame));
    }
}
