//! Placement state for the simulated desktop: window records, z-order, taskbar slots, and the
//! gesture currently in flight.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::SnapPreview;

pub const DEFAULT_MIN_WINDOW_SIZE: f64 = 100.0;
pub const DEFAULT_CORNER_TRIGGER_SIZE: f64 = 30.0;
pub const DEFAULT_EDGE_TRIGGER_SIZE: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `self - offset`, the top-left corner of something grabbed `offset` px in.
    pub fn minus(self, offset: Point) -> Self {
        Self {
            x: self.x - offset.x,
            y: self.y - offset.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn dimensions(self) -> Dimensions {
        Dimensions::new(self.w, self.h)
    }
}

/// One entry of the taskbar slot order.
///
/// `Placeholder` reserves the slot a desktop window would take if it were dropped on the taskbar
/// right now. It never aliases a real window id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotToken {
    Window(WindowId),
    Placeholder,
}

impl SlotToken {
    pub fn window_id(self) -> Option<WindowId> {
        match self {
            Self::Window(id) => Some(id),
            Self::Placeholder => None,
        }
    }
}

/// Taskbar icon layout constants, normally sourced from the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskbarGeometry {
    pub icon_size: f64,
    pub icon_margin: f64,
}

impl TaskbarGeometry {
    pub const PRIMARY: Self = Self {
        icon_size: 80.0,
        icon_margin: 10.0,
    };
    pub const SECONDARY: Self = Self {
        icon_size: 60.0,
        icon_margin: 10.0,
    };

    /// Total taskbar height: one icon row plus a margin above and below.
    pub fn band_height(self) -> f64 {
        self.icon_size + 2.0 * self.icon_margin
    }

    /// Left edge of the icon rendered in slot `index`.
    pub fn slot_x(self, index: usize) -> f64 {
        self.icon_margin + index as f64 * (self.icon_size + self.icon_margin)
    }
}

impl Default for TaskbarGeometry {
    fn default() -> Self {
        Self::PRIMARY
    }
}

/// Side lengths of the corner and edge trigger areas for snap previews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapZones {
    pub corner: f64,
    pub edge: f64,
}

impl Default for SnapZones {
    fn default() -> Self {
        Self {
            corner: DEFAULT_CORNER_TRIGGER_SIZE,
            edge: DEFAULT_EDGE_TRIGGER_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopWindow {
    pub id: WindowId,
    /// Only meaningful while the window is on the desktop.
    pub top_left: Point,
    pub dimensions: Dimensions,
    /// Presentation payload, opaque to the state machine.
    pub color: String,
    /// Drop point of the most recent docking, for the icon grow-in animation.
    pub animate_in_from: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragOrigin {
    Desktop,
    Taskbar,
}

impl DragOrigin {
    /// The taskbar token that follows the pointer during a drag from this origin.
    pub fn taskbar_token(self, window_id: WindowId) -> SlotToken {
        match self {
            Self::Desktop => SlotToken::Placeholder,
            Self::Taskbar => SlotToken::Window(window_id),
        }
    }
}

/// Order lists as they were when a drag began.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCheckpoint {
    pub desktop_order: Vec<WindowId>,
    pub taskbar_order: Vec<SlotToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GestureKind {
    Dragging {
        origin: DragOrigin,
        checkpoint: LayoutCheckpoint,
    },
    Resizing {
        dimensions_before: Dimensions,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveGesture {
    pub window_id: WindowId,
    pub kind: GestureKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    DraggingFromDesktop,
    DraggingFromTaskbar,
    Resizing,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Violations reported by [`DesktopState::check_invariants`].
pub enum LayoutError {
    #[error("{0} appears more than once in the placement lists")]
    DuplicateWindow(WindowId),
    #[error("{0} is placed but has no window record")]
    DanglingWindow(WindowId),
    #[error("taskbar order holds more than one placeholder")]
    DuplicatePlaceholder,
    #[error("taskbar placeholder present outside a drag from the desktop")]
    StrayPlaceholder,
    #[error("active {0} is neither on the desktop nor in the taskbar")]
    ActiveWindowUnplaced(WindowId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: BTreeMap<WindowId, DesktopWindow>,
    /// Back-to-front; the last id is topmost.
    pub desktop_order: Vec<WindowId>,
    /// Left-to-right icon slots.
    pub taskbar_order: Vec<SlotToken>,
    pub active: Option<ActiveGesture>,
    pub viewport: Dimensions,
    pub taskbar: TaskbarGeometry,
    pub snap_preview: Option<SnapPreview>,
    pub snap_zones: SnapZones,
    pub min_window_size: f64,
    pub max_window_size: Option<Dimensions>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: BTreeMap::new(),
            desktop_order: Vec::new(),
            taskbar_order: Vec::new(),
            active: None,
            viewport: Dimensions::default(),
            taskbar: TaskbarGeometry::default(),
            snap_preview: None,
            snap_zones: SnapZones::default(),
            min_window_size: DEFAULT_MIN_WINDOW_SIZE,
            max_window_size: None,
        }
    }
}

impl DesktopState {
    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active.as_ref().map(|gesture| gesture.window_id)
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        match self.active.as_ref().map(|gesture| &gesture.kind) {
            None => InteractionMode::Idle,
            Some(GestureKind::Dragging {
                origin: DragOrigin::Desktop,
                ..
            }) => InteractionMode::DraggingFromDesktop,
            Some(GestureKind::Dragging {
                origin: DragOrigin::Taskbar,
                ..
            }) => InteractionMode::DraggingFromTaskbar,
            Some(GestureKind::Resizing { .. }) => InteractionMode::Resizing,
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&DesktopWindow> {
        self.windows.get(&window_id)
    }

    pub fn is_on_desktop(&self, window_id: WindowId) -> bool {
        self.desktop_order.contains(&window_id)
    }

    pub fn is_docked(&self, window_id: WindowId) -> bool {
        self.taskbar_order.contains(&SlotToken::Window(window_id))
    }

    /// 1-based stacking index of a desktop window; higher is closer to the viewer.
    pub fn z_index_of(&self, window_id: WindowId) -> Option<u32> {
        self.desktop_order
            .iter()
            .position(|id| *id == window_id)
            .map(|idx| (idx + 1) as u32)
    }

    /// Desktop windows in back-to-front order.
    pub fn desktop_windows(&self) -> impl Iterator<Item = &DesktopWindow> + '_ {
        self.desktop_order
            .iter()
            .filter_map(|id| self.windows.get(id))
    }

    /// Taskbar slots left to right, with `None` standing in for the placeholder.
    pub fn taskbar_slots(&self) -> impl Iterator<Item = (usize, Option<&DesktopWindow>)> + '_ {
        self.taskbar_order
            .iter()
            .enumerate()
            .map(|(idx, token)| (idx, token.window_id().and_then(|id| self.windows.get(&id))))
    }

    pub fn placeholder_slot(&self) -> Option<usize> {
        self.taskbar_order
            .iter()
            .position(|token| *token == SlotToken::Placeholder)
    }

    pub fn taskbar_band_height(&self) -> f64 {
        self.taskbar.band_height()
    }

    pub fn taskbar_slot_x(&self, index: usize) -> f64 {
        self.taskbar.slot_x(index)
    }

    /// Verifies the placement invariants: every placed id is unique across both lists and has a
    /// record, a placeholder exists only while a desktop window is being dragged (and never more
    /// than one), and any active window is placed.
    pub fn check_invariants(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::new();
        let mut placeholders = 0usize;
        let placed = self.desktop_order.iter().copied().chain(
            self.taskbar_order
                .iter()
                .filter_map(|token| match token {
                    SlotToken::Window(id) => Some(*id),
                    SlotToken::Placeholder => {
                        placeholders += 1;
                        None
                    }
                }),
        );
        for id in placed {
            if !seen.insert(id) {
                return Err(LayoutError::DuplicateWindow(id));
            }
            if !self.windows.contains_key(&id) {
                return Err(LayoutError::DanglingWindow(id));
            }
        }
        if placeholders > 1 {
            return Err(LayoutError::DuplicatePlaceholder);
        }
        if placeholders == 1 && self.interaction_mode() != InteractionMode::DraggingFromDesktop {
            return Err(LayoutError::StrayPlaceholder);
        }
        if let Some(active) = self.active_window_id() {
            if !seen.contains(&active) {
                return Err(LayoutError::ActiveWindowUnplaced(active));
            }
        }
        Ok(())
    }
}
