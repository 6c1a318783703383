//! Reducer actions, side-effect intents, and transition logic for desktop placement.

use thiserror::Error;

use crate::geometry::{compute_snap_preview, is_in_taskbar_band};
use crate::model::{
    ActiveGesture, DesktopState, Dimensions, DragOrigin, GestureKind, LayoutCheckpoint, Point,
    SlotToken, TaskbarGeometry, WindowId,
};
use crate::window_manager::{
    move_to_tail, place_dropped_window, relocate_taskbar_token, resize_dimensions,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Begin dragging a window, from the desktop or from its taskbar icon.
    DragStart {
        /// Window being dragged.
        window_id: WindowId,
    },
    /// Update an in-progress drag.
    Drag {
        /// Current pointer position.
        pointer: Point,
    },
    /// Release the active drag and resolve the window's final placement.
    DragEnd {
        /// Pointer position at release.
        pointer: Point,
        /// Where inside the window (or icon) the pointer grabbed it.
        grab_offset: Point,
    },
    /// Begin resizing a desktop window.
    ResizeStart {
        /// Window being resized.
        window_id: WindowId,
    },
    /// Grow or shrink the window being resized.
    Resize {
        /// Size change since the previous resize step.
        delta: Point,
    },
    /// End the active resize.
    ResizeEnd,
    /// Raise a desktop window to the top of the stack.
    BringToFront {
        /// Window to raise.
        window_id: WindowId,
    },
    /// Abandon the active drag or resize, restoring the pre-gesture layout.
    CancelGesture,
    /// Record new desktop surface dimensions.
    SetViewport {
        /// Measured viewport size.
        dimensions: Dimensions,
    },
    /// Replace the theme-driven taskbar icon geometry.
    SetTaskbarGeometry {
        /// New icon size and margin.
        geometry: TaskbarGeometry,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Vibration cue emitted at the edges of a drag or resize.
pub enum HapticPulse {
    /// A drag or resize began.
    GestureStart,
    /// A drag or resize was released.
    GestureEnd,
}

impl HapticPulse {
    /// Vibration length in milliseconds.
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::GestureStart => 30,
            Self::GestureEnd => 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Best-effort vibration feedback.
    Haptic(HapticPulse),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons an action was ignored. State is never modified when one of these is returned.
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window not found")]
    WindowNotFound,
    /// A gesture update or end arrived with no gesture in progress.
    #[error("no drag or resize in progress")]
    NoActiveGesture,
    /// A gesture start arrived while another gesture was still in progress.
    #[error("another drag or resize is already in progress")]
    GestureInProgress,
    /// Docked windows cannot be resized.
    #[error("window is docked in the taskbar")]
    WindowNotOnDesktop,
    /// A drag update arrived during a resize, or the reverse.
    #[error("action does not match the gesture in progress")]
    WrongGesture,
}

/// Applies a [`DesktopAction`] to the placement state and collects resulting side effects.
///
/// # Errors
///
/// Returns a [`ReducerError`] describing why the action was ignored. In that case `state` is
/// left exactly as it was, so callers may treat any error as a no-op.
pub fn reduce_desktop(
    state: &mut DesktopState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::DragStart { window_id } => {
            if state.active.is_some() {
                return Err(ReducerError::GestureInProgress);
            }
            if !state.windows.contains_key(&window_id) {
                return Err(ReducerError::WindowNotFound);
            }
            let origin = if state.is_on_desktop(window_id) {
                DragOrigin::Desktop
            } else if state.is_docked(window_id) {
                DragOrigin::Taskbar
            } else {
                return Err(ReducerError::WindowNotFound);
            };
            let checkpoint = LayoutCheckpoint {
                desktop_order: state.desktop_order.clone(),
                taskbar_order: state.taskbar_order.clone(),
            };

            move_to_tail(&mut state.desktop_order, &window_id);
            if origin == DragOrigin::Desktop {
                state.taskbar_order.push(SlotToken::Placeholder);
            }
            state.active = Some(ActiveGesture {
                window_id,
                kind: GestureKind::Dragging { origin, checkpoint },
            });
            state.snap_preview = None;
            effects.push(RuntimeEffect::Haptic(HapticPulse::GestureStart));
        }
        DesktopAction::Drag { pointer } => {
            let (window_id, origin) = active_drag(state)?;
            relocate_taskbar_token(
                &mut state.taskbar_order,
                origin.taskbar_token(window_id),
                pointer,
                state.taskbar,
            );
            state.snap_preview = compute_snap_preview(
                pointer,
                state.viewport,
                state.taskbar.band_height(),
                state.snap_zones.corner,
                state.snap_zones.edge,
            );
        }
        DesktopAction::DragEnd {
            pointer,
            grab_offset,
        } => {
            let (window_id, origin) = active_drag(state)?;
            if !state.windows.contains_key(&window_id) {
                return Err(ReducerError::WindowNotFound);
            }
            let taskbar = state.taskbar;
            let released_in_taskbar =
                is_in_taskbar_band(pointer.y, taskbar.icon_size, taskbar.icon_margin);
            let preview = state.snap_preview.take();
            let (min, max) = (state.min_window_size, state.max_window_size);

            match (origin, released_in_taskbar) {
                (DragOrigin::Desktop, true) => {
                    dock_window(state, window_id, pointer, grab_offset);
                }
                (DragOrigin::Desktop, false) => {
                    state
                        .taskbar_order
                        .retain(|token| *token != SlotToken::Placeholder);
                    if let Some(window) = state.windows.get_mut(&window_id) {
                        place_dropped_window(
                            window,
                            pointer,
                            grab_offset,
                            preview.as_ref(),
                            min,
                            max,
                        );
                    }
                }
                (DragOrigin::Taskbar, false) => {
                    state
                        .taskbar_order
                        .retain(|token| *token != SlotToken::Window(window_id));
                    state.desktop_order.retain(|id| *id != window_id);
                    state.desktop_order.push(window_id);
                    if let Some(window) = state.windows.get_mut(&window_id) {
                        place_dropped_window(
                            window,
                            pointer,
                            grab_offset,
                            preview.as_ref(),
                            min,
                            max,
                        );
                    }
                }
                // The icon stays docked in the slot the live drag already moved it to.
                (DragOrigin::Taskbar, true) => {}
            }

            state.active = None;
            effects.push(RuntimeEffect::Haptic(HapticPulse::GestureEnd));
        }
        DesktopAction::ResizeStart { window_id } => {
            if state.active.is_some() {
                return Err(ReducerError::GestureInProgress);
            }
            let dimensions_before = state
                .windows
                .get(&window_id)
                .map(|window| window.dimensions)
                .ok_or(ReducerError::WindowNotFound)?;
            if !move_to_tail(&mut state.desktop_order, &window_id) {
                return Err(ReducerError::WindowNotOnDesktop);
            }
            state.active = Some(ActiveGesture {
                window_id,
                kind: GestureKind::Resizing { dimensions_before },
            });
            effects.push(RuntimeEffect::Haptic(HapticPulse::GestureStart));
        }
        DesktopAction::Resize { delta } => {
            let window_id = active_resize(state)?;
            let min = state.min_window_size;
            let max = state.max_window_size;
            let window = state
                .windows
                .get_mut(&window_id)
                .ok_or(ReducerError::WindowNotFound)?;
            window.dimensions = resize_dimensions(window.dimensions, delta, min, max);
        }
        DesktopAction::ResizeEnd => {
            active_resize(state)?;
            state.active = None;
            effects.push(RuntimeEffect::Haptic(HapticPulse::GestureEnd));
        }
        DesktopAction::BringToFront { window_id } => {
            if !state.windows.contains_key(&window_id) {
                return Err(ReducerError::WindowNotFound);
            }
            move_to_tail(&mut state.desktop_order, &window_id);
        }
        DesktopAction::CancelGesture => {
            let gesture = state.active.take().ok_or(ReducerError::NoActiveGesture)?;
            match gesture.kind {
                GestureKind::Dragging { checkpoint, .. } => {
                    state.desktop_order = checkpoint.desktop_order;
                    state.taskbar_order = checkpoint.taskbar_order;
                }
                GestureKind::Resizing { dimensions_before } => {
                    if let Some(window) = state.windows.get_mut(&gesture.window_id) {
                        window.dimensions = dimensions_before;
                    }
                }
            }
            state.snap_preview = None;
        }
        DesktopAction::SetViewport { dimensions } => {
            state.viewport = dimensions;
        }
        DesktopAction::SetTaskbarGeometry { geometry } => {
            state.taskbar = geometry;
        }
    }

    Ok(effects)
}

fn active_drag(state: &DesktopState) -> Result<(WindowId, DragOrigin), ReducerError> {
    match state.active.as_ref() {
        None => Err(ReducerError::NoActiveGesture),
        Some(ActiveGesture {
            window_id,
            kind: GestureKind::Dragging { origin, .. },
        }) => Ok((*window_id, *origin)),
        Some(_) => Err(ReducerError::WrongGesture),
    }
}

fn active_resize(state: &DesktopState) -> Result<WindowId, ReducerError> {
    match state.active.as_ref() {
        None => Err(ReducerError::NoActiveGesture),
        Some(ActiveGesture {
            window_id,
            kind: GestureKind::Resizing { .. },
        }) => Ok(*window_id),
        Some(_) => Err(ReducerError::WrongGesture),
    }
}

/// Swaps the placeholder for the real window at the slot under the drop point.
fn dock_window(state: &mut DesktopState, window_id: WindowId, pointer: Point, grab_offset: Point) {
    let taskbar = state.taskbar;
    relocate_taskbar_token(
        &mut state.taskbar_order,
        SlotToken::Placeholder,
        pointer,
        taskbar,
    );
    for token in &mut state.taskbar_order {
        if *token == SlotToken::Placeholder {
            *token = SlotToken::Window(window_id);
        }
    }
    if !state.is_docked(window_id) {
        state.taskbar_order.push(SlotToken::Window(window_id));
    }
    state.desktop_order.retain(|id| *id != window_id);
    if let Some(window) = state.windows.get_mut(&window_id) {
        window.animate_in_from = Some(Point {
            x: pointer.x - grab_offset.x.min(taskbar.icon_size / 2.0),
            y: taskbar.icon_margin,
        });
    }
}
