//! Command façade over the desktop reducer.
//!
//! [`DesktopStore`] owns the single placement state and is its only write path: every command is
//! encoded as a [`DesktopAction`], reduced against the latest state, and its effects are run
//! before the call returns.

use std::rc::Rc;

use crate::config::ConfigError;
use crate::haptics::{HapticFeedback, NoopHaptics};
use crate::model::{DesktopState, Dimensions, Point, TaskbarGeometry, WindowId};
use crate::reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};

#[derive(Clone)]
pub struct DesktopStore {
    state: DesktopState,
    haptics: Rc<dyn HapticFeedback>,
    last_rejection: Option<ReducerError>,
}

impl DesktopStore {
    pub fn new(state: DesktopState) -> Self {
        Self::with_haptics(state, Rc::new(NoopHaptics))
    }

    pub fn with_haptics(state: DesktopState, haptics: Rc<dyn HapticFeedback>) -> Self {
        Self {
            state,
            haptics,
            last_rejection: None,
        }
    }

    /// A store holding the compiled-in seed layout.
    pub fn seeded() -> Result<Self, ConfigError> {
        Ok(Self::new(DesktopState::seeded()?))
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    /// Owned copy of the current state, for renderers that diff snapshots.
    pub fn snapshot(&self) -> DesktopState {
        self.state.clone()
    }

    /// Why the most recent façade command was ignored, or `None` if it applied.
    pub fn last_rejection(&self) -> Option<&ReducerError> {
        self.last_rejection.as_ref()
    }

    /// Reduces `action` and runs its effects.
    ///
    /// # Errors
    ///
    /// Returns the reducer's reason for ignoring the action; the state is unchanged in that
    /// case.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<(), ReducerError> {
        let effects = reduce_desktop(&mut self.state, action)?;
        for effect in effects {
            self.run_effect(effect);
        }
        Ok(())
    }

    pub fn drag_start(&mut self, window_id: WindowId) {
        self.apply(DesktopAction::DragStart { window_id });
    }

    pub fn drag(&mut self, pointer: Point) {
        self.apply(DesktopAction::Drag { pointer });
    }

    pub fn drag_end(&mut self, pointer: Point, grab_offset: Point) {
        self.apply(DesktopAction::DragEnd {
            pointer,
            grab_offset,
        });
    }

    pub fn resize_start(&mut self, window_id: WindowId) {
        self.apply(DesktopAction::ResizeStart { window_id });
    }

    pub fn resize(&mut self, delta: Point) {
        self.apply(DesktopAction::Resize { delta });
    }

    pub fn resize_end(&mut self) {
        self.apply(DesktopAction::ResizeEnd);
    }

    pub fn bring_to_front(&mut self, window_id: WindowId) {
        self.apply(DesktopAction::BringToFront { window_id });
    }

    pub fn cancel_gesture(&mut self) {
        self.apply(DesktopAction::CancelGesture);
    }

    pub fn set_viewport_dimensions(&mut self, dimensions: Dimensions) {
        self.apply(DesktopAction::SetViewport { dimensions });
    }

    pub fn set_taskbar_geometry(&mut self, icon_size: f64, icon_margin: f64) {
        self.apply(DesktopAction::SetTaskbarGeometry {
            geometry: TaskbarGeometry {
                icon_size,
                icon_margin,
            },
        });
    }

    // Commands are total: a rejected action is a no-op for façade callers.
    fn apply(&mut self, action: DesktopAction) {
        self.last_rejection = self.dispatch(action).err();
    }

    fn run_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::Haptic(pulse) => self.haptics.pulse(pulse),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::SlotToken;
    use crate::reducer::HapticPulse;

    #[derive(Default)]
    struct RecordingHaptics {
        pulses: RefCell<Vec<HapticPulse>>,
    }

    impl HapticFeedback for RecordingHaptics {
        fn pulse(&self, pulse: HapticPulse) {
            self.pulses.borrow_mut().push(pulse);
        }
    }

    fn store_with_recorder() -> (DesktopStore, Rc<RecordingHaptics>) {
        let haptics = Rc::new(RecordingHaptics::default());
        let mut state = DesktopState::seeded().expect("seeded state");
        state.viewport = Dimensions::new(1000.0, 800.0);
        (DesktopStore::with_haptics(state, haptics.clone()), haptics)
    }

    #[test]
    fn gesture_commands_pulse_haptics_in_order() {
        let (mut store, haptics) = store_with_recorder();
        store.drag_start(WindowId(1));
        store.drag(Point::new(400.0, 400.0));
        store.drag_end(Point::new(400.0, 400.0), Point::new(10.0, 10.0));
        store.resize_start(WindowId(2));
        store.resize(Point::new(5.0, 5.0));
        store.resize_end();

        assert_eq!(
            *haptics.pulses.borrow(),
            vec![
                HapticPulse::GestureStart,
                HapticPulse::GestureEnd,
                HapticPulse::GestureStart,
                HapticPulse::GestureEnd,
            ]
        );
        assert_eq!(HapticPulse::GestureStart.duration_ms(), 30);
        assert_eq!(HapticPulse::GestureEnd.duration_ms(), 15);
    }

    #[test]
    fn rejected_commands_do_not_pulse_or_change_state() {
        let (mut store, haptics) = store_with_recorder();
        let before = store.snapshot();
        store.drag_end(Point::new(5.0, 5.0), Point::default());
        store.resize_end();
        store.drag_start(WindowId(77));

        assert!(haptics.pulses.borrow().is_empty());
        assert_eq!(store.state(), &before);
        assert_eq!(store.last_rejection(), Some(&ReducerError::WindowNotFound));
        assert_eq!(
            store.dispatch(DesktopAction::ResizeEnd),
            Err(ReducerError::NoActiveGesture)
        );
    }

    #[test]
    fn last_rejection_clears_once_a_command_applies() {
        let (mut store, _) = store_with_recorder();
        store.resize(Point::new(10.0, 10.0));
        assert_eq!(store.last_rejection(), Some(&ReducerError::NoActiveGesture));

        store.resize_start(WindowId(3));
        assert_eq!(store.last_rejection(), Some(&ReducerError::WindowNotOnDesktop));

        store.bring_to_front(WindowId(1));
        assert_eq!(store.last_rejection(), None);
    }

    #[test]
    fn theme_and_viewport_commands_update_geometry() {
        let (mut store, _) = store_with_recorder();
        store.set_taskbar_geometry(60.0, 10.0);
        store.set_viewport_dimensions(Dimensions::new(640.0, 480.0));
        assert_eq!(store.state().taskbar, TaskbarGeometry::SECONDARY);
        assert_eq!(store.state().viewport, Dimensions::new(640.0, 480.0));
    }

    #[test]
    fn cancel_gesture_drops_placeholder() {
        let (mut store, _) = store_with_recorder();
        store.drag_start(WindowId(2));
        assert_eq!(store.state().placeholder_slot(), Some(2));
        store.cancel_gesture();
        assert_eq!(store.state().placeholder_slot(), None);
        assert_eq!(
            store.state().taskbar_order,
            vec![
                SlotToken::Window(WindowId(3)),
                SlotToken::Window(WindowId(4))
            ]
        );
    }
}
