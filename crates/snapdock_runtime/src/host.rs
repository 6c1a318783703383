//! Host-side helpers for executing reducer effects and querying the browser viewport.

use std::rc::Rc;

use snapdock_core::{Dimensions, HapticFeedback, HapticPulse, RuntimeEffect};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    haptics: Rc<dyn HapticFeedback>,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(Rc::new(WebHaptics))
    }
}

impl DesktopHostContext {
    pub fn new(haptics: Rc<dyn HapticFeedback>) -> Self {
        Self { haptics }
    }

    /// Returns the configured vibration service.
    pub fn haptics(&self) -> Rc<dyn HapticFeedback> {
        self.haptics.clone()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::Haptic(pulse) => self.haptics.pulse(pulse),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// `navigator.vibrate` backed haptics. A no-op outside the browser.
pub struct WebHaptics;

impl HapticFeedback for WebHaptics {
    fn pulse(&self, pulse: HapticPulse) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if !window.navigator().vibrate_with_duration(pulse.duration_ms()) {
                leptos::logging::debug_warn!("vibration unavailable for {pulse:?}");
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = pulse;
    }
}

/// Returns the browser's inner viewport size, or `None` outside the browser.
pub fn measure_viewport() -> Option<Dimensions> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let width = window.inner_width().ok().and_then(|value| value.as_f64())?;
        let height = window.inner_height().ok().and_then(|value| value.as_f64())?;
        return Some(Dimensions::new(width, height));
    }

    #[cfg(not(target_arch = "wasm32"))]
    None
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct RecordingHaptics {
        durations: RefCell<Vec<u32>>,
    }

    impl HapticFeedback for RecordingHaptics {
        fn pulse(&self, pulse: HapticPulse) {
            self.durations.borrow_mut().push(pulse.duration_ms());
        }
    }

    #[test]
    fn haptic_effects_reach_injected_service() {
        let recorder = Rc::new(RecordingHaptics::default());
        let host = DesktopHostContext::new(recorder.clone());

        host.run_runtime_effect(RuntimeEffect::Haptic(HapticPulse::GestureStart));
        host.run_runtime_effect(RuntimeEffect::Haptic(HapticPulse::GestureEnd));

        assert_eq!(*recorder.durations.borrow(), vec![30, 15]);
    }

    #[test]
    fn viewport_is_unknown_off_browser() {
        assert_eq!(measure_viewport(), None);
        WebHaptics.pulse(HapticPulse::GestureStart);
    }
}
