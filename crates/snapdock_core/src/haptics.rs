//! Outbound vibration hook invoked for reducer-emitted haptic effects.

use crate::reducer::HapticPulse;

/// Host vibration service. Implementations are best-effort and must not fail loudly when the
/// platform has no vibration support.
pub trait HapticFeedback {
    fn pulse(&self, pulse: HapticPulse);
}

#[derive(Debug, Clone, Copy, Default)]
/// Haptics service that ignores every pulse.
pub struct NoopHaptics;

impl HapticFeedback for NoopHaptics {
    fn pulse(&self, _pulse: HapticPulse) {}
}
