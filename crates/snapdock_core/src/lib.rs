//! Desktop placement core: window z-order, taskbar docking, drag/resize gestures, and snap
//! previews, driven through a single reducer.

pub mod config;
pub mod geometry;
pub mod haptics;
pub mod model;
pub mod reducer;
pub mod store;
pub mod window_manager;

pub use config::{ConfigError, DesktopConfig, DEFAULT_DESKTOP_CONFIG_JSON};
pub use geometry::{
    classify_snap_region, compute_snap_preview, is_in_taskbar_band, taskbar_slot_for_x,
    SnapPreview, SnapRegion,
};
pub use haptics::{HapticFeedback, NoopHaptics};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, HapticPulse, ReducerError, RuntimeEffect};
pub use store::DesktopStore;
