//! Reactive hosting for the snapdock placement core: a provider component owning the desktop
//! state signal, the command façade exposed through context, and browser-backed effects.

mod effect_executor;
pub mod host;
pub mod runtime_context;

pub use host::{measure_viewport, DesktopHostContext, WebHaptics};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};
