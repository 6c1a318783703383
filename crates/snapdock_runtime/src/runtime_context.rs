//! Runtime provider and context wiring for the desktop placement state.
//!
//! This module owns the long-lived reducer container and runtime effect queue. Rendering
//! components read [`DesktopRuntimeContext::state`] and call the command methods; they never
//! mutate the state signal directly.

use leptos::*;
use snapdock_core::{
    reduce_desktop, DesktopAction, DesktopState, Dimensions, Point, ReducerError, RuntimeEffect,
    TaskbarGeometry, WindowId,
};

use crate::{
    effect_executor,
    host::{measure_viewport, DesktopHostContext},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop placement state and issuing gesture commands.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive placement state signal.
    pub state: RwSignal<DesktopState>,
    /// Queue of runtime effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    pub fn drag_start(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::DragStart { window_id });
    }

    pub fn drag(&self, pointer: Point) {
        self.dispatch_action(DesktopAction::Drag { pointer });
    }

    pub fn drag_end(&self, pointer: Point, grab_offset: Point) {
        self.dispatch_action(DesktopAction::DragEnd {
            pointer,
            grab_offset,
        });
    }

    pub fn resize_start(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::ResizeStart { window_id });
    }

    pub fn resize(&self, delta: Point) {
        self.dispatch_action(DesktopAction::Resize { delta });
    }

    pub fn resize_end(&self) {
        self.dispatch_action(DesktopAction::ResizeEnd);
    }

    pub fn bring_to_front(&self, window_id: WindowId) {
        self.dispatch_action(DesktopAction::BringToFront { window_id });
    }

    /// Abandons a drag or resize, e.g. when the pointer is captured by something else.
    pub fn cancel_gesture(&self) {
        self.dispatch_action(DesktopAction::CancelGesture);
    }

    pub fn set_viewport_dimensions(&self, dimensions: Dimensions) {
        self.dispatch_action(DesktopAction::SetViewport { dimensions });
    }

    pub fn set_taskbar_geometry(&self, geometry: TaskbarGeometry) {
        self.dispatch_action(DesktopAction::SetTaskbarGeometry { geometry });
    }
}

fn initial_state() -> DesktopState {
    match DesktopState::seeded() {
        Ok(state) => state,
        Err(err) => {
            logging::warn!("desktop seed layout rejected, starting empty: {err}");
            DesktopState::default()
        }
    }
}

fn report_rejection(err: ReducerError) {
    match err {
        // Pointer streams routinely outlive their gesture; not worth a release-build warning.
        ReducerError::NoActiveGesture | ReducerError::WrongGesture => {
            logging::debug_warn!("desktop command ignored: {err}");
        }
        _ => logging::warn!("desktop command ignored: {err}"),
    }
}

fn install_viewport_sync(runtime: DesktopRuntimeContext) {
    if let Some(dimensions) = measure_viewport() {
        runtime.set_viewport_dimensions(dimensions);
    }
    let resize_listener = window_event_listener(ev::resize, move |_| {
        if let Some(dimensions) = measure_viewport() {
            runtime.set_viewport_dimensions(dimensions);
        }
    });
    on_cleanup(move || resize_listener.remove());
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and seeds the placement state.
pub fn DesktopProvider(
    /// Host service bundle; defaults to browser vibration.
    #[prop(optional)]
    host: Option<DesktopHostContext>,
    /// Theme-driven taskbar geometry, re-applied whenever it changes.
    #[prop(optional)]
    taskbar: Option<Signal<TaskbarGeometry>>,
    children: Children,
) -> impl IntoView {
    let host = store_value(host.unwrap_or_default());
    let state = create_rw_signal(initial_state());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        match reduce_desktop(&mut desktop, action) {
            Ok(new_effects) => {
                if desktop != previous {
                    state.set(desktop);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => report_rejection(err),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        effects,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    install_viewport_sync(runtime);
    if let Some(taskbar) = taskbar {
        create_effect(move |_| runtime.set_taskbar_geometry(taskbar.get()));
    }

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
