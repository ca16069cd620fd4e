use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Open frames in mount order; the last one is on top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerStack {
    open: Vec<u64>,
    next_id: u64,
}

impl LayerStack {
    pub fn push(&mut self) -> u64 {
        self.next_id += 1;
        self.open.push(self.next_id);
        self.next_id
    }

    pub fn remove(&mut self, id: u64) {
        self.open.retain(|open| *open != id);
    }

    pub fn top(&self) -> Option<u64> {
        self.open.last().copied()
    }

    pub fn is_top(&self, id: u64) -> bool {
        self.top() == Some(id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// Which [`ModalFrame`] currently owns the keyboard. Provided via context by `App`.
#[derive(Clone, Copy)]
pub struct ModalLayers {
    stack: RwSignal<LayerStack>,
}

impl ModalLayers {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(LayerStack::default()),
        }
    }

    fn register(&self) -> u64 {
        self.stack.try_update(|s| s.push()).unwrap_or_default()
    }

    fn unregister(&self, id: u64) {
        let _ = self.stack.try_update(|s| s.remove(id));
    }

    fn is_top(&self, id: u64) -> bool {
        self.stack.try_with_untracked(|s| s.is_top(id)).unwrap_or(false)
    }
}

impl Default for ModalLayers {
    fn default() -> Self {
        Self::new()
    }
}

/// Dialog surface used by the defect wizard, the defect editor and the file viewer.
///
/// Renders an overlay, a header with the title and a close button, the body and an
/// optional footer row. A full click on the overlay calls `on_close`; so does
/// Escape, but only for the topmost open frame.
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    /// Buttons rendered in the footer row.
    #[prop(optional)]
    footer: Option<ChildrenFn>,
    /// Max width of the surface in px (default: 720).
    #[prop(optional)]
    width: Option<u32>,
    /// z-index for overlay stacking (default: 1000).
    #[prop(optional)]
    z_index: Option<i32>,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1000);
    let width = width.unwrap_or(720);
    let overlay_mouse_down = RwSignal::new(false);

    let layers = use_context::<ModalLayers>().unwrap_or_default();
    let layer_id = layers.register();

    let keydown = window_event_listener(ev::keydown, move |ev: ev::KeyboardEvent| {
        if ev.key() == "Escape" && layers.is_top(layer_id) {
            // deferred, so the frame below cannot become top within this same keydown
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    });
    on_cleanup(move || {
        keydown.remove();
        layers.unregister(layer_id);
    });

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Press and release must both land on the overlay, otherwise a text selection
    // dragged out of the dialog would close it.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // next tick: the overlay must not be removed during its own click dispatch
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div
                class="modal"
                style=format!("position: relative; width: 100%; max-width: {width}px;")
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
                {footer.map(|footer| view! { <div class="modal-footer">{footer()}</div> })}
            </div>
        </div>
    }
}
