use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

#[component]
pub fn Modal(
    /// Title of the modal
    title: String,
    /// Callback when modal should close (Escape, overlay, close button)
    on_close: Callback<()>,
    /// Extra class for the dialog surface (e.g. `modal--narrow`)
    #[prop(optional, into)]
    class: String,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape закрывает окно; слушатель снимается вместе с окном
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
            if keyboard_event.key() == "Escape" {
                on_close.run(());
            }
        }
    }) as Box<dyn FnMut(_)>);
    let listener: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    closure.forget();

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("keydown", &listener);
    }
    let listener = StoredValue::new_local(listener);
    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            listener.with_value(|f| {
                let _ = window.remove_event_listener_with_callback("keydown", f);
            });
        }
    });

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class=format!("modal {}", class) on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
