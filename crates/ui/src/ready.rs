use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::AddEventListenerOptions;

use settings_form_core::ReadyLatch;

use crate::dom::get_document;

/// Run `callback` once the document has finished its initial load
///
/// Runs immediately when parsing is already done, otherwise on the first
/// `DOMContentLoaded`. The latch keeps it to a single invocation.
pub fn on_ready<F>(latch: Rc<ReadyLatch>, callback: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let doc = get_document().ok_or("No document")?;

    if doc.ready_state() != "loading" {
        if latch.fire() {
            callback();
        }
        return Ok(());
    }

    let on_loaded = Closure::once(Box::new(move || {
        if latch.fire() {
            callback();
        }
    }) as Box<dyn FnOnce()>);

    let opts = AddEventListenerOptions::new();
    opts.set_once(true);
    doc.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_loaded.as_ref().unchecked_ref(),
        &opts,
    )?;
    on_loaded.forget();

    Ok(())
}
