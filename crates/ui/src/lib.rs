//! Browser entry point for settings-form
//!
//! On page ready, fetches `json` and copies its keys onto `#settings-form`.
//! Best-effort: a failed request or a missing form leaves the page as it was.

mod dom;
mod network;
mod ready;

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

use settings_form_core::{populate_settings_form, Populator, PopulatorConfig, ReadyLatch};

use crate::dom::DomForm;
use crate::network::FetchTransport;

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let win = window().ok_or("No window")?;
    let search = win.location().search().unwrap_or_default();
    let config = PopulatorConfig::from_query(&search);

    // Diagnostics stay silent unless asked for with ?settings_debug=1
    if config.debug {
        tracing_wasm::set_as_global_default();
    }

    ready::on_ready(Rc::new(ReadyLatch::new()), move || {
        spawn_local(update_form(config));
    })
}

/// Fetch the settings and fill the form, absorbing every failure
async fn update_form(config: PopulatorConfig) {
    let populator = Populator::new();
    if let Some(report) =
        populate_settings_form(&populator, &FetchTransport, &config, DomForm::find).await
    {
        tracing::debug!(?report, "settings form updated");
    }
}
