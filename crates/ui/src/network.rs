use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Response};

use settings_form_core::{FetchError, RawResponse, SettingsTransport};

/// `window.fetch` with default init: GET, no body, no extra headers
///
/// The path is resolved against the page URL by the browser.
pub struct FetchTransport;

fn transport_error(err: JsValue) -> FetchError {
    FetchError::Transport(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

#[async_trait(?Send)]
impl SettingsTransport for FetchTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, FetchError> {
        let win = window().ok_or_else(|| FetchError::Transport("No window".into()))?;

        let resp_val = JsFuture::from(win.fetch_with_str(path))
            .await
            .map_err(transport_error)?;
        let resp: Response = resp_val.dyn_into().map_err(transport_error)?;

        let buffer = JsFuture::from(resp.array_buffer().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(RawResponse::new(resp.status(), body))
    }
}
