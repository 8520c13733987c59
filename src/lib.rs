/// PhoSent - news sentiment browser extension
/// Built with Rust + WASM + Yew

pub mod api;
pub mod chrome;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod extractor;
pub mod messages;
pub mod relay;
pub mod site;
pub mod tab_data;
pub mod ui;

use log::error;
use wasm_bindgen::prelude::*;

use crate::api::HttpAnalysisApi;
use crate::chrome::ChromeTabs;
use crate::config::ExtensionConfig;
use crate::error::RelayError;
use crate::messages::RelayEnvelope;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

fn load_config(config: JsValue) -> ExtensionConfig {
    ExtensionConfig::from_js(config).unwrap_or_else(|e| {
        error!("Falling back to the default config: {}", e);
        ExtensionConfig::default()
    })
}

fn into_js(envelope: RelayEnvelope) -> JsValue {
    chrome::to_js(&envelope)
        .or_else(|e| chrome::to_js(&RelayEnvelope::from(e)))
        .unwrap_or(JsValue::NULL)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup(config: JsValue) {
    let config = load_config(config);
    yew::Renderer::<ui::popup::App>::with_props(ui::popup::AppProps { config }).render();
}

/// Background service worker entry: resolves with the reply envelope once the
/// tab round trip or HTTP call has finished.
#[wasm_bindgen]
pub async fn handle_background_message(request: JsValue, config: JsValue) -> JsValue {
    let config = load_config(config);
    let envelope = match chrome::from_js(request) {
        Ok(raw) => {
            let api = HttpAnalysisApi::new(config.api);
            relay::dispatch(raw, &ChromeTabs, &api).await
        }
        Err(err) => err.into(),
    };
    into_js(envelope)
}

/// Content script entry: reads the article from the page it is injected into
#[wasm_bindgen]
pub fn handle_content_message(request: JsValue, config: JsValue) -> JsValue {
    let config = load_config(config);
    let document = web_sys::window().and_then(|w| w.document());

    let envelope = match (chrome::from_js(request), document) {
        (Ok(raw), Some(document)) => {
            extractor::handle_message(raw, &document, &config.site, js_sys::Date::now())
        }
        (Ok(_), None) => RelayError::Extraction("no document in this context".to_string()).into(),
        (Err(err), _) => err.into(),
    };
    into_js(envelope)
}
