/// Bridge to the extension platform APIs (`chrome.tabs`, `chrome.runtime`)
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::controller::PopupBridge;
use crate::error::RelayError;
use crate::messages::RelayRequest;
use crate::relay::TabMessenger;
use crate::tab_data::TabInfo;

// Import JS bridge functions
#[wasm_bindgen(module = "/extension/chrome_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendMessageToTab(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendRuntimeMessage(message: JsValue) -> Result<JsValue, JsValue>;
}

/// Message of a JS exception or rejection value
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Serialize into a plain JS object (no `Map`s), the shape `sendResponse` expects
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, RelayError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| RelayError::Decode(format!("Failed to serialize: {:?}", e)))
}

/// Read a JS value as JSON; `undefined` and `null` become `Value::Null`
pub fn from_js(value: JsValue) -> Result<Value, RelayError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| RelayError::Decode(format!("Failed to parse: {:?}", e)))
}

async fn active_tab() -> Result<Option<TabInfo>, RelayError> {
    let tab_js = queryActiveTab()
        .await
        .map_err(|e| RelayError::Transport(js_error_message(&e)))?;

    match from_js(tab_js)? {
        Value::Null => Ok(None),
        tab => Ok(Some(serde_json::from_value(tab)?)),
    }
}

/// `chrome.tabs` as used by the background relay
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

impl TabMessenger for ChromeTabs {
    async fn active_tab(&self) -> Result<Option<TabInfo>, RelayError> {
        active_tab().await
    }

    async fn send_to_tab(&self, tab_id: i32, request: &RelayRequest) -> Result<Value, RelayError> {
        let reply = sendMessageToTab(tab_id, to_js(request)?)
            .await
            .map_err(|e| RelayError::Transport(js_error_message(&e)))?;
        from_js(reply)
    }
}

/// `chrome.runtime` messaging as used by the popup
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeRuntime;

impl PopupBridge for ChromeRuntime {
    async fn active_tab(&self) -> Result<Option<TabInfo>, RelayError> {
        active_tab().await
    }

    async fn send_to_background(&self, request: &RelayRequest) -> Result<Value, RelayError> {
        let reply = sendRuntimeMessage(to_js(request)?)
            .await
            .map_err(|e| RelayError::Transport(js_error_message(&e)))?;
        from_js(reply)
    }
}
