/// Extension configuration: backend endpoints and the target site profile
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::RelayError;

/// Top-level configuration handed to every entry point.
///
/// Every field has a default, so a partial JSON object (or `undefined`)
/// is enough to configure the extension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ExtensionConfig {
    pub api: ApiEndpoints,
    pub site: SiteProfile,
}

/// Locations of the analysis backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiEndpoints {
    pub analyze_url: String,
    pub market_data_url: String,
    pub refresh_market_data_url: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        ApiEndpoints {
            analyze_url: "http://127.0.0.1:8000/analyze_single_article".to_string(),
            market_data_url: "http://127.0.0.1:8000/market_data".to_string(),
            refresh_market_data_url: "http://127.0.0.1:8000/refresh_market_data".to_string(),
        }
    }
}

/// The news site whose article pages can be analyzed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteProfile {
    pub name: String,
    pub url_prefix: String,
    pub title_selector: String,
    pub paragraph_selector: String,
    pub missing_title_placeholder: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        SiteProfile {
            name: "VnEconomy".to_string(),
            url_prefix: "https://vneconomy.vn/".to_string(),
            title_selector: "h1.detail__title".to_string(),
            paragraph_selector: "div.detail__content p".to_string(),
            missing_title_placeholder: "Title not found".to_string(),
        }
    }
}

impl ExtensionConfig {
    /// Parse a config object passed in from JavaScript. `undefined` and
    /// `null` fall back to the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, RelayError> {
        if value.is_undefined() || value.is_null() {
            return Ok(ExtensionConfig::default());
        }

        serde_wasm_bindgen::from_value(value)
            .map_err(|e| RelayError::Decode(format!("invalid extension config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_vneconomy() {
        let config = ExtensionConfig::default();

        assert_eq!(config.site.url_prefix, "https://vneconomy.vn/");
        assert_eq!(config.site.title_selector, "h1.detail__title");
        assert_eq!(config.site.paragraph_selector, "div.detail__content p");
        assert!(config.api.analyze_url.ends_with("/analyze_single_article"));
        assert!(config.api.market_data_url.ends_with("/market_data"));
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = serde_json::from_str::<ExtensionConfig>(
            r#"{ "api": { "analyze_url": "https://api.example.test/analyze" } }"#,
        )
        .unwrap();

        assert_eq!(config.api.analyze_url, "https://api.example.test/analyze");
        assert_eq!(config.api.market_data_url, ApiEndpoints::default().market_data_url);
        assert_eq!(config.site, SiteProfile::default());
    }

    #[test]
    fn test_other_site_selectors() {
        let config = serde_json::from_str::<ExtensionConfig>(
            r#"{ "site": { "url_prefix": "https://cafef.vn/", "title_selector": "h1.title" } }"#,
        )
        .unwrap();

        assert_eq!(config.site.url_prefix, "https://cafef.vn/");
        assert_eq!(config.site.title_selector, "h1.title");
        assert_eq!(config.site.paragraph_selector, "div.detail__content p");
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result = serde_json::from_str::<ExtensionConfig>(r#"{ "site": { "url_prefix": 7 } }"#);
        assert!(result.is_err());
    }
}
