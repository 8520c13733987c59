/// Browser tab data as seen by the extension
use serde::{Deserialize, Serialize};

/// The subset of a `chrome.tabs.Tab` the relay and popup read.
///
/// `id` and `url` are optional on the platform side: devtools windows have no
/// id and tabs outside the host permissions expose no url.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabInfo {
    pub fn new(id: i32, url: &str) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: Some(url.to_string()),
        }
    }

    /// Id usable as a message target
    pub fn target_id(&self) -> Option<i32> {
        self.id.filter(|id| *id >= 0)
    }
}
