/// Background relay: dispatches popup requests to the active tab or to the
/// analysis backend and normalizes every outcome into a `RelayEnvelope`
use log::{debug, error, info};
use serde_json::Value;

use crate::api::AnalysisApi;
use crate::error::RelayError;
use crate::messages::{AnalysisRequest, AnalysisResult, RelayEnvelope, RelayRequest};
use crate::tab_data::TabInfo;

/// Tab access needed by the relay
// Futures stay on the single wasm thread, so no `Send` bound is needed.
#[allow(async_fn_in_trait)]
pub trait TabMessenger {
    /// Active tab of the current window
    async fn active_tab(&self) -> Result<Option<TabInfo>, RelayError>;

    /// Deliver `request` to the content script of `tab_id` and return its
    /// raw reply (`Value::Null` when it sent nothing back)
    async fn send_to_tab(&self, tab_id: i32, request: &RelayRequest) -> Result<Value, RelayError>;
}

/// Handle one inbound message. Never fails: every error is folded into the
/// returned envelope.
pub async fn dispatch<T, A>(raw: Value, tabs: &T, api: &A) -> RelayEnvelope
where
    T: TabMessenger,
    A: AnalysisApi,
{
    match RelayRequest::from_value(raw) {
        Ok(request) => handle(request, tabs, api).await,
        Err(err) => {
            error!("Background: {}", err);
            err.into()
        }
    }
}

pub async fn handle<T, A>(request: RelayRequest, tabs: &T, api: &A) -> RelayEnvelope
where
    T: TabMessenger,
    A: AnalysisApi,
{
    info!("Background: received '{}'", request.action());

    match request {
        RelayRequest::GetArticleContent => match fetch_article_content(tabs).await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!("Background: failed to get content from the page: {}", err);
                err.into()
            }
        },
        RelayRequest::AnalyzeArticle { payload } => analyze_article(&payload, api).await.into(),
    }
}

async fn fetch_article_content<T: TabMessenger>(tabs: &T) -> Result<RelayEnvelope, RelayError> {
    let tab_id = tabs
        .active_tab()
        .await?
        .and_then(|tab| tab.target_id())
        .ok_or(RelayError::NoActiveTab)?;

    let reply = tabs
        .send_to_tab(tab_id, &RelayRequest::GetArticleContent)
        .await?;

    // The content script's envelope goes back as-is, failure shapes included,
    // once a failure is guaranteed to carry error text.
    RelayEnvelope::from_reply(reply)
        .and_then(RelayEnvelope::into_checked)
        .ok_or_else(|| {
            RelayError::Transport(format!("tab {} did not answer with an article envelope", tab_id))
        })
}

async fn analyze_article<A: AnalysisApi>(
    request: &AnalysisRequest,
    api: &A,
) -> Result<AnalysisResult, RelayError> {
    let result = api.analyze(request).await?;
    debug!(
        "Background: analysis for {} -> {} ({} companies)",
        request.article_id,
        result.sentiment_text_label,
        result.companies.len()
    );
    Ok(result)
}
