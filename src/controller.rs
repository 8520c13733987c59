/// Popup controller: the single-article analysis flow and the market
/// overview, independent of any UI toolkit
use log::{info, warn};
use serde_json::Value;

use crate::api::AnalysisApi;
use crate::config::{ApiEndpoints, SiteProfile};
use crate::display::{market_error_text, market_refresh_error_text, ArticleAnalysisView, MarketView};
use crate::error::RelayError;
use crate::messages::{RelayEnvelope, RelayRequest};
use crate::site::{describe_location, is_supported_tab};
use crate::tab_data::TabInfo;

/// What the popup can reach
// Futures stay on the single wasm thread, so no `Send` bound is needed.
#[allow(async_fn_in_trait)]
pub trait PopupBridge {
    async fn active_tab(&self) -> Result<Option<TabInfo>, RelayError>;

    /// Send `request` to the background relay and return its raw reply
    async fn send_to_background(&self, request: &RelayRequest) -> Result<Value, RelayError>;
}

/// Progress of one analysis attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Idle,
    CheckingPage,
    Extracting,
    Submitting,
    Rendering(ArticleAnalysisView),
    Failed(String),
}

impl FlowState {
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            FlowState::CheckingPage | FlowState::Extracting | FlowState::Submitting
        )
    }

    pub fn status_text(&self) -> Option<&'static str> {
        match self {
            FlowState::CheckingPage => Some("Checking the current page..."),
            FlowState::Extracting => Some("Reading the article..."),
            FlowState::Submitting => Some("Analyzing the article..."),
            _ => None,
        }
    }
}

/// User-facing text for a failed attempt
pub fn failure_message(err: &RelayError, site: &SiteProfile) -> String {
    match err {
        RelayError::WrongSite(_) => format!("{}. Open a {} article to analyze it.", err, site.name),
        RelayError::Transport(_) => format!("{}. Try reloading the page or the extension.", err),
        _ => err.to_string(),
    }
}

/// Run one analysis attempt, reporting every state change to `on_state`.
/// Returns the terminal state (`Rendering` or `Failed`).
pub async fn run_analysis<B, F>(bridge: &B, site: &SiteProfile, mut on_state: F) -> FlowState
where
    B: PopupBridge,
    F: FnMut(&FlowState),
{
    let state = match analyze_active_article(bridge, site, &mut on_state).await {
        Ok(view) => {
            info!("Popup: rendering analysis ({})", view.sentiment);
            FlowState::Rendering(view)
        }
        Err(err) => {
            warn!("Popup: analysis failed: {}", err);
            FlowState::Failed(failure_message(&err, site))
        }
    };

    on_state(&state);
    state
}

async fn analyze_active_article<B, F>(
    bridge: &B,
    site: &SiteProfile,
    on_state: &mut F,
) -> Result<ArticleAnalysisView, RelayError>
where
    B: PopupBridge,
    F: FnMut(&FlowState),
{
    on_state(&FlowState::CheckingPage);
    let tab = bridge.active_tab().await?;
    if !tab.as_ref().map_or(false, |t| is_supported_tab(t, site)) {
        return Err(RelayError::WrongSite(describe_location(tab.as_ref())));
    }

    on_state(&FlowState::Extracting);
    let reply = bridge
        .send_to_background(&RelayRequest::GetArticleContent)
        .await?;
    let payload = RelayEnvelope::from_reply(reply)
        .ok_or_else(|| RelayError::Extraction("the background relay sent no envelope".to_string()))?
        .into_article()?;

    if payload.content.trim().is_empty() {
        return Err(RelayError::EmptyContent);
    }

    on_state(&FlowState::Submitting);
    let reply = bridge
        .send_to_background(&RelayRequest::AnalyzeArticle {
            payload: payload.into(),
        })
        .await?;
    let result = RelayEnvelope::from_reply(reply)
        .ok_or(RelayError::NoValidResponse)?
        .into_analysis()?;

    Ok(ArticleAnalysisView::from(&result))
}

/// Market overview panel
#[derive(Debug, Clone, PartialEq)]
pub enum MarketState {
    Loading,
    Ready(MarketView),
    Unavailable(String),
}

pub async fn load_market_overview<A: AnalysisApi>(api: &A, endpoint: &str) -> MarketState {
    match api.market_overview().await {
        Ok(overview) => MarketState::Ready(MarketView::from(&overview)),
        Err(err) => {
            warn!("Popup: market overview unavailable: {}", err);
            MarketState::Unavailable(market_error_text(endpoint, &err.to_string()))
        }
    }
}

/// Ask the backend to recompute the overview, then load it again.
///
/// A failed refresh yields the error text naming the refresh endpoint; the
/// overview already on screen stays untouched.
pub async fn refresh_market_overview<A: AnalysisApi>(
    api: &A,
    endpoints: &ApiEndpoints,
) -> Result<MarketState, String> {
    match api.refresh_market().await {
        Ok(refresh) => {
            info!("Popup: market refreshed: {}", refresh.message);
            Ok(load_market_overview(api, &endpoints.market_data_url).await)
        }
        Err(err) => {
            warn!("Popup: market refresh failed: {}", err);
            Err(market_refresh_error_text(&endpoints.refresh_market_data_url, &err.to_string()))
        }
    }
}
