/// View models for the popup: what gets shown for an analysis result and
/// for the market overview
use crate::messages::{AnalysisResult, MarketOverview};

pub const UNKNOWN_SECTOR: &str = "Unknown";
pub const MISSING_TICKER: &str = "N/A";
pub const NO_TICKERS_NOTICE: &str = "No related stock tickers.";

/// Lowercase the label and replace each whitespace character with `_`
pub fn class_token(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// CSS class for a sentiment or market evaluation label
pub fn sentiment_class(label: &str) -> String {
    format!("sentiment-{}", class_token(label))
}

/// One decimal, exact ties rounded up (`0.25` -> `0.3`, `-0.25` -> `-0.2`)
pub fn format_score(score: f64) -> String {
    let rounded = (score * 10.0 + 0.5).floor() / 10.0;
    format!("{:.1}", rounded)
}

/// Rendered form of one article analysis
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleAnalysisView {
    pub sentiment: String,
    pub sentiment_class: String,
    pub sector: String,
    pub tickers: Vec<String>,
}

impl From<&AnalysisResult> for ArticleAnalysisView {
    fn from(result: &AnalysisResult) -> Self {
        let sector = result
            .sector
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SECTOR)
            .to_string();

        let tickers = result
            .companies
            .iter()
            .map(|c| {
                c.company_stock_id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .unwrap_or(MISSING_TICKER)
                    .to_string()
            })
            .collect();

        ArticleAnalysisView {
            sentiment: result.sentiment_text_label.clone(),
            sentiment_class: sentiment_class(&result.sentiment_text_label),
            sector,
            tickers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketView {
    pub score: String,
    pub evaluation: String,
    pub evaluation_class: String,
}

impl From<&MarketOverview> for MarketView {
    fn from(overview: &MarketOverview) -> Self {
        MarketView {
            score: format_score(overview.total_market_score),
            evaluation: overview.market_evaluation.clone(),
            evaluation_class: sentiment_class(&overview.market_evaluation),
        }
    }
}

/// Text of the panel that replaces the popup when the overview cannot load
pub fn market_error_text(endpoint: &str, detail: &str) -> String {
    format!(
        "Could not load the market overview. Make sure the backend API is running at {}. Details: {}",
        endpoint, detail
    )
}

pub fn market_refresh_error_text(endpoint: &str, detail: &str) -> String {
    format!(
        "Could not refresh the market data at {}. Details: {}",
        endpoint, detail
    )
}
