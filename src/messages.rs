/// Wire types exchanged between the popup, the background relay, the
/// content script and the analysis backend
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;

/// Article text scraped from the page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticlePayload {
    pub title: String,
    pub content: String,
    pub article_id: String,
}

/// Body POSTed to the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    pub title: String,
    pub content: String,
    pub article_id: String,
}

impl From<ArticlePayload> for AnalysisRequest {
    fn from(payload: ArticlePayload) -> Self {
        AnalysisRequest {
            title: payload.title,
            content: payload.content,
            article_id: payload.article_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    #[serde(default)]
    pub company_stock_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Sentiment and entity analysis of one article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub sentiment_text_label: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketOverview {
    pub total_market_score: f64,
    pub market_evaluation: String,
}

/// Reply of the backend's market refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketRefresh {
    #[serde(default)]
    pub message: String,
    pub total_score: f64,
    pub evaluation: String,
}

/// Requests understood by the background relay and the content script,
/// discriminated by the `action` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RelayRequest {
    GetArticleContent,
    AnalyzeArticle { payload: AnalysisRequest },
}

impl RelayRequest {
    /// Decode a raw inbound message, naming the offending action on failure
    pub fn from_value(value: Value) -> Result<RelayRequest, RelayError> {
        let action = value
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string);

        serde_json::from_value(value).map_err(|e| match action {
            Some(action) => RelayError::UnsupportedRequest(format!("action '{}': {}", action, e)),
            None => RelayError::UnsupportedRequest(format!("missing action: {}", e)),
        })
    }

    pub fn action(&self) -> &'static str {
        match self {
            RelayRequest::GetArticleContent => "getArticleContent",
            RelayRequest::AnalyzeArticle { .. } => "analyzeArticle",
        }
    }
}

/// Uniform response shape for every cross-context call.
///
/// Built only through the constructors below, which keep `success == false`
/// paired with a non-empty `error`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RelayEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ArticlePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

const UNKNOWN_FAILURE: &str = "unknown error";

impl RelayEnvelope {
    pub fn with_payload(payload: ArticlePayload) -> Self {
        RelayEnvelope {
            success: true,
            payload: Some(payload),
            ..Default::default()
        }
    }

    pub fn with_data(data: AnalysisResult) -> Self {
        RelayEnvelope {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_FAILURE.to_string()
        } else {
            message
        };

        RelayEnvelope {
            success: false,
            error: Some(message),
            ..Default::default()
        }
    }

    /// Interpret a reply received from another context. Returns `None` when
    /// the reply is not an envelope at all (missing, `null`, wrong types).
    pub fn from_reply(reply: Value) -> Option<RelayEnvelope> {
        if !reply.is_object() {
            return None;
        }
        serde_json::from_value(reply).ok()
    }

    /// Restore the envelope invariants on a reply about to be forwarded.
    ///
    /// A failure is rebuilt through [`RelayEnvelope::failure`] so it always
    /// carries error text; a success without any result is no envelope.
    pub fn into_checked(self) -> Option<RelayEnvelope> {
        if !self.success {
            return Some(RelayEnvelope::failure(self.error.unwrap_or_default()));
        }
        if self.payload.is_none() && self.data.is_none() {
            return None;
        }
        Some(RelayEnvelope { error: None, ..self })
    }

    fn error_text(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// Success shape of the `getArticleContent` exchange
    pub fn into_article(self) -> Result<ArticlePayload, RelayError> {
        let error = self.error_text().map(str::to_string);
        match (self.success, self.payload) {
            (true, Some(payload)) => Ok(payload),
            _ => Err(RelayError::Extraction(
                error.unwrap_or_else(|| "the page returned no article payload".to_string()),
            )),
        }
    }

    /// Success shape of the `analyzeArticle` exchange
    pub fn into_analysis(self) -> Result<AnalysisResult, RelayError> {
        let error = self.error_text().map(str::to_string);
        match (self.success, self.data) {
            (true, Some(result)) => Ok(result),
            _ => match error {
                Some(error) => Err(RelayError::Backend(error)),
                None => Err(RelayError::NoValidResponse),
            },
        }
    }
}

impl From<RelayError> for RelayEnvelope {
    fn from(err: RelayError) -> Self {
        RelayEnvelope::failure(err.to_string())
    }
}

impl From<Result<ArticlePayload, RelayError>> for RelayEnvelope {
    fn from(result: Result<ArticlePayload, RelayError>) -> Self {
        match result {
            Ok(payload) => RelayEnvelope::with_payload(payload),
            Err(err) => err.into(),
        }
    }
}

impl From<Result<AnalysisResult, RelayError>> for RelayEnvelope {
    fn from(result: Result<AnalysisResult, RelayError>) -> Self {
        match result {
            Ok(result) => RelayEnvelope::with_data(result),
            Err(err) => err.into(),
        }
    }
}
