/// Error taxonomy shared by every extension context
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
    #[error("no active tab")]
    NoActiveTab,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("could not read the article from the page: {0}")]
    Extraction(String),

    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("empty content: the article has no text to analyze")]
    EmptyContent,

    #[error("HTTP error from analysis API: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("wrong site: {0} is not a supported article page")]
    WrongSite(String),

    #[error("analysis backend error: {0}")]
    Backend(String),

    #[error("no valid response from the background relay")]
    NoValidResponse,

    #[error("unsupported request: {0}")]
    UnsupportedRequest(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RelayError::Decode(err.to_string())
        } else {
            RelayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Decode(err.to_string())
    }
}
