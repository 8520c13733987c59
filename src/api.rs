/// Client for the external sentiment/entity analysis backend
use log::{debug, error};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiEndpoints;
use crate::error::RelayError;
use crate::messages::{AnalysisRequest, AnalysisResult, MarketOverview, MarketRefresh};

/// Operations the backend offers.
///
/// Futures are not `Send`: every extension context is single-threaded.
#[allow(async_fn_in_trait)]
pub trait AnalysisApi {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, RelayError>;

    async fn market_overview(&self) -> Result<MarketOverview, RelayError>;

    async fn refresh_market(&self) -> Result<MarketRefresh, RelayError>;
}

#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    client: Client,
    endpoints: ApiEndpoints,
}

impl HttpAnalysisApi {
    pub fn new(endpoints: ApiEndpoints) -> Self {
        HttpAnalysisApi {
            client: Client::new(),
            endpoints,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RelayError> {
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }
}

/// Non-2xx statuses become `RelayError::Http` carrying the body text
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RelayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(http_error(status.as_u16(), body));
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

pub fn http_error(status: u16, body: String) -> RelayError {
    RelayError::Http {
        status,
        body: body.trim().to_string(),
    }
}

impl AnalysisApi for HttpAnalysisApi {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, RelayError> {
        debug!("POST {} for {}", self.endpoints.analyze_url, request.article_id);

        let response = self
            .client
            .post(&self.endpoints.analyze_url)
            .json(request)
            .send()
            .await?;

        let result = read_json::<AnalysisResult>(response).await;
        if let Err(e) = &result {
            error!("Analysis API call failed: {}", e);
        }
        result
    }

    async fn market_overview(&self) -> Result<MarketOverview, RelayError> {
        self.get_json(&self.endpoints.market_data_url).await
    }

    async fn refresh_market(&self) -> Result<MarketRefresh, RelayError> {
        self.get_json(&self.endpoints.refresh_market_data_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_keeps_status_and_trims_body() {
        let err = http_error(422, "  {\"detail\":\"content missing\"}\n".to_string());

        assert_eq!(
            err,
            RelayError::Http {
                status: 422,
                body: "{\"detail\":\"content missing\"}".to_string(),
            }
        );
        assert!(err.to_string().contains("422"));
    }
}
