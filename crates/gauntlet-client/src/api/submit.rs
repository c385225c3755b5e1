use gauntlet_primitives::{Bid, DepositRequest, DepositReturnData};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::{
    api::endpoint_url,
    error::{ClientError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub open_auctions: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// Submits deposits and bids to the auction server.
#[derive(Debug, Clone)]
pub struct AuctionApiClient {
    client: Client,
    server_url: Url,
}

impl AuctionApiClient {
    pub fn new(server_url: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::ConfigError(format!("failed to build http client: {e}")))?;

        Ok(Self { client, server_url })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Blocks until the deposit's auction has closed, then returns its final instructions.
    pub async fn submit_deposit(&self, deposit: &DepositRequest) -> Result<DepositReturnData> {
        let response = self.post("deposit", deposit).await?;
        Self::parse(response).await
    }

    pub async fn submit_bid(&self, bid: &Bid) -> Result<()> {
        let response = self.post("bid", bid).await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(self.endpoint("health")?)
            .send()
            .await
            .map_err(|e| ClientError::ServerRequestError(e.to_string()))?;
        Self::parse(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        endpoint_url(&self.server_url, path)
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Response> {
        self.client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::ServerRequestError(e.to_string()))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::ServerRequestError(e.to_string()))?;
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error) => (error.error, error.message),
            Err(_) => ("unknown".to_string(), body),
        };
        Err(ClientError::ServerRejected {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ServerRequestError(format!("unexpected response: {e}")))
    }
}
