use super::wire::{
    AskRequest, ErrorDetail, IngestReceipt, IngestRequest, SummaryRequest, VideoList,
};
use super::{Answer, AnswerService, ApiError, ApiResult, Summary};
use crate::config::ApiConfig;
use crate::types::SummaryType;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP client for the TubeMind backend
#[derive(Clone, Debug)]
pub struct TubeMindClient {
    client: Client,
    base_url: String,
}

impl TubeMindClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a client honoring the configured base URL and request timeout
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default HTTP client");
            Client::new()
        });
        Self::with_client(client, config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend to fetch, chunk and index a video transcript
    pub async fn ingest(&self, url: &str) -> ApiResult<IngestReceipt> {
        tracing::info!(url, "ingesting video");
        self.post("ingest", &IngestRequest { url }).await
    }

    /// Ids of every video the backend has indexed
    pub async fn list_videos(&self) -> ApiResult<Vec<String>> {
        let list: VideoList = self.send(self.client.get(self.endpoint("videos"))).await?;
        Ok(list.videos)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.post(self.endpoint(path)).json(body))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = match serde_json::from_str::<ErrorDetail>(&body) {
                Ok(parsed) => parsed.detail,
                Err(_) => body,
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl AnswerService for TubeMindClient {
    async fn ask(&self, video_id: &str, question: &str) -> ApiResult<Answer> {
        tracing::debug!(video_id, "asking question");
        self.post("ask", &AskRequest { video_id, question }).await
    }

    async fn summarize(&self, video_id: &str, summary_type: SummaryType) -> ApiResult<Summary> {
        tracing::debug!(video_id, %summary_type, "requesting summary");
        self.post(
            "summary",
            &SummaryRequest {
                video_id,
                summary_type,
            },
        )
        .await
    }
}
