//! Client side of the TubeMind backend
//!
//! The backend ingests a video transcript and answers questions or writes
//! summaries grounded in it. This module owns the wire shapes and the HTTP
//! client; the conversation layer only sees the [`AnswerService`] trait.
//!
//! # Architecture
//!
//! - `client` - reqwest-backed [`TubeMindClient`]
//! - `wire` - request/response bodies exchanged with the backend
//!
//! # Usage
//!
//! ```rust,no_run
//! use tubemind::api::{AnswerService, TubeMindClient};
//!
//! # async fn example() -> Result<(), tubemind::api::ApiError> {
//! let client = TubeMindClient::new("http://localhost:8000");
//! let answer = client.ask("dQw4w9WgXcQ", "What is this about?").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod wire;

use crate::types::SummaryType;
use async_trait::async_trait;

pub use client::TubeMindClient;
pub use wire::{Answer, IngestReceipt, Summary};

/// Failure of a single backend request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Produces answers and summaries for an ingested video.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, video_id: &str, question: &str) -> ApiResult<Answer>;

    async fn summarize(&self, video_id: &str, summary_type: SummaryType) -> ApiResult<Summary>;
}
