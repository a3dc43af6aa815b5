use crate::types::{SourceClip, SummaryType};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize)]
pub(super) struct AskRequest<'a> {
    pub video_id: &'a str,
    pub question: &'a str,
}

#[derive(Serialize)]
pub(super) struct SummaryRequest<'a> {
    pub video_id: &'a str,
    pub summary_type: SummaryType,
}

#[derive(Serialize)]
pub(super) struct IngestRequest<'a> {
    pub url: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceClip>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Summary {
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<SourceClip>,
    #[serde(default, deserialize_with = "flatten_key_points")]
    pub key_points: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IngestReceipt {
    pub video_id: String,
    pub chunks_processed: u32,
    pub message: String,
}

#[derive(Deserialize)]
pub(super) struct VideoList {
    pub videos: Vec<String>,
}

/// FastAPI error body.
#[derive(Deserialize)]
pub(super) struct ErrorDetail {
    pub detail: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyPoint {
    Text(String),
    Cited { point: String, timestamp: String },
}

/// Key points arrive as strings or as `{point, timestamp, start_time}` objects.
/// Cited points keep their label as an inline `[MM:SS]` marker.
fn flatten_key_points<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let points = Vec::<KeyPoint>::deserialize(deserializer)?;
    Ok(points
        .into_iter()
        .map(|point| match point {
            KeyPoint::Text(text) => text,
            KeyPoint::Cited { point, timestamp } => format!("[{timestamp}] {point}"),
        })
        .collect())
}
