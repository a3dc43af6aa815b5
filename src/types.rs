use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// What a message represents in the log, independent of who sent it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Normal,
    SummaryPlaceholder,
    SummaryResult,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub(crate) u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub kind: MessageKind,
    pub content: String,
    pub sources: Vec<SourceClip>,
    pub key_points: Vec<String>,
    pub created_at: Option<OffsetDateTime>,
}

impl ChatMessage {
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == MessageKind::SummaryPlaceholder
    }
}

/// A transcript excerpt cited by an answer. `start_time` is the seek target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceClip {
    #[serde(deserialize_with = "whole_seconds")]
    pub start_time: u32,
    pub timestamp: String,
    pub text: String,
}

/// The backend reports float seconds; seek targets are whole seconds.
fn whole_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw <= 0.0 {
        return Ok(0);
    }
    Ok(raw.floor().min(u32::MAX as f64) as u32)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryType {
    Brief,
    Detailed,
    BulletPoints,
}

impl SummaryType {
    pub const ALL: [SummaryType; 3] = [
        SummaryType::Brief,
        SummaryType::Detailed,
        SummaryType::BulletPoints,
    ];

    /// Value sent on the wire as `summary_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryType::Brief => "brief",
            SummaryType::Detailed => "detailed",
            SummaryType::BulletPoints => "bullet_points",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SummaryType::Brief => "Brief",
            SummaryType::Detailed => "Detailed",
            SummaryType::BulletPoints => "Key Points",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
