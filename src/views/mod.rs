pub mod chat;
pub mod ingest;
pub mod shared;
pub mod video;

pub use chat::ChatPanel;
pub use ingest::IngestBar;
pub use video::{VideoPanel, YouTubePlayer};
