//! Bridge between chat citations and the video player.

use crate::types::SourceClip;
use async_trait::async_trait;

/// The playback capabilities the chat panel relies on.
#[async_trait(?Send)]
pub trait VideoSurface {
    fn seek_to(&self, seconds: u32);

    /// Current playback position in seconds, if a video is loaded.
    async fn current_time(&self) -> Option<f64>;
}

/// Jump to an inline `[MM:SS]` marker.
pub fn activate_timestamp(surface: &dyn VideoSurface, seconds: u32) {
    tracing::debug!(seconds, "seeking to timestamp");
    surface.seek_to(seconds);
}

/// Jump to the start of a cited transcript excerpt.
pub fn activate_source(surface: &dyn VideoSurface, clip: &SourceClip) {
    tracing::debug!(seconds = clip.start_time, label = %clip.timestamp, "seeking to source");
    surface.seek_to(clip.start_time);
}
