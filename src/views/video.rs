use crate::player::VideoSurface;
use async_trait::async_trait;
use dioxus::prelude::*;

const PLAYER_ELEMENT_ID: &str = "tubemind-player";

/// Attaches the YouTube IFrame API to the embedded player, loading the API
/// script on first use.
const PLAYER_BOOTSTRAP: &str = r#"
(function() {
    function attach() {
        window.tubemindPlayer = new YT.Player('tubemind-player');
    }
    if (window.YT && window.YT.Player) {
        attach();
        return;
    }
    window.onYouTubeIframeAPIReady = attach;
    if (!document.getElementById('yt-iframe-api')) {
        const tag = document.createElement('script');
        tag.id = 'yt-iframe-api';
        tag.src = 'https://www.youtube.com/iframe_api';
        document.head.appendChild(tag);
    }
})();
"#;

const CURRENT_TIME_SCRIPT: &str = r#"
const player = window.tubemindPlayer;
return player && player.getCurrentTime ? player.getCurrentTime() : null;
"#;

/// The embedded YouTube player as seen by the chat panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct YouTubePlayer;

#[async_trait(?Send)]
impl VideoSurface for YouTubePlayer {
    fn seek_to(&self, seconds: u32) {
        let script = format!(
            "const player = window.tubemindPlayer;\
             if (player && player.seekTo) {{ player.seekTo({seconds}, true); player.playVideo(); }}"
        );
        let _ = document::eval(&script);
    }

    async fn current_time(&self) -> Option<f64> {
        match document::eval(CURRENT_TIME_SCRIPT).await {
            Ok(value) => value.as_f64(),
            Err(err) => {
                tracing::debug!(error = ?err, "could not read player position");
                None
            }
        }
    }
}

#[component]
pub fn VideoPanel(video_id: Option<String>) -> Element {
    rsx! {
        div { class: "video-panel",
            if let Some(id) = video_id {
                PlayerFrame { key: "{id}", video_id: id.clone() }
            } else {
                div { class: "video-empty", "Paste a YouTube link above to load a video." }
            }
        }
    }
}

#[component]
fn PlayerFrame(video_id: String) -> Element {
    let src = format!("https://www.youtube.com/embed/{video_id}?enablejsapi=1&rel=0");
    rsx! {
        iframe {
            id: PLAYER_ELEMENT_ID,
            class: "video-frame",
            src: "{src}",
            allow: "accelerometer; autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture",
            onmounted: move |_| {
                let _ = document::eval(PLAYER_BOOTSTRAP);
            },
        }
    }
}
