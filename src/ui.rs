use crate::api::TubeMindClient;
use crate::config::ApiConfig;
use crate::conversation::ConversationStore;
use crate::views::{ChatPanel, IngestBar, VideoPanel};
use dioxus::prelude::*;

const APP_CSS: &str = r#"
:root {
    --color-bg-primary: #0b0b0c;
    --color-bg-secondary: #151517;
    --color-text-primary: #f4f4f5;
    --color-text-muted: #a1a1aa;
    --color-border: #2a2a2e;
    --color-accent: #ff3509;
    --color-error: #f87171;
    --color-chat-user-bg: #f4f4f5;
    --color-chat-user-text: #0b0b0c;
}
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { padding: 0.75rem 1rem; border-bottom: 1px solid var(--color-border); }
.header-content { display: flex; gap: 1rem; align-items: center; }
.wordmark { font-size: 1.25rem; margin: 0; }
.ingest-bar { display: flex; flex: 1; gap: 0.5rem; align-items: center; }
.ingest-bar input { flex: 1; }
.ingest-status { font-size: 0.85rem; color: var(--color-text-muted); }
.ingest-status.error { color: var(--color-error); }
input, textarea, select { background: var(--color-bg-secondary); color: var(--color-text-primary); border: 1px solid var(--color-border); border-radius: 8px; padding: 0.5rem; font: inherit; }
.workspace { display: grid; grid-template-columns: 3fr 2fr; height: calc(100vh - 64px); }
.video-panel { padding: 1rem; }
.video-frame { width: 100%; aspect-ratio: 16 / 9; border: 0; border-radius: 8px; }
.video-empty { color: var(--color-text-muted); padding: 2rem; text-align: center; }
.chat-panel { display: flex; flex-direction: column; border-left: 1px solid var(--color-border); min-height: 0; }
.chat-toolbar { display: flex; gap: 0.5rem; padding: 0.5rem 1rem; border-bottom: 1px solid var(--color-border); }
.chat-list { flex: 1; overflow-y: auto; padding: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.message-stack { max-width: 90%; }
.bubble { padding: 0.6rem 0.8rem; border-radius: 10px; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); white-space: pre-wrap; }
.bubble.assistant { background: var(--color-bg-secondary); }
.bubble.error { border: 1px solid var(--color-error); color: var(--color-error); }
.timestamped-text { white-space: pre-wrap; }
.timestamp-link, .source-chip { background: none; border: 0; color: var(--color-accent); cursor: pointer; font: inherit; padding: 0; }
.timestamp-link:hover, .source-chip:hover { text-decoration: underline; }
.sources { display: flex; flex-direction: column; gap: 0.25rem; margin-top: 0.5rem; font-size: 0.85rem; }
.source-chip { text-align: left; display: flex; gap: 0.5rem; }
.source-text { color: var(--color-text-muted); }
.key-points { margin: 0.5rem 0 0; padding-left: 1.2rem; }
.bubble-controls { display: flex; justify-content: flex-end; }
.action-btn { background: none; border: 0; color: var(--color-text-muted); cursor: pointer; font-size: 0.75rem; }
.message-meta { font-size: 0.7rem; color: var(--color-text-muted); margin-top: 0.2rem; }
.message-row.user .message-meta { text-align: right; }
.shimmer-text { color: var(--color-accent); opacity: 0.8; }
.composer { display: flex; gap: 0.5rem; padding: 0.75rem 1rem; border-top: 1px solid var(--color-border); align-items: flex-end; }
.composer textarea { flex: 1; resize: none; }
.btn { border-radius: 8px; padding: 0.45rem 0.9rem; border: 1px solid var(--color-border); background: none; color: inherit; cursor: pointer; }
.btn-primary { background: var(--color-accent); border-color: var(--color-accent); color: #fff; }
.btn:disabled { opacity: 0.4; cursor: default; }
.empty-state { color: var(--color-text-muted); text-align: center; margin: auto; }
"#;

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(api_client()));
    let store = use_signal(ConversationStore::new);
    let active_video = use_memo(move || store.read().video_id().map(str::to_string));

    rsx! {
        style { dangerous_inner_html: "{APP_CSS}" }
        AppHeader { store }
        div { class: "workspace",
            VideoPanel { video_id: active_video() }
            ChatPanel { store }
        }
    }
}

fn api_client() -> TubeMindClient {
    let config = ApiConfig::from_env().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid configuration, using defaults");
        ApiConfig::default()
    });
    tracing::info!(base_url = %config.base_url, "using TubeMind backend");
    TubeMindClient::from_config(&config)
}

#[component]
fn AppHeader(store: Signal<ConversationStore>) -> Element {
    rsx! {
        div { class: "header",
            div { class: "header-content",
                h1 { class: "wordmark", "TubeMind" }
                IngestBar { store }
            }
        }
    }
}
