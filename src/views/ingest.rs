use crate::api::TubeMindClient;
use crate::conversation::ConversationStore;
use dioxus::events::Key;
use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
enum IngestStatus {
    Done(String),
    Failed(String),
}

#[component]
pub fn IngestBar(mut store: Signal<ConversationStore>) -> Element {
    let client = use_context::<Signal<TubeMindClient>>();
    let mut url = use_signal(String::new);
    let mut ingesting = use_signal(|| false);
    let mut status = use_signal(|| Option::<IngestStatus>::None);
    let mut known_videos = use_resource(move || async move { client().list_videos().await });

    let mut start_ingest = move || {
        let target = url().trim().to_string();
        if target.is_empty() || ingesting() {
            return;
        }
        ingesting.set(true);
        status.set(None);
        spawn(async move {
            match client().ingest(&target).await {
                Ok(receipt) => {
                    tracing::info!(
                        video_id = %receipt.video_id,
                        chunks = receipt.chunks_processed,
                        "video ingested"
                    );
                    store.with_mut(|s| s.set_video_id(Some(receipt.video_id.clone())));
                    status.set(Some(IngestStatus::Done(receipt.message)));
                    url.set(String::new());
                    known_videos.restart();
                }
                Err(err) => {
                    tracing::warn!(error = %err, "ingest failed");
                    status.set(Some(IngestStatus::Failed(err.to_string())));
                }
            }
            ingesting.set(false);
        });
    };

    let videos = match &*known_videos.read() {
        Some(Ok(list)) => list.clone(),
        Some(Err(err)) => {
            tracing::debug!(error = %err, "could not list ingested videos");
            Vec::new()
        }
        None => Vec::new(),
    };
    let current_video = store.read().video_id().unwrap_or_default().to_string();

    rsx! {
        div { class: "ingest-bar",
            input {
                r#type: "url",
                placeholder: "https://www.youtube.com/watch?v=...",
                value: "{url}",
                disabled: ingesting(),
                oninput: move |ev: FormEvent| url.set(ev.value()),
                onkeydown: move |ev: KeyboardEvent| {
                    if ev.key() == Key::Enter {
                        ev.prevent_default();
                        start_ingest();
                    }
                },
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: ingesting() || url().trim().is_empty(),
                onclick: move |_| start_ingest(),
                if ingesting() { "Ingesting…" } else { "Load video" }
            }
            if !videos.is_empty() {
                select {
                    class: "video-picker",
                    value: "{current_video}",
                    onchange: move |ev: FormEvent| {
                        let id = ev.value();
                        if !id.is_empty() {
                            store.with_mut(|s| s.set_video_id(Some(id)));
                        }
                    },
                    option { value: "", disabled: true, "Previously ingested" }
                    for id in videos {
                        option { key: "{id}", value: "{id}", "{id}" }
                    }
                }
            }
            if let Some(IngestStatus::Done(message)) = status() {
                span { class: "ingest-status", "{message}" }
            }
            if let Some(IngestStatus::Failed(reason)) = status() {
                span { class: "ingest-status error", "Could not ingest video: {reason}" }
            }
        }
    }
}
