use crate::api::{AnswerService, TubeMindClient};
use crate::conversation::ConversationStore;
use crate::player::{VideoSurface, activate_source, activate_timestamp};
use crate::timestamps::{format_timestamp, tokenize};
use crate::types::{ChatMessage, MessageKind, Role, SourceClip, SummaryType};
use crate::views::shared::{copy_to_clipboard, format_message_time};
use crate::views::video::YouTubePlayer;
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn ChatPanel(mut store: Signal<ConversationStore>) -> Element {
    let client = use_context::<Signal<TubeMindClient>>();
    let player = YouTubePlayer;

    let mut send_question = move || {
        let Some(ticket) = store.with_mut(|s| s.submit_input()) else {
            return;
        };
        spawn(async move {
            let outcome = client().ask(&ticket.video_id, &ticket.question).await;
            store.with_mut(|s| s.resolve_question(ticket, outcome));
        });
    };

    let mut request_summary = move |summary_type: SummaryType| {
        let Some(ticket) = store.with_mut(|s| s.request_summary(summary_type)) else {
            return;
        };
        spawn(async move {
            let outcome = client()
                .summarize(&ticket.video_id, ticket.summary_type)
                .await;
            store.with_mut(|s| s.resolve_summary(ticket, outcome));
        });
    };

    let insert_current_time = move |_: MouseEvent| {
        spawn(async move {
            let Some(position) = player.current_time().await else {
                tracing::debug!("player position unavailable");
                return;
            };
            store.with_mut(|s| {
                let mut text = s.input().to_string();
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                text.push_str(&format!("[{}] ", format_timestamp(position)));
                s.set_input(text);
            });
        });
    };

    let (messages, input, has_video, can_submit, can_summarize, is_asking) = {
        let state = store.read();
        (
            state.messages().to_vec(),
            state.input().to_string(),
            state.video_id().is_some(),
            state.can_submit(),
            state.can_summarize(),
            state.is_asking(),
        )
    };
    let placeholder = if has_video {
        "Ask about the video..."
    } else {
        "Load a video to start chatting"
    };

    rsx! {
        div { class: "chat-panel",
            div { class: "chat-toolbar",
                for summary_type in SummaryType::ALL {
                    button {
                        key: "{summary_type}",
                        class: "btn",
                        r#type: "button",
                        disabled: !can_summarize,
                        onclick: move |_| request_summary(summary_type),
                        "{summary_type.label()}"
                    }
                }
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: messages.is_empty(),
                    onclick: move |_| store.with_mut(|s| s.clear()),
                    "New chat"
                }
            }
            div { id: "chat-list", class: "chat-list",
                if messages.is_empty() {
                    div { class: "empty-state",
                        if has_video {
                            "Ask a question or pick a summary to get started."
                        } else {
                            "Load a video to start chatting about it."
                        }
                    }
                }
                for message in messages.iter() {
                    MessageRow { key: "{message.id}", message: message.clone() }
                }
                if is_asking {
                    div { class: "message-row assistant",
                        span { class: "shimmer-text", "Thinking…" }
                    }
                }
            }
            form { class: "composer",
                onsubmit: move |ev: FormEvent| ev.prevent_default(),
                textarea {
                    rows: "1",
                    placeholder: "{placeholder}",
                    value: "{input}",
                    disabled: !has_video,
                    oninput: move |ev: FormEvent| store.with_mut(|s| s.set_input(ev.value())),
                    onkeydown: move |ev: KeyboardEvent| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            send_question();
                        }
                    },
                }
                button {
                    class: "btn",
                    r#type: "button",
                    title: "Insert the current video time",
                    disabled: !has_video,
                    onclick: insert_current_time,
                    "⏱"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !can_submit || input.trim().is_empty(),
                    onclick: move |_| send_question(),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage) -> Element {
    let row_class = match message.role {
        Role::User => "message-row user",
        Role::Assistant => "message-row assistant",
    };
    let bubble_class = match (message.role, message.kind) {
        (_, MessageKind::Error) => "bubble error",
        (Role::User, _) => "bubble user",
        (Role::Assistant, _) => "bubble assistant",
    };

    rsx! {
        div { class: row_class,
            div { class: "message-stack",
                if message.is_placeholder() {
                    span { class: "shimmer-text", "{message.content}" }
                } else if message.role == Role::Assistant {
                    div { class: bubble_class, AssistantBubble { message: message.clone() } }
                } else {
                    div { class: bubble_class, "{message.content}" }
                }
                if let Some(ts) = format_message_time(message.created_at) {
                    div { class: "message-meta",
                        span { class: "message-timestamp", "{ts}" }
                    }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(message: ChatMessage) -> Element {
    let copy_payload = message.content.clone();
    let on_copy = move |_: MouseEvent| copy_to_clipboard(copy_payload.clone());

    rsx! {
        if !message.is_error() {
            div { class: "bubble-controls",
                button { class: "action-btn", title: "Copy", onclick: on_copy, "Copy" }
            }
        }
        TimestampedText { text: message.content.clone() }
        if !message.key_points.is_empty() {
            ul { class: "key-points",
                for (index, point) in message.key_points.iter().enumerate() {
                    li { key: "{index}", TimestampedText { text: point.clone() } }
                }
            }
        }
        if !message.sources.is_empty() {
            div { class: "sources",
                span { class: "sources-title", "Sources" }
                for (index, clip) in message.sources.iter().enumerate() {
                    SourceChip { key: "{index}", clip: clip.clone() }
                }
            }
        }
    }
}

/// Message text with every `[MM:SS]` marker rendered as a seek button.
#[component]
fn TimestampedText(text: String) -> Element {
    let pieces: Vec<(String, Option<u32>)> = tokenize(&text)
        .iter()
        .map(|segment| (segment.as_str().to_string(), segment.seconds()))
        .collect();

    rsx! {
        div { class: "timestamped-text",
            for (label, seconds) in pieces {
                if let Some(seconds) = seconds {
                    button {
                        class: "timestamp-link",
                        r#type: "button",
                        onclick: move |_| activate_timestamp(&YouTubePlayer, seconds),
                        "{label}"
                    }
                } else {
                    span { "{label}" }
                }
            }
        }
    }
}

#[component]
fn SourceChip(clip: SourceClip) -> Element {
    let target = clip.clone();
    rsx! {
        button {
            class: "source-chip",
            r#type: "button",
            title: "Jump to {clip.timestamp}",
            onclick: move |_| activate_source(&YouTubePlayer, &target),
            span { class: "source-time", "{clip.timestamp}" }
            span { class: "source-text", "{clip.text}" }
        }
    }
}
