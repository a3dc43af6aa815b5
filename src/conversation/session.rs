use super::store::ConversationStore;
use crate::api::AnswerService;
use crate::types::{ChatMessage, SummaryType};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

/// A [`ConversationStore`] driven against an [`AnswerService`] on a tokio runtime.
///
/// The store sits behind one mutex. Requests are issued and resolved under the
/// lock but awaited outside it, so log mutations land in the order their
/// completions arrive.
///
/// This is the driver for multi-threaded tokio runtimes. The Dioxus chat panel
/// runs the same issue/await/resolve steps on its own single-threaded executor
/// against a `Signal<ConversationStore>`.
pub struct ChatSession<S> {
    store: Arc<Mutex<ConversationStore>>,
    service: Arc<S>,
}

impl<S> Clone for ChatSession<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: AnswerService + 'static> ChatSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(ConversationStore::new())),
            service: Arc::new(service),
        }
    }

    pub fn store(&self) -> MutexGuard<'_, ConversationStore> {
        lock(&self.store)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.store().messages().to_vec()
    }

    pub fn set_video_id(&self, video_id: Option<String>) {
        self.store().set_video_id(video_id);
    }

    /// Append the question and answer it in the background.
    ///
    /// `None` means the question was rejected and nothing was sent.
    pub fn submit_question(&self, text: &str) -> Option<JoinHandle<()>> {
        let ticket = self.store().submit_question(text)?;
        let store = Arc::clone(&self.store);
        let service = Arc::clone(&self.service);
        Some(tokio::spawn(async move {
            let outcome = service.ask(&ticket.video_id, &ticket.question).await;
            lock(&store).resolve_question(ticket, outcome);
        }))
    }

    /// Post a summary placeholder and fill it in the background.
    pub fn request_summary(&self, summary_type: SummaryType) -> Option<JoinHandle<()>> {
        let ticket = self.store().request_summary(summary_type)?;
        let store = Arc::clone(&self.store);
        let service = Arc::clone(&self.service);
        Some(tokio::spawn(async move {
            let outcome = service
                .summarize(&ticket.video_id, ticket.summary_type)
                .await;
            lock(&store).resolve_summary(ticket, outcome);
        }))
    }
}

fn lock(store: &Mutex<ConversationStore>) -> MutexGuard<'_, ConversationStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}
