use crate::api::{Answer, ApiError, Summary};
use crate::types::{ChatMessage, MessageId, MessageKind, Role, SummaryType};
use time::OffsetDateTime;

const INGEST_HINT: &str = "Make sure the video has been ingested first.";

/// Identifies one issued request; later requests always get larger tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight(RequestToken),
}

impl RequestState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, RequestState::InFlight(_))
    }
}

/// Everything needed to perform a question request and report back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AskTicket {
    pub token: RequestToken,
    pub video_id: String,
    pub question: String,
}

/// Everything needed to perform a summary request and report back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryTicket {
    pub token: RequestToken,
    pub video_id: String,
    pub summary_type: SummaryType,
    pub placeholder: MessageId,
}

/// Message log of one chat panel plus the state of its two request flows.
///
/// Issuing a request appends to the log synchronously and hands back a ticket;
/// the caller performs the request and feeds the outcome to the matching
/// `resolve_*` method. Outcomes whose ticket no longer matches the in-flight
/// request of that kind are dropped.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<ChatMessage>,
    input: String,
    video_id: Option<String>,
    ask: RequestState,
    summary: RequestState,
    next_message: u64,
    next_request: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// Switch the active video. The existing log is kept as is.
    pub fn set_video_id(&mut self, video_id: Option<String>) {
        if self.video_id != video_id {
            tracing::debug!(from = ?self.video_id, to = ?video_id, "active video changed");
        }
        self.video_id = video_id;
    }

    pub fn ask_state(&self) -> RequestState {
        self.ask
    }

    pub fn summary_state(&self) -> RequestState {
        self.summary
    }

    pub fn is_asking(&self) -> bool {
        self.ask.is_in_flight()
    }

    pub fn is_summarizing(&self) -> bool {
        self.summary.is_in_flight()
    }

    pub fn can_submit(&self) -> bool {
        self.video_id.is_some() && !self.is_asking()
    }

    pub fn can_summarize(&self) -> bool {
        self.video_id.is_some() && !self.is_summarizing()
    }

    /// Start a new conversation. Requests still in flight are abandoned and
    /// their outcomes will be ignored.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.input.clear();
        self.ask = RequestState::Idle;
        self.summary = RequestState::Idle;
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_input(&mut self) -> Option<AskTicket> {
        let text = self.input.clone();
        let ticket = self.submit_question(&text)?;
        self.input.clear();
        Some(ticket)
    }

    /// Append the user's question and mark a question request in flight.
    ///
    /// Returns `None` without touching the log when the text is blank, no video
    /// is active, or a question is already being answered.
    pub fn submit_question(&mut self, text: &str) -> Option<AskTicket> {
        if text.trim().is_empty() {
            tracing::debug!("ignoring blank question");
            return None;
        }
        let Some(video_id) = self.video_id.clone() else {
            tracing::debug!("ignoring question without an active video");
            return None;
        };
        if self.is_asking() {
            tracing::debug!("ignoring question while another is in flight");
            return None;
        }

        self.push(Role::User, MessageKind::Normal, text.to_string());

        let token = self.issue();
        self.ask = RequestState::InFlight(token);
        Some(AskTicket {
            token,
            video_id,
            question: text.to_string(),
        })
    }

    /// Append the answer (or an error bubble) for `ticket`.
    ///
    /// Returns `false` if the ticket is stale and nothing changed.
    pub fn resolve_question(
        &mut self,
        ticket: AskTicket,
        outcome: Result<Answer, ApiError>,
    ) -> bool {
        if self.ask != RequestState::InFlight(ticket.token) {
            tracing::debug!(token = ?ticket.token, "dropping stale answer");
            return false;
        }
        self.ask = RequestState::Idle;

        match outcome {
            Ok(answer) => {
                let id = self.push(Role::Assistant, MessageKind::Normal, answer.answer);
                self.with_message(id, |msg| msg.sources = answer.sources);
            }
            Err(err) => {
                tracing::warn!(error = %err, "question failed");
                self.push(
                    Role::Assistant,
                    MessageKind::Error,
                    format!(
                        "Sorry, I couldn't answer that: {}. {INGEST_HINT}",
                        failure_reason(&err)
                    ),
                );
            }
        }
        true
    }

    /// Append a summary placeholder and mark a summary request in flight.
    pub fn request_summary(&mut self, summary_type: SummaryType) -> Option<SummaryTicket> {
        let Some(video_id) = self.video_id.clone() else {
            tracing::debug!("ignoring summary request without an active video");
            return None;
        };
        if self.is_summarizing() {
            tracing::debug!("ignoring summary request while another is in flight");
            return None;
        }

        let placeholder = self.push(
            Role::Assistant,
            MessageKind::SummaryPlaceholder,
            format!("Generating {summary_type} summary..."),
        );

        let token = self.issue();
        self.summary = RequestState::InFlight(token);
        Some(SummaryTicket {
            token,
            video_id,
            summary_type,
            placeholder,
        })
    }

    /// Replace the ticket's placeholder with the summary or an error bubble.
    ///
    /// The placeholder is found by id, so messages appended since the request
    /// was issued stay where they are.
    pub fn resolve_summary(
        &mut self,
        ticket: SummaryTicket,
        outcome: Result<Summary, ApiError>,
    ) -> bool {
        if self.summary != RequestState::InFlight(ticket.token) {
            tracing::debug!(token = ?ticket.token, "dropping stale summary");
            return false;
        }
        self.summary = RequestState::Idle;

        let (kind, content, sources, key_points) = match outcome {
            Ok(summary) => (
                MessageKind::SummaryResult,
                summary.summary,
                summary.sources,
                summary.key_points,
            ),
            Err(err) => {
                tracing::warn!(error = %err, summary_type = %ticket.summary_type, "summary failed");
                (
                    MessageKind::Error,
                    format!(
                        "Failed to generate summary: {}. {INGEST_HINT}",
                        failure_reason(&err)
                    ),
                    Vec::new(),
                    Vec::new(),
                )
            }
        };

        let replaced = self.with_message(ticket.placeholder, |msg| {
            msg.kind = kind;
            msg.content = content;
            msg.sources = sources;
            msg.key_points = key_points;
            msg.created_at = Some(OffsetDateTime::now_utc());
        });
        if !replaced {
            tracing::warn!(placeholder = %ticket.placeholder, "summary placeholder missing");
        }
        replaced
    }

    fn issue(&mut self) -> RequestToken {
        self.next_request += 1;
        RequestToken(self.next_request)
    }

    fn push(&mut self, role: Role, kind: MessageKind, content: String) -> MessageId {
        self.next_message += 1;
        let id = MessageId(self.next_message);
        self.messages.push(ChatMessage {
            id,
            role,
            kind,
            content,
            sources: Vec::new(),
            key_points: Vec::new(),
            created_at: Some(OffsetDateTime::now_utc()),
        });
        id
    }

    fn with_message(&mut self, id: MessageId, update: impl FnOnce(&mut ChatMessage)) -> bool {
        match self.messages.iter_mut().find(|msg| msg.id == id) {
            Some(msg) => {
                update(msg);
                true
            }
            None => false,
        }
    }
}

/// Error text without trailing punctuation, ready to be followed by a period.
fn failure_reason(err: &ApiError) -> String {
    err.to_string().trim_end().trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceClip;

    fn store_with_video() -> ConversationStore {
        let mut store = ConversationStore::new();
        store.set_video_id(Some("vid123".to_string()));
        store
    }

    fn answer(text: &str) -> Answer {
        Answer {
            answer: text.to_string(),
            sources: vec![SourceClip {
                start_time: 135,
                timestamp: "02:15".to_string(),
                text: "excerpt...".to_string(),
            }],
        }
    }

    fn summary(text: &str) -> Summary {
        Summary {
            summary: text.to_string(),
            sources: Vec::new(),
            key_points: vec!["[00:10] first".to_string()],
        }
    }

    fn failure() -> ApiError {
        ApiError::Status {
            status: 404,
            detail: "Video vid123 not found. Please ingest it first.".to_string(),
        }
    }

    #[test]
    fn test_blank_question_is_ignored() {
        let mut store = store_with_video();
        assert!(store.submit_question("").is_none());
        assert!(store.submit_question("   ").is_none());
        assert!(store.messages().is_empty());
        assert!(!store.is_asking());
    }

    #[test]
    fn test_question_without_video_is_ignored() {
        let mut store = ConversationStore::new();
        store.set_input("what happens?");
        assert!(store.submit_input().is_none());
        assert!(store.messages().is_empty());
        assert_eq!(store.input(), "what happens?");
    }

    #[test]
    fn test_direct_question_keeps_composer_text() {
        let mut store = store_with_video();
        store.set_input("half-typed draft");
        let ticket = store.submit_question("from a shortcut?").unwrap();

        assert_eq!(ticket.question, "from a shortcut?");
        assert_eq!(store.input(), "half-typed draft");
    }

    #[test]
    fn test_summary_error_has_single_period_before_hint() {
        let mut store = store_with_video();
        let ticket = store.request_summary(SummaryType::Brief).unwrap();
        store.resolve_summary(ticket, Err(failure()));

        let reply = store.messages().last().unwrap();
        assert_eq!(
            reply.content,
            format!(
                "Failed to generate summary: server returned 404: \
                 Video vid123 not found. Please ingest it first. {INGEST_HINT}"
            )
        );
    }

    #[test]
    fn test_question_appends_user_then_answer() {
        let mut store = store_with_video();
        store.set_input("What is this about?");
        let ticket = store.submit_input().unwrap();

        assert_eq!(ticket.video_id, "vid123");
        assert_eq!(ticket.question, "What is this about?");
        assert_eq!(store.input(), "");
        assert!(store.is_asking());
        assert!(!store.can_submit());
        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].role, Role::User);

        assert!(store.resolve_question(ticket, Ok(answer("It is about [02:15] cats"))));
        assert!(!store.is_asking());

        let reply = &store.messages()[1];
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.kind, MessageKind::Normal);
        assert_eq!(reply.content, "It is about [02:15] cats");
        assert_eq!(reply.sources.len(), 1);
    }

    #[test]
    fn test_failed_question_appends_error_without_sources() {
        let mut store = store_with_video();
        let ticket = store.submit_question("why?").unwrap();
        store.resolve_question(ticket, Err(failure()));

        let reply = store.messages().last().unwrap();
        assert!(reply.is_error());
        assert!(reply.sources.is_empty());
        assert!(reply.content.contains("Video vid123 not found"));
        assert!(reply.content.ends_with(INGEST_HINT));
        assert!(!reply.content.contains(".."));
        assert!(!store.is_asking());
    }

    #[test]
    fn test_second_question_waits_for_first() {
        let mut store = store_with_video();
        let first = store.submit_question("one").unwrap();
        assert!(store.submit_question("two").is_none());
        assert_eq!(store.messages().len(), 1);

        store.resolve_question(first, Ok(answer("a")));
        let second = store.submit_question("two").unwrap();
        store.resolve_question(second, Ok(answer("b")));

        let roles: Vec<Role> = store.messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
    }

    #[test]
    fn test_summary_replaces_placeholder() {
        let mut store = store_with_video();
        let ticket = store.request_summary(SummaryType::Brief).unwrap();

        assert!(store.is_summarizing());
        let placeholder = store.messages().last().unwrap();
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.content, "Generating brief summary...");
        let len_after_issue = store.messages().len();

        assert!(store.resolve_summary(ticket, Ok(summary("All about cats."))));
        assert_eq!(store.messages().len(), len_after_issue);

        let result = store.messages().last().unwrap();
        assert_eq!(result.kind, MessageKind::SummaryResult);
        assert_eq!(result.content, "All about cats.");
        assert_eq!(result.key_points, vec!["[00:10] first"]);
        assert!(!store.is_summarizing());
    }

    #[test]
    fn test_failed_summary_replaces_placeholder_with_error() {
        let mut store = store_with_video();
        let ticket = store.request_summary(SummaryType::BulletPoints).unwrap();
        assert_eq!(
            store.messages()[0].content,
            "Generating bullet_points summary..."
        );

        store.resolve_summary(ticket, Err(ApiError::Transport("connection refused".into())));
        assert_eq!(store.messages().len(), 1);
        let result = &store.messages()[0];
        assert!(result.is_error());
        assert!(result.content.contains("connection refused"));
    }

    #[test]
    fn test_summary_requests_are_serialized() {
        let mut store = store_with_video();
        let _ticket = store.request_summary(SummaryType::Brief).unwrap();
        assert!(!store.can_summarize());
        assert!(store.request_summary(SummaryType::Detailed).is_none());
        assert_eq!(store.messages().len(), 1);
    }

    #[test]
    fn test_summary_resolves_by_id_after_interleaved_question() {
        let mut store = store_with_video();
        let summary_ticket = store.request_summary(SummaryType::Detailed).unwrap();
        let ask_ticket = store.submit_question("and then?").unwrap();
        store.resolve_question(ask_ticket, Ok(answer("then this")));

        store.resolve_summary(summary_ticket, Ok(summary("the summary")));

        let kinds: Vec<MessageKind> = store.messages().iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MessageKind::SummaryResult,
                MessageKind::Normal,
                MessageKind::Normal
            ]
        );
        assert_eq!(store.messages()[2].content, "then this");
    }

    #[test]
    fn test_clear_discards_stale_outcomes() {
        let mut store = store_with_video();
        let ask_ticket = store.submit_question("old question").unwrap();
        let summary_ticket = store.request_summary(SummaryType::Brief).unwrap();

        store.clear();
        assert!(store.messages().is_empty());
        assert!(store.can_submit());

        let fresh = store.submit_question("new question").unwrap();
        assert!(!store.resolve_question(ask_ticket, Ok(answer("old answer"))));
        assert!(!store.resolve_summary(summary_ticket, Ok(summary("old summary"))));
        assert_eq!(store.messages().len(), 1);
        assert!(store.is_asking());

        assert!(store.resolve_question(fresh, Ok(answer("new answer"))));
        assert_eq!(store.messages()[1].content, "new answer");
    }

    #[test]
    fn test_changing_video_keeps_log() {
        let mut store = store_with_video();
        let ticket = store.submit_question("q").unwrap();
        store.resolve_question(ticket, Ok(answer("a")));

        store.set_video_id(Some("other".to_string()));
        assert_eq!(store.messages().len(), 2);

        store.set_video_id(None);
        assert_eq!(store.messages().len(), 2);
        assert!(!store.can_submit());
        assert!(!store.can_summarize());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut store = store_with_video();
        let ticket = store.submit_question("q").unwrap();
        store.resolve_question(ticket, Ok(answer("a")));
        let ticket = store.request_summary(SummaryType::Brief).unwrap();
        store.resolve_summary(ticket, Ok(summary("s")));

        let ids: Vec<MessageId> = store.messages().iter().map(|m| m.id).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
