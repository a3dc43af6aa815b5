//! Integration tests for the TubeMind backend client
//!
//! Runs the client against a mock HTTP server speaking the backend's wire format

use serde_json::json;
use tubemind::api::{AnswerService, ApiError, TubeMindClient};
use tubemind::conversation::ConversationStore;
use tubemind::types::{MessageKind, SummaryType};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod ask_tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_posts_question_and_parses_sources() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .and(body_json(json!({"video_id": "vid123", "question": "What happens?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "answer": "The cat jumps at [02:15].",
                "sources": [
                    {"text": "and then the cat...", "timestamp": "02:15", "start_time": 135.48}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TubeMindClient::new(server.uri());
        let answer = client.ask("vid123", "What happens?").await.unwrap();

        assert_eq!(answer.answer, "The cat jumps at [02:15].");
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].start_time, 135);
        assert_eq!(answer.sources[0].timestamp, "02:15");
    }

    #[tokio::test]
    async fn test_ask_surfaces_fastapi_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "detail": "Video vid123 not found. Please ingest it first."
            })))
            .mount(&server)
            .await;

        let client = TubeMindClient::new(server.uri());
        let err = client.ask("vid123", "hello?").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                detail: "Video vid123 not found. Please ingest it first.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = TubeMindClient::new(server.uri());
        let err = client.ask("vid123", "hello?").await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                detail: "Bad Gateway".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "nope"})))
            .mount(&server)
            .await;

        let client = TubeMindClient::new(server.uri());
        let err = client.ask("vid123", "hello?").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        // Reserve a free port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = TubeMindClient::new(format!("http://{addr}"));
        let err = client.ask("vid123", "hello?").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("network error"));
    }
}

mod summary_tests {
    use super::*;

    #[tokio::test]
    async fn test_summary_posts_type_and_flattens_key_points() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summary"))
            .and(body_json(json!({"video_id": "vid123", "summary_type": "bullet_points"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": "- cats\n- dogs",
                "key_points": [
                    {"point": "Cats appear...", "timestamp": "00:42", "start_time": 42.0}
                ],
                "sources": [
                    {"text": "cats...", "timestamp": "00:42", "start_time": 42.0}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TubeMindClient::new(server.uri());
        let summary = client
            .summarize("vid123", SummaryType::BulletPoints)
            .await
            .unwrap();

        assert_eq!(summary.summary, "- cats\n- dogs");
        assert_eq!(summary.key_points, vec!["[00:42] Cats appear..."]);
        assert_eq!(summary.sources[0].start_time, 42);
    }
}

mod ingest_tests {
    use super::*;

    #[tokio::test]
    async fn test_ingest_and_list_videos() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ingest"))
            .and(body_json(json!({"url": "https://youtu.be/dQw4w9WgXcQ"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "video_id": "dQw4w9WgXcQ",
                "chunks_processed": 12,
                "message": "Video ingested successfully! Processed 12 chunks."
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "videos": ["dQw4w9WgXcQ"],
                "count": 1
            })))
            .mount(&server)
            .await;

        let client = TubeMindClient::new(format!("{}/", server.uri()));
        let receipt = client.ingest("https://youtu.be/dQw4w9WgXcQ").await.unwrap();
        assert_eq!(receipt.video_id, "dQw4w9WgXcQ");
        assert_eq!(receipt.chunks_processed, 12);

        let videos = client.list_videos().await.unwrap();
        assert_eq!(videos, vec!["dQw4w9WgXcQ"]);
    }

    #[tokio::test]
    async fn test_ingest_rejects_bad_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ingest"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "Invalid YouTube URL. Could not extract video ID."
            })))
            .mount(&server)
            .await;

        let client = TubeMindClient::new(server.uri());
        let err = client.ingest("not a url").await.unwrap_err();
        assert!(err.to_string().contains("Invalid YouTube URL"));
    }
}

mod store_with_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_answer_becomes_error_bubble() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ask"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "detail": "Video vid123 not found. Please ingest it first."
            })))
            .mount(&server)
            .await;

        let client = TubeMindClient::new(server.uri());
        let mut store = ConversationStore::new();
        store.set_video_id(Some("vid123".to_string()));

        let ticket = store.submit_question("anyone there?").unwrap();
        let outcome = client.ask(&ticket.video_id, &ticket.question).await;
        assert!(store.resolve_question(ticket, outcome));

        let last = store.messages().last().unwrap();
        assert_eq!(last.kind, MessageKind::Error);
        assert!(last.content.contains("Video vid123 not found"));
        assert!(last.content.contains("Make sure the video has been ingested first."));
        assert!(last.sources.is_empty());
    }
}
