//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Token every test bot uses
pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot whose API calls go to this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(TEST_BOT_TOKEN).set_api_url(url)
    }

    fn endpoint(api_method: &str) -> String {
        format!("/bot{}/{}", TEST_BOT_TOKEN, api_method)
    }

    /// Bot API method names are case-insensitive; teloxide sends them capitalized
    fn endpoint_matcher(api_method: &str) -> wiremock::matchers::PathRegexMatcher {
        path_regex(format!("(?i)^{}$", regex::escape(&Self::endpoint(api_method))))
    }

    async fn mount_ok(&self, api_method: &str, result: Value) {
        Mock::given(method("POST"))
            .and(Self::endpoint_matcher(api_method))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result })))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self) {
        self.mount_ok(
            "sendMessage",
            json!({
                "message_id": 123,
                "from": {
                    "id": 12345,
                    "is_bot": true,
                    "first_name": "TestBot",
                    "username": "test_bot"
                },
                "chat": {
                    "id": -1001234567890_i64,
                    "title": "Test Group",
                    "type": "supergroup"
                },
                "date": 1640995200,
                "text": "Test message"
            }),
        )
        .await;
    }

    /// Make sendMessage fail with a Telegram error description.
    ///
    /// Mounted with a higher priority than the default success mock.
    pub async fn mock_send_message_error(&self, description: &str) {
        Mock::given(method("POST"))
            .and(Self::endpoint_matcher("sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": description
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for answerCallbackQuery endpoint
    pub async fn mock_answer_callback_query(&self) {
        self.mount_ok("answerCallbackQuery", json!(true)).await;
    }

    /// Setup mock for answerInlineQuery endpoint
    pub async fn mock_answer_inline_query(&self) {
        self.mount_ok("answerInlineQuery", json!(true)).await;
    }

    /// Setup all common mocks with default success responses
    pub async fn setup_default_mocks(&self) {
        self.mock_send_message().await;
        self.mock_answer_callback_query().await;
        self.mock_answer_inline_query().await;
    }

    /// JSON bodies of every call made to `api_method`, in order
    pub async fn requests_to(&self, api_method: &str) -> Vec<Value> {
        let endpoint = Self::endpoint(api_method);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().eq_ignore_ascii_case(&endpoint))
            .map(|req| serde_json::from_slice(&req.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, api_method: &str, times: usize) {
        let calls = self.requests_to(api_method).await.len();
        assert_eq!(
            calls, times,
            "Expected {} calls to {}, but got {}",
            times, api_method, calls
        );
    }

    /// Texts of every sendMessage call, in order
    pub async fn sent_texts(&self) -> Vec<String> {
        self.requests_to("sendMessage")
            .await
            .iter()
            .map(|body| body["text"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}
