use crate::credentials::CredentialProvider;
use crate::types::{
    AnswerRequest, AnswerResponse, EndInterviewResponse, StartInterviewRequest,
    StartInterviewResponse, UserProfile,
};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};

mod config;
mod consts;
mod stats;
mod utils;

pub use config::{Config, ConfigBuilder};
pub use stats::Stats;

/// Failure of a single call to the interview service.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The credential could not be obtained, or the service rejected it.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Non-2xx response (`status` set) or no response at all (`status` is `None`).
    #[error("{message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },
    /// 2xx response whose body does not match the contract.
    #[error("invalid response body: {0}")]
    Decode(String),
}

// Holds the HTTP client, configuration, the credential source,
// and stats guarded by a Mutex.
pub struct Client {
    http: reqwest::Client,
    config: Config,
    credentials: Arc<dyn CredentialProvider>,
    stats: Arc<Mutex<Stats>>,
}

impl Client {
    pub fn new(
        config: Config,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Remote {
                status: None,
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            config,
            credentials,
            stats: Arc::new(Mutex::new(Stats::new())),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // Return a copy of the request stats.
    pub fn stats(&self) -> anyhow::Result<Stats> {
        if let Ok(stats_guard) = self.stats.lock() {
            Ok(stats_guard.clone())
        } else {
            Err(anyhow::anyhow!("failed to get stats"))
        }
    }

    pub async fn start_interview(
        &self,
        request: &StartInterviewRequest,
    ) -> Result<StartInterviewResponse, TransportError> {
        let builder = self
            .http
            .post(self.config.endpoint(consts::START_PATH))
            .json(request);
        self.send(builder, "start").await
    }

    pub async fn submit_answer(
        &self,
        request: &AnswerRequest,
    ) -> Result<AnswerResponse, TransportError> {
        let builder = self
            .http
            .post(self.config.endpoint(consts::ANSWER_PATH))
            .json(request);
        self.send(builder, "answer").await
    }

    pub async fn end_interview(
        &self,
        interview_id: &str,
    ) -> Result<EndInterviewResponse, TransportError> {
        let builder = self
            .http
            .post(self.config.endpoint(consts::END_PATH))
            .query(&[("interview_id", interview_id)])
            .json(&serde_json::json!({}));
        self.send(builder, "end").await
    }

    pub async fn profile(&self) -> Result<UserProfile, TransportError> {
        let builder = self.http.get(self.config.endpoint(consts::PROFILE_PATH));
        self.send(builder, "profile").await
    }

    /// Attach a freshly obtained credential, send, and decode the response.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
    ) -> Result<T, TransportError> {
        let token = self.credentials.token().await.map_err(|e| {
            tracing::error!("failed to obtain credential for {}: {:#}", operation, e);
            TransportError::Auth(format!("{e:#}"))
        })?;

        tracing::debug!("sending {} request", operation);
        let response = match builder.bearer_auth(token.expose_secret()).send().await {
            Ok(response) => response,
            Err(e) => {
                self.record(None, true);
                tracing::error!("{} request failed: {}", operation, e);
                return Err(TransportError::Remote {
                    status: None,
                    message: e.to_string(),
                });
            }
        };
        drop(token);

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            self.record(Some(status.as_u16()), true);
            TransportError::Remote {
                status: Some(status.as_u16()),
                message: e.to_string(),
            }
        })?;
        self.record(Some(status.as_u16()), !status.is_success());
        tracing::debug!("{} response: status={}", operation, status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(TransportError::Auth(utils::error_message(status, &body)));
        }
        if !status.is_success() {
            let message = utils::error_message(status, &body);
            tracing::error!("{} rejected ({}): {}", operation, status, message);
            return Err(TransportError::Remote {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("failed to decode {} response: {}, body=> {:?}", operation, e, body);
            TransportError::Decode(e.to_string())
        })
    }

    fn record(&self, status: Option<u16>, failed: bool) {
        if let Ok(mut stats_guard) = self.stats.lock() {
            stats_guard.record(status, failed);
        } else {
            tracing::error!("failed to update stats");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticToken;
    use crate::types::Summary;
    use async_trait::async_trait;
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use secrecy::SecretString;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct Seen {
        auth_headers: Arc<Mutex<Vec<String>>>,
        end_ids: Arc<Mutex<Vec<String>>>,
    }

    fn remember_auth(seen: &Seen, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        seen.auth_headers.lock().unwrap().push(value);
    }

    async fn start(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(body): Json<StartInterviewRequest>,
    ) -> Json<serde_json::Value> {
        remember_auth(&seen, &headers);
        Json(serde_json::json!({
            "message": "Interview started successfully",
            "interview_id": format!("id-{}", body.role().len()),
            "first_question": format!("Tell me about {} work.", body.role()),
        }))
    }

    async fn answer(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(body): Json<AnswerRequest>,
    ) -> (AxumStatus, Json<serde_json::Value>) {
        remember_auth(&seen, &headers);
        match body.interview_id() {
            "missing" => (
                AxumStatus::NOT_FOUND,
                Json(serde_json::json!({ "detail": "Interview not found." })),
            ),
            "broken" => (AxumStatus::INTERNAL_SERVER_ERROR, Json(serde_json::json!({}))),
            "garbled" => (AxumStatus::OK, Json(serde_json::json!({ "unexpected": true }))),
            _ => (
                AxumStatus::OK,
                Json(serde_json::json!({
                    "display_feedback": format!("You said: {}", body.answer_text()),
                    "next_question": "What would you change?",
                })),
            ),
        }
    }

    async fn end(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        remember_auth(&seen, &headers);
        seen.end_ids
            .lock()
            .unwrap()
            .push(params.get("interview_id").cloned().unwrap_or_default());
        Json(serde_json::json!({
            "message": "Interview ended successfully.",
            "overall_feedback": {
                "overall_assessment": "Good",
                "strengths": ["Concise"],
                "weaknesses": [],
                "areas_for_improvement": ["Depth"],
                "general_recommendation": "Practice system design."
            }
        }))
    }

    async fn profile(headers: HeaderMap) -> (AxumStatus, Json<serde_json::Value>) {
        let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
        if auth == Some("Bearer expired") {
            return (
                AxumStatus::UNAUTHORIZED,
                Json(serde_json::json!({ "detail": "Not authenticated" })),
            );
        }
        (
            AxumStatus::OK,
            Json(serde_json::json!({
                "uid": "u-1",
                "email": "candidate@example.com",
                "display_name": null,
                "created_at": "2025-01-01T00:00:00"
            })),
        )
    }

    async fn serve(seen: Seen) -> String {
        let app = Router::new()
            .route("/interview/start", post(start))
            .route("/interview/answer", post(answer))
            .route("/interview/end", post(end))
            .route("/user/profile", get(profile))
            .with_state(seen);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> Client {
        let config = Config::builder().with_base_url(base_url).build();
        Client::new(config, credentials).unwrap()
    }

    struct RotatingToken {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CredentialProvider for RotatingToken {
        async fn token(&self) -> anyhow::Result<SecretString> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(SecretString::from(format!("token-{n}")))
        }
    }

    struct DeniedToken;

    #[async_trait]
    impl CredentialProvider for DeniedToken {
        async fn token(&self) -> anyhow::Result<SecretString> {
            Err(anyhow::anyhow!("user is signed out"))
        }
    }

    #[tokio::test]
    async fn start_sends_bearer_token_and_decodes_response() {
        let seen = Seen::default();
        let base_url = serve(seen.clone()).await;
        let client = client(&base_url, Arc::new(StaticToken::new("secret-token")));

        let response = client
            .start_interview(&StartInterviewRequest::new("Backend Engineer", "3 years"))
            .await
            .unwrap();

        assert_eq!(response.interview_id(), "id-16");
        assert_eq!(response.first_question(), "Tell me about Backend Engineer work.");
        assert_eq!(
            seen.auth_headers.lock().unwrap().as_slice(),
            ["Bearer secret-token".to_string()]
        );
        let stats = client.stats().unwrap();
        assert_eq!(stats.requests_sent(), 1);
        assert_eq!(stats.requests_failed(), 0);
        assert_eq!(stats.last_status(), Some(200));
    }

    #[tokio::test]
    async fn credential_is_fetched_fresh_for_every_call() {
        let seen = Seen::default();
        let base_url = serve(seen.clone()).await;
        let client = client(
            &base_url,
            Arc::new(RotatingToken {
                calls: AtomicUsize::new(0),
            }),
        );

        client
            .submit_answer(&AnswerRequest::new("S1", "Q1", "first"))
            .await
            .unwrap();
        client
            .submit_answer(&AnswerRequest::new("S1", "Q2", "second"))
            .await
            .unwrap();

        assert_eq!(
            seen.auth_headers.lock().unwrap().as_slice(),
            ["Bearer token-1".to_string(), "Bearer token-2".to_string()]
        );
    }

    #[tokio::test]
    async fn error_detail_is_surfaced_with_status() {
        let base_url = serve(Seen::default()).await;
        let client = client(&base_url, Arc::new(StaticToken::new("t")));

        let err = client
            .submit_answer(&AnswerRequest::new("missing", "Q1", "answer"))
            .await
            .unwrap_err();
        match err {
            TransportError::Remote { status, message } => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "Interview not found.");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
        assert_eq!(client.stats().unwrap().requests_failed(), 1);
    }

    #[tokio::test]
    async fn missing_detail_falls_back_to_status_line() {
        let base_url = serve(Seen::default()).await;
        let client = client(&base_url, Arc::new(StaticToken::new("t")));

        let err = client
            .submit_answer(&AnswerRequest::new("broken", "Q1", "answer"))
            .await
            .unwrap_err();
        match err {
            TransportError::Remote { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "500 Internal Server Error");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_success_body_is_a_decode_error() {
        let base_url = serve(Seen::default()).await;
        let client = client(&base_url, Arc::new(StaticToken::new("t")));

        let err = client
            .submit_answer(&AnswerRequest::new("garbled", "Q1", "answer"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn end_passes_interview_id_as_query() {
        let seen = Seen::default();
        let base_url = serve(seen.clone()).await;
        let client = client(&base_url, Arc::new(StaticToken::new("t")));

        let response = client.end_interview("S-42").await.unwrap();

        assert_eq!(seen.end_ids.lock().unwrap().as_slice(), ["S-42".to_string()]);
        let summary: Summary = response.into_summary().expect("summary expected");
        assert_eq!(summary.overall_assessment(), "Good");
        assert_eq!(summary.areas_for_improvement(), ["Depth".to_string()]);
    }

    #[tokio::test]
    async fn credential_failure_never_reaches_the_network() {
        let seen = Seen::default();
        let base_url = serve(seen.clone()).await;
        let client = client(&base_url, Arc::new(DeniedToken));

        let err = client.profile().await.unwrap_err();

        assert!(matches!(err, TransportError::Auth(ref m) if m.contains("signed out")));
        assert!(seen.auth_headers.lock().unwrap().is_empty());
        assert_eq!(client.stats().unwrap().requests_sent(), 0);
    }

    #[tokio::test]
    async fn rejected_credential_is_an_auth_error() {
        let base_url = serve(Seen::default()).await;
        let client = client(&base_url, Arc::new(StaticToken::new("expired")));

        let err = client.profile().await.unwrap_err();
        assert!(matches!(err, TransportError::Auth(ref m) if m == "Not authenticated"), "got {err:?}");
        assert_eq!(client.stats().unwrap().last_status(), Some(401));
    }

    #[tokio::test]
    async fn profile_is_decoded() {
        let base_url = serve(Seen::default()).await;
        let client = client(&base_url, Arc::new(StaticToken::new("t")));

        let profile = client.profile().await.unwrap();
        assert_eq!(profile.uid(), "u-1");
        assert_eq!(profile.email(), "candidate@example.com");
        assert_eq!(profile.display_name(), None);
        assert_eq!(profile.created_at(), Some("2025-01-01T00:00:00"));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_remote_error_without_status() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client(&format!("http://{addr}"), Arc::new(StaticToken::new("t")));

        let err = client.end_interview("S1").await.unwrap_err();
        assert!(matches!(err, TransportError::Remote { status: None, .. }), "got {err:?}");
        let stats = client.stats().unwrap();
        assert_eq!(stats.requests_failed(), 1);
        assert_eq!(stats.last_status(), None);
    }
}
