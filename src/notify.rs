//! `POST /api/notify`: turns a first-visit notification from the browser into
//! an email sent through the Resend API.

use std::{future::Future, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use http::StatusCode;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::visitor::{is_bot, NotificationPayload, NOTIFY_ENDPOINT};

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const API_KEY_VAR: &str = "RESEND_API_KEY";
const RECIPIENT_VAR: &str = "NOTIFY_TO";
const SENDER_VAR: &str = "NOTIFY_FROM";
const DEFAULT_SENDER: &str = "onboarding@resend.dev";
const DEFAULT_RECIPIENT: &str = "ibrahim.elsawalhi@outlook.com";

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("{0} not configured")]
    MissingConfig(&'static str),
    #[error("Failed to send email")]
    Upstream { status: StatusCode, details: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        match self {
            Self::Upstream { status, details } => {
                (status, Json(json!({ "error": error, "details": details }))).into_response()
            }
            Self::MissingConfig(_) | Self::Transport(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": error })))
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorEmail {
    pub subject: String,
    pub html: String,
}

impl VisitorEmail {
    pub fn new(payload: &NotificationPayload) -> Self {
        Self {
            subject: format!("New Visitor: {}", payload.device_type),
            html: format!(
                "<p>A new visitor has visited your website.</p>\
                 <p><strong>Device Type:</strong> {}</p>\
                 <p><strong>User Agent:</strong> {}</p>",
                payload.device_type,
                escape_html(&payload.user_agent),
            ),
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

pub trait Mailer: Send + Sync + 'static {
    fn send(&self, email: VisitorEmail) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Sends through Resend. Only the API key is required; `NOTIFY_TO` and
/// `NOTIFY_FROM` override the default addresses. The environment is read on
/// every send, so a key added after startup is picked up.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
}

impl Default for ResendMailer {
    fn default() -> Self {
        Self::new(RESEND_API_URL)
    }
}

impl ResendMailer {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }
}

fn env_var(name: &'static str) -> Result<String, NotifyError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(NotifyError::MissingConfig(name))
}

impl Mailer for ResendMailer {
    async fn send(&self, email: VisitorEmail) -> Result<(), NotifyError> {
        let api_key = env_var(API_KEY_VAR)?;
        let to = env_var(RECIPIENT_VAR).unwrap_or_else(|_| DEFAULT_RECIPIENT.to_string());
        let from = env_var(SENDER_VAR).unwrap_or_else(|_| DEFAULT_SENDER.to_string());

        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&ResendEmail {
                from: &from,
                to: &to,
                subject: &email.subject,
                html: &email.html,
            })
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let details = res.text().await.unwrap_or_default();
            return Err(NotifyError::Upstream { status, details });
        }
        Ok(())
    }
}

pub fn router<M: Mailer>(mailer: M) -> Router {
    Router::new()
        .route(NOTIFY_ENDPOINT, post(notify::<M>))
        .with_state(Arc::new(mailer))
}

async fn notify<M: Mailer>(
    State(mailer): State<Arc<M>>,
    body: Result<Json<NotificationPayload>, JsonRejection>,
) -> Response {
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!("rejected notify request: {}", rejection.body_text());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    if is_bot(&payload.user_agent) {
        tracing::info!("bot detected, notification skipped");
        return Json(json!({
            "success": false,
            "message": "Bot detected, notification skipped",
        }))
        .into_response();
    }

    let email = VisitorEmail::new(&payload);
    match mailer.send(email).await {
        Ok(()) => {
            tracing::info!(device_type = %payload.device_type, "visitor notification sent");
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => {
            tracing::error!("visitor notification failed: {e}");
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::body::{to_bytes, Body};
    use http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::visitor::DeviceType;

    #[derive(Clone, Copy)]
    enum Outcome {
        Sent,
        NoKey,
        Rejected,
    }

    struct FakeMailer {
        outcome: Outcome,
        sent: Arc<Mutex<Vec<VisitorEmail>>>,
    }

    impl Mailer for FakeMailer {
        async fn send(&self, email: VisitorEmail) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(email);
            match self.outcome {
                Outcome::Sent => Ok(()),
                Outcome::NoKey => Err(NotifyError::MissingConfig(API_KEY_VAR)),
                Outcome::Rejected => Err(NotifyError::Upstream {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    details: "invalid from address".to_string(),
                }),
            }
        }
    }

    fn app(outcome: Outcome) -> (Router, Arc<Mutex<Vec<VisitorEmail>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mailer = FakeMailer {
            outcome,
            sent: sent.clone(),
        };
        (router(mailer), sent)
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(NOTIFY_ENDPOINT)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_email_format() {
        let email = VisitorEmail::new(&NotificationPayload {
            device_type: DeviceType::Mobile,
            user_agent: "Mozilla/5.0 <script>".to_string(),
        });
        assert_eq!(email.subject, "New Visitor: Mobile");
        assert!(email.html.contains("<strong>Device Type:</strong> Mobile"));
        assert!(email.html.contains("Mozilla/5.0 &lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_notify_sends_email() {
        let (app, sent) = app(Outcome::Sent);
        let (status, body) = post_json(
            app,
            r#"{"deviceType":"Desktop","userAgent":"Mozilla/5.0 (Windows NT 10.0)"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "New Visitor: Desktop");
    }

    #[tokio::test]
    async fn test_notify_skips_bots() {
        let (app, sent) = app(Outcome::Sent);
        let (status, body) = post_json(
            app,
            r#"{"deviceType":"Desktop","userAgent":"Mozilla/5.0 (compatible; Googlebot/2.1)"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Bot detected, notification skipped"));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notify_missing_key() {
        let (app, _) = app(Outcome::NoKey);
        let (status, body) = post_json(
            app,
            r#"{"deviceType":"Mobile","userAgent":"Mozilla/5.0 (Linux; Android 10)"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "RESEND_API_KEY not configured" }));
    }

    #[tokio::test]
    async fn test_notify_upstream_failure_passes_status() {
        let (app, _) = app(Outcome::Rejected);
        let (status, body) = post_json(
            app,
            r#"{"deviceType":"Mobile","userAgent":"Mozilla/5.0 (Linux; Android 10)"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], json!("Failed to send email"));
        assert_eq!(body["details"], json!("invalid from address"));
    }

    #[tokio::test]
    async fn test_notify_malformed_body() {
        let (app, sent) = app(Outcome::Sent);
        let (status, body) = post_json(app, r#"{"deviceType":"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
        assert!(sent.lock().unwrap().is_empty());
    }

    // tests below share process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // nothing listens on the discard port, so the request fails to connect
    const UNREACHABLE_API: &str = "http://127.0.0.1:9/emails";

    fn test_email() -> VisitorEmail {
        VisitorEmail {
            subject: "s".to_string(),
            html: "h".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resend_mailer_requires_key() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var(API_KEY_VAR);
        let mailer = ResendMailer::new(UNREACHABLE_API);
        let err = mailer.send(test_email()).await.unwrap_err();
        assert!(matches!(err, NotifyError::MissingConfig(API_KEY_VAR)));
    }

    #[tokio::test]
    async fn test_resend_mailer_needs_only_api_key() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var(API_KEY_VAR, "re_test");
        std::env::remove_var(RECIPIENT_VAR);
        std::env::remove_var(SENDER_VAR);
        let mailer = ResendMailer::new(UNREACHABLE_API);
        // config is complete, so the failure comes from the connection
        let err = mailer.send(test_email()).await.unwrap_err();
        std::env::remove_var(API_KEY_VAR);
        assert!(matches!(err, NotifyError::Transport(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_transport_failure_is_server_error() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var(API_KEY_VAR, "re_test");
        let mailer = ResendMailer::new(UNREACHABLE_API);
        let err = mailer.send(test_email()).await.unwrap_err();
        std::env::remove_var(API_KEY_VAR);
        assert!(matches!(err, NotifyError::Transport(_)), "{err:?}");

        let message = err.to_string();
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": message }));
    }
}
