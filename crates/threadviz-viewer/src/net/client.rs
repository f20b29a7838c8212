use anyhow::Context;
use reqwest::StatusCode;
use threadviz_core::{ErrorBody, ThreadPayload};

use crate::error::ThreadError;
use crate::util::config::ViewerConfig;
use crate::util::ids::PostId;

pub const GENERIC_FAILURE: &str = "Failed to fetch comment thread";

/// HTTP access to the comment-thread endpoint.
#[derive(Debug, Clone)]
pub struct ThreadClient {
    http: reqwest::Client,
    config: ViewerConfig,
}

impl ThreadClient {
    pub fn new(config: &ViewerConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("threadviz/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub async fn fetch_thread(&self, post: &PostId) -> Result<ThreadPayload, ThreadError> {
        let url = self
            .config
            .thread_url(post)
            .map_err(|e| ThreadError::FetchFailed(format!("{e:#}")))?;

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ThreadError::FetchFailed(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ThreadError::FetchFailed(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(failure_from_body(status, &body));
        }

        serde_json::from_slice(&body)
            .map_err(|e| ThreadError::FetchFailed(format!("invalid thread payload: {e}")))
    }
}

/// Uses the backend's `error` message when the body carries one.
pub fn failure_from_body(status: StatusCode, body: &[u8]) -> ThreadError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
    tracing::warn!(%status, %message, "thread endpoint returned an error");
    ThreadError::FetchFailed(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::testing::{http_response, serve};
    use crate::util::ids::extract_post_id;
    use tokio::runtime::Runtime;

    const PAYLOAD: &str = r#"{
        "post": {"id": "abc123", "author": "alice", "title": "Hello", "score": 42,
                 "created_utc": 1000, "num_comments": 1, "selftext": ""},
        "comments": [{"id": "c1", "author": "bob", "body": "hi", "score": 15,
                      "created_utc": 1000, "children": []}]
    }"#;

    fn client_for(base: String) -> ThreadClient {
        let cfg = ViewerConfig {
            api_base_url: base,
            request_timeout_secs: 5,
            ..ViewerConfig::default()
        };
        ThreadClient::new(&cfg).expect("client")
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let err = failure_from_body(StatusCode::NOT_FOUND, br#"{"error": "Post not found"}"#);
        assert_eq!(err, ThreadError::FetchFailed("Post not found".to_string()));
    }

    #[test]
    fn missing_error_message_uses_generic_text() {
        for body in [&b"<html>oops</html>"[..], br#"{}"#, br#"{"error": ""}"#] {
            let err = failure_from_body(StatusCode::INTERNAL_SERVER_ERROR, body);
            assert_eq!(err, ThreadError::FetchFailed(GENERIC_FAILURE.to_string()));
        }
    }

    #[test]
    fn fetches_and_decodes_payload() {
        let rt = Runtime::new().expect("runtime");
        let base = serve(&rt, Some(http_response("200 OK", PAYLOAD)));
        let client = client_for(base);
        let post = extract_post_id("abc123").expect("id");

        let payload = rt.block_on(client.fetch_thread(&post)).expect("payload");
        assert_eq!(payload.post.id, "abc123");
        assert_eq!(payload.post.num_comments, 1);
        assert_eq!(payload.comments.len(), 1);
        assert_eq!(payload.comments[0].score, 15);
    }

    #[test]
    fn non_success_status_is_a_fetch_failure() {
        let rt = Runtime::new().expect("runtime");
        let base = serve(
            &rt,
            Some(http_response("500 Internal Server Error", r#"{"error": "backend down"}"#)),
        );
        let client = client_for(base);
        let post = extract_post_id("abc123").expect("id");

        let err = rt.block_on(client.fetch_thread(&post)).expect_err("failure");
        assert_eq!(err, ThreadError::FetchFailed("backend down".to_string()));
    }

    #[test]
    fn undecodable_success_body_is_a_fetch_failure() {
        let rt = Runtime::new().expect("runtime");
        let base = serve(&rt, Some(http_response("200 OK", "not json")));
        let client = client_for(base);
        let post = extract_post_id("abc123").expect("id");

        let err = rt.block_on(client.fetch_thread(&post)).expect_err("failure");
        assert!(err.to_string().starts_with("invalid thread payload"));
    }
}
