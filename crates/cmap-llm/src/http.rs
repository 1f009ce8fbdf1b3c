//! Status handling for chat and embedding responses.
//!
//! Failed calls are reported with the service's own `error.message` (and `error.code`
//! when present) instead of the raw body. Throttling honours the millisecond hint
//! Azure OpenAI sends alongside the standard `Retry-After` header.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::LlmError;
use crate::wire::ServiceErrorBody;

/// Wait assumed when a throttled response carries no usable hint.
const DEFAULT_RETRY_SECS: u64 = 60;
/// Azure OpenAI's millisecond-precision companion to `Retry-After`.
const RETRY_AFTER_MS: &str = "retry-after-ms";

/// Pass successful responses through; turn throttling and failures into [`LlmError`].
pub async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = retry_delay_secs(resp.headers());
        tracing::warn!(retry_after_secs, "llm service throttled the request");
        return Err(LlmError::RateLimited { retry_after_secs });
    }
    let body = resp.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: service_message(status, &body),
    })
}

/// Seconds to wait: `retry-after-ms` rounded up, else `Retry-After` seconds, else 60.
fn retry_delay_secs(headers: &HeaderMap) -> u64 {
    let header_number = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };
    header_number(RETRY_AFTER_MS)
        .map(|ms| ms.div_ceil(1000).max(1))
        .or_else(|| header_number(RETRY_AFTER.as_str()))
        .unwrap_or(DEFAULT_RETRY_SECS)
}

/// Readable failure text: `code: message` from the error envelope, the trimmed body
/// when it is not an envelope, or the status reason when the body is empty.
fn service_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ServiceErrorBody>(body) {
        let message = envelope.error.message.trim();
        return match envelope.error.code.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => format!("{code}: {message}"),
            None => message.to_string(),
        };
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Scheme and host of an endpoint, with any path or query removed.
///
/// Endpoints copied from a cloud portal often carry a deployment path; requests are
/// always built from the resource root. Text without a scheme is returned trimmed.
pub fn resource_root(raw: &str) -> &str {
    let trimmed = raw.trim().trim_end_matches('/');
    let Some(scheme_end) = trimmed.find("://") else {
        return trimmed;
    };
    let host_start = scheme_end + 3;
    trimmed[host_start..]
        .find(['/', '?'])
        .map_or(trimmed, |i| &trimmed[..host_start + i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, headers: &[(&str, &str)], body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn millisecond_hint_wins_and_rounds_up() {
        let resp = response(429, &[("retry-after-ms", "1500"), ("Retry-After", "9")], "");
        assert_eq!(retry_delay_secs(resp.headers()), 2);
        let tiny = response(429, &[("retry-after-ms", "0")], "");
        assert_eq!(retry_delay_secs(tiny.headers()), 1);
    }

    #[test]
    fn seconds_hint_then_default() {
        let resp = response(429, &[("Retry-After", "17")], "");
        assert_eq!(retry_delay_secs(resp.headers()), 17);
        let dated = response(429, &[("Retry-After", "Wed, 21 Oct 2015 07:28:00 GMT")], "");
        assert_eq!(retry_delay_secs(dated.headers()), DEFAULT_RETRY_SECS);
        assert_eq!(retry_delay_secs(response(429, &[], "").headers()), DEFAULT_RETRY_SECS);
    }

    #[tokio::test]
    async fn throttled_deployment_is_rate_limited() {
        let resp = response(
            429,
            &[("retry-after-ms", "4000")],
            r#"{"error": {"code": "429", "message": "Requests to the ChatCompletions_Create Operation have exceeded the call rate limit."}}"#,
        );
        assert!(matches!(
            ensure_success(resp).await,
            Err(LlmError::RateLimited {
                retry_after_secs: 4
            })
        ));
    }

    #[tokio::test]
    async fn service_error_envelope_is_unwrapped() {
        let resp = response(
            404,
            &[],
            r#"{"error": {"code": "DeploymentNotFound", "message": "The API deployment for this resource does not exist."}}"#,
        );
        let Err(LlmError::Api { status, message }) = ensure_success(resp).await else {
            panic!("expected an api error");
        };
        assert_eq!(status, 404);
        assert_eq!(
            message,
            "DeploymentNotFound: The API deployment for this resource does not exist."
        );
    }

    #[test]
    fn plain_and_empty_bodies() {
        assert_eq!(
            service_message(StatusCode::UNAUTHORIZED, " Access denied due to invalid key \n"),
            "Access denied due to invalid key"
        );
        assert_eq!(service_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        let envelope = r#"{"error": {"message": "max_tokens is too large"}}"#;
        assert_eq!(
            service_message(StatusCode::BAD_REQUEST, envelope),
            "max_tokens is too large"
        );
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(ensure_success(response(200, &[], "{}")).await.is_ok());
    }

    #[test]
    fn resource_root_strips_paths() {
        assert_eq!(
            resource_root("https://acme.openai.azure.com/openai/deployments/gpt?x=1"),
            "https://acme.openai.azure.com"
        );
        assert_eq!(
            resource_root(" https://acme.openai.azure.com/ "),
            "https://acme.openai.azure.com"
        );
        assert_eq!(resource_root("localhost:8080"), "localhost:8080");
    }
}
