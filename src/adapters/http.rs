use crate::utils::error::Result;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::time::Duration;

const USER_AGENT: &str = concat!("claw-agent/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    pub fn as_text(&self) -> String {
        match self {
            Payload::Json(value) => value.to_string(),
            Payload::Text(text) => text.clone(),
        }
    }
}

/// Result of one request. Transport failures are a value, not an error.
/// `raw` is the body exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpOutcome {
    Success {
        status: u16,
        payload: Payload,
        raw: String,
    },
    TransportError { url: String, message: String },
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            accept_invalid_certs: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Thin request helper shared by the ledger and tracker clients. No retries
/// happen here.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(settings: HttpSettings) -> Result<Self> {
        if settings.accept_invalid_certs {
            tracing::debug!("TLS certificate verification disabled for this client");
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        Ok(Self { client })
    }

    pub async fn get(&self, url: &str, headers: HeaderMap) -> HttpOutcome {
        self.request(Method::GET, url, headers, None).await
    }

    pub async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<&serde_json::Value>,
    ) -> HttpOutcome {
        self.request(Method::POST, url, headers, body).await
    }

    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&serde_json::Value>,
    ) -> HttpOutcome {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return transport_error(url, &e),
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return transport_error(url, &e),
        };

        tracing::debug!("{} -> {} ({} bytes)", url, status, text.len());

        HttpOutcome::Success {
            status,
            payload: parse_payload(&text),
            raw: text,
        }
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> HttpOutcome {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };
    tracing::warn!("Transport failure for {}: {}", url, message);
    HttpOutcome::TransportError {
        url: url.to_string(),
        message,
    }
}

/// Empty bodies become an empty object; anything that is not JSON is kept as
/// raw text.
pub fn parse_payload(text: &str) -> Payload {
    if text.trim().is_empty() {
        return Payload::Json(serde_json::Value::Object(serde_json::Map::new()));
    }
    match serde_json::from_str(text) {
        Ok(value) => Payload::Json(value),
        Err(_) => Payload::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client() -> HttpClient {
        HttpClient::new(HttpSettings {
            accept_invalid_certs: false,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_parse_payload_variants() {
        assert_eq!(parse_payload(""), Payload::Json(json!({})));
        assert_eq!(parse_payload("  \n"), Payload::Json(json!({})));
        assert_eq!(parse_payload("[1,2]"), Payload::Json(json!([1, 2])));
        assert_eq!(parse_payload("12.5 RTC"), Payload::Text("12.5 RTC".to_string()));
    }

    #[tokio::test]
    async fn test_get_json_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/epoch");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"epoch":7}"#);
        });

        let outcome = client().get(&server.url("/epoch"), HeaderMap::new()).await;

        api_mock.assert();
        assert_eq!(
            outcome,
            HttpOutcome::Success {
                status: 200,
                payload: Payload::Json(json!({"epoch": 7})),
                raw: r#"{"epoch":7}"#.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_falls_back_to_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200).body("ok");
        });

        let outcome = client().get(&server.url("/health"), HeaderMap::new()).await;

        match outcome {
            HttpOutcome::Success { payload, raw, .. } => {
                assert_eq!(payload, Payload::Text("ok".to_string()));
                assert_eq!(raw, "ok");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_raw_body_kept_alongside_parsed_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/balance");
            then.status(200).body("1.50");
        });

        let outcome = client().get(&server.url("/balance"), HeaderMap::new()).await;

        match outcome {
            HttpOutcome::Success { payload, raw, .. } => {
                assert!(matches!(payload, Payload::Json(_)));
                assert_eq!(raw, "1.50");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/refs")
                .json_body(json!({"ref": "refs/heads/x", "sha": "abc"}));
            then.status(201).json_body(json!({"ref": "refs/heads/x"}));
        });

        let body = json!({"ref": "refs/heads/x", "sha": "abc"});
        let outcome = client()
            .post(&server.url("/refs"), HeaderMap::new(), Some(&body))
            .await;

        api_mock.assert();
        assert!(matches!(outcome, HttpOutcome::Success { status: 201, .. }));
    }

    #[tokio::test]
    async fn test_error_status_is_not_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body(r#"{"message":"Not Found"}"#);
        });

        let outcome = client().get(&server.url("/missing"), HeaderMap::new()).await;

        assert_eq!(
            outcome,
            HttpOutcome::Success {
                status: 404,
                payload: Payload::Json(json!({"message": "Not Found"})),
                raw: r#"{"message":"Not Found"}"#.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let outcome = client()
            .get("http://127.0.0.1:1/unreachable", HeaderMap::new())
            .await;

        assert!(matches!(outcome, HttpOutcome::TransportError { .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_millis(500)).body("late");
        });

        let slow_client = HttpClient::new(HttpSettings {
            accept_invalid_certs: false,
            timeout: Duration::from_millis(50),
        })
        .unwrap();

        let outcome = slow_client.get(&server.url("/slow"), HeaderMap::new()).await;
        match outcome {
            HttpOutcome::TransportError { message, .. } => assert!(message.contains("timed out")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
