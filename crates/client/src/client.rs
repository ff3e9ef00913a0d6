//! Dandelion NEX HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). One form-encoded
//! POST per call; 429/503 are retried with Retry-After support, three
//! attempts total; every other failure is surfaced immediately.

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::token::TokenStore;

/// Production endpoint for the NEX entity-extraction API.
pub const DEFAULT_ENDPOINT: &str = "https://api.dandelion.eu/datatxt/nex/v1/";

/// Language hint sent when the caller does not specify one. `"auto"` is
/// also accepted by the service.
pub const DEFAULT_LANG: &str = "fr";

/// Confidence floor sent when the caller does not specify one.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.6;

const MAX_ATTEMPTS: u32 = 3;
const USER_AGENT: &str = concat!("bgrid/", env!("CARGO_PKG_VERSION"));

/// Error type for annotation calls.
#[derive(Debug)]
pub enum Error {
    /// No token configured, or an empty one
    MissingCredential,
    /// Transport failure (connect, timeout, TLS)
    Network(String),
    /// Non-2xx HTTP status with response body
    Http(u16, String),
    /// 2xx response carrying an application-level error descriptor
    Api { code: String, message: String },
    /// 2xx body that does not parse as the expected contract
    Parse(String),
    /// Local I/O failure (token file)
    Io(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingCredential => {
                write!(f, "No API token configured — run `bgrid token set <TOKEN>` first")
            }
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Http(code, msg) => write!(f, "API HTTP {}: {}", code, msg),
            Error::Api { code, message } => write!(f, "API error {}: {}", code, message),
            Error::Parse(msg) => write!(f, "Malformed response: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// One recognized entity span, tagged with ontology type URIs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl Annotation {
    /// Display string: first non-empty of label / title / spot.
    pub fn display_label(&self) -> Option<&str> {
        [&self.label, &self.title, &self.spot]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.is_empty())
    }

    /// Whether this annotation denotes a brand/organization.
    pub fn is_brand_like(&self) -> bool {
        brandgrid_core::is_brand_like(&self.types)
    }
}

/// Application-level error descriptor inside a 2xx body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parsed NEX response. If `error` is present the annotations are invalid
/// and must not be consulted; `annotate` enforces this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationResponse {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// NEX API client (blocking). The token store is injected so callers and
/// tests control where the credential lives.
pub struct AnnotationClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    store: Box<dyn TokenStore>,
}

impl AnnotationClient {
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        Self::with_endpoint(store, DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(store: Box<dyn TokenStore>, endpoint: String) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self { http, endpoint, store }
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    fn token(&self) -> Result<String, Error> {
        match self.store.get() {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(Error::MissingCredential),
        }
    }

    /// Send `text` for entity extraction.
    ///
    /// Callers short-circuit empty text before invoking this; see the
    /// functions module.
    pub fn annotate(
        &self,
        text: &str,
        lang: &str,
        min_confidence: f64,
    ) -> Result<AnnotationResponse, Error> {
        let body = self.send_with_retry(text, lang, min_confidence)?;
        parse_response(&body)
    }

    /// Like [`annotate`](Self::annotate), but returns the raw body after
    /// validating it against the contract. Unmodeled fields (timing,
    /// detected language, …) survive for inspection; an error descriptor
    /// or unparseable body still fails.
    pub fn annotate_raw(
        &self,
        text: &str,
        lang: &str,
        min_confidence: f64,
    ) -> Result<String, Error> {
        let body = self.send_with_retry(text, lang, min_confidence)?;
        parse_response(&body)?;
        Ok(body)
    }

    /// The retry loop: one form-encoded POST per attempt, returning the
    /// 2xx body text. 429/503 retry with Retry-After support; every other
    /// status is fatal on the spot.
    fn send_with_retry(
        &self,
        text: &str,
        lang: &str,
        min_confidence: f64,
    ) -> Result<String, Error> {
        let token = self.token()?;
        let params = [
            ("text", text.to_string()),
            ("lang", lang.to_string()),
            ("include", "types".to_string()),
            ("min_confidence", min_confidence.to_string()),
            ("token", token),
        ];

        let mut last_transient: Option<Error> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let resp = self
                .http
                .post(&self.endpoint)
                .form(&params)
                .send()
                .map_err(|e| Error::Network(e.to_string()))?;

            let status = resp.status().as_u16();

            if (200..300).contains(&status) {
                return resp.text().map_err(|e| Error::Network(e.to_string()));
            }

            // Rate limited / temporarily unavailable: worth retrying
            if status == 429 || status == 503 {
                let retry_after_ms = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .filter(|&secs| secs > 0)
                    .map(|secs| secs * 1000);
                let body = resp.text().unwrap_or_default();
                last_transient = Some(Error::Http(status, body));

                if attempt < MAX_ATTEMPTS {
                    let wait = retry_after_ms.unwrap_or(500 * attempt as u64).max(500);
                    eprintln!(
                        "warning: retry {}/{} in {}ms (HTTP {})",
                        attempt,
                        MAX_ATTEMPTS - 1,
                        wait,
                        status,
                    );
                    thread::sleep(Duration::from_millis(wait));
                }
                continue;
            }

            // Everything else is fatal immediately
            let body = resp.text().unwrap_or_default();
            return Err(Error::Http(status, body));
        }

        Err(last_transient
            .unwrap_or_else(|| Error::Network("annotate failed after retries".into())))
    }
}

/// Parse a 2xx body. An empty body is the empty response (the service
/// does this for some no-result inputs); an `error` descriptor wins over
/// any annotations that accompany it.
fn parse_response(body: &str) -> Result<AnnotationResponse, Error> {
    let trimmed = body.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Ok(AnnotationResponse::default());
    }

    let parsed: AnnotationResponse = serde_json::from_str(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(200).collect();
        Error::Parse(format!("{} (body: {})", e, preview))
    })?;

    if let Some(err) = parsed.error {
        return Err(Error::Api {
            code: err.code.unwrap_or_default(),
            message: err.message.unwrap_or_default(),
        });
    }

    Ok(parsed)
}
