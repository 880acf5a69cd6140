use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::EngineError;

pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Reply returned without any network access when no credentials are set.
pub const NO_CREDENTIALS_REPLY: &str = "/* mock: no OPENROUTER_API_KEYS set */";

const ERROR_BODY_MAX_CHARS: usize = 512;

/// Ordered credential pool with a shared round-robin cursor.
#[derive(Default)]
pub struct KeyPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyPool {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(|key| key.as_ref().trim().to_string())
                .filter(|key| !key.is_empty())
                .collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Claim the next key. The increment and the slot it selects happen in
    /// one atomic step, so concurrent callers never share a claim.
    pub fn next_key(&self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let claim = self.cursor.fetch_add(1, Ordering::Relaxed);
        let slot = claim % self.keys.len();
        debug!(slot, pool_size = self.keys.len(), "claimed api key slot");
        Some(self.keys[slot].as_str())
    }
}

impl std::fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPool")
            .field("len", &self.keys.len())
            .field("cursor", &self.cursor.load(Ordering::Relaxed))
            .finish()
    }
}

/// Chat-completion client that rotates across a pool of bearer keys.
///
/// Each call makes at most one outbound request and never retries.
#[derive(Debug)]
pub struct KeyRotationClient {
    api_base: String,
    keys: KeyPool,
    http: HttpClient,
}

impl KeyRotationClient {
    pub fn new(api_base: &str, keys: KeyPool) -> Self {
        Self {
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            keys,
            http: HttpClient::new(),
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.keys.is_empty()
    }

    pub fn complete(
        &self,
        model: &str,
        messages: &[Value],
        timeout_ms: u64,
    ) -> Result<String, EngineError> {
        let Some(api_key) = self.keys.next_key() else {
            debug!(model, "no api keys configured; returning offline reply");
            return Ok(NO_CREDENTIALS_REPLY.to_string());
        };

        let endpoint = format!("{}/chat/completions", self.api_base);
        info!(model, messages = messages.len(), timeout_ms, "requesting chat completion");
        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(api_key)
            .timeout(Duration::from_millis(timeout_ms))
            .json(&json!({
                "model": model,
                "messages": messages,
            }))
            .send()
            .map_err(|err| transport_error(err, timeout_ms))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| transport_error(err, timeout_ms))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "chat completion rejected upstream");
            return Err(EngineError::Upstream {
                status: status.as_u16(),
                body: truncate_text(&body, ERROR_BODY_MAX_CHARS),
            });
        }

        let payload: Value = serde_json::from_str(&body).map_err(|err| {
            EngineError::InvalidResponse(format!("response is not JSON: {err}"))
        })?;
        Ok(reply_content(&payload))
    }
}

fn transport_error(err: reqwest::Error, timeout_ms: u64) -> EngineError {
    if err.is_timeout() {
        warn!(timeout_ms, "chat completion timed out");
        return EngineError::Timeout { timeout_ms };
    }
    EngineError::Transport(err)
}

/// Text of `choices[0].message.content`; part arrays are joined, anything
/// else reads as empty.
fn reply_content(payload: &Value) -> String {
    let content = &payload["choices"][0]["message"]["content"];
    match content {
        Value::String(text) => text.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => {
            warn!("chat completion reply carried no message content");
            String::new()
        }
    }
}

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}
