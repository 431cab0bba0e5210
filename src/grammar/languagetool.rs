//! LanguageTool HTTP client
//!
//! Sync HTTP via ureq against `POST {url}/v2/check`.

use super::{GrammarError, GrammarMatch, GrammarService};
use serde::Deserialize;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

pub struct LanguageToolClient {
    base_url: String,
    timeout: Duration,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl LanguageToolClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout,
            agent: make_agent(timeout),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Quick TCP probe of the configured server
    pub fn is_reachable(&self) -> bool {
        server_reachable(&self.base_url, Duration::from_secs(2))
    }

    fn map_transport(&self, err: ureq::Error) -> GrammarError {
        match err {
            ureq::Error::Timeout(_) => GrammarError::Timeout {
                secs: self.timeout.as_secs(),
            },
            ureq::Error::ConnectionFailed | ureq::Error::HostNotFound => {
                GrammarError::Unavailable(format!("cannot connect to {}", self.base_url))
            }
            other => GrammarError::Transport(other.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<MatchPayload>,
}

#[derive(Deserialize)]
struct MatchPayload {
    #[serde(default)]
    message: String,
    offset: usize,
    length: Option<usize>,
    #[serde(default)]
    replacements: Vec<Replacement>,
    rule: Option<Rule>,
}

#[derive(Deserialize)]
struct Replacement {
    value: String,
}

#[derive(Deserialize)]
struct Rule {
    id: String,
}

impl GrammarService for LanguageToolClient {
    fn name(&self) -> &str {
        "languagetool"
    }

    fn check(&self, chunk: &str, language: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
        let url = format!("{}/v2/check", self.base_url);
        debug!("POST {} ({} bytes, {})", url, chunk.len(), language);

        let response = self
            .agent
            .post(&url)
            .send_form([("text", chunk), ("language", language)])
            .map_err(|e| self.map_transport(e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.into_body().read_to_string().unwrap_or_default();
            return Err(GrammarError::Status { status, body });
        }

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| self.map_transport(e))?;
        parse_matches(chunk, &body)
    }
}

/// Parse a `/v2/check` body, converting UTF-16 offsets to byte offsets in `chunk`
fn parse_matches(chunk: &str, body: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
    let resp: CheckResponse =
        serde_json::from_str(body).map_err(|e| GrammarError::Parse(e.to_string()))?;

    Ok(resp
        .matches
        .into_iter()
        .map(|m| {
            let offset = utf16_to_byte_offset(chunk, m.offset);
            let length = m
                .length
                .map(|len| utf16_to_byte_offset(chunk, m.offset + len) - offset);
            GrammarMatch {
                rule_id: m.rule.map(|r| r.id).unwrap_or_else(|| "UNKNOWN_RULE".to_string()),
                message: m.message,
                offset,
                length,
                replacements: m.replacements.into_iter().map(|r| r.value).collect(),
            }
        })
        .collect())
}

/// Convert a UTF-16 code unit offset into a UTF-8 byte offset, clamped to the text
pub fn utf16_to_byte_offset(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (i, c) in text.char_indices() {
        if seen >= units {
            return i;
        }
        seen += c.len_utf16();
    }
    text.len()
}

/// TCP connect probe for an http(s) base URL
pub fn server_reachable(base_url: &str, timeout: Duration) -> bool {
    let (default_port, rest) = if let Some(rest) = base_url.strip_prefix("https://") {
        (443, rest)
    } else if let Some(rest) = base_url.strip_prefix("http://") {
        (80, rest)
    } else {
        (80, base_url)
    };
    let authority = rest.split('/').next().unwrap_or_default();
    if authority.is_empty() {
        return false;
    }
    let target = if authority.rsplit_once(':').is_some_and(|(_, p)| p.parse::<u16>().is_ok()) {
        authority.to_string()
    } else {
        format!("{authority}:{default_port}")
    };

    match target.to_socket_addrs() {
        Ok(addrs) => addrs
            .into_iter()
            .any(|addr| TcpStream::connect_timeout(&addr, timeout).is_ok()),
        Err(e) => {
            debug!("Cannot resolve {}: {}", target, e);
            false
        }
    }
}
