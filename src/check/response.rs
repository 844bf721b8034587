//! The materialized response handed across the host boundary.

use serde_json::Value;

use crate::Result;

/// One name/value header pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// An already-fetched response.
///
/// The crate never performs network I/O; it only reads what the host
/// captured: status code, headers, raw body text, and (when the host
/// measured it) the elapsed time.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    status: u16,
    headers: Vec<Header>,
    body: String,
    elapsed_ms: Option<u64>,
}

impl ResponseSnapshot {
    pub fn new(status: u16) -> Self {
        ResponseSnapshot {
            status,
            headers: Vec::new(),
            body: String::new(),
            elapsed_ms: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn elapsed_ms(&self) -> Option<u64> {
        self.elapsed_ms
    }

    /// First header whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let resp = ResponseSnapshot::new(200).with_header("Content-Type", "application/json");

        assert_eq!(
            resp.header("content-type").map(|h| h.value.as_str()),
            Some("application/json")
        );
        assert!(resp.header("Location").is_none());
    }

    #[test]
    fn body_parses_on_demand() {
        let resp = ResponseSnapshot::new(200).with_body(r#"{"ok": true}"#);

        assert_eq!(resp.json().unwrap(), json!({"ok": true}));
        assert!(ResponseSnapshot::new(200).with_body("not json").json().is_err());
    }
}
