//! The individual response checks.
//!
//! Titles follow the wording the host test report shows; a failed check
//! carries a short detail for diagnosis. Input mistakes (a zero time limit,
//! a missing measurement) are fail-fast [`Error`]s rather than failed
//! checks.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::check::response::ResponseSnapshot;
use crate::uniq;
use crate::{Error, Result};

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\t\x00-\x08\x0B\x0C\x0E-\x1F]").unwrap());

static EXCESSIVE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {4,}").unwrap());

/// One check's title and verdict, the pair the host test facility consumes.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub title: String,
    pub passed: bool,
    pub detail: Option<String>,
}

impl CheckOutcome {
    fn pass(title: impl Into<String>) -> Self {
        CheckOutcome {
            title: title.into(),
            passed: true,
            detail: None,
        }
    }

    fn fail(title: impl Into<String>, detail: impl Into<String>) -> Self {
        CheckOutcome {
            title: title.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }
}

/// Status code equals `expected`.
pub fn check_status(resp: &ResponseSnapshot, expected: u16) -> CheckOutcome {
    let title = format!("Status code is {expected}");
    if resp.status() == expected {
        CheckOutcome::pass(title)
    } else {
        CheckOutcome::fail(title, format!("got {}", resp.status()))
    }
}

/// Body is valid, populated JSON with a matching `Content-Type`.
pub fn check_json_body(resp: &ResponseSnapshot) -> CheckOutcome {
    let title = "Response is valid JSON";
    match resp.header("Content-Type") {
        Some(header) if header.value.contains("application/json") => {}
        Some(header) => {
            return CheckOutcome::fail(title, format!("Content-Type is '{}'", header.value))
        }
        None => return CheckOutcome::fail(title, "Content-Type header is missing"),
    }

    let doc = match resp.json() {
        Ok(doc) => doc,
        Err(err) => return CheckOutcome::fail(title, format!("unable to parse body: {err}")),
    };

    let populated = match &doc {
        Value::Object(map) => !map.is_empty(),
        Value::Array(seq) => !seq.is_empty(),
        _ => false,
    };
    if populated {
        CheckOutcome::pass(title)
    } else {
        CheckOutcome::fail(title, "parsed body has no entries")
    }
}

/// Body text is empty.
pub fn check_empty_body(resp: &ResponseSnapshot) -> CheckOutcome {
    let title = "Response body is empty";
    if resp.text().is_empty() {
        CheckOutcome::pass(title)
    } else {
        CheckOutcome::fail(title, format!("body has {} bytes", resp.text().len()))
    }
}

/// Body text is not empty.
pub fn check_not_empty_body(resp: &ResponseSnapshot) -> CheckOutcome {
    let title = "Response body is not empty";
    if resp.text().is_empty() {
        CheckOutcome::fail(title, "body is empty")
    } else {
        CheckOutcome::pass(title)
    }
}

/// Elapsed time is below `limit_ms`.
///
/// A non-positive limit or a snapshot without a measurement is a caller
/// error, not a failed check.
pub fn check_response_time(resp: &ResponseSnapshot, limit_ms: u64) -> Result<CheckOutcome> {
    if limit_ms == 0 {
        return Err(Error::InvalidLimit { given: 0 });
    }
    let elapsed = resp.elapsed_ms().ok_or(Error::MissingElapsed)?;

    let title = format!("Response time is acceptable: {elapsed}ms < limit {limit_ms}ms");
    Ok(if elapsed < limit_ms {
        CheckOutcome::pass(title)
    } else {
        CheckOutcome::fail(title, format!("{elapsed}ms >= {limit_ms}ms"))
    })
}

/// Parsed body carries the top-level property `name`.
pub fn check_property(resp: &ResponseSnapshot, name: &str) -> CheckOutcome {
    let title = format!("Has property: {name}");
    let doc = match resp.json() {
        Ok(doc) => doc,
        Err(err) => return CheckOutcome::fail(title, format!("unable to parse body: {err}")),
    };
    match doc {
        Value::Object(map) if map.contains_key(name) => CheckOutcome::pass(title),
        _ => CheckOutcome::fail(title, format!("property '{name}' not found")),
    }
}

/// Header `name` is present, optionally with the exact `expected` value.
///
/// Header-name comparison is case-insensitive; value comparison is exact.
pub fn check_header(resp: &ResponseSnapshot, name: &str, expected: Option<&str>) -> CheckOutcome {
    let title = format!("Response has header {name}");
    let Some(header) = resp.header(name) else {
        return CheckOutcome::fail(title, format!("header '{name}' not found"));
    };
    match expected {
        Some(value) if header.value != value => CheckOutcome::fail(
            title,
            format!("expected '{value}', got '{}'", header.value),
        ),
        _ => CheckOutcome::pass(title),
    }
}

/// `Location` header is present (for POST responses).
pub fn check_location_header(resp: &ResponseSnapshot) -> CheckOutcome {
    let title = "Location header present";
    if resp.header("Location").is_some() {
        CheckOutcome::pass(title)
    } else {
        CheckOutcome::fail(title, "header 'Location' not found")
    }
}

/// Response body deep-includes the request body after a successful create.
///
/// The status must be 200 or 201, and every field of `request_body` must be
/// present in the response with an equal value (recursively for nested
/// maps).
pub fn check_matches_request(resp: &ResponseSnapshot, request_body: &Value) -> CheckOutcome {
    let title = "Response matches request data";
    if !matches!(resp.status(), 200 | 201) {
        return CheckOutcome::fail(title, format!("status {} is not 200 or 201", resp.status()));
    }
    let doc = match resp.json() {
        Ok(doc) => doc,
        Err(err) => return CheckOutcome::fail(title, format!("unable to parse body: {err}")),
    };
    if deep_includes(&doc, request_body) {
        CheckOutcome::pass(title)
    } else {
        CheckOutcome::fail(title, "response body does not include all request fields")
    }
}

/// No string value in the response (or the optional request body) contains
/// raw line breaks, control characters, or runs of four or more spaces.
pub fn check_invalid_characters(
    resp: &ResponseSnapshot,
    request_body: Option<&Value>,
) -> CheckOutcome {
    let title = "No invalid characters in JSON values";
    let doc = match resp.json() {
        Ok(doc) => doc,
        Err(err) => return CheckOutcome::fail(title, format!("unable to parse body: {err}")),
    };

    if let Some(problem) = request_body.and_then(find_invalid_string) {
        return CheckOutcome::fail(title, format!("request: {problem}"));
    }
    match find_invalid_string(&doc) {
        Some(problem) => CheckOutcome::fail(title, format!("response: {problem}")),
        None => CheckOutcome::pass(title),
    }
}

/// Body text matches a caller-supplied allowed-characters pattern.
pub fn check_body_matches(resp: &ResponseSnapshot, pattern: &Regex) -> CheckOutcome {
    let title = "Response has only matching characters";
    if pattern.is_match(resp.text()) {
        CheckOutcome::pass(title)
    } else {
        CheckOutcome::fail(title, format!("body does not match {pattern}"))
    }
}

/// Top-level field `field` is present and is an empty sequence.
pub fn check_empty_sequence_field(resp: &ResponseSnapshot, field: &str) -> CheckOutcome {
    let title = format!("Field '{field}' is an empty sequence");
    let doc = match resp.json() {
        Ok(doc) => doc,
        Err(err) => return CheckOutcome::fail(title, format!("unable to parse body: {err}")),
    };
    let value = match &doc {
        Value::Object(map) => map.get(field),
        _ => None,
    };
    match value {
        Some(Value::Array(seq)) if seq.is_empty() => CheckOutcome::pass(title),
        Some(Value::Array(seq)) => {
            CheckOutcome::fail(title, format!("sequence has {} elements", seq.len()))
        }
        Some(_) => CheckOutcome::fail(title, format!("field '{field}' is not a sequence")),
        None => CheckOutcome::fail(title, format!("field '{field}' not found")),
    }
}

/// Values of `key` are unique inside the top-level sequence field `field`.
pub fn check_unique_values(resp: &ResponseSnapshot, field: &str, key: &str) -> CheckOutcome {
    match resp
        .json()
        .and_then(|doc| uniq::check_unique(&doc, field, key))
    {
        Ok(report) => CheckOutcome::pass(format!(
            "Has unique values of '{key}' at '{field}': {} items, {} unique",
            report.total, report.unique
        )),
        Err(err) => CheckOutcome::fail(
            format!("Has unique values of '{key}' at '{field}'"),
            err.to_string(),
        ),
    }
}

/// Values of `key` are unique across every map reached by the dotted
/// `path`.
pub fn check_unique_values_in_path(
    resp: &ResponseSnapshot,
    path: &str,
    key: &str,
) -> CheckOutcome {
    match resp
        .json()
        .and_then(|doc| uniq::check_unique_in_path(&doc, path, key))
    {
        Ok(report) => CheckOutcome::pass(format!(
            "Has unique values of '{key}' at path '{path}': {} values, {} unique",
            report.total, report.unique
        )),
        Err(err) => CheckOutcome::fail(
            format!("Has unique values of '{key}' at path '{path}'"),
            err.to_string(),
        ),
    }
}

/// Every field of `inner` is present in `outer` with an equal value.
/// Maps recurse; sequences and scalars compare for equality.
fn deep_includes(outer: &Value, inner: &Value) -> bool {
    match (outer, inner) {
        (Value::Object(outer), Value::Object(inner)) => inner
            .iter()
            .all(|(key, value)| outer.get(key).is_some_and(|o| deep_includes(o, value))),
        _ => outer == inner,
    }
}

/// First offending string value anywhere in the document, if any.
fn find_invalid_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            if s.contains('\r') || s.contains('\n') {
                Some(format!("raw line break in {s:?}"))
            } else if CONTROL_CHARS.is_match(s) {
                Some(format!("control character in {s:?}"))
            } else if EXCESSIVE_SPACES.is_match(s) {
                Some(format!("run of 4+ spaces in {s:?}"))
            } else {
                None
            }
        }
        Value::Array(seq) => seq.iter().find_map(find_invalid_string),
        Value::Object(map) => map.values().find_map(find_invalid_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_response(body: &str) -> ResponseSnapshot {
        ResponseSnapshot::new(200)
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_body(body)
    }

    #[test]
    fn status_check() {
        let resp = ResponseSnapshot::new(404);

        assert!(check_status(&resp, 404).passed);
        let outcome = check_status(&resp, 200);
        assert!(!outcome.passed);
        assert_eq!(outcome.detail.as_deref(), Some("got 404"));
    }

    #[test]
    fn json_body_requires_content_type_and_entries() {
        assert!(check_json_body(&json_response(r#"{"a": 1}"#)).passed);
        assert!(check_json_body(&json_response(r#"[1]"#)).passed);
        assert!(!check_json_body(&json_response("{}")).passed);
        assert!(!check_json_body(&json_response("not json")).passed);

        let wrong_type = ResponseSnapshot::new(200)
            .with_header("Content-Type", "text/html")
            .with_body(r#"{"a": 1}"#);
        assert!(!check_json_body(&wrong_type).passed);

        let no_header = ResponseSnapshot::new(200).with_body(r#"{"a": 1}"#);
        assert!(!check_json_body(&no_header).passed);
    }

    #[test]
    fn body_emptiness_checks() {
        let empty = ResponseSnapshot::new(204);
        let full = ResponseSnapshot::new(200).with_body("x");

        assert!(check_empty_body(&empty).passed);
        assert!(!check_empty_body(&full).passed);
        assert!(check_not_empty_body(&full).passed);
        assert!(!check_not_empty_body(&empty).passed);
    }

    #[test]
    fn response_time_policy() {
        let resp = ResponseSnapshot::new(200).with_elapsed_ms(150);

        assert!(check_response_time(&resp, 200).unwrap().passed);
        assert!(!check_response_time(&resp, 100).unwrap().passed);
        assert!(matches!(
            check_response_time(&resp, 0),
            Err(Error::InvalidLimit { given: 0 })
        ));
        assert!(matches!(
            check_response_time(&ResponseSnapshot::new(200), 200),
            Err(Error::MissingElapsed)
        ));
    }

    #[test]
    fn property_check() {
        let resp = json_response(r#"{"branches": []}"#);

        assert!(check_property(&resp, "branches").passed);
        assert!(!check_property(&resp, "id").passed);
        assert!(!check_property(&json_response("[1]"), "id").passed);
    }

    #[test]
    fn header_checks() {
        let resp = ResponseSnapshot::new(201)
            .with_header("Content-Type", "application/json")
            .with_header("Location", "/things/1");

        assert!(check_header(&resp, "content-type", None).passed);
        assert!(check_header(&resp, "Content-Type", Some("application/json")).passed);
        assert!(!check_header(&resp, "Content-Type", Some("text/html")).passed);
        assert!(!check_header(&resp, "ETag", None).passed);
        assert!(check_location_header(&resp).passed);
        assert!(!check_location_header(&ResponseSnapshot::new(200)).passed);
    }

    #[test]
    fn request_echo_check() {
        let request = json!({"name": "a", "nested": {"x": 1}});
        let resp = json_response(r#"{"id": 9, "name": "a", "nested": {"x": 1, "y": 2}}"#);

        assert!(check_matches_request(&resp, &request).passed);

        let drift = json_response(r#"{"id": 9, "name": "b"}"#);
        assert!(!check_matches_request(&drift, &request).passed);

        let redirect = ResponseSnapshot::new(302).with_body("{}");
        assert!(!check_matches_request(&redirect, &request).passed);
    }

    #[test]
    fn invalid_character_scan() {
        assert!(check_invalid_characters(&json_response(r#"{"a": "clean text"}"#), None).passed);

        let with_break = json_response("{\"a\": \"line\\nbreak\"}");
        assert!(!check_invalid_characters(&with_break, None).passed);

        let with_tab = json_response("{\"a\": \"tab\\there\"}");
        assert!(!check_invalid_characters(&with_tab, None).passed);

        let with_spaces = json_response(r#"{"a": "too     wide"}"#);
        assert!(!check_invalid_characters(&with_spaces, None).passed);

        let nested = json_response(r#"{"a": [{"b": "ok"}]}"#);
        let bad_request = json!({"note": "bad\tvalue"});
        let outcome = check_invalid_characters(&nested, Some(&bad_request));
        assert!(!outcome.passed);
        assert!(outcome.detail.unwrap().starts_with("request:"));
    }

    #[test]
    fn allowed_characters_pattern() {
        let pattern = Regex::new(r#"^[a-zA-Z0-9,:"{}\s]+$"#).unwrap();

        assert!(check_body_matches(&json_response(r#"{"a": "ok"}"#), &pattern).passed);
        assert!(!check_body_matches(&json_response(r#"{"a": "<b>"}"#), &pattern).passed);
    }

    #[test]
    fn empty_sequence_field_check() {
        let resp = json_response(r#"{"priceChangedProducts": [], "items": [1]}"#);

        assert!(check_empty_sequence_field(&resp, "priceChangedProducts").passed);
        assert!(!check_empty_sequence_field(&resp, "items").passed);
        assert!(!check_empty_sequence_field(&resp, "missing").passed);
        assert!(!check_empty_sequence_field(&json_response(r#"{"a": 1}"#), "a").passed);
    }

    #[test]
    fn uniqueness_wrappers_report_counts_in_the_title() {
        let resp = json_response(r#"{"branches": [{"id": 1}, {"id": 2}]}"#);

        let outcome = check_unique_values(&resp, "branches", "id");
        assert!(outcome.passed);
        assert_eq!(
            outcome.title,
            "Has unique values of 'id' at 'branches': 2 items, 2 unique"
        );

        let dup = json_response(r#"{"branches": [{"id": 1}, {"id": 1}]}"#);
        let outcome = check_unique_values(&dup, "branches", "id");
        assert!(!outcome.passed);
        assert!(outcome.detail.unwrap().contains("2 values, 1 unique"));

        let nested = json_response(r#"{"a": {"b": [{"x": 1}, {"x": 2}]}}"#);
        let outcome = check_unique_values_in_path(&nested, "a.b", "x");
        assert!(outcome.passed);
        assert_eq!(
            outcome.title,
            "Has unique values of 'x' at path 'a.b': 2 values, 2 unique"
        );

        let outcome = check_unique_values_in_path(&nested, "a.missing", "x");
        assert!(!outcome.passed);
        assert!(outcome.detail.unwrap().contains("no values found"));
    }
}
