use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;

/// Best-effort JSON parse: `None` for an empty or malformed body, never an error.
pub fn try_parse(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Response headers in the order the transport reported them.
///
/// Lookups by name are ASCII case-insensitive and return the first match.
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// An empty header list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header; earlier entries with the same name keep priority in
    /// [`Headers::get`].
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Case-insensitive lookup of the first header named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for Headers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One completed HTTP exchange with the Everest API.
///
/// Every response the server sends, whatever its status code or body, ends up
/// here. Two kinds of failure are kept apart:
/// - [`ApiResponse::is_error`] reports an HTTP-level failure (non-2xx status),
/// - [`ApiResponse::has_error`] additionally reports API-level failures, i.e. a
///   body object carrying an `"error"` key, which the API may send with `200`.
///
/// The body is parsed once at construction. A malformed or empty body leaves
/// [`ApiResponse::data`] as `None`; the raw text stays available through
/// [`ApiResponse::raw_body`].
pub struct ApiResponse {
    raw_body: String,
    status_code: u16,
    headers: Headers,
    data: Option<Value>,
}

impl ApiResponse {
    pub fn new<K, V>(
        raw_body: impl Into<String>,
        status_code: u16,
        headers: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let raw_body = raw_body.into();
        let data = try_parse(&raw_body);
        Self {
            raw_body,
            status_code,
            headers: headers.into_iter().collect(),
            data,
        }
    }

    /// Parsed JSON body, or `None` when the body was empty or not JSON.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Consume the response and keep only the parsed body.
    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// `true` for a 2xx status code.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// `true` on a non-2xx status, or when the body object has an `"error"` key.
    pub fn has_error(&self) -> bool {
        if self.is_error() {
            return true;
        }
        self.body_object()
            .is_some_and(|object| object.contains_key("error"))
    }

    /// Extract a human-readable error from the body object.
    ///
    /// `"error"` wins over `"message"`. A string `"error"` is returned as-is,
    /// any other `"error"` value as its compact JSON text. A string `"message"`
    /// is returned as-is; a `null` message counts as absent and other values
    /// are rendered as JSON text.
    pub fn error_message(&self) -> Option<Cow<'_, str>> {
        let object = self.body_object()?;

        if let Some(error) = object.get("error") {
            return Some(match error {
                Value::String(text) => Cow::Borrowed(text.as_str()),
                other => Cow::Owned(other.to_string()),
            });
        }

        match object.get("message")? {
            Value::Null => None,
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Snapshot of the parsed body, status code and headers, ready to serialize.
    pub fn to_structured(&self) -> StructuredResponse<'_> {
        StructuredResponse {
            data: self.data.as_ref(),
            status_code: self.status_code,
            headers: &self.headers,
        }
    }

    fn body_object(&self) -> Option<&serde_json::Map<String, Value>> {
        self.data.as_ref().and_then(Value::as_object)
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status={} success={}",
            self.status_code,
            self.is_success()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredResponse<'a> {
    pub data: Option<&'a Value>,
    pub status_code: u16,
    pub headers: &'a Headers,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn json_headers() -> Headers {
        [("content-type", "application/json")].into_iter().collect()
    }

    #[test]
    fn success_response_exposes_parsed_data() {
        let response = ApiResponse::new(r#"{"success": true, "data": "test"}"#, 200, json_headers());

        assert!(response.is_success());
        assert!(!response.is_error());
        assert!(!response.has_error());
        assert_eq!(response.status_code(), 200);
        assert_eq!(
            response.data(),
            Some(&json!({"success": true, "data": "test"}))
        );
    }

    #[test]
    fn pushed_headers_keep_order_and_first_match_wins() {
        let mut headers = Headers::new();
        assert!(headers.is_empty());
        headers.push("Set-Cookie", "a=1");
        headers.push("X-Request-Id", "42");
        headers.push("set-cookie", "b=2");

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("SET-COOKIE"), Some("a=1"));
        assert_eq!(
            headers.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["Set-Cookie", "X-Request-Id", "set-cookie"]
        );
    }

    #[test]
    fn into_data_keeps_only_the_parsed_body() {
        let response = ApiResponse::new(r#"{"mission": {"ref": "M-1"}}"#, 200, Headers::new());
        assert_eq!(response.into_data(), Some(json!({"mission": {"ref": "M-1"}})));

        let response = ApiResponse::new("<html>", 502, Headers::new());
        assert_eq!(response.into_data(), None);
    }

    #[test]
    fn success_range_is_half_open() {
        for status in [200, 201, 204, 299] {
            assert!(ApiResponse::new("", status, Headers::new()).is_success());
        }
        for status in [100, 199, 300, 302, 404, 500] {
            let response = ApiResponse::new(r#"{"ok": true}"#, status, Headers::new());
            assert!(response.is_error(), "status {status}");
            assert!(response.has_error(), "status {status}");
        }
    }

    #[test]
    fn error_string_is_returned_verbatim() {
        let response = ApiResponse::new(r#"{"error": "Something went wrong"}"#, 400, json_headers());

        assert!(!response.is_success());
        assert!(response.is_error());
        assert!(response.has_error());
        assert_eq!(
            response.error_message().as_deref(),
            Some("Something went wrong")
        );
    }

    #[test]
    fn structured_error_is_rendered_as_json() {
        let response = ApiResponse::new(r#"{"error": {"code": 5}}"#, 400, Headers::new());
        assert_eq!(response.error_message().as_deref(), Some(r#"{"code":5}"#));
    }

    #[test]
    fn logical_error_on_http_200_is_detected() {
        let response = ApiResponse::new(r#"{"error": "mission not found"}"#, 200, Headers::new());

        assert!(response.is_success());
        assert!(!response.is_error());
        assert!(response.has_error());
        assert_eq!(response.error_message().as_deref(), Some("mission not found"));
    }

    #[test]
    fn message_is_used_when_error_is_absent() {
        let response = ApiResponse::new(r#"{"message": "Unauthorized"}"#, 401, Headers::new());
        assert_eq!(response.error_message().as_deref(), Some("Unauthorized"));

        let response = ApiResponse::new(
            r#"{"error": "bad ref", "message": "ignored"}"#,
            422,
            Headers::new(),
        );
        assert_eq!(response.error_message().as_deref(), Some("bad ref"));

        let response = ApiResponse::new(r#"{"message": 42}"#, 500, Headers::new());
        assert_eq!(response.error_message().as_deref(), Some("42"));

        let response = ApiResponse::new(r#"{"message": null}"#, 500, Headers::new());
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn error_message_requires_an_object_body() {
        for body in ["", "not json", "[1, 2]", r#""error""#, "null"] {
            let response = ApiResponse::new(body, 500, Headers::new());
            assert_eq!(response.error_message(), None, "body {body:?}");
        }

        let response = ApiResponse::new(r#"{"status": "ok"}"#, 200, Headers::new());
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn invalid_json_keeps_raw_body() {
        let response = ApiResponse::new("invalid json", 200, Headers::new());

        assert_eq!(response.data(), None);
        assert_eq!(response.raw_body(), "invalid json");
        assert!(response.is_success());
        assert!(!response.has_error());
    }

    #[test]
    fn empty_body_has_no_data() {
        let response = ApiResponse::new("", 204, Headers::new());
        assert_eq!(response.data(), None);
        assert_eq!(response.raw_body(), "");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let headers: Headers = [
            ("content-type", "application/json"),
            ("x-custom-header", "test-value"),
        ]
        .into_iter()
        .collect();
        let response = ApiResponse::new("{}", 200, headers);

        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("X-CUSTOM-HEADER"), Some("test-value"));
        assert_eq!(response.header("non-existent"), None);
        assert_eq!(response.headers().len(), 2);
    }

    #[test]
    fn header_lookup_returns_first_match() {
        let headers: Headers = [("Set-Cookie", "a=1"), ("set-cookie", "b=2")]
            .into_iter()
            .collect();
        assert_eq!(headers.get("SET-COOKIE"), Some("a=1"));
    }

    #[test]
    fn structured_snapshot_mirrors_accessors() {
        for (body, status) in [(r#"{"test": "data"}"#, 200), ("oops", 503), ("", 204)] {
            let response = ApiResponse::new(body, status, json_headers());
            let structured = response.to_structured();
            assert_eq!(structured.status_code, response.status_code());
            assert_eq!(structured.data, response.data());
            assert_eq!(structured.headers, response.headers());
        }
    }

    #[test]
    fn structured_snapshot_serializes_with_expected_keys() {
        let response = ApiResponse::new(r#"{"test": "data"}"#, 200, json_headers());
        let value = serde_json::to_value(response.to_structured()).unwrap();

        assert_eq!(
            value,
            json!({
                "data": {"test": "data"},
                "status_code": 200,
                "headers": {"content-type": "application/json"}
            })
        );
    }

    #[test]
    fn display_summarizes_status() {
        let response = ApiResponse::new("", 404, Headers::new());
        assert_eq!(response.to_string(), "status=404 success=false");
    }

    #[test]
    fn try_parse_never_fails() {
        assert_eq!(try_parse(""), None);
        assert_eq!(try_parse("   "), None);
        assert_eq!(try_parse("{"), None);
        assert_eq!(try_parse("12"), Some(json!(12)));
        assert_eq!(try_parse(r#"{"a": [1]}"#), Some(json!({"a": [1]})));
    }
}
