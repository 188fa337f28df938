use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// Per-call timeout; there is no per-request override.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The API expects JSON bodies labelled as plain text.
pub const CONTENT_TYPE: &str = "text/plain; charset=UTF-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully prepared request, independent of the HTTP library that sends it.
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub verify_ssl: bool,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("request params must serialize to a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("failed to serialize request params: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turn caller params into the JSON object sent as the request body.
///
/// `()` and `None` serialize to `null` and mean "no params".
pub fn encode_params<P>(params: &P) -> Result<Map<String, Value>, EncodeError>
where
    P: Serialize + ?Sized,
{
    match serde_json::to_value(params)? {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        Value::Bool(_) => Err(EncodeError::NotAnObject { kind: "a boolean" }),
        Value::Number(_) => Err(EncodeError::NotAnObject { kind: "a number" }),
        Value::String(_) => Err(EncodeError::NotAnObject { kind: "a string" }),
        Value::Array(_) => Err(EncodeError::NotAnObject { kind: "an array" }),
    }
}

/// Request body text: the JSON object, or an empty string when there are no
/// params (never `{}`).
pub fn encode_body(params: &Map<String, Value>) -> String {
    if params.is_empty() {
        return String::new();
    }
    Value::Object(params.clone()).to_string()
}

/// Headers sent with every request. `Authorization` is only added for a
/// non-empty token.
pub fn request_headers(body: &str, token: Option<&str>) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Content-Type".to_owned(), CONTENT_TYPE.to_owned()),
        ("Content-Length".to_owned(), body.len().to_string()),
    ];
    if let Some(token) = token.filter(|token| !token.is_empty()) {
        headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
    }
    headers
}
