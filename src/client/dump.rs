//! Human-readable request/response dumps for the client's debug mode.

use serde_json::{Map, Value};

use crate::domain::ApiResponse;
use crate::transport::HttpRequest;

/// Log target the dumps are emitted under.
pub const DEBUG_TARGET: &str = "everest_api::debug";

const RULE_WIDTH: usize = 60;

pub(crate) fn render_request(request: &HttpRequest, params: &Map<String, Value>) -> String {
    let headers = request
        .headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()));
    render(
        "Request",
        &[
            ("Method", Value::String(request.method.as_str().to_owned())),
            ("URL", Value::String(request.url.clone())),
            ("Headers", header_object(headers)),
            ("Body", Value::Object(params.clone())),
        ],
    )
}

pub(crate) fn render_response(response: &ApiResponse) -> String {
    render(
        "Response",
        &[
            ("Status Code", Value::from(response.status_code())),
            ("Headers", header_object(response.headers().iter())),
            ("Body", response.data().cloned().unwrap_or(Value::Null)),
        ],
    )
}

fn header_object<'a>(headers: impl Iterator<Item = (&'a str, &'a str)>) -> Value {
    Value::Object(
        headers
            .map(|(name, value)| (name.to_owned(), Value::String(value.to_owned())))
            .collect(),
    )
}

fn render(title: &str, sections: &[(&str, Value)]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("\n{rule}\n{}\n{rule}\n", title.to_uppercase());
    for (key, value) in sections {
        out.push_str(&format!("\n{key}:\n{}\n", section_text(value)));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

fn section_text(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => format!("{value:#}"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::Headers;
    use crate::transport::{HttpMethod, REQUEST_TIMEOUT, request_headers};

    #[test]
    fn request_dump_lists_method_url_headers_and_body() {
        let params = json!({"ref": "M-1"}).as_object().cloned().unwrap();
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: "https://example.everst.io/api/missions/get".to_owned(),
            headers: request_headers(r#"{"ref":"M-1"}"#, Some("abc")),
            body: r#"{"ref":"M-1"}"#.to_owned(),
            verify_ssl: true,
            timeout: REQUEST_TIMEOUT,
        };

        let dump = render_request(&request, &params);
        let rule = "=".repeat(60);

        assert!(dump.starts_with(&format!("\n{rule}\nREQUEST\n{rule}\n")));
        assert!(dump.contains("\nMethod:\nPOST\n"));
        assert!(dump.contains("\nURL:\nhttps://example.everst.io/api/missions/get\n"));
        assert!(dump.contains("\"Authorization\": \"Bearer abc\""));
        assert!(dump.contains("\nBody:\n{\n  \"ref\": \"M-1\"\n}\n"));
        assert!(dump.ends_with(&format!("{rule}\n")));
    }

    #[test]
    fn response_dump_shows_status_and_parsed_body() {
        let headers: Headers = [("content-type", "application/json")].into_iter().collect();
        let response = ApiResponse::new(r#"{"token": "xyz"}"#, 200, headers);

        let dump = render_response(&response);
        assert!(dump.contains("RESPONSE"));
        assert!(dump.contains("\nStatus Code:\n200\n"));
        assert!(dump.contains("\"content-type\": \"application/json\""));
        assert!(dump.contains("\"token\": \"xyz\""));
    }

    #[test]
    fn response_dump_prints_null_for_unparsed_body() {
        let response = ApiResponse::new("<html>", 502, Headers::new());
        let dump = render_response(&response);
        assert!(dump.contains("\nBody:\nnull\n"));
        assert!(dump.contains("\nHeaders:\n{}\n"));
    }
}
