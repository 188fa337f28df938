//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod http;
mod request;
mod webhook;

pub use http::{BoxError, HttpTransport, ReqwestTransport};
pub use request::{
    CONTENT_TYPE, EncodeError, HttpMethod, HttpRequest, HttpResponse, REQUEST_TIMEOUT,
    encode_body, encode_params, request_headers,
};
pub use webhook::{TransportError, decode_mission_status_json, decode_mission_status_value};
