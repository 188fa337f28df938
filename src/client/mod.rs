//! Client layer: builds requests, drives the transport, wraps responses.

mod dump;
mod webhook;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use log::{Level, debug, info, log_enabled};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{ApiResponse, BaseUrl, ClientId, ClientSecret, ValidationError};
use crate::transport::{
    HttpMethod, HttpRequest, HttpTransport, REQUEST_TIMEOUT, ReqwestTransport, encode_body,
    encode_params, request_headers,
};

pub use dump::DEBUG_TARGET;

/// Endpoint exchanging client credentials for a bearer token.
pub const AUTH_ENDPOINT: &str = "auth";

const ENV_BASE_URL: &str = "EVEREST_BASE_URL";
const ENV_CLIENT_ID: &str = "EVEREST_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "EVEREST_CLIENT_SECRET";
const ENV_DEBUG: &str = "EVEREST_DEBUG";
const ENV_VERIFY_SSL: &str = "EVEREST_VERIFY_SSL";
const ENV_TOKEN: &str = "EVEREST_TOKEN";

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EverestClient`].
///
/// A completed HTTP exchange is never an error, whatever its status code or
/// body: it comes back as an [`ApiResponse`]. `Err` means no answer was
/// obtained, or the call could not be prepared in the first place.
pub enum EverestError {
    /// HTTP client / transport failure (DNS, TLS, connect, timeouts).
    #[error("request error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Request params could not be encoded as a JSON object body.
    #[error("encode error: {0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// A webhook payload could not be decoded.
    #[error("webhook payload error: {0}")]
    Webhook(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone)]
/// Builder for [`EverestClient`].
///
/// Defaults: debug dumps off, TLS certificate verification on, no token.
pub struct EverestClientBuilder {
    base_url: String,
    client_id: String,
    client_secret: String,
    debug: bool,
    verify_ssl: bool,
    user_agent: Option<String>,
    token: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl EverestClientBuilder {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            debug: false,
            verify_ssl: true,
            user_agent: None,
            token: None,
            transport: None,
        }
    }

    /// Read the configuration from `EVEREST_*` environment variables.
    ///
    /// `EVEREST_BASE_URL`, `EVEREST_CLIENT_ID` and `EVEREST_CLIENT_SECRET` are
    /// required. `EVEREST_DEBUG`, `EVEREST_VERIFY_SSL` (`1/true/yes/on` or
    /// `0/false/no/off`) and `EVEREST_TOKEN` are optional.
    pub fn from_env() -> Result<Self, EverestError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EverestError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ValidationError::Empty { field: name })
        };

        let mut builder = Self::new(
            required(ENV_BASE_URL)?,
            required(ENV_CLIENT_ID)?,
            required(ENV_CLIENT_SECRET)?,
        );
        if let Some(value) = lookup(ENV_DEBUG) {
            builder.debug = parse_flag(ENV_DEBUG, &value)?;
        }
        if let Some(value) = lookup(ENV_VERIFY_SSL) {
            builder.verify_ssl = parse_flag(ENV_VERIFY_SSL, &value)?;
        }
        builder.token = lookup(ENV_TOKEN).filter(|token| !token.is_empty());
        Ok(builder)
    }

    /// Dump every request and response to the `everest_api::debug` log target.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Toggle TLS certificate verification. Only disable it for local debugging.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Start with a previously obtained bearer token instead of calling `auth`.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Send requests through a custom [`HttpTransport`] instead of `reqwest`.
    ///
    /// The user agent setting only applies to the default transport.
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build an [`EverestClient`].
    pub fn build(self) -> Result<EverestClient, EverestError> {
        let base_url = BaseUrl::new(self.base_url)?;
        let client_id = ClientId::new(self.client_id)?;
        let client_secret = ClientSecret::new(self.client_secret)?;

        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new(self.user_agent.as_deref())
                    .map_err(|err| EverestError::Transport(Box::new(err)))?,
            ),
        };

        Ok(EverestClient {
            base_url,
            client_id,
            client_secret,
            debug: self.debug,
            verify_ssl: self.verify_ssl,
            token: self.token,
            http,
        })
    }
}

impl fmt::Debug for EverestClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EverestClientBuilder")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("debug", &self.debug)
            .field("verify_ssl", &self.verify_ssl)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ValidationError::InvalidFlag {
            field,
            value: value.to_owned(),
        }),
    }
}

#[derive(Serialize)]
struct AuthRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Clone)]
/// Blocking client for the Everest logistics API.
///
/// Every call is one request/response round trip returning an
/// [`ApiResponse`]; nothing is retried. Params are always sent as a JSON
/// body labelled `text/plain; charset=UTF-8`, including for `GET` and
/// `DELETE`, which is what the API expects.
///
/// The bearer token is the only state that changes after construction. It is
/// set by a successful [`EverestClient::auth`] or by
/// [`EverestClient::set_token`] and never expires on its own: when the API
/// starts rejecting it, call `auth` again. Both take `&mut self`, so a client
/// shared between threads needs an outer lock around them.
///
/// The default transport is `reqwest::blocking`; do not call such a client
/// from inside an async runtime.
pub struct EverestClient {
    base_url: BaseUrl,
    client_id: ClientId,
    client_secret: ClientSecret,
    debug: bool,
    verify_ssl: bool,
    token: Option<String>,
    http: Arc<dyn HttpTransport>,
}

impl EverestClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`EverestClient::builder`].
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, EverestError> {
        Self::builder(base_url, client_id, client_secret).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> EverestClientBuilder {
        EverestClientBuilder::new(base_url, client_id, client_secret)
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn verifies_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Enable or disable TLS certificate verification for subsequent calls.
    pub fn set_verify_ssl(&mut self, verify: bool) -> &mut Self {
        self.verify_ssl = verify;
        self
    }

    /// Exchange the client credentials for a bearer token.
    ///
    /// On a 2xx response whose body object has a `"token"` key, the token is
    /// stored and sent with every later request. The response is returned
    /// either way; check [`ApiResponse::is_success`] to know whether it
    /// worked. Only transport failures produce `Err`.
    pub fn auth(&mut self) -> Result<ApiResponse, EverestError> {
        let params = AuthRequest {
            client_id: self.client_id.as_str(),
            client_secret: self.client_secret.as_str(),
        };
        let response = self.send(HttpMethod::Post, AUTH_ENDPOINT, &params)?;

        if response.is_success() {
            let token = response
                .data()
                .and_then(Value::as_object)
                .and_then(|object| object.get("token"));
            match token {
                Some(Value::String(token)) => self.token = Some(token.clone()),
                Some(Value::Null) | None => {}
                Some(other) => self.token = Some(other.to_string()),
            }
        }

        Ok(response)
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Reuse a token obtained earlier (e.g. persisted between runs).
    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.token = Some(token.into());
        self
    }

    /// Send a `GET` request; `params` travel in the JSON body.
    pub fn get<P>(&self, endpoint: &str, params: &P) -> Result<ApiResponse, EverestError>
    where
        P: Serialize + ?Sized,
    {
        self.send(HttpMethod::Get, endpoint, params)
    }

    pub fn post<P>(&self, endpoint: &str, params: &P) -> Result<ApiResponse, EverestError>
    where
        P: Serialize + ?Sized,
    {
        self.send(HttpMethod::Post, endpoint, params)
    }

    pub fn put<P>(&self, endpoint: &str, params: &P) -> Result<ApiResponse, EverestError>
    where
        P: Serialize + ?Sized,
    {
        self.send(HttpMethod::Put, endpoint, params)
    }

    /// Send a `DELETE` request; `params` travel in the JSON body.
    pub fn delete<P>(&self, endpoint: &str, params: &P) -> Result<ApiResponse, EverestError>
    where
        P: Serialize + ?Sized,
    {
        self.send(HttpMethod::Delete, endpoint, params)
    }

    fn send<P>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &P,
    ) -> Result<ApiResponse, EverestError>
    where
        P: Serialize + ?Sized,
    {
        let params = encode_params(params).map_err(|err| EverestError::Encode(Box::new(err)))?;
        let body = encode_body(&params);
        let request = HttpRequest {
            method,
            url: self.base_url.join(endpoint),
            headers: request_headers(&body, self.token.as_deref()),
            body,
            verify_ssl: self.verify_ssl,
            timeout: REQUEST_TIMEOUT,
        };

        let dumping = self.debug && log_enabled!(target: DEBUG_TARGET, Level::Info);
        if dumping {
            info!(target: DEBUG_TARGET, "{}", dump::render_request(&request, &params));
        }

        let raw = self.http.execute(&request).map_err(|err| {
            debug!("{} {} failed: {}", request.method, request.url, err);
            EverestError::Transport(err)
        })?;
        let response = ApiResponse::new(raw.body, raw.status, raw.headers);

        if dumping {
            info!(target: DEBUG_TARGET, "{}", dump::render_response(&response));
        }

        Ok(response)
    }
}
