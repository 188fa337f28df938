use std::error::Error as StdError;

use log::trace;
use reqwest::blocking::Client;

use super::request::{HttpRequest, HttpResponse};

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Sends one prepared request and hands back whatever the server answered.
///
/// Implementations return `Err` only when no HTTP response was received
/// (DNS, connect, TLS, timeout). Non-2xx statuses are regular responses.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}

#[derive(Debug, Clone)]
/// Blocking transport backed by [`reqwest`].
///
/// Keeps one client that validates certificates and one that does not, so the
/// verification flag can change between calls without rebuilding anything.
pub struct ReqwestTransport {
    verified: Client,
    unverified: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: Option<&str>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            verified: build_client(true, user_agent)?,
            unverified: build_client(false, user_agent)?,
        })
    }
}

fn build_client(verify_ssl: bool, user_agent: Option<&str>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if !verify_ssl {
        builder = builder.danger_accept_invalid_certs(true);
    }
    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent.to_owned());
    }
    builder.build()
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let client = if request.verify_ssl {
            &self.verified
        } else {
            &self.unverified
        };

        let mut builder = client
            .request(request.method.into(), request.url.as_str())
            .timeout(request.timeout)
            .body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        trace!("sending {} request to {}", request.method, request.url);
        let response = builder.send()?;
        let status = response.status().as_u16();
        trace!("got {} response from {}", status, request.url);

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
