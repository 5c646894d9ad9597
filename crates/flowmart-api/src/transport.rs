//! HTTP transport described as plain data.
//!
//! The client builds [`HttpRequest`] values and interprets [`HttpResponse`]
//! values; an [`HttpTransport`] only moves bytes. Any response, whatever its
//! status, comes back as `Ok`. `Err` means no response was obtained.

use crate::config::Timeouts;
use crate::errors::Result;
use async_trait::async_trait;
use flowmart_core::NetworkError;
use log::debug;
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// A fully resolved request. `form` is sent as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn form_value(&self, field: &str) -> Option<&str> {
        self.form
            .as_ref()?
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, NetworkError>;
}

/// Default transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// `reqwest` has no write timeout, so the overall request deadline is the
    /// sum of the three phases and bounds a stalled upload.
    pub fn new(timeouts: &Timeouts) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .read_timeout(timeouts.read)
            .timeout(
                timeouts
                    .connect
                    .saturating_add(timeouts.read)
                    .saturating_add(timeouts.write),
            )
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, NetworkError> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(fields) = request.form {
            let form = fields
                .into_iter()
                .fold(Form::new(), |form, (name, value)| form.text(name, value));
            builder = builder.multipart(form);
        }

        let response = builder.send().await.map_err(|e| {
            debug!("{} {} failed: {:?}", request.method, request.url, e);
            network_error(&e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            debug!("Reading response body from {} failed: {:?}", request.url, e);
            network_error(&e)
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn network_error(e: &reqwest::Error) -> NetworkError {
    if e.is_timeout() {
        NetworkError::new(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        NetworkError::new(format!("Could not connect to server: {}", e))
    } else {
        NetworkError::new(e.to_string())
    }
}
