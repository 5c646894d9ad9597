use crate::config::Environment;
use crate::credentials::{mask_token, CredentialStore};
use crate::envelope::{decode_acknowledgement, decode_payload};
use crate::errors::{Result, SdkError};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use flowmart_core::{Acknowledgement, FlowMartError, Outcome};
use log::{debug, error, trace, warn};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Form fields sent with a request, in order.
pub type FormFields = Vec<(String, String)>;

/// Authenticated request dispatcher shared by every use case.
///
/// The client keeps no per-call state. The bearer token is read from the
/// credential store on each request, never cached.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialStore>,
    environment: Environment,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        environment: Environment,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        debug!("Creating ApiClient");
        debug!("  Base URL: {}", base_url);
        debug!("  Environment: {:?}", environment);

        Ok(Self {
            base_url,
            transport,
            credentials,
            environment,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Absolute URL of a resource path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request and return the raw response, whatever its status.
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        form: Option<FormFields>,
    ) -> Outcome<HttpResponse> {
        let url = self.endpoint(path);
        debug!("HTTP {} request to: {}", method, url);

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        match self.credentials.get().filter(|token| !token.is_empty()) {
            Some(token) => {
                trace!("  Authorization: Bearer {}", mask_token(&token));
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
            None => trace!("  No credential stored, sending without Authorization"),
        }

        if let Some(fields) = &form {
            let names: Vec<&str> = fields.iter().map(|(name, _)| name.as_str()).collect();
            trace!("  Form fields: {:?}", names);
        }

        let request = HttpRequest {
            method,
            url,
            headers,
            form,
        };

        let response = self.transport.send(request).await.map_err(|e| {
            error!("{} {} failed: {}", method, path, e.message);
            FlowMartError::from(e)
        })?;

        debug!("Response status: {}", response.status);
        if self.environment.logs_bodies() {
            trace!("Response body: {}", response.body);
        }
        if !response.is_success() {
            warn!("{} {} returned status {}", method, path, response.status);
        }

        Ok(response)
    }

    /// Send a request and decode its `data` payload, unwrapping `key` if the
    /// server nested the resource under it.
    pub async fn fetch<T>(
        &self,
        method: HttpMethod,
        path: &str,
        form: Option<FormFields>,
        key: Option<&str>,
    ) -> Outcome<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, form).await?;
        decode_payload(&response, key)
    }

    /// Send a request whose success carries no resource.
    pub async fn acknowledge(
        &self,
        method: HttpMethod,
        path: &str,
        form: Option<FormFields>,
    ) -> Outcome<Acknowledgement> {
        let response = self.execute(method, path, form).await?;
        decode_acknowledgement(&response)
    }
}

/// Parse `raw` and make sure it ends with `/` so resource paths nest under it.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|source| SdkError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SdkError::UnsupportedScheme(raw.to_string()));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Build form fields from `(name, value)` pairs.
pub fn form<I, K, V>(fields: I) -> FormFields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}
