use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::ApplianceConfig;
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Blocking HTTP client bound to one appliance endpoint and credential.
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl HttpClient {
    pub fn new(base_url: &str, config: &ApplianceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("dpnav")
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .map_err(|source| Error::Transport { url: base_url.to_owned(), source })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|source| Error::Transport { url: url.clone(), source })?;
        Self::body(url, resp)
    }

    pub fn post(&self, path: &str, body: String) -> Result<String> {
        let url = self.url(path);
        tracing::debug!(%url, bytes = body.len(), "POST");
        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .send()
            .map_err(|source| Error::Transport { url: url.clone(), source })?;
        Self::body(url, resp)
    }

    fn body(url: String, resp: Response) -> Result<String> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { url, status: status.as_u16() });
        }
        resp.text().map_err(|source| Error::Transport { url, source })
    }
}
