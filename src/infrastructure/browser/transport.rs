//! HTTP transport underneath the browser

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::Url;

use crate::domain::ports::{BrowserError, BrowserResult};

/// A fetched document, after redirects
#[derive(Debug, Clone)]
pub struct Response {
    pub url: Url,
    pub body: String,
}

pub trait Transport {
    fn get(&mut self, url: &Url) -> BrowserResult<Response>;

    fn post_form(&mut self, url: &Url, fields: &[(String, String)]) -> BrowserResult<Response>;

    /// Forget cookies
    fn reset(&mut self) -> BrowserResult<()>;
}

#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            max_redirects: 10,
            user_agent: format!("pds-site/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking client with a cookie jar that follows redirects
pub struct ReqwestTransport {
    options: TransportOptions,
    client: Client,
}

fn build_client(options: &TransportOptions) -> BrowserResult<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::limited(options.max_redirects))
        .timeout(options.timeout)
        .user_agent(options.user_agent.clone())
        .build()
        .map_err(|e| BrowserError::Transport {
            url: String::new(),
            message: format!("cannot build HTTP client: {}", e),
        })
}

fn into_response(url: &Url, result: reqwest::Result<reqwest::blocking::Response>) -> BrowserResult<Response> {
    let transport_err = |e: reqwest::Error| BrowserError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    };
    let response = result.map_err(transport_err)?;
    let final_url = response.url().clone();
    tracing::debug!(status = %response.status(), url = %final_url, "response");
    let body = response.text().map_err(transport_err)?;
    Ok(Response {
        url: final_url,
        body,
    })
}

impl ReqwestTransport {
    pub fn new(options: TransportOptions) -> BrowserResult<Self> {
        let client = build_client(&options)?;
        Ok(Self { options, client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&mut self, url: &Url) -> BrowserResult<Response> {
        tracing::debug!(%url, "GET");
        into_response(url, self.client.get(url.clone()).send())
    }

    fn post_form(&mut self, url: &Url, fields: &[(String, String)]) -> BrowserResult<Response> {
        tracing::debug!(%url, fields = fields.len(), "POST");
        into_response(url, self.client.post(url.clone()).form(fields).send())
    }

    fn reset(&mut self) -> BrowserResult<()> {
        self.client = build_client(&self.options)?;
        Ok(())
    }
}
