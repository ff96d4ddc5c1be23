use anyhow::Context;
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result, error_for_status};
use crate::util::{Params, merge_query, urljoin};

pub(crate) const RATE_LIMIT_RESET: &str = "x-rate-limit-reset";

/// Authenticated access to the Solcast API.
///
/// Holds only immutable configuration and a pooled HTTP client, so it is
/// cheap to clone and safe to share between threads. Every call issues
/// exactly one request; nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    key: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("solcast-rs/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("solcast-rs")),
        );

        let http = HttpClient::builder()
            .default_headers(default_headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            url: cfg.url,
            key: cfg.key,
            timeout: cfg.timeout,
            http,
        })
    }

    /// Client with default settings for `api_key`.
    pub fn with_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(api_key))
    }

    /// Client with default settings and the key from `SOLCAST_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Default timeout for calls that do not pass one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `path` with `format=json` merged into `params`.
    ///
    /// Returns the parsed body on HTTP 200. Connection and timeout failures
    /// come back as [`Error::Transport`].
    #[instrument(skip(self, params), fields(url = %urljoin(&self.url, path)))]
    pub fn get(
        &self,
        path: &str,
        params: Option<&Params>,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let url = urljoin(&self.url, path);
        let query = merge_query(params);
        debug!(?query, "sending GET");

        let req = self.http.get(&url).query(&query);
        let resp = self.send(req, timeout)?;
        handle_response(resp)
    }

    /// POST `body` as JSON to `path`.
    #[instrument(skip(self, body), fields(url = %urljoin(&self.url, path)))]
    pub fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let url = urljoin(&self.url, path);
        debug!("sending POST");

        let req = self.http.post(&url).json(body);
        let resp = self.send(req, timeout)?;
        handle_response(resp)
    }

    fn send(&self, req: RequestBuilder, timeout: Option<Duration>) -> Result<Response> {
        self.apply_auth(req)
            .timeout(timeout.unwrap_or(self.timeout))
            .send()
            .map_err(|e| {
                info!(error = %e, "error reaching Solcast API");
                Error::Transport(e)
            })
    }

    fn apply_auth(&self, req: RequestBuilder) -> RequestBuilder {
        req.basic_auth(&self.key, Some(""))
    }
}

fn handle_response(resp: Response) -> Result<Value> {
    let status = resp.status();
    let reset = resp
        .headers()
        .get(RATE_LIMIT_RESET)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = resp.text()?;

    if status == StatusCode::OK {
        return serde_json::from_str(&text).map_err(Error::Decode);
    }

    let err = error_for_status(status, reset, &text);
    match &err {
        Error::RateLimitExceeded { reset } => {
            warn!(reset = reset.as_deref().unwrap_or("unknown"), "Solcast API rate limit reached");
        }
        _ => info!(%status, body = %text, "Solcast API rejected request"),
    }
    Err(err)
}
