//! Web/HTTP Bridge - requests against the API under test
//!
//! This bridge executes HTTP requests directly using reqwest. It supports:
//! - GET, POST and PUT with optional JSON bodies
//! - Bearer authentication per request
//! - Default headers and a bounded per-request timeout
//!
//! Every call is a single attempt. Connection failures, timeouts and body
//! read errors come back as [`HttpOutcome::TransportError`].

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{BridgeError, HttpMethod, HttpOutcome, HttpResponse, HttpTransport, TransportErrorKind};
use crate::scenario::WebConfig;

#[derive(Debug)]
pub struct WebBridge {
    config: WebConfig,
    base_url: Url,
    client: reqwest::Client,
}

impl WebBridge {
    pub fn new(config: WebConfig) -> Result<Self, BridgeError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut client_builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout))
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::default()
            } else {
                reqwest::redirect::Policy::none()
            });

        if !config.validate_ssl {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| BridgeError::StartupFailed(e.to_string()))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    pub fn from_config(config: &WebConfig) -> Result<Self, BridgeError> {
        Self::new(config.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        format!("{}{}", base, path)
    }

    fn apply_headers(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }
        request
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        auth_token: Option<&str>,
    ) -> Result<HttpResponse, reqwest::Error> {
        let url = self.build_url(path);

        let mut request = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        request = self.apply_headers(request);

        if let Some(token) = auth_token {
            request = request.bearer_auth(token);
        }

        if let Some(body_value) = body {
            request = request.json(body_value);
        }

        debug!("Executing {} {}", method, url);
        let start = Instant::now();

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body_text = response.text().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        info!("{} {} -> {} ({}ms)", method, url, status, elapsed_ms);

        Ok(HttpResponse::new(status, body_text, elapsed_ms))
    }
}

#[async_trait]
impl HttpTransport for WebBridge {
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        auth_token: Option<&str>,
    ) -> HttpOutcome {
        match self.send(method, path, body, auth_token).await {
            Ok(response) => HttpOutcome::Completed(response),
            Err(e) => {
                let kind = classify(&e);
                warn!("{} {} failed ({}): {}", method, path, kind, e);
                HttpOutcome::TransportError {
                    kind,
                    cause: e.to_string(),
                }
            }
        }
    }
}

fn classify(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    }
}

/// Validate a base URL before any request is made
pub fn parse_base_url(raw: &str) -> Result<Url, BridgeError> {
    let url = Url::parse(raw).map_err(|e| BridgeError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(BridgeError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", other),
            })
        }
    }

    if url.host_str().is_none() {
        return Err(BridgeError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}
