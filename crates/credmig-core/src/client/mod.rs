use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use wreq::{Client, Method, Proxy};

use credmig_common::HttpMethod;

#[derive(Debug, Clone, PartialEq)]
pub struct CredsRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body; sent with `content-type: application/json`.
    pub body: Option<Bytes>,
}

impl CredsRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn put(url: impl Into<String>, body: Bytes) -> Self {
        Self {
            method: HttpMethod::Put,
            url: url.into(),
            body: Some(body),
        }
    }

    pub fn post(url: impl Into<String>, body: Bytes) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredsResponse {
    pub status: u16,
    pub text: String,
}

impl CredsResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Dns,
    Tls,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Dns => "dns",
            TransportErrorKind::Tls => "tls",
            TransportErrorKind::Other => "transport",
        };
        f.write_str(name)
    }
}

/// No HTTP response was received at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

/// Capability the migrator needs from the network: send one request, get the
/// status and body text back.
pub trait CredsClient: Send + Sync {
    fn send<'a>(
        &'a self,
        req: CredsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CredsResponse, TransportError>> + Send + 'a>>;
}

#[derive(Debug, Clone, Default)]
pub struct CredsClientConfig {
    /// Optional outbound proxy for all requests.
    pub proxy: Option<String>,
}

#[derive(Clone)]
pub struct WreqCredsClient {
    client: Client,
}

impl WreqCredsClient {
    pub fn new(config: CredsClientConfig) -> Result<Self, wreq::Error> {
        let proxy = normalize_proxy(config.proxy);
        Ok(Self {
            client: build_client(proxy.as_deref())?,
        })
    }
}

fn normalize_proxy(value: Option<String>) -> Option<String> {
    value
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
}

// Timeouts are left at the client's defaults.
fn build_client(proxy: Option<&str>) -> Result<Client, wreq::Error> {
    let mut builder = Client::builder();
    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy)?);
    }
    builder.build()
}

impl CredsClient for WreqCredsClient {
    fn send<'a>(
        &'a self,
        req: CredsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CredsResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(http_method_to_wreq(req.method), &req.url);
            if let Some(body) = req.body {
                builder = builder.header("content-type", "application/json").body(body);
            }

            let resp = builder.send().await.map_err(map_wreq_error)?;
            let status = resp.status().as_u16();
            let body = resp.bytes().await.map_err(map_wreq_error)?;
            Ok(CredsResponse {
                status,
                text: String::from_utf8_lossy(&body).into_owned(),
            })
        })
    }
}

fn http_method_to_wreq(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
    }
}

fn map_wreq_error(err: wreq::Error) -> TransportError {
    TransportError {
        kind: classify_wreq_error(&err),
        message: err.to_string(),
    }
}

fn classify_wreq_error(err: &wreq::Error) -> TransportErrorKind {
    let message = err.to_string().to_ascii_lowercase();
    if err.is_timeout() {
        return TransportErrorKind::Timeout;
    }
    if err.is_connect() {
        if message.contains("dns") || message.contains("resolve") {
            return TransportErrorKind::Dns;
        }
        if message.contains("tls") || message.contains("ssl") {
            return TransportErrorKind::Tls;
        }
        return TransportErrorKind::Connect;
    }
    if err.is_connection_reset() {
        return TransportErrorKind::Connect;
    }
    if message.contains("tls") || message.contains("ssl") {
        return TransportErrorKind::Tls;
    }
    TransportErrorKind::Other
}
