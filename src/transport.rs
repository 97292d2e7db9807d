use async_trait::async_trait;
use log::debug;

/// Protocol version header the classic management API requires on every call.
const MANAGEMENT_VERSION: &str = "2014-05-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// Decoded-enough response: the adapter only reads bodies off 2xx replies.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Injected HTTP collaborator.
///
/// The adapter never talks to the wire directly; tests swap in a canned
/// implementation and assert on the requests it recorded.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<Response, TransportError>;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<Response, TransportError> {
        debug!("{} {}", method.as_str(), url);

        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        }
        .header("x-ms-version", MANAGEMENT_VERSION);

        if let Some(body) = body {
            request = request
                .header("Content-Type", "application/xml")
                .body(body);
        }

        let response = request.send().await.map_err(|source| {
            TransportError::Connection {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Connection {
                url: url.to_string(),
                source,
            })?;

        Ok(Response {
            status: status.as_u16(),
            body,
        })
    }
}
