use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Timeouts and pool bounds for calls to the transcription provider.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Whole-request deadline for submit and poll calls. Uploads are bounded
    /// by the connect and read timeouts instead, since large payloads need
    /// more wall clock than a status poll.
    pub request_timeout: Duration,
    pub max_idle_connections: usize,
    pub pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(120),
            request_timeout: Duration::from_secs(30),
            max_idle_connections: 5,
            pool_idle_timeout: Duration::from_secs(300),
        }
    }
}

/// Thin HTTP client with explicit timeouts. Carries no retry logic; callers
/// decide which failures are worth repeating.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    request_timeout: Duration,
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request construction: {0}")]
    Construction(String),
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .pool_max_idle_per_host(config.max_idle_connections)
            .pool_idle_timeout(config.pool_idle_timeout)
            .build()
            .map_err(|e| TransportError::Construction(e.to_string()))?;
        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }

    /// Multipart POST without a whole-request deadline; the read timeout
    /// still bounds a stalled connection.
    pub async fn post_multipart(
        &self,
        url: &str,
        api_key: &str,
        form: multipart::Form,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header("authorization", api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_response(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        body: &B,
    ) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header("authorization", api_key)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_response(response).await
    }

    pub async fn get(&self, url: &str, api_key: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header("authorization", api_key)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_response(response).await
    }

    async fn read_response(response: reqwest::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}
