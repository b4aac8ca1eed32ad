use crate::client::error::FetchError;
use hyper::ext::ReasonPhrase;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

/// Single-shot GET helper. No retries, no timeout, no cancellation: every call is
/// one best-effort attempt whose outcome is either the payload or a `FetchError`.
#[derive(Debug, Clone, Default)]
pub struct FetchService {
    client: reqwest::Client,
}

impl FetchService {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("[FETCH] GET {}", url);
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // only present when the status line carried a non-canonical phrase
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
            // keep the error payload when the service sent one; a non-JSON body is not an error here
            let body = response.json::<serde_json::Value>().await.ok();
            debug!("[FETCH] {} answered {} {}", url, status, reason.as_deref().unwrap_or(""));
            return Err(FetchError::from_status(status, reason.as_deref(), body));
        }
        Ok(response)
    }

    /// GET `url` and decode the body as JSON into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET `url` and hand back the raw body.
    pub async fn fetch_data(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Callback form of [`fetch_json`](Self::fetch_json); `callback` runs exactly once.
    pub async fn fetch_json_with<T, F>(&self, url: &str, callback: F)
    where
        T: DeserializeOwned,
        F: FnOnce(Result<T, FetchError>),
    {
        callback(self.fetch_json(url).await)
    }

    /// Callback form of [`fetch_data`](Self::fetch_data); `callback` runs exactly once.
    pub async fn fetch_data_with<F>(&self, url: &str, callback: F)
    where
        F: FnOnce(Result<Vec<u8>, FetchError>),
    {
        callback(self.fetch_data(url).await)
    }
}
