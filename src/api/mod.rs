//! REST API client.
//!
//! Thin typed wrapper over the conventional verbs the School Management API
//! exposes per resource:
//!
//! - `GET /api/{Resource}` lists records in server order
//! - `GET /api/{Resource}/{id}` fetches one record
//! - `POST /api/{Resource}` creates (the id in the body is ignored)
//! - `PUT /api/{Resource}/{id}` updates
//! - `DELETE /api/{Resource}/{id}` deletes

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::Resource;

/// Handle to the remote API. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self::with_client(http, &config.api_base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/api/{}", self.base_url, R::PATH)
    }

    fn record_url<R: Resource>(&self, id: i64) -> String {
        format!("{}/api/{}/{}", self.base_url, R::PATH, id)
    }

    /// GET /api/{Resource} - List all records.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        let url = self.collection_url::<R>();
        tracing::debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        decode(check_status(response).await?).await
    }

    /// GET /api/{Resource}/{id} - Get a single record.
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ClientError> {
        let url = self.record_url::<R>(id);
        tracing::debug!("GET {} ({}={})", url, R::ID_FIELD, id);
        let response = self.http.get(&url).send().await?;
        decode(check_status(response).await?).await
    }

    /// POST /api/{Resource} - Create a record. Returns the created record when
    /// the server echoes one.
    pub async fn create<R: Resource>(&self, record: &R) -> Result<Option<R>, ClientError> {
        let url = self.collection_url::<R>();
        tracing::debug!("POST {} ({} assigned by server)", url, R::ID_FIELD);
        let response = self.http.post(&url).json(record).send().await?;
        decode_optional(check_status(response).await?).await
    }

    /// PUT /api/{Resource}/{id} - Update a record.
    pub async fn update<R: Resource>(&self, id: i64, record: &R) -> Result<Option<R>, ClientError> {
        let url = self.record_url::<R>(id);
        tracing::debug!("PUT {} ({}={})", url, R::ID_FIELD, id);
        let response = self.http.put(&url).json(record).send().await?;
        decode_optional(check_status(response).await?).await
    }

    /// DELETE /api/{Resource}/{id} - Delete a record.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ClientError> {
        let url = self.record_url::<R>(id);
        tracing::debug!("DELETE {} ({}={})", url, R::ID_FIELD, id);
        let response = self.http.delete(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-success status into an error, keeping the body for the log.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    tracing::error!("{} returned {}: {}", url, status, body);
    Err(ClientError::Status {
        status: status.as_u16(),
        message: status
            .canonical_reason()
            .unwrap_or("Unexpected status")
            .to_string(),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decode a body that may legitimately be empty (`201` with no echo, `204`).
async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ClientError> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&bytes)?))
}
