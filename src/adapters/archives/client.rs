//! ArchivesSpace REST API client
//!
//! Session-token authentication: `connect` logs in with the configured
//! credentials and every subsequent call carries the session token in the
//! `X-ArchivesSpace-Session` header. Per-request timeouts come from the
//! environment configuration; retries are the caller's concern (the export
//! engine records per-item failures instead of retrying).

use crate::adapters::archives::models::{RepositoryRecord, SessionResponse};
use crate::adapters::archives::schema;
use crate::adapters::archives::{ApiResult, ArchivesApi};
use crate::config::EnvironmentConfig;
use crate::domain::{ArchivesApiError, Repository, Resource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Session header expected by ArchivesSpace
const SESSION_HEADER: &str = "X-ArchivesSpace-Session";

/// ArchivesSpace API client
#[derive(Debug)]
pub struct ArchivesClient {
    base_url: String,
    http: Client,
    session: String,
}

impl ArchivesClient {
    /// Connect to an ArchivesSpace backend and establish a session
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable, the credentials are
    /// rejected, or the login response cannot be decoded.
    pub async fn connect(config: &EnvironmentConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArchivesApiError::ConnectionFailed(e.to_string()))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        let login_url = format!("{base_url}/users/{}/login", config.username);
        let response = http
            .post(&login_url)
            .form(&[("password", config.password.expose_secret().as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
            return Err(ArchivesApiError::AuthenticationFailed(format!(
                "login rejected for user `{}`",
                config.username
            )));
        }
        check_status(status, "login")?;

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| ArchivesApiError::InvalidResponse(format!("login response: {e}")))?;

        tracing::info!(base_url = %base_url, "ArchivesSpace session established");

        Ok(Self {
            base_url,
            http,
            session: session.session,
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str) -> ApiResult<reqwest::Response> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(SESSION_HEADER, &self.session)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response.status(), path)?;
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get(path)
            .await?
            .json()
            .await
            .map_err(|e| ArchivesApiError::InvalidResponse(format!("{path}: {e}")))
    }

    async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let body = self
            .get(path)
            .await?
            .bytes()
            .await
            .map_err(transport_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ArchivesApi for ArchivesClient {
    async fn list_repositories(&self) -> ApiResult<Vec<u32>> {
        let records: Vec<RepositoryRecord> = self.get_json("/repositories").await?;
        records.iter().map(RepositoryRecord::id).collect()
    }

    async fn get_repository(&self, repository_id: u32) -> ApiResult<Repository> {
        let record: RepositoryRecord = self
            .get_json(&format!("/repositories/{repository_id}"))
            .await?;
        Ok(Repository::new(repository_id, record.slug))
    }

    async fn list_resource_ids(&self, repository_id: u32) -> ApiResult<Vec<u32>> {
        self.get_json(&format!(
            "/repositories/{repository_id}/resources?all_ids=true"
        ))
        .await
    }

    async fn get_resource(&self, repository_id: u32, resource_id: u32) -> ApiResult<Resource> {
        self.get_json(&format!(
            "/repositories/{repository_id}/resources/{resource_id}"
        ))
        .await
    }

    async fn get_ead(
        &self,
        repository_id: u32,
        resource_id: u32,
        include_unpublished_notes: bool,
    ) -> ApiResult<Vec<u8>> {
        self.get_bytes(&format!(
            "/repositories/{repository_id}/resource_descriptions/{resource_id}.xml?include_unpublished={include_unpublished_notes}"
        ))
        .await
    }

    async fn get_marc(
        &self,
        repository_id: u32,
        resource_id: u32,
        include_unpublished_notes: bool,
    ) -> ApiResult<Vec<u8>> {
        self.get_bytes(&format!(
            "/repositories/{repository_id}/resources/marc21/{resource_id}.xml?include_unpublished_marc={include_unpublished_notes}"
        ))
        .await
    }

    fn validate_ead(&self, record: &[u8]) -> Result<(), String> {
        schema::validate_ead(record)
    }

    fn validate_marc(&self, record: &[u8]) -> Result<(), String> {
        schema::validate_marc(record)
    }
}

fn transport_error(err: reqwest::Error) -> ArchivesApiError {
    if err.is_timeout() {
        ArchivesApiError::Timeout(err.to_string())
    } else {
        ArchivesApiError::ConnectionFailed(err.to_string())
    }
}

fn check_status(status: StatusCode, path: &str) -> ApiResult<()> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::NOT_FOUND => Err(ArchivesApiError::NotFound(path.to_string())),
        StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => Err(
            ArchivesApiError::AuthenticationFailed(format!("session rejected for {path}")),
        ),
        s if s.is_server_error() => Err(ArchivesApiError::ServerError {
            status: s.as_u16(),
            message: path.to_string(),
        }),
        s => Err(ArchivesApiError::ClientError {
            status: s.as_u16(),
            message: path.to_string(),
        }),
    }
}
