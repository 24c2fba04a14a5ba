//! HTTP client for the ntient REST API
//!
//! All resources are scoped under `{host}/{organization}` and every request
//! carries `Authorization: Bearer <token>`. Each method issues exactly one
//! request; nothing is retried or cached.

pub mod types;

use crate::config::Config;
use crate::error::{NtientError, Result};
use futures_util::StreamExt;
use reqwest::{Response, StatusCode};
use std::path::Path;
use tokio::io::AsyncWriteExt;

pub use types::{
    CreateDeploymentRequest, CreateModelRequest, CreatedModel, Introspection, ModelRecord,
    SchemaMapping,
};
use types::{ClientCredentials, TokenResponse};

/// Authenticated client for one organization
#[derive(Clone)]
pub struct Api {
    client: reqwest::Client,
    token: String,
    organization: String,
    base_url: String,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("client", &"Client { ... }")
            .field("token", &"***")
            .field("organization", &self.organization)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Api {
    /// Create a client for `organization` using the given connection settings
    pub fn new(config: &Config, organization: impl Into<String>) -> Result<Self> {
        let organization = organization.into();

        if organization.is_empty() {
            return Err(NtientError::Config("Organization is required!".to_string()));
        }
        if config.host.is_empty() {
            return Err(NtientError::Config("API host is not configured".to_string()));
        }
        if config.token.is_empty() {
            return Err(NtientError::Config("API token is not configured".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            token: config.token.clone(),
            base_url: config.base_url(&organization),
            organization,
        })
    }

    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a model record
    pub async fn get_model(&self, id: u64) -> Result<ModelRecord> {
        let url = format!("{}/ml_model/{id}", self.base_url);
        tracing::debug!("GET {url}");

        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Create a model record and return its assigned id
    pub async fn create_model(&self, payload: &CreateModelRequest) -> Result<CreatedModel> {
        let url = format!("{}/ml_model", self.base_url);
        tracing::debug!("POST {url} name={} type={}", payload.name, payload.model_type);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Upload a model artifact as multipart field `file`
    ///
    /// The response body is returned as-is; an empty body yields `Null`.
    pub async fn upload_file(&self, id: u64, path: &Path) -> Result<serde_json::Value> {
        let url = format!("{}/ml_model/{id}/upload", self.base_url);

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "model".to_string(), |n| n.to_string_lossy().into_owned());

        tracing::info!("Uploading {file_name} ({} bytes) to model {id}", bytes.len());

        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new().part("file", file_part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;

        json_or_null(response).await
    }

    /// Inspect an uploaded model for its input/output schema
    pub async fn introspect_model(&self, id: u64) -> Result<Introspection> {
        let url = format!("{}/ml_model/{id}/introspect", self.base_url);
        tracing::debug!("GET {url}");

        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Request a deployment of a model record
    pub async fn create_deployment(
        &self,
        payload: &CreateDeploymentRequest,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/deployment", self.base_url);
        tracing::debug!(
            "POST {url} name={} environment={} model={}",
            payload.name,
            payload.environment,
            payload.ml_model_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;
        let response = check_status(response).await?;

        json_or_null(response).await
    }

    /// Obtain a bearer token that may call a deployment
    ///
    /// An explicit `token` is checked against the deployment and returned
    /// unchanged. Without one, `client_id` and `client_secret` are exchanged
    /// for a token. Any rejection, or having no usable credential at all, is an
    /// [`NtientError::Authorization`].
    pub async fn authorize_client_for_deployment(
        &self,
        deployment_id: u64,
        token: Option<&str>,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<String> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let url = format!("{}/deployment/{deployment_id}/authorize", self.base_url);
            tracing::debug!("GET {url}");

            let response = self.client.get(&url).bearer_auth(token).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(NtientError::Authorization(format!(
                    "token rejected for deployment {deployment_id} ({status})"
                )));
            }

            return Ok(token.to_string());
        }

        let (Some(client_id), Some(client_secret)) = (
            client_id.filter(|c| !c.is_empty()),
            client_secret.filter(|c| !c.is_empty()),
        ) else {
            return Err(NtientError::Authorization(
                "no token or client_id/client_secret supplied".to_string(),
            ));
        };

        let url = format!("{}/deployment/{deployment_id}/token", self.base_url);
        tracing::debug!("POST {url} client_id={client_id}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&ClientCredentials {
                client_id,
                client_secret,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NtientError::Authorization(format!(
                "client credentials rejected for deployment {deployment_id} ({status})"
            )));
        }

        let issued: TokenResponse = response.json().await.map_err(|e| {
            NtientError::Authorization(format!("malformed token response: {e}"))
        })?;

        Ok(issued.token)
    }

    /// Stream a model artifact into `destination`, returning the bytes written
    ///
    /// The file is created or truncated; a failure mid-stream leaves a partial file.
    pub async fn download_model(&self, id: u64, destination: &Path) -> Result<u64> {
        let url = format!("{}/ml_model/{id}/download", self.base_url);
        tracing::debug!("GET {url}");

        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;
        let response = check_status(response).await?;

        let mut file = tokio::fs::File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!(
            "Downloaded model {id} to {} ({written} bytes)",
            destination.display()
        );

        Ok(written)
    }
}

/// Turn a non-success response into [`NtientError::Api`] with its raw body
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("Response status: {status}");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    Err(NtientError::Api { status, body })
}

async fn json_or_null(response: Response) -> Result<serde_json::Value> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(serde_json::Value::Null);
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }

    Ok(serde_json::from_str(&text)?)
}
