use serde::{Deserialize, Serialize};

/// Field name to type descriptor, as produced by introspection
///
/// Keys keep the server's order, which for inputs is the feature-vector order.
pub type SchemaMapping = serde_json::Map<String, serde_json::Value>;

/// Body of a model creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateModelRequest {
    pub name: String,
    pub model_type: String,
    pub input_mapping: SchemaMapping,
    pub output_mapping: SchemaMapping,
}

/// Minimal model creation response; the server echoes more fields than this
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CreatedModel {
    pub id: u64,
}

/// Remote model record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelRecord {
    pub id: u64,
    pub name: String,
    pub model_type: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub s3_path: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub deployments: Vec<serde_json::Value>,
    #[serde(default)]
    pub input_mapping: SchemaMapping,
    #[serde(default)]
    pub output_mapping: SchemaMapping,
    #[serde(default)]
    pub monthly_usage: f64,
    #[serde(default)]
    pub total_usage: f64,
}

/// Inferred input/output schema of an uploaded model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Introspection {
    pub input_format: SchemaMapping,
    pub output_format: SchemaMapping,
}

/// Body of a deployment creation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDeploymentRequest {
    pub name: String,
    pub environment: String,
    pub instances: u32,
    pub v_cores: u32,
    pub ml_model_id: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClientCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(alias = "access_token")]
    pub token: String,
}
