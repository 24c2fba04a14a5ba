//! User-facing model handle
//!
//! A [`Model`] is validated locally, then synchronized with a remote model
//! record: package (for in-memory models), create, upload, introspect, deploy.

pub mod format;
pub mod model_type;

use crate::api::{
    Api, CreateDeploymentRequest, CreateModelRequest, Introspection, ModelRecord, SchemaMapping,
};
use crate::config::Config;
use crate::error::{NtientError, Result};
use crate::packager::{Packager, TrainedModel};
use std::path::{Path, PathBuf};

pub use model_type::ModelType;

/// Builder for [`Model`]; validation happens in [`ModelBuilder::build`]
#[derive(Default)]
pub struct ModelBuilder {
    organization: Option<String>,
    name: Option<String>,
    filename: Option<PathBuf>,
    model_type: Option<String>,
    model: Option<Box<dyn TrainedModel>>,
    model_id: Option<u64>,
    s3_path: Option<String>,
    input_mapping: SchemaMapping,
    output_mapping: SchemaMapping,
    output_dir: Option<PathBuf>,
}

impl ModelBuilder {
    #[must_use]
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Path of an already-serialized artifact
    #[must_use]
    pub fn filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = Some(model_type.into());
        self
    }

    /// In-memory trained model to package before upload
    #[must_use]
    pub fn model(mut self, model: impl TrainedModel + 'static) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    /// Refer to an existing remote record
    #[must_use]
    pub fn model_id(mut self, model_id: u64) -> Self {
        self.model_id = Some(model_id);
        self
    }

    #[must_use]
    pub fn s3_path(mut self, s3_path: impl Into<String>) -> Self {
        self.s3_path = Some(s3_path.into());
        self
    }

    #[must_use]
    pub fn input_mapping(mut self, mapping: SchemaMapping) -> Self {
        self.input_mapping = mapping;
        self
    }

    #[must_use]
    pub fn output_mapping(mut self, mapping: SchemaMapping) -> Self {
        self.output_mapping = mapping;
        self
    }

    /// Directory for packaged artifacts (defaults to the working directory)
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Validate the arguments and connect to the API
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// organization, name, filename (skipped when an in-memory model was
    /// given), model type presence, model type support.
    pub fn build(self, config: &Config) -> Result<Model> {
        let organization = required(self.organization, "Organization is required!")?;
        let name = required(self.name, "Name is required!")?;

        let filename = self.filename.filter(|f| !f.as_os_str().is_empty());
        if filename.is_none() && self.model.is_none() {
            return Err(NtientError::Config("Filename is required!".to_string()));
        }

        let model_type: ModelType =
            required(self.model_type, "Model Type is required!")?.parse()?;

        let packager = self.model.map(|model| {
            let packager = Packager::new(model, model_type.framework());
            match self.output_dir {
                Some(dir) => packager.with_output_dir(dir),
                None => packager,
            }
        });

        let api = Api::new(config, organization.clone())?;

        Ok(Model {
            organization,
            name,
            filename,
            model_type,
            model_id: self.model_id,
            s3_path: self.s3_path,
            input_mapping: self.input_mapping,
            output_mapping: self.output_mapping,
            deployments: Vec::new(),
            packager,
            api,
        })
    }
}

fn required(value: Option<String>, message: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| NtientError::Config(message.to_string()))
}

/// Client-side handle for a hosted model
#[derive(Debug)]
pub struct Model {
    pub organization: String,
    pub name: String,
    pub filename: Option<PathBuf>,
    pub model_type: ModelType,
    pub model_id: Option<u64>,
    pub s3_path: Option<String>,
    pub input_mapping: SchemaMapping,
    pub output_mapping: SchemaMapping,
    pub deployments: Vec<serde_json::Value>,
    packager: Option<Packager>,
    api: Api,
}

impl Model {
    #[must_use]
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    #[must_use]
    pub fn api(&self) -> &Api {
        &self.api
    }

    fn require_id(&self) -> Result<u64> {
        self.model_id.ok_or_else(|| {
            NtientError::Config("Model ID is not set. Call create_model first.".to_string())
        })
    }

    /// Create the remote record and store its id
    pub async fn create_model(&mut self) -> Result<u64> {
        let payload = CreateModelRequest {
            name: self.name.clone(),
            model_type: self.model_type.to_string(),
            input_mapping: self.input_mapping.clone(),
            output_mapping: self.output_mapping.clone(),
        };

        let created = self.api.create_model(&payload).await?;
        tracing::info!("Created model '{}' with id {}", self.name, created.id);

        self.model_id = Some(created.id);
        Ok(created.id)
    }

    /// Serialize the in-memory model and point `filename` at the artifact
    pub fn dump_model(&mut self) -> Result<PathBuf> {
        let packager = self.packager.as_ref().ok_or_else(|| {
            NtientError::Config(format!(
                "Model '{}' has no in-memory model to package",
                self.name
            ))
        })?;

        let path = packager.package()?;
        self.filename = Some(path.clone());
        Ok(path)
    }

    /// Upload the artifact at `filename`, packaging first if still needed
    pub async fn upload_file(&mut self) -> Result<serde_json::Value> {
        let id = self.require_id()?;

        let needs_dump = self
            .filename
            .as_ref()
            .map_or(true, |f| !f.exists() && self.packager.is_some());
        let filename = if needs_dump {
            self.dump_model()?
        } else {
            self.filename
                .clone()
                .ok_or_else(|| NtientError::Config("Filename is required!".to_string()))?
        };

        self.api.upload_file(id, &filename).await
    }

    /// Package (if needed), create the remote record and upload the artifact
    pub async fn publish(&mut self) -> Result<u64> {
        let id = self.create_model().await?;
        self.upload_file().await?;
        Ok(id)
    }

    /// Fetch the inferred input/output schema of the uploaded model
    pub async fn introspect_model(&self) -> Result<Introspection> {
        let id = self.require_id()?;
        self.api.introspect_model(id).await
    }

    /// Write `{name}_input.json` and `{name}_output.json` to the working directory
    pub fn write_format_files(
        &self,
        input_format: &SchemaMapping,
        output_format: &SchemaMapping,
    ) -> Result<(PathBuf, PathBuf)> {
        self.write_format_files_in(Path::new("."), input_format, output_format)
    }

    pub fn write_format_files_in(
        &self,
        dir: &Path,
        input_format: &SchemaMapping,
        output_format: &SchemaMapping,
    ) -> Result<(PathBuf, PathBuf)> {
        format::write_format_files(dir, &self.name, input_format, output_format)
    }

    /// Request a deployment of this model
    pub async fn deploy(
        &self,
        name: &str,
        environment: &str,
        v_cores: u32,
        instances: u32,
    ) -> Result<serde_json::Value> {
        let payload = CreateDeploymentRequest {
            name: name.to_string(),
            environment: environment.to_string(),
            instances,
            v_cores,
            ml_model_id: self.require_id()?,
        };

        tracing::info!(
            "Deploying model {} as '{name}' to {environment} ({instances}x{v_cores} vCPU)",
            payload.ml_model_id
        );
        self.api.create_deployment(&payload).await
    }

    /// Download the stored artifact to `destination`, replacing any existing file
    pub async fn download_model(&self, destination: &Path) -> Result<u64> {
        let id = self.require_id()?;
        self.api.download_model(id, destination).await
    }

    /// Sync local fields with the remote record
    pub async fn refresh(&mut self) -> Result<ModelRecord> {
        let id = self.require_id()?;
        let record = self.api.get_model(id).await?;

        self.s3_path.clone_from(&record.s3_path);
        self.deployments.clone_from(&record.deployments);
        self.input_mapping.clone_from(&record.input_mapping);
        self.output_mapping.clone_from(&record.output_mapping);
        if self.filename.is_none() {
            self.filename = record.filename.as_ref().map(PathBuf::from);
        }

        Ok(record)
    }
}
