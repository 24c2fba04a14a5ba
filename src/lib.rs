//! Client library for the ntient model hosting service.
//!
//! ```no_run
//! use ntient::{Config, Model};
//!
//! # async fn run() -> ntient::Result<()> {
//! let config = Config::load()?;
//! let mut model = Model::builder()
//!     .organization("acme")
//!     .name("churn")
//!     .filename("sklearn_model.joblib")
//!     .model_type("sklearn DecisionTreeClassifier")
//!     .build(&config)?;
//!
//! model.create_model().await?;
//! model.upload_file().await?;
//! model.deploy("churn-sandbox", "sandbox", 1, 1).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod packager;

pub use api::Api;
pub use config::Config;
pub use error::{NtientError, Result};
pub use model::{Model, ModelType};
pub use packager::{Packager, TrainedModel};
