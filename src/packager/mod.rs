//! Packaging of in-memory trained models into uploadable artifacts

pub mod serializers;

use crate::error::Result;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use serializers::{
    serializer_for, KerasSerializer, PytorchSerializer, Serializer, SklearnSerializer,
};

/// ML framework a model artifact belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    Sklearn,
    Keras,
    Pytorch,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sklearn => "sklearn",
            Self::Keras => "keras",
            Self::Pytorch => "pytorch",
        };
        f.write_str(name)
    }
}

/// A trained model that can write itself in its framework's native format
///
/// No check is made that the bytes actually belong to the declared framework.
pub trait TrainedModel: Send + Sync {
    fn save(&self, writer: &mut dyn Write) -> io::Result<()>;
}

/// Already-serialized artifacts held in memory
impl TrainedModel for Vec<u8> {
    fn save(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(self)
    }
}

impl TrainedModel for &'static [u8] {
    fn save(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(self)
    }
}

/// Serializes one trained model with the serializer for its framework
pub struct Packager {
    model: Box<dyn TrainedModel>,
    serializer: Box<dyn Serializer>,
    output_dir: PathBuf,
}

impl fmt::Debug for Packager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packager")
            .field("framework", &self.serializer.framework())
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl Packager {
    /// Package into the current working directory
    pub fn new(model: Box<dyn TrainedModel>, framework: Framework) -> Self {
        Self {
            model,
            serializer: serializer_for(framework),
            output_dir: PathBuf::from("."),
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn framework(&self) -> Framework {
        self.serializer.framework()
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the artifact and return its path
    pub fn package(&self) -> Result<PathBuf> {
        tracing::info!(
            "Packaging {} model into {}",
            self.serializer.framework(),
            self.output_dir.display()
        );
        self.serializer
            .serialize(self.model.as_ref(), &self.output_dir)
    }
}
