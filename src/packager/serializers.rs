use super::{Framework, TrainedModel};
use crate::error::{NtientError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes a trained model to a single artifact file
pub trait Serializer: Send + Sync {
    fn framework(&self) -> Framework;

    /// Fixed artifact file name for this framework
    fn file_name(&self) -> &'static str;

    /// Serialize `model` into `dir`, returning the path of the written file
    ///
    /// An existing file of the same name is overwritten. If the model fails to
    /// save, a partial file may be left behind.
    fn serialize(&self, model: &dyn TrainedModel, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        model.save(&mut writer).map_err(|e| {
            NtientError::Serialization(format!(
                "Failed to serialize {} model to {}: {e}",
                self.framework(),
                path.display()
            ))
        })?;
        writer.flush()?;

        tracing::debug!("Wrote {} artifact to {}", self.framework(), path.display());
        Ok(path)
    }
}

/// scikit-learn estimators, stored as joblib pickles
#[derive(Debug, Default, Clone, Copy)]
pub struct SklearnSerializer;

impl Serializer for SklearnSerializer {
    fn framework(&self) -> Framework {
        Framework::Sklearn
    }

    fn file_name(&self) -> &'static str {
        "sklearn_model.joblib"
    }
}

/// Keras models, stored in HDF5 format
#[derive(Debug, Default, Clone, Copy)]
pub struct KerasSerializer;

impl Serializer for KerasSerializer {
    fn framework(&self) -> Framework {
        Framework::Keras
    }

    fn file_name(&self) -> &'static str {
        "keras_model.h5"
    }
}

/// PyTorch modules, stored as `.pt` archives
#[derive(Debug, Default, Clone, Copy)]
pub struct PytorchSerializer;

impl Serializer for PytorchSerializer {
    fn framework(&self) -> Framework {
        Framework::Pytorch
    }

    fn file_name(&self) -> &'static str {
        "pytorch_model.pt"
    }
}

/// Serializer registered for a framework
#[must_use]
pub fn serializer_for(framework: Framework) -> Box<dyn Serializer> {
    match framework {
        Framework::Sklearn => Box::new(SklearnSerializer),
        Framework::Keras => Box::new(KerasSerializer),
        Framework::Pytorch => Box::new(PytorchSerializer),
    }
}
