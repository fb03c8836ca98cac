use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartsError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Blueprint(#[from] BlueprintError),
}

impl PartsError {
    /// Path of the blueprint file that failed to load, if any.
    pub fn source_path(&self) -> Option<&PathBuf> {
        match self {
            PartsError::Catalog(_) => None,
            PartsError::Blueprint(be) => match be {
                BlueprintError::Io { path, .. } | BlueprintError::Json { path, .. } => Some(path),
                BlueprintError::InvalidJunctionType { .. } => None,
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("only one transistor catalog is allowed per process")]
    SingletonViolation,

    #[error("transistor model not found: {model}")]
    ModelNotFound { model: String },

    #[error("transistor model {model} has a current gain of zero")]
    ZeroCurrentGain { model: String },
}

#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("IO error reading {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("invalid blueprint {}: {error}", .path.display())]
    Json {
        path: PathBuf,
        error: serde_json::Error,
    },

    #[error("invalid junction type: {s} (expected NPN or PNP)")]
    InvalidJunctionType { s: String },
}
