use super::replay::Trace;
use crate::types::PackageInfo;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't decode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("trace refers to unknown function {0}")]
    UnknownFunction(String),

    #[error(transparent)]
    Create(#[from] crate::ssa::CreateError),

    #[error("output failed: {0}")]
    Output(#[from] io::Error),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one type-checked compilation unit per file.
pub fn load_units<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PackageInfo>, LoadError> {
    paths
        .iter()
        .map(|p| {
            let unit: PackageInfo = read_json(p.as_ref())?;
            debug!("loaded unit {} from {}", unit.path, p.as_ref().display());
            Ok(unit)
        })
        .collect()
}

pub fn load_trace(path: &Path) -> Result<Trace, LoadError> {
    let trace: Trace = read_json(path)?;
    debug!("loaded {} trace steps from {}", trace.steps.len(), path.display());
    Ok(trace)
}
