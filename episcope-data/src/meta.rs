//! `meta.yaml` documents found at each level of the dataset hierarchy.

use crate::error::{DatasetError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the metadata document at every level.
pub const META_FILE_NAME: &str = "meta.yaml";

/// Root `meta.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMeta {
    #[serde(default)]
    pub structure: StructureMeta,
    /// Keys not interpreted by the loader.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureMeta {
    #[serde(default)]
    pub chromosomes: Vec<String>,
}

/// `experiments/meta.yaml`: experiment-set level metadata, kept as-is.
pub type ExperimentsMeta = BTreeMap<String, serde_yaml::Value>;

/// `experiments/<name>/meta.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentMeta {
    #[serde(default, deserialize_with = "scalar_string")]
    pub sample: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub replicate: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub desc: Option<String>,
}

/// `experiments/<name>/<timestep>/meta.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestepMeta {
    /// Structure file, relative to the timestep directory.
    pub structure: PathBuf,
    #[serde(default)]
    pub tracks: TrackPaths,
}

/// Named track files, relative to the timestep directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackPaths {
    #[serde(default)]
    pub peak: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub point: BTreeMap<String, PathBuf>,
}

/// Read `<dir>/meta.yaml` into `T`.
///
/// An empty document reads as an empty mapping.
pub fn read_meta<T: DeserializeOwned>(dir: &Path, what: &'static str) -> Result<T> {
    let path = dir.join(META_FILE_NAME);
    if !path.is_file() {
        return Err(DatasetError::not_found(what, path));
    }

    let text = std::fs::read_to_string(&path).map_err(|e| DatasetError::io(what, &path, e))?;
    let value: serde_yaml::Value = serde_yaml::from_str(&text)
        .map_err(|e| DatasetError::malformed(&path, yaml_line(&e), e.to_string()))?;
    let value = match value {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
        other => other,
    };

    debug!("Read {}", path.display());
    serde_yaml::from_value(value)
        .map_err(|e| DatasetError::malformed(&path, yaml_line(&e), e.to_string()))
}

fn yaml_line(err: &serde_yaml::Error) -> usize {
    err.location().map(|l| l.line()).unwrap_or(0)
}

/// Accept any YAML scalar (`replicate: 1`, `replicate: "A"`) as a string.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("expected a scalar, got {other:?}"))),
    }
}
