//! An experiment: a named series of timesteps.

use super::timestep::{Timestep, dir_name, subdirectories};
use crate::error::{DatasetError, Result};
use crate::meta::{ExperimentMeta, read_meta};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    name: String,
    path: PathBuf,
    meta: ExperimentMeta,
    timesteps: BTreeMap<String, Timestep>,
}

impl Experiment {
    /// Load the experiment rooted at `path`; every subdirectory is a timestep.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(DatasetError::not_found("experiment directory", path));
        }

        let meta: ExperimentMeta = read_meta(path, "experiment meta.yaml")?;
        let timesteps = subdirectories(path, "experiment directory")?
            .into_iter()
            .map(|dir| Timestep::load(&dir).map(|t| (t.name().to_string(), t)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            name: dir_name(path),
            path: path.to_path_buf(),
            meta,
            timesteps,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meta(&self) -> &ExperimentMeta {
        &self.meta
    }

    pub fn timesteps(&self) -> &BTreeMap<String, Timestep> {
        &self.timesteps
    }

    pub fn timestep(&self, name: &str) -> Option<&Timestep> {
        self.timesteps.get(name)
    }
}
