//! The dataset root: autosome list, metadata and all experiments.

use super::experiment::Experiment;
use super::timestep::subdirectories;
use crate::error::{DatasetError, Result};
use crate::meta::{EnsembleMeta, ExperimentsMeta, read_meta};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Suffix of the autosome list file at the dataset root.
pub const AUTOSOMES_SUFFIX: &str = "_autosomes.tsv";

/// Directory holding the experiments, relative to the dataset root.
pub const EXPERIMENTS_DIR: &str = "experiments";

/// A fully loaded dataset. Immutable; load a new one to pick up changes on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    root: PathBuf,
    autosomes: Vec<String>,
    meta: EnsembleMeta,
    experiments_meta: ExperimentsMeta,
    experiments: BTreeMap<String, Experiment>,
}

impl Ensemble {
    /// Load every experiment and timestep under `root`.
    ///
    /// Fails on the first missing or malformed file; nothing is returned partially.
    #[tracing::instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DatasetError::not_found("dataset directory", root));
        }

        let autosomes = read_autosomes(root)?;
        let meta: EnsembleMeta = read_meta(root, "dataset meta.yaml")?;

        let experiments_dir = root.join(EXPERIMENTS_DIR);
        if !experiments_dir.is_dir() {
            return Err(DatasetError::not_found("experiments directory", experiments_dir));
        }
        let experiments_meta: ExperimentsMeta =
            read_meta(&experiments_dir, "experiments meta.yaml")?;

        let experiments = subdirectories(&experiments_dir, "experiments directory")?
            .into_iter()
            .map(|dir| Experiment::load(&dir).map(|e| (e.name().to_string(), e)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        info!(
            "Loaded ensemble {}: {} autosomes, {} experiments, {} timesteps",
            root.display(),
            autosomes.len(),
            experiments.len(),
            experiments
                .values()
                .map(|e| e.timesteps().len())
                .sum::<usize>()
        );

        Ok(Self {
            root: root.to_path_buf(),
            autosomes,
            meta,
            experiments_meta,
            experiments,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Chromosome names from the autosome list, in file order.
    pub fn autosomes(&self) -> &[String] {
        &self.autosomes
    }

    pub fn meta(&self) -> &EnsembleMeta {
        &self.meta
    }

    pub fn experiments_meta(&self) -> &ExperimentsMeta {
        &self.experiments_meta
    }

    pub fn experiments(&self) -> &BTreeMap<String, Experiment> {
        &self.experiments
    }

    pub fn experiment(&self, name: &str) -> Option<&Experiment> {
        self.experiments.get(name)
    }
}

/// Read the `*_autosomes.tsv` file at `root`: first token of each non-empty line.
fn read_autosomes(root: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(root).map_err(|e| DatasetError::io("dataset directory", root, e))?;
    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| DatasetError::io("dataset directory", root, e))?
            .path();
        let is_autosomes = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(AUTOSOMES_SUFFIX));
        if is_autosomes && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();

    let Some(path) = candidates.first() else {
        return Err(DatasetError::not_found(
            "autosome list (*_autosomes.tsv)",
            root,
        ));
    };
    if candidates.len() > 1 {
        warn!(
            "Found {} autosome lists in {}, using {}",
            candidates.len(),
            root.display(),
            path.display()
        );
    }

    let text = std::fs::read_to_string(path).map_err(|e| DatasetError::io("autosome list", path, e))?;
    let mut autosomes: Vec<String> = Vec::new();
    for token in text.lines().filter_map(|line| line.split_whitespace().next()) {
        if !autosomes.iter().any(|a| a == token) {
            autosomes.push(token.to_string());
        }
    }
    Ok(autosomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_autosomes_first_token() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("hg38_autosomes.tsv"),
            "chr1\t248956422\n\nchr2 242193529\nchr1\t248956422\n",
        )
        .unwrap();

        let autosomes = read_autosomes(dir.path()).unwrap();
        assert_eq!(autosomes, vec!["chr1", "chr2"]);
    }

    #[test]
    fn test_read_autosomes_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("autosomes.txt"), "chr1\n").unwrap();
        assert!(read_autosomes(dir.path()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_autosomes_picks_first_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_autosomes.tsv"), "chrB\n").unwrap();
        std::fs::write(dir.path().join("a_autosomes.tsv"), "chrA\n").unwrap();
        assert_eq!(read_autosomes(dir.path()).unwrap(), vec!["chrA"]);
    }
}
