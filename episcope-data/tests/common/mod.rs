//! Throwaway dataset trees for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const STRUCTURE_CSV: &str = "chromosome,id,x,y,z\n\
chr1,0,0.0,0.0,0.0\n\
chr1,1,1.0,0.0,0.0\n\
chr1,2,1.0,1.0,0.0\n\
chr1,3,1.0,1.0,1.0\n\
chr2,0,5.0,5.0,5.0\n\
chr2,1,6.0,5.0,5.0\n";

pub const PEAK_TSV: &str = "chr1\t10\t30\tp1\t5.0\t.\t1.0\t2.0\t3.0\t8\n\
chr1\t150000\t170000\tp2\t12.5\t.\t1.0\t2.0\t3.0\t5000\n\
chr2\t500\t900\tp3\t2.0\t.\t1.0\t2.0\t3.0\t100\n";

pub const POINT_TSV: &str = "chr1\t0\t100000\t0.5\n\
chr1\t100000\t200000\tNA\n\
chr1\t200000\t300000\t-0.75\n";

/// Builds a complete two-experiment dataset under a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(root, "test_autosomes.tsv", "chr1\t1000000\nchr2\t500000\n");
        write(root, "meta.yaml", "structure:\n  chromosomes: [chr1, chr2]\n");
        write(root, "experiments/meta.yaml", "description: test ensemble\n");

        for experiment in ["Untr_A", "Treat_B"] {
            write(
                root,
                &format!("experiments/{experiment}/meta.yaml"),
                "sample: test\nreplicate: 1\ndesc: fixture\n",
            );
            for timestep in ["00hpi", "12hpi"] {
                let ts = format!("experiments/{experiment}/{timestep}");
                write(
                    root,
                    &format!("{ts}/meta.yaml"),
                    "structure: structure.csv\n\
                     tracks:\n  peak:\n    ATAC: atac.tsv\n  point:\n    compartment: compartment.tsv\n",
                );
                write(root, &format!("{ts}/structure.csv"), STRUCTURE_CSV);
                write(root, &format!("{ts}/atac.tsv"), PEAK_TSV);
                write(root, &format!("{ts}/compartment.tsv"), POINT_TSV);
            }
        }

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        write(self.dir.path(), relative, contents);
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.path(relative)).unwrap();
    }
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
