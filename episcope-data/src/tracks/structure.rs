//! Structure CSV parsing

use super::reader::DelimitedFile;
use crate::error::Result;
use crate::types::StructureSample;
use glam::DVec3;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Column layout of a structure file (comma separated, one header row).
pub struct StructureColumns;

impl StructureColumns {
    pub const COUNT: usize = 5;
    pub const CHROMOSOME: usize = 0;
    pub const ID: usize = 1;
    pub const X: usize = 2;
    pub const Y: usize = 3;
    pub const Z: usize = 4;
}

/// Read a structure file into per-chromosome bead lists, in file order.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_structure(path: &Path) -> Result<BTreeMap<String, Vec<StructureSample>>> {
    let mut file = DelimitedFile::open(path, "structure file", b',', true)?;
    let mut structures: BTreeMap<String, Vec<StructureSample>> = BTreeMap::new();

    file.for_each_row(StructureColumns::COUNT, |row| {
        let id = row.coordinate(StructureColumns::ID, "id")?;
        let position = DVec3::new(
            row.float(StructureColumns::X, "x")?,
            row.float(StructureColumns::Y, "y")?,
            row.float(StructureColumns::Z, "z")?,
        );

        let sample = StructureSample::try_from_bead_id(id, position)
            .ok_or_else(|| row.malformed(format!("bead id {id} is out of range")))?;

        structures
            .entry(row.text(StructureColumns::CHROMOSOME).to_string())
            .or_default()
            .push(sample);
        Ok(())
    })?;

    debug!(
        "Loaded structure {}: {} chromosomes, {} beads",
        file.path().display(),
        structures.len(),
        structures.values().map(Vec::len).sum::<usize>()
    );
    Ok(structures)
}
