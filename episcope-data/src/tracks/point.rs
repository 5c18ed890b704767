//! Point track (bedGraph-style TSV) parsing

use super::reader::DelimitedFile;
use crate::error::Result;
use crate::types::PointTrackPoint;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

/// Column layout of a point track file (tab separated, no header).
pub struct PointColumns;

impl PointColumns {
    pub const COUNT: usize = 4;
    pub const CHROMOSOME: usize = 0;
    pub const START: usize = 1;
    pub const END: usize = 2;
    pub const VALUE: usize = 3;
}

/// Read a point track into per-chromosome interval lists, in file order.
///
/// Rows whose value is not a number (missing-data markers) are skipped.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_point_track(path: &Path) -> Result<BTreeMap<String, Vec<PointTrackPoint>>> {
    let mut file = DelimitedFile::open(path, "point track file", b'\t', false)?;
    let mut track: BTreeMap<String, Vec<PointTrackPoint>> = BTreeMap::new();
    let mut skipped = 0usize;

    file.for_each_row(PointColumns::COUNT, |row| {
        let start = row.coordinate(PointColumns::START, "start")?;
        let end = row.coordinate(PointColumns::END, "end")?;
        let Ok(value) = row.float(PointColumns::VALUE, "value") else {
            trace!("Skipping line {}: no value", row.line());
            skipped += 1;
            return Ok(());
        };

        track
            .entry(row.text(PointColumns::CHROMOSOME).to_string())
            .or_default()
            .push(PointTrackPoint::new(start, end, value));
        Ok(())
    })?;

    debug!(
        "Loaded point track {}: {} intervals, {} skipped",
        file.path().display(),
        track.values().map(Vec::len).sum::<usize>(),
        skipped
    );
    Ok(track)
}
