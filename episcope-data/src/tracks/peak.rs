//! Peak track (narrowPeak-style TSV) parsing

use super::reader::DelimitedFile;
use crate::error::Result;
use crate::types::PeakTrackPoint;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Column layout of a peak track file (tab separated, no header).
pub struct PeakColumns;

impl PeakColumns {
    pub const COUNT: usize = 10;
    pub const CHROMOSOME: usize = 0;
    pub const START: usize = 1;
    pub const END: usize = 2;
    pub const VALUE: usize = 4;
    /// Summit offset relative to `START`.
    pub const SUMMIT: usize = 9;
}

/// Read a peak track into per-chromosome peak lists, in file order.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_peak_track(path: &Path) -> Result<BTreeMap<String, Vec<PeakTrackPoint>>> {
    let mut file = DelimitedFile::open(path, "peak track file", b'\t', false)?;
    let mut track: BTreeMap<String, Vec<PeakTrackPoint>> = BTreeMap::new();

    file.for_each_row(PeakColumns::COUNT, |row| {
        let start = row.coordinate(PeakColumns::START, "start")?;
        let end = row.coordinate(PeakColumns::END, "end")?;
        let value = row.float(PeakColumns::VALUE, "value")?;
        let offset = row.coordinate(PeakColumns::SUMMIT, "summit offset")?;
        let summit = start
            .checked_add(offset)
            .ok_or_else(|| row.malformed(format!("summit {start} + {offset} is out of range")))?;

        track
            .entry(row.text(PeakColumns::CHROMOSOME).to_string())
            .or_default()
            .push(PeakTrackPoint::new(start, end, summit, value));
        Ok(())
    })?;

    debug!(
        "Loaded peak track {}: {} peaks",
        file.path().display(),
        track.values().map(Vec::len).sum::<usize>()
    );
    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn peak_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_peak_track_summit_is_absolute() {
        let file = peak_file("chr1\t10\t30\tpeak_1\t500\t.\t5.0\t12.1\t9.8\t8\n");
        let track = read_peak_track(file.path()).unwrap();

        let peaks = &track["chr1"];
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0], PeakTrackPoint::new(10, 30, 18, 500.0));
    }

    #[test]
    fn test_read_peak_track_wrong_column_count() {
        let file = peak_file("chr1\t10\t30\tpeak_1\t500\n");
        assert!(read_peak_track(file.path()).unwrap_err().is_malformed());
    }

    #[test]
    fn test_read_peak_track_huge_summit_offset_is_malformed() {
        let file = peak_file("chr1\t10\t30\tp\t5\t.\t1\t1\t1\t1e19\n");
        assert!(read_peak_track(file.path()).unwrap_err().is_malformed());
    }

    #[test]
    fn test_read_peak_track_summit_overflow_is_malformed() {
        let file = peak_file("chr1\t9e18\t9.1e18\tp\t5\t.\t1\t1\t1\t9e18\n");
        let err = read_peak_track(file.path()).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("summit"), "{err}");
    }

    #[test]
    fn test_read_peak_track_bad_value_is_malformed() {
        let file = peak_file("chr1\t10\t30\tpeak_1\tNA\t.\t5.0\t12.1\t9.8\t8\n");
        assert!(read_peak_track(file.path()).unwrap_err().is_malformed());
    }
}
