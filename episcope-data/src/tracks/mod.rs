//! Structure and track file parsing

mod peak;
mod point;
mod reader;
mod structure;

pub use peak::{PeakColumns, read_peak_track};
pub use point::{PointColumns, read_point_track};
pub use structure::{StructureColumns, read_structure};
