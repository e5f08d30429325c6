//! Point records in their eleven on-disk formats.

mod convert;
mod format;
mod record;

pub use convert::{rank_from_scan_angle, scan_angle_from_rank};
pub use format::Format;
pub use record::{
    ExtendedFields, LegacyFields, OVERLAP_CLASSIFICATION_CODE, Point0, Point1, Point2, Point3,
    Point4, Point5, Point6, Point7, Point8, Point9, Point10, PointRecord, Waveform,
};

/// The direction at which the scanner mirror was traveling when the point was
/// emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanDirection {
    /// The negative scan direction.
    #[default]
    RightToLeft,
    /// The positive scan direction.
    LeftToRight,
}
