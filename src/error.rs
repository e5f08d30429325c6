use crate::{Transform, Version, point::Format};
use thiserror::Error;

/// Crate-specific error enum.
///
/// Variants fall into two families: structural errors, raised while decoding
/// fixed binary layouts, and validation errors, raised by
/// [Header::validate](crate::Header::validate) as a pass distinct from
/// parsing. Unknown vlr records and narrowing point conversions are never
/// errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The writer is closed.
    #[error("the writer is closed")]
    ClosedWriter,

    /// A las (e)vlr that must occur at most once occurred more than once.
    #[error("at most one vlr with user id \"{user_id}\" and record id {record_id} is allowed, found {count}")]
    DuplicateVlrs {
        /// The user id of the duplicated vlr.
        user_id: String,
        /// The record id of the duplicated vlr.
        record_id: u16,
        /// The number of occurrences.
        count: usize,
    },

    /// Wrapper around `std::string::FromUtf8Error`.
    #[error(transparent)]
    FromUtf8(#[from] std::string::FromUtf8Error),

    /// The gps time offset is nonzero but the gps time offset flag is not set.
    #[error("the gps time offset is {0} but the gps time offset flag is not set")]
    GpsTimeOffsetWithoutFlag(f64),

    /// The gps time offset is nonzero but the file contains no points.
    #[error("the gps time offset is {0} but the file contains no point records")]
    GpsTimeOffsetWithoutPoints(f64),

    /// An extra bytes data type discriminant outside the defined range.
    #[error("invalid extra bytes data type: {0}")]
    InvalidDataType(u8),

    /// The file signature was not "LASF".
    #[error("the file signature is not \"LASF\": {0:?}")]
    InvalidFileSignature([u8; 4]),

    /// A fixed-size record payload had the wrong number of bytes.
    #[error("invalid payload length for {record}: expected {expected} bytes, got {actual}")]
    InvalidRecordLength {
        /// The name of the record being decoded.
        record: &'static str,
        /// The number of bytes the layout requires.
        expected: usize,
        /// The number of bytes provided.
        actual: usize,
    },

    /// This number is not a valid point format number.
    #[error("{0} is not a valid las point format number")]
    InvalidPointFormat(u8),

    /// The inverse transform of this value does not fit in an i32.
    #[error("the inverse transform of {0} with {1} does not fit in an i32")]
    InverseTransform(f64, Transform),

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The point format requires a waveform packet descriptor vlr, but none is present.
    #[error("{0} carries waveform data, but no waveform packet descriptor vlr is present")]
    MissingWaveformDescriptor(Format),

    /// This string is not ASCII, and it was supposed to be.
    #[error("this string is not ascii: {0}")]
    NotAscii(String),

    /// These bytes are not zero-filled after the last ASCII character.
    #[error("the bytes are not zero-filled after the last character: {0:?}")]
    NotZeroFilled(Vec<u8>),

    /// The point data record length is too small for the point format.
    #[error("{format} requires at least {} bytes per record, the header says {len}", format.len())]
    PointDataRecordLength {
        /// The point format.
        format: Format,
        /// The header's point data record length.
        len: u16,
    },

    /// The point record's format does not match the header's.
    #[error("cannot write a {actual} record to a file of {expected} records")]
    PointFormatMismatch {
        /// The header's point format.
        expected: Format,
        /// The record's point format.
        actual: Format,
    },

    /// A registry entry already exists for this key.
    #[error("a record processor is already registered for user id {user_id:?} and record id {record_id}")]
    ProcessorExists {
        /// The user id of the registration, `None` for wildcards.
        user_id: Option<String>,
        /// The record id of the registration.
        record_id: u16,
    },

    /// GeoTIFF coordinate system vlrs were retired and may not be present.
    #[error("{version} retired GeoTIFF coordinate system vlrs, but record id {record_id} is present")]
    RetiredCrsVlr {
        /// The las version of the file.
        version: Version,
        /// The record id of the offending vlr.
        record_id: u16,
    },

    /// This string is too long for its destination slot.
    #[error("\"{string}\" is too long for a {len}-byte field")]
    StringTooLong {
        /// The string.
        string: String,
        /// The size of the destination slot.
        len: usize,
    },

    /// A feature is not supported by a las version.
    #[error("{version} does not support {feature}")]
    UnsupportedFeature {
        /// The las version.
        version: Version,
        /// The name of the unsupported feature.
        feature: &'static str,
    },

    /// The point format is not allowed for the version.
    #[error("{version} allows point formats up to {}, got {format}", version.max_point_format())]
    UnsupportedPointFormat {
        /// The las version.
        version: Version,
        /// The point format.
        format: Format,
    },

    /// The las version is outside the supported range.
    #[error("las version {0} is not supported")]
    UnsupportedVersion(Version),

    /// Wrapper around `std::str::Utf8Error`.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// The vlr data is too long for a non-extended vlr.
    #[error("the vlr data is {0} bytes, too long for a non-extended vlr")]
    VlrTooLong(usize),

    /// The wkt global encoding bit is required for this point format.
    #[error("the wkt global encoding bit must be set for {0}")]
    WktBitRequired(Format),
}
