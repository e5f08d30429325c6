//! Variable length records and their known payload types.
//!
//! Variable length records (VLRs) carry metadata not covered by the header.
//! Regular VLRs sit between the header and the point data; extended VLRs
//! (EVLRs) trail the point data and allow payloads longer than 65,535 bytes.
//!
//! A parsed record is polymorphic over the payload types the LAS
//! specification defines, with an opaque fallback for everything else:
//!
//! ```
//! use las_codec::vlr::{Record, Vlr};
//! let vlr = Vlr {
//!     user_id: "MyCompany".to_string(),
//!     record_id: 42,
//!     description: "Some really important data".to_string(),
//!     record: Record::Unknown(vec![1, 2, 3]),
//!     is_extended: false,
//! };
//! ```
//!
//! Which payload type a `(user id, record id)` pair parses into is decided by
//! a [Registry](crate::Registry); unrecognized pairs degrade to
//! [Record::Unknown], which round-trips its bytes exactly.

mod classification_lookup;
mod extra_bytes;
pub(crate) mod geokey;
mod raw;
mod waveform;

pub use classification_lookup::{ClassificationLookup, ClassificationLookupEntry};
pub use extra_bytes::{DataType, ExtraBytes, ExtraBytesItem, Options, Value};
pub use geokey::{GeoKeyDirectory, GeoKeyEntry};
pub use raw::{RawVlr, RecordLength};
pub use waveform::WaveformPacketDescriptor;

use crate::utils::{AsLasStr, FromLasStr};
use crate::{Error, Registry, Result, registry};

const HEADER_SIZE: usize = 54;
const EVLR_HEADER_SIZE: usize = 60;

/// The user id of records defined by the LAS specification's projection
/// section.
pub const LASF_PROJECTION: &str = "LASF_Projection";

/// The user id of records defined by the LAS specification's point data
/// section.
pub const LASF_SPEC: &str = "LASF_Spec";

/// Record ids under [LASF_PROJECTION] and [LASF_SPEC].
pub mod record_id {
    /// An OGC math transform in WKT.
    pub const OGC_MATH_TRANSFORM_WKT: u16 = 2111;
    /// An OGC coordinate reference system in WKT.
    pub const OGC_COORDINATE_SYSTEM_WKT: u16 = 2112;
    /// GeoTIFF key directory.
    pub const GEO_KEY_DIRECTORY: u16 = 34735;
    /// GeoTIFF double parameters.
    pub const GEO_DOUBLE_PARAMS: u16 = 34736;
    /// GeoTIFF ASCII parameters.
    pub const GEO_ASCII_PARAMS: u16 = 34737;
    /// Classification lookup table.
    pub const CLASSIFICATION_LOOKUP: u16 = 0;
    /// Free-form text area description.
    pub const TEXT_AREA_DESCRIPTION: u16 = 3;
    /// Extra bytes descriptors.
    pub const EXTRA_BYTES: u16 = 4;
    /// Marks a record as retracted.
    pub const SUPERSEDED: u16 = 7;
    /// The first waveform packet descriptor.
    pub const FIRST_WAVEFORM_PACKET_DESCRIPTOR: u16 = 100;
    /// The last waveform packet descriptor.
    pub const LAST_WAVEFORM_PACKET_DESCRIPTOR: u16 = 354;
    /// Waveform data packets, stored as an extended record.
    pub const WAVEFORM_DATA_PACKETS: u16 = 65535;
}

/// A parsed VLR payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// GeoTIFF key entries.
    GeoKeyDirectory(GeoKeyDirectory),
    /// The f64 array addressed by GeoTIFF keys.
    GeoDoubleParams(Vec<f64>),
    /// The ASCII array addressed by GeoTIFF keys.
    GeoAsciiParams(String),
    /// A 256-entry classification lookup table.
    ClassificationLookup(ClassificationLookup),
    /// Free-form text.
    TextAreaDescription(String),
    /// Extra bytes descriptors.
    ExtraBytes(ExtraBytes),
    /// A tombstone marking this record as retracted.
    Superseded,
    /// A waveform packet descriptor.
    WaveformPacketDescriptor(WaveformPacketDescriptor),
    /// Opaque waveform packet data.
    WaveformDataPackets(Vec<u8>),
    /// A math transform in WKT.
    OgcMathTransformWkt(String),
    /// A coordinate reference system in WKT.
    OgcCoordinateSystemWkt(String),
    /// An unrecognized payload, preserved byte for byte.
    Unknown(Vec<u8>),
}

impl Record {
    /// Serializes this record's payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::Record;
    /// let record = Record::Unknown(vec![1, 2, 3]);
    /// assert_eq!(vec![1, 2, 3], record.to_bytes().unwrap());
    /// assert!(Record::Superseded.to_bytes().unwrap().is_empty());
    /// ```
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Record::GeoKeyDirectory(directory) => directory.to_bytes(),
            Record::GeoDoubleParams(doubles) => geokey::double_params_to_bytes(doubles),
            Record::GeoAsciiParams(params) => geokey::ascii_params_to_bytes(params),
            Record::ClassificationLookup(lookup) => lookup.to_bytes(),
            Record::TextAreaDescription(text) => text_to_bytes(text),
            Record::ExtraBytes(extra_bytes) => extra_bytes.to_bytes(),
            Record::Superseded => Ok(Vec::new()),
            Record::WaveformPacketDescriptor(descriptor) => descriptor.to_bytes(),
            Record::WaveformDataPackets(data) => Ok(data.clone()),
            Record::OgcMathTransformWkt(wkt) => text_to_bytes(wkt),
            Record::OgcCoordinateSystemWkt(wkt) => text_to_bytes(wkt),
            Record::Unknown(data) => Ok(data.clone()),
        }
    }
}

impl Default for Record {
    fn default() -> Record {
        Record::Unknown(Vec::new())
    }
}

fn text_to_bytes(text: &str) -> Result<Vec<u8>> {
    if !text.is_ascii() {
        return Err(Error::NotAscii(text.to_string()));
    }
    Ok(text.as_bytes().to_vec())
}

pub(crate) fn text_from_bytes(bytes: &[u8]) -> Result<String> {
    if !bytes.is_ascii() {
        return Err(Error::NotAscii(String::from_utf8_lossy(bytes).into_owned()));
    }
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// A variable length record with a parsed payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vlr {
    /// The user that defined this record type, e.g. "LASF_Projection".
    pub user_id: String,

    /// The record type, interpreted relative to the user id.
    pub record_id: u16,

    /// Textual description of these data.
    pub description: String,

    /// The parsed payload.
    pub record: Record,

    /// Should this record be written extended, after the point data?
    ///
    /// A record whose payload is too long for a regular VLR is written
    /// extended regardless of this flag.
    pub is_extended: bool,
}

impl Vlr {
    /// Creates a VLR from a raw VLR, dispatching through the default
    /// registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::{RawVlr, Record, Vlr};
    /// let vlr = Vlr::new(&RawVlr::default()).unwrap();
    /// assert_eq!(Record::Unknown(Vec::new()), vlr.record);
    /// ```
    pub fn new(raw: &RawVlr) -> Result<Vlr> {
        Vlr::with_registry(raw, registry::default())
    }

    /// Creates a VLR from a raw VLR, dispatching through the given registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Registry;
    /// use las_codec::vlr::{RawVlr, Vlr};
    /// let registry = Registry::new();
    /// let vlr = Vlr::with_registry(&RawVlr::default(), &registry).unwrap();
    /// ```
    pub fn with_registry(raw: &RawVlr, registry: &Registry) -> Result<Vlr> {
        Ok(Vlr {
            user_id: raw.user_id.as_ref().as_las_str()?.to_string(),
            record_id: raw.record_id,
            description: raw.description.as_ref().as_las_str()?.to_string(),
            record: registry.process(raw)?,
            is_extended: raw.is_extended(),
        })
    }

    /// Converts this VLR into a raw VLR.
    ///
    /// The record length after header is recomputed from the serialized
    /// payload. The second argument works like this:
    ///
    /// - `Some(false)`: produce a regular VLR.
    /// - `Some(true)`: produce an extended VLR.
    /// - `None`: follow this VLR's `is_extended` flag.
    ///
    /// A plain `true` or `false` converts into the option type.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::Vlr;
    /// let raw = Vlr::default().into_raw(false).unwrap();
    /// let raw_extended = Vlr::default().into_raw(true).unwrap();
    /// assert!(raw_extended.is_extended());
    /// ```
    pub fn into_raw<T>(self, force_extended: T) -> Result<RawVlr>
    where
        T: Into<Option<bool>>,
    {
        let data = self.record.to_bytes()?;
        let extended = force_extended.into().unwrap_or_else(|| self.is_extended());
        let record_length_after_header = if extended {
            RecordLength::Evlr(data.len() as u64)
        } else if data.len() > usize::from(u16::MAX) {
            return Err(Error::VlrTooLong(data.len()));
        } else {
            RecordLength::Vlr(data.len() as u16)
        };
        let mut user_id = [0; 16];
        user_id.as_mut().from_las_str(&self.user_id)?;
        let mut description = [0; 32];
        description.as_mut().from_las_str(&self.description)?;
        Ok(RawVlr {
            reserved: 0,
            user_id,
            record_id: self.record_id,
            record_length_after_header,
            description,
            data,
        })
    }

    /// Returns the total length of this VLR, header and payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::Vlr;
    /// assert_eq!(54, Vlr::default().len().unwrap());
    /// ```
    pub fn len(&self) -> Result<usize> {
        let header = if self.is_extended() {
            EVLR_HEADER_SIZE
        } else {
            HEADER_SIZE
        };
        Ok(header + self.record.to_bytes()?.len())
    }

    /// Returns true if this VLR's payload is empty.
    pub fn is_empty(&self) -> bool {
        matches!(&self.record, Record::Superseded)
            || matches!(&self.record, Record::Unknown(data) if data.is_empty())
    }

    /// Must this record be written extended?
    ///
    /// True if the flag is set or the payload is too long for a regular VLR.
    pub fn is_extended(&self) -> bool {
        self.is_extended
            || self
                .record
                .to_bytes()
                .map(|data| data.len() > usize::from(u16::MAX))
                .unwrap_or(false)
    }

    /// Does this record carry GeoTIFF coordinate reference system data?
    pub fn is_geotiff_crs(&self) -> bool {
        self.user_id == LASF_PROJECTION
            && matches!(
                self.record_id,
                record_id::GEO_KEY_DIRECTORY
                    | record_id::GEO_DOUBLE_PARAMS
                    | record_id::GEO_ASCII_PARAMS
            )
    }
}
