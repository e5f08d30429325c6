//! File metadata describing the layout and interpretation of the points.
//!
//! A [Header] can exist in an invalid state: parsing fills in whatever the
//! bytes say, and [Header::validate] is a separate pass that checks the
//! cross-field rules, so a caller may inspect a broken header before deciding
//! what to do with it.

mod builder;
mod raw;

pub use builder::Builder;
pub use raw::{Evlr, LASF, LargeFile, RawHeader};

use crate::feature::{Evlrs, LargeFiles};
use crate::point::Format;
use crate::utils::FromLasStr;
use crate::vlr::{Record, Vlr};
use crate::{Bounds, Error, GlobalEncoding, GpsTimeType, Result, Transform, Vector, Version};
use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

/// High-level file metadata.
///
/// Headers are built through a [Builder]; reading a file amounts to parsing a
/// [RawHeader], collecting the raw VLRs, and calling
/// [Builder::into_header]:
///
/// ```
/// use las_codec::header::{Builder, RawHeader};
/// let header = Builder::new(RawHeader::default()).unwrap().into_header().unwrap();
/// assert_eq!(0, header.number_of_points());
/// ```
#[derive(Clone, Debug)]
pub struct Header {
    bounds: Bounds,
    date: Option<NaiveDate>,
    extra_bytes: u16,
    file_source_id: u16,
    generating_software: String,
    global_encoding: GlobalEncoding,
    gps_time_offset: f64,
    guid: Uuid,
    number_of_points: u64,
    number_of_points_by_return: [u64; 15],
    padding: Vec<u8>,
    point_format: Format,
    start_of_waveform_data_packet_record: Option<u64>,
    system_identifier: String,
    transforms: Vector<Transform>,
    version: Version,
    vlr_padding: Vec<u8>,
    vlrs: Vec<Vlr>,
}

impl Header {
    /// Returns this header's las version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this header's point format.
    pub fn point_format(&self) -> Format {
        self.point_format
    }

    /// Returns the size of one point record, extra bytes included.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Header;
    /// assert_eq!(20, Header::default().point_data_record_length());
    /// ```
    pub fn point_data_record_length(&self) -> u16 {
        self.point_format.len() + self.extra_bytes
    }

    /// Returns the number of extra bytes appended to each point record.
    pub fn extra_bytes(&self) -> u16 {
        self.extra_bytes
    }

    /// Returns this header's global encoding flags.
    pub fn global_encoding(&self) -> GlobalEncoding {
        self.global_encoding
    }

    /// Returns the meaning of gps time in the point records.
    pub fn gps_time_type(&self) -> GpsTimeType {
        self.global_encoding.gps_time_type
    }

    /// Returns the file-wide gps time offset, zero unless the header carries
    /// one.
    pub fn gps_time_offset(&self) -> f64 {
        self.gps_time_offset
    }

    /// Returns this file's project identifier.
    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Returns this file's source id.
    pub fn file_source_id(&self) -> u16 {
        self.file_source_id
    }

    /// Returns the date the file was created, if the header's day and year
    /// fields form one.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the system that generated the points.
    pub fn system_identifier(&self) -> &str {
        &self.system_identifier
    }

    /// Returns the software that wrote the file.
    pub fn generating_software(&self) -> &str {
        &self.generating_software
    }

    /// Returns the per-axis scales and offsets.
    pub fn transforms(&self) -> &Vector<Transform> {
        &self.transforms
    }

    /// Returns the unscaled extents of the point data.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the total number of points.
    pub fn number_of_points(&self) -> u64 {
        self.number_of_points
    }

    /// Returns the per-return point counts.
    pub fn number_of_points_by_return(&self) -> &[u64; 15] {
        &self.number_of_points_by_return
    }

    /// Returns the offset to the waveform data, if one is set.
    pub fn start_of_waveform_data_packet_record(&self) -> Option<u64> {
        self.start_of_waveform_data_packet_record
    }

    /// Returns the bytes between the header block and the VLRs.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Returns the bytes between the VLRs and the point data.
    pub fn vlr_padding(&self) -> &[u8] {
        &self.vlr_padding
    }

    /// Returns an iterator over the regular VLRs.
    ///
    /// A record flagged extended still counts as regular when the version has
    /// no EVLR support; it gets downgraded on write if it fits.
    pub fn vlrs(&self) -> impl Iterator<Item = &Vlr> {
        let supports_evlrs = self.version.supports::<Evlrs>();
        self.vlrs
            .iter()
            .filter(move |vlr| !(supports_evlrs && vlr.is_extended()))
    }

    /// Returns an iterator over the extended VLRs.
    pub fn evlrs(&self) -> impl Iterator<Item = &Vlr> {
        let supports_evlrs = self.version.supports::<Evlrs>();
        self.vlrs
            .iter()
            .filter(move |vlr| supports_evlrs && vlr.is_extended())
    }

    /// Returns all VLRs, regular and extended, in file order.
    pub fn all_vlrs(&self) -> &[Vlr] {
        &self.vlrs
    }

    pub(crate) fn clear(&mut self) {
        self.number_of_points = 0;
        self.number_of_points_by_return = [0; 15];
        self.bounds = Bounds::default();
    }

    pub(crate) fn add_point_record(&mut self, record: &crate::point::PointRecord) {
        self.number_of_points += 1;
        let return_number = record.return_number();
        if (1..=15).contains(&return_number) {
            self.number_of_points_by_return[usize::from(return_number) - 1] += 1;
        }
        let xyz = record.xyz();
        self.bounds.grow(Vector::new(
            self.transforms.x.direct(xyz.x),
            self.transforms.y.direct(xyz.y),
            self.transforms.z.direct(xyz.z),
        ));
    }

    /// Checks this header's cross-field invariants.
    ///
    /// Parsing never runs these checks, so a header read from disk can be
    /// inspected even when invalid. Nothing is auto-corrected; the first
    /// violation is returned as an error naming the offending field and
    /// value.
    ///
    /// The rules:
    ///
    /// - The version must be one this crate supports.
    /// - The point format must not exceed the version's maximum.
    /// - Extended point formats require the WKT global encoding bit.
    /// - GeoTIFF coordinate system VLRs may occur at most once each below las
    ///   1.5, and not at all from 1.5 on.
    /// - Waveform point formats require a waveform packet descriptor VLR.
    /// - A nonzero gps time offset requires both the gps time offset flag and
    ///   a nonzero point count.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Header;
    /// assert!(Header::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !self.version.is_supported() {
            return Err(Error::UnsupportedVersion(self.version));
        }
        if self.point_format.n() > self.version.max_point_format() {
            return Err(Error::UnsupportedPointFormat {
                version: self.version,
                format: self.point_format,
            });
        }
        if self.point_format.is_extended() && !self.global_encoding.wkt {
            return Err(Error::WktBitRequired(self.point_format));
        }
        self.validate_crs_vlrs()?;
        if self.point_format.has_waveform()
            && !self
                .vlrs
                .iter()
                .any(|vlr| matches!(vlr.record, Record::WaveformPacketDescriptor(_)))
        {
            return Err(Error::MissingWaveformDescriptor(self.point_format));
        }
        if self.gps_time_offset != 0. {
            if !self.global_encoding.gps_time_offset {
                return Err(Error::GpsTimeOffsetWithoutFlag(self.gps_time_offset));
            }
            if self.number_of_points == 0 {
                return Err(Error::GpsTimeOffsetWithoutPoints(self.gps_time_offset));
            }
        }
        Ok(())
    }

    fn validate_crs_vlrs(&self) -> Result<()> {
        let retired = self.version >= Version::new(1, 5);
        for record_id in [
            crate::vlr::record_id::GEO_KEY_DIRECTORY,
            crate::vlr::record_id::GEO_DOUBLE_PARAMS,
            crate::vlr::record_id::GEO_ASCII_PARAMS,
        ] {
            let count = self
                .vlrs
                .iter()
                .filter(|vlr| vlr.is_geotiff_crs() && vlr.record_id == record_id)
                .count();
            if count > 0 && retired {
                return Err(Error::RetiredCrsVlr {
                    version: self.version,
                    record_id,
                });
            }
            if count > 1 {
                return Err(Error::DuplicateVlrs {
                    user_id: crate::vlr::LASF_PROJECTION.to_string(),
                    record_id,
                    count,
                });
            }
        }
        Ok(())
    }

    /// Converts this header into a raw header.
    ///
    /// The byte offsets are computed here: the point data starts after the
    /// header, its padding, the regular VLRs, and the VLR padding; the first
    /// EVLR starts after the point data. Those offsets are monotonically
    /// increasing and non-overlapping by construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Header;
    /// let raw = Header::default().into_raw().unwrap();
    /// assert_eq!(227, raw.header_size);
    /// ```
    pub fn into_raw(&self) -> Result<RawHeader> {
        let header_size = self.version.header_size() + self.padding.len() as u16;
        // Padding that pushes the declared size across a revision threshold
        // would be reinterpreted as the unlocked fields on the next read.
        if raw::known_size(header_size) > self.version.header_size() {
            return Err(Error::InvalidRecordLength {
                record: "header padding",
                expected: usize::from(self.version.header_size()),
                actual: usize::from(header_size),
            });
        }
        let mut vlr_block_len = 0u32;
        let mut number_of_variable_length_records = 0u32;
        for vlr in self.vlrs() {
            vlr_block_len += vlr.len()? as u32;
            number_of_variable_length_records += 1;
        }
        let offset_to_point_data =
            u32::from(header_size) + vlr_block_len + self.vlr_padding.len() as u32;
        let point_bytes = self.number_of_points * u64::from(self.point_data_record_length());
        let number_of_evlrs = self.evlrs().count() as u32;
        let evlr = (self.version.supports::<Evlrs>() && number_of_evlrs > 0).then(|| Evlr {
            start_of_first_evlr: u64::from(offset_to_point_data) + point_bytes,
            number_of_evlrs,
        });
        let (number_of_point_records, number_of_points_by_return, large_file) =
            self.raw_point_counts()?;
        let mut system_identifier = [0; 32];
        system_identifier
            .as_mut()
            .from_las_str(&self.system_identifier)?;
        let mut generating_software = [0; 32];
        generating_software
            .as_mut()
            .from_las_str(&self.generating_software)?;
        Ok(RawHeader {
            file_signature: LASF,
            file_source_id: self.file_source_id,
            global_encoding: self.global_encoding.into(),
            guid: *self.guid.as_bytes(),
            version: self.version,
            system_identifier,
            generating_software,
            file_creation_day_of_year: self.date.map(|date| date.ordinal() as u16).unwrap_or(0),
            file_creation_year: self.date.map(|date| date.year() as u16).unwrap_or(0),
            header_size,
            offset_to_point_data,
            number_of_variable_length_records,
            point_data_record_format: self.point_format.n(),
            point_data_record_length: self.point_data_record_length(),
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor: self.transforms.x.scale,
            y_scale_factor: self.transforms.y.scale,
            z_scale_factor: self.transforms.z.scale,
            x_offset: self.transforms.x.offset,
            y_offset: self.transforms.y.offset,
            z_offset: self.transforms.z.offset,
            max_x: self.bounds.max.x,
            min_x: self.bounds.min.x,
            max_y: self.bounds.max.y,
            min_y: self.bounds.min.y,
            max_z: self.bounds.max.z,
            min_z: self.bounds.min.z,
            start_of_waveform_data_packet_record: (header_size >= 235)
                .then(|| self.start_of_waveform_data_packet_record.unwrap_or(0)),
            evlr,
            large_file,
            gps_time_offset: (header_size >= 383).then_some(self.gps_time_offset),
            padding: self.padding.clone(),
        })
    }

    fn raw_point_counts(&self) -> Result<(u32, [u32; 5], Option<LargeFile>)> {
        if self.version.supports::<LargeFiles>() {
            let large_file = LargeFile {
                number_of_point_records: self.number_of_points,
                number_of_points_by_return: self.number_of_points_by_return,
            };
            // Legacy counts are zero when they can't faithfully mirror the
            // 64-bit ones.
            let legacy_compatible = !self.point_format.is_extended()
                && self.number_of_points <= u64::from(u32::MAX)
                && self.number_of_points_by_return[5..].iter().all(|&n| n == 0)
                && self
                    .number_of_points_by_return
                    .iter()
                    .all(|&n| n <= u64::from(u32::MAX));
            if legacy_compatible {
                let mut by_return = [0; 5];
                for (legacy, n) in by_return
                    .iter_mut()
                    .zip(self.number_of_points_by_return.iter())
                {
                    *legacy = *n as u32;
                }
                Ok((self.number_of_points as u32, by_return, Some(large_file)))
            } else {
                Ok((0, [0; 5], Some(large_file)))
            }
        } else {
            if self.number_of_points > u64::from(u32::MAX)
                || self.number_of_points_by_return[5..].iter().any(|&n| n > 0)
            {
                self.version.verify_support_for::<LargeFiles>()?;
            }
            let mut by_return = [0; 5];
            for (legacy, n) in by_return
                .iter_mut()
                .zip(self.number_of_points_by_return.iter())
            {
                *legacy = *n as u32;
            }
            Ok((self.number_of_points as u32, by_return, None))
        }
    }
}

impl Default for Header {
    fn default() -> Header {
        Header {
            bounds: Bounds::default(),
            date: None,
            extra_bytes: 0,
            file_source_id: 0,
            generating_software: String::new(),
            global_encoding: GlobalEncoding::default(),
            gps_time_offset: 0.,
            guid: Uuid::nil(),
            number_of_points: 0,
            number_of_points_by_return: [0; 15],
            padding: Vec::new(),
            point_format: Format::default(),
            start_of_waveform_data_packet_record: None,
            system_identifier: String::new(),
            transforms: Vector::default(),
            version: Version::default(),
            vlr_padding: Vec::new(),
            vlrs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vlr::{GeoKeyDirectory, WaveformPacketDescriptor};

    fn header_with(version: Version, format: u8) -> Header {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = version;
        builder.point_format = Format::new(format).unwrap();
        builder.into_header().unwrap()
    }

    #[test]
    fn wkt_bit_required_for_extended_formats() {
        let header = header_with(Version::new(1, 4), 6);
        assert!(matches!(
            header.validate(),
            Err(Error::WktBitRequired(format)) if format.n() == 6
        ));
    }

    #[test]
    fn wkt_bit_satisfies_extended_formats() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = Version::new(1, 4);
        builder.point_format = Format::new(6).unwrap();
        builder.global_encoding.wkt = true;
        assert!(builder.into_header().unwrap().validate().is_ok());
    }

    #[test]
    fn waveform_format_requires_descriptor() {
        let header = header_with(Version::new(1, 3), 5);
        assert!(matches!(
            header.validate(),
            Err(Error::MissingWaveformDescriptor(_))
        ));
    }

    #[test]
    fn waveform_descriptor_satisfies_waveform_format() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = Version::new(1, 3);
        builder.point_format = Format::new(5).unwrap();
        builder.vlrs.push(Vlr {
            user_id: crate::vlr::LASF_SPEC.to_string(),
            record_id: 100,
            record: Record::WaveformPacketDescriptor(WaveformPacketDescriptor::default()),
            ..Default::default()
        });
        assert!(builder.into_header().unwrap().validate().is_ok());
    }

    #[test]
    fn point_format_too_new_for_version() {
        let header = header_with(Version::new(1, 2), 5);
        assert!(matches!(
            header.validate(),
            Err(Error::UnsupportedPointFormat { .. })
        ));
    }

    #[test]
    fn duplicate_geotiff_vlrs() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        for _ in 0..2 {
            builder.vlrs.push(Vlr {
                user_id: crate::vlr::LASF_PROJECTION.to_string(),
                record_id: crate::vlr::record_id::GEO_KEY_DIRECTORY,
                record: Record::GeoKeyDirectory(GeoKeyDirectory::default()),
                ..Default::default()
            });
        }
        let header = builder.into_header().unwrap();
        assert!(matches!(
            header.validate(),
            Err(Error::DuplicateVlrs { count: 2, .. })
        ));
    }

    #[test]
    fn geotiff_vlrs_retired_at_1_5() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = Version::new(1, 5);
        builder.vlrs.push(Vlr {
            user_id: crate::vlr::LASF_PROJECTION.to_string(),
            record_id: crate::vlr::record_id::GEO_KEY_DIRECTORY,
            record: Record::GeoKeyDirectory(GeoKeyDirectory::default()),
            ..Default::default()
        });
        let header = builder.into_header().unwrap();
        assert!(matches!(
            header.validate(),
            Err(Error::RetiredCrsVlr { .. })
        ));
    }

    #[test]
    fn gps_time_offset_consistency() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = Version::new(1, 5);
        builder.gps_time_offset = 42.;
        let header = builder.clone().into_header().unwrap();
        assert!(matches!(
            header.validate(),
            Err(Error::GpsTimeOffsetWithoutFlag(_))
        ));

        builder.global_encoding.gps_time_offset = true;
        let header = builder.clone().into_header().unwrap();
        assert!(matches!(
            header.validate(),
            Err(Error::GpsTimeOffsetWithoutPoints(_))
        ));

        builder.number_of_points = 1;
        assert!(builder.into_header().unwrap().validate().is_ok());
    }

    #[test]
    fn unsupported_version() {
        let header = header_with(Version::new(2, 0), 0);
        assert!(matches!(
            header.validate(),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn offsets_are_monotonic() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = Version::new(1, 4);
        builder.number_of_points = 10;
        builder.point_format = Format::new(6).unwrap();
        builder.vlrs.push(Vlr {
            record: Record::Unknown(vec![0; 100]),
            ..Default::default()
        });
        builder.vlrs.push(Vlr {
            record: Record::Unknown(vec![0; 10]),
            is_extended: true,
            ..Default::default()
        });
        let raw = builder.into_header().unwrap().into_raw().unwrap();
        assert_eq!(375 + 54 + 100, raw.offset_to_point_data as usize);
        let evlr = raw.evlr.unwrap();
        assert_eq!(
            u64::from(raw.offset_to_point_data) + 10 * 30,
            evlr.start_of_first_evlr
        );
        assert_eq!(1, evlr.number_of_evlrs);
        assert!(u64::from(raw.offset_to_point_data) < evlr.start_of_first_evlr);
    }

    #[test]
    fn legacy_counts_mirror_small_files() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = Version::new(1, 4);
        builder.number_of_points = 100;
        builder.number_of_points_by_return[0] = 100;
        let raw = builder.into_header().unwrap().into_raw().unwrap();
        assert_eq!(100, raw.number_of_point_records);
        assert_eq!(100, raw.number_of_points_by_return[0]);
        assert_eq!(
            100,
            raw.large_file.unwrap().number_of_point_records
        );
    }

    #[test]
    fn legacy_counts_zeroed_for_extended_formats() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.version = Version::new(1, 4);
        builder.point_format = Format::new(6).unwrap();
        builder.number_of_points = 100;
        let raw = builder.into_header().unwrap().into_raw().unwrap();
        assert_eq!(0, raw.number_of_point_records);
        assert_eq!(
            100,
            raw.large_file.unwrap().number_of_point_records
        );
    }

    #[test]
    fn too_many_points_for_legacy_versions() {
        let mut builder = Builder::new(RawHeader::default()).unwrap();
        builder.number_of_points = u64::from(u32::MAX) + 1;
        let header = builder.into_header().unwrap();
        assert!(matches!(
            header.into_raw(),
            Err(Error::UnsupportedFeature { .. })
        ));
    }
}
