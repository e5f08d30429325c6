use crate::header::{Header, RawHeader};
use crate::point::Format;
use crate::utils::AsLasStr;
use crate::vlr::Vlr;
use crate::{Bounds, Error, GlobalEncoding, Result, Transform, Vector, Version};
use chrono::NaiveDate;
use uuid::Uuid;

/// Builds headers.
///
/// Every field is public; set what you need and call
/// [into_header](Builder::into_header):
///
/// ```
/// use las_codec::header::{Builder, RawHeader};
/// let mut builder = Builder::new(RawHeader::default()).unwrap();
/// builder.version = (1, 4).into();
/// let header = builder.into_header().unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// The unscaled extents of the point data.
    pub bounds: Bounds,

    /// The date of file creation.
    pub date: Option<NaiveDate>,

    /// Bytes appended to each point record beyond its format's layout.
    pub extra_bytes: u16,

    /// The file source id, sometimes the flight line.
    pub file_source_id: u16,

    /// The software that created this file.
    pub generating_software: String,

    /// The global encoding flags.
    pub global_encoding: GlobalEncoding,

    /// The file-wide gps time offset, written for las 1.5 headers.
    pub gps_time_offset: f64,

    /// A globally unique project identifier.
    pub guid: Uuid,

    /// The total number of points.
    pub number_of_points: u64,

    /// The per-return point counts.
    pub number_of_points_by_return: [u64; 15],

    /// Bytes after the header block but before the vlrs.
    pub padding: Vec<u8>,

    /// The format the points are stored in.
    pub point_format: Format,

    /// The offset to the waveform data, if any.
    pub start_of_waveform_data_packet_record: Option<u64>,

    /// The system that generated the points.
    pub system_identifier: String,

    /// The per-axis scales and offsets.
    pub transforms: Vector<Transform>,

    /// The las version.
    pub version: Version,

    /// Bytes after the vlrs but before the point data.
    pub vlr_padding: Vec<u8>,

    /// All variable length records, regular and extended.
    pub vlrs: Vec<Vlr>,
}

impl Builder {
    /// Creates a builder from a raw header.
    ///
    /// The point format is taken from the raw format id, and a record length
    /// longer than the format's layout becomes extra bytes. A record length
    /// shorter than the layout is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::header::{Builder, RawHeader};
    /// let builder = Builder::new(RawHeader::default()).unwrap();
    /// ```
    pub fn new(raw: RawHeader) -> Result<Builder> {
        let point_format = Format::new(raw.point_data_record_format)?;
        let extra_bytes = if raw.point_data_record_length == 0 {
            // A zeroed header, e.g. a default one, gets the format's length.
            0
        } else if raw.point_data_record_length < point_format.len() {
            return Err(Error::PointDataRecordLength {
                format: point_format,
                len: raw.point_data_record_length,
            });
        } else {
            raw.point_data_record_length - point_format.len()
        };
        let number_of_points = if raw.number_of_point_records > 0 {
            u64::from(raw.number_of_point_records)
        } else {
            raw.large_file
                .map(|large_file| large_file.number_of_point_records)
                .unwrap_or(0)
        };
        let mut number_of_points_by_return = [0u64; 15];
        if raw.number_of_points_by_return.iter().any(|&n| n > 0) {
            for (n, legacy) in number_of_points_by_return
                .iter_mut()
                .zip(raw.number_of_points_by_return.iter())
            {
                *n = u64::from(*legacy);
            }
        } else if let Some(large_file) = raw.large_file {
            number_of_points_by_return = large_file.number_of_points_by_return;
        }
        Ok(Builder {
            bounds: Bounds {
                min: Vector::new(raw.min_x, raw.min_y, raw.min_z),
                max: Vector::new(raw.max_x, raw.max_y, raw.max_z),
            },
            date: NaiveDate::from_yo_opt(
                i32::from(raw.file_creation_year),
                u32::from(raw.file_creation_day_of_year),
            ),
            extra_bytes,
            file_source_id: raw.file_source_id,
            generating_software: raw.generating_software.as_ref().as_las_str()?.to_string(),
            global_encoding: raw.global_encoding.into(),
            gps_time_offset: raw.gps_time_offset.unwrap_or(0.),
            guid: Uuid::from_bytes(raw.guid),
            number_of_points,
            number_of_points_by_return,
            padding: raw.padding,
            point_format,
            start_of_waveform_data_packet_record: raw.start_of_waveform_data_packet_record,
            system_identifier: raw.system_identifier.as_ref().as_las_str()?.to_string(),
            transforms: Vector {
                x: Transform {
                    scale: raw.x_scale_factor,
                    offset: raw.x_offset,
                },
                y: Transform {
                    scale: raw.y_scale_factor,
                    offset: raw.y_offset,
                },
                z: Transform {
                    scale: raw.z_scale_factor,
                    offset: raw.z_offset,
                },
            },
            version: raw.version,
            vlr_padding: Vec::new(),
            vlrs: Vec::new(),
        })
    }

    /// Converts this builder into a header.
    ///
    /// Construction is explicit and does not validate the cross-field rules;
    /// call [Header::validate] for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Builder;
    /// let header = Builder::default().into_header().unwrap();
    /// ```
    pub fn into_header(self) -> Result<Header> {
        Ok(Header {
            bounds: self.bounds,
            date: self.date,
            extra_bytes: self.extra_bytes,
            file_source_id: self.file_source_id,
            generating_software: self.generating_software,
            global_encoding: self.global_encoding,
            gps_time_offset: self.gps_time_offset,
            guid: self.guid,
            number_of_points: self.number_of_points,
            number_of_points_by_return: self.number_of_points_by_return,
            padding: self.padding,
            point_format: self.point_format,
            start_of_waveform_data_packet_record: self.start_of_waveform_data_packet_record,
            system_identifier: self.system_identifier,
            transforms: self.transforms,
            version: self.version,
            vlr_padding: self.vlr_padding,
            vlrs: self.vlrs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_length_too_short() {
        let raw = RawHeader {
            point_data_record_format: 1,
            point_data_record_length: 20,
            ..Default::default()
        };
        assert!(matches!(
            Builder::new(raw),
            Err(Error::PointDataRecordLength { .. })
        ));
    }

    #[test]
    fn record_length_surplus_becomes_extra_bytes(){
        let raw = RawHeader {
            point_data_record_format: 1,
            point_data_record_length: 30,
            ..Default::default()
        };
        let builder = Builder::new(raw).unwrap();
        assert_eq!(2, builder.extra_bytes);
        let header = builder.into_header().unwrap();
        assert_eq!(30, header.point_data_record_length());
    }

    #[test]
    fn counts_prefer_legacy_then_large_file() {
        let raw = RawHeader {
            version: Version::new(1, 4),
            header_size: 375,
            large_file: Some(crate::header::LargeFile {
                number_of_point_records: 42,
                number_of_points_by_return: [1; 15],
            }),
            ..Default::default()
        };
        let builder = Builder::new(raw).unwrap();
        assert_eq!(42, builder.number_of_points);
        assert_eq!([1; 15], builder.number_of_points_by_return);
    }

    #[test]
    fn invalid_date_is_none() {
        let raw = RawHeader {
            file_creation_day_of_year: 366,
            file_creation_year: 2023,
            ..Default::default()
        };
        assert!(Builder::new(raw).unwrap().date.is_none());
    }

    #[test]
    fn date_roundtrip() {
        let raw = RawHeader {
            file_creation_day_of_year: 60,
            file_creation_year: 2024,
            ..Default::default()
        };
        let header = Builder::new(raw).unwrap().into_header().unwrap();
        assert_eq!(
            NaiveDate::from_ymd_opt(2024, 2, 29),
            header.date()
        );
        let raw = header.into_raw().unwrap();
        assert_eq!(60, raw.file_creation_day_of_year);
        assert_eq!(2024, raw.file_creation_year);
    }
}
