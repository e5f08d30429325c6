//! The header block as it appears on disk.

use crate::{Error, Result, Version};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Every LAS file starts with these four bytes.
pub const LASF: [u8; 4] = *b"LASF";

const BASE_SIZE: u16 = 227;
const WAVEFORM_SIZE: u16 = 235;
const EVLR_SIZE: u16 = 247;
const LARGE_FILE_SIZE: u16 = 375;
const GPS_TIME_OFFSET_SIZE: u16 = 383;

/// A raw header that maps directly onto the byte layout.
///
/// The header is self-describing: its declared `header_size` gates which
/// trailing fields are present. Sizes of 235 bytes and above carry the
/// waveform data start, 247 and above the EVLR start and count, 375 and above
/// the 64-bit point counts, and 383 and above the GPS time offset. Anything
/// beyond the gated fields is preserved as padding. The gate is the numeric
/// size, not the version, so headers from any earlier minor revision read
/// correctly.
#[derive(Clone, Debug, PartialEq)]
pub struct RawHeader {
    /// Always "LASF".
    pub file_signature: [u8; 4],
    /// The flight line or merge source, zero if unassigned.
    pub file_source_id: u16,
    /// Bit flags that apply to the whole file.
    pub global_encoding: u16,
    /// The project identifier.
    pub guid: [u8; 16],
    /// The major and minor revision of the file.
    pub version: Version,
    /// The padded ASCII name of the generating hardware or operation.
    pub system_identifier: [u8; 32],
    /// The padded ASCII name of the generating software.
    pub generating_software: [u8; 32],
    /// The GMT day of year on which the file was created, January 1 is 1.
    pub file_creation_day_of_year: u16,
    /// The four digit year in which the file was created.
    pub file_creation_year: u16,
    /// The size of this header in bytes.
    pub header_size: u16,
    /// Bytes from the start of the file to the first point record.
    pub offset_to_point_data: u32,
    /// The number of VLRs between the header and the point data.
    pub number_of_variable_length_records: u32,
    /// The point format, 0 through 10.
    pub point_data_record_format: u8,
    /// The size of one point record in bytes.
    pub point_data_record_length: u16,
    /// The legacy point count, zero when the 64-bit count is authoritative.
    pub number_of_point_records: u32,
    /// The legacy per-return point counts.
    pub number_of_points_by_return: [u32; 5],
    /// Multiplied into x records to produce coordinates.
    pub x_scale_factor: f64,
    #[allow(missing_docs)]
    pub y_scale_factor: f64,
    #[allow(missing_docs)]
    pub z_scale_factor: f64,
    /// Added to scaled x records to produce coordinates.
    pub x_offset: f64,
    #[allow(missing_docs)]
    pub y_offset: f64,
    #[allow(missing_docs)]
    pub z_offset: f64,
    /// The unscaled extents of the point data.
    pub max_x: f64,
    #[allow(missing_docs)]
    pub min_x: f64,
    #[allow(missing_docs)]
    pub max_y: f64,
    #[allow(missing_docs)]
    pub min_y: f64,
    #[allow(missing_docs)]
    pub max_z: f64,
    #[allow(missing_docs)]
    pub min_z: f64,
    /// Bytes from the start of the file to the waveform data, zero if none.
    ///
    /// Present for header sizes of 235 bytes and above.
    pub start_of_waveform_data_packet_record: Option<u64>,
    /// The EVLR start and count, for header sizes of 247 bytes and above.
    pub evlr: Option<Evlr>,
    /// The 64-bit point counts, for header sizes of 375 bytes and above.
    pub large_file: Option<LargeFile>,
    /// Seconds added to every GPS time in the file, for header sizes of 383
    /// bytes and above.
    pub gps_time_offset: Option<f64>,
    /// Declared header bytes beyond the known fields.
    pub padding: Vec<u8>,
}

/// Where the extended variable length records live.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Evlr {
    /// Bytes from the start of the file to the first EVLR.
    pub start_of_first_evlr: u64,
    /// The number of EVLRs after the point data.
    pub number_of_evlrs: u32,
}

/// The 64-bit point counts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LargeFile {
    /// The authoritative point count.
    pub number_of_point_records: u64,
    /// The per-return point counts, up to fifteen returns.
    pub number_of_points_by_return: [u64; 15],
}

/// Returns the size of the known, gated fields for a declared header size.
pub(crate) fn known_size(header_size: u16) -> u16 {
    if header_size >= GPS_TIME_OFFSET_SIZE {
        GPS_TIME_OFFSET_SIZE
    } else if header_size >= LARGE_FILE_SIZE {
        LARGE_FILE_SIZE
    } else if header_size >= EVLR_SIZE {
        EVLR_SIZE
    } else if header_size >= WAVEFORM_SIZE {
        WAVEFORM_SIZE
    } else {
        BASE_SIZE
    }
}

impl RawHeader {
    /// Reads a raw header.
    ///
    /// A signature other than "LASF" is fatal, as is a declared header size
    /// below 227 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_codec::header::RawHeader;
    /// let mut buffer = Vec::new();
    /// RawHeader::default().write_to(&mut buffer).unwrap();
    /// let header = RawHeader::read_from(Cursor::new(buffer)).unwrap();
    /// ```
    pub fn read_from<R: Read>(mut read: R) -> Result<RawHeader> {
        let mut file_signature = [0; 4];
        read.read_exact(&mut file_signature)?;
        if file_signature != LASF {
            return Err(Error::InvalidFileSignature(file_signature));
        }
        let file_source_id = read.read_u16::<LittleEndian>()?;
        let global_encoding = read.read_u16::<LittleEndian>()?;
        let mut guid = [0; 16];
        read.read_exact(&mut guid)?;
        let version = Version::new(read.read_u8()?, read.read_u8()?);
        let mut system_identifier = [0; 32];
        read.read_exact(&mut system_identifier)?;
        let mut generating_software = [0; 32];
        read.read_exact(&mut generating_software)?;
        let file_creation_day_of_year = read.read_u16::<LittleEndian>()?;
        let file_creation_year = read.read_u16::<LittleEndian>()?;
        let header_size = read.read_u16::<LittleEndian>()?;
        if header_size < BASE_SIZE {
            return Err(Error::InvalidRecordLength {
                record: "header",
                expected: BASE_SIZE.into(),
                actual: header_size.into(),
            });
        }
        let offset_to_point_data = read.read_u32::<LittleEndian>()?;
        let number_of_variable_length_records = read.read_u32::<LittleEndian>()?;
        let point_data_record_format = read.read_u8()?;
        let point_data_record_length = read.read_u16::<LittleEndian>()?;
        let number_of_point_records = read.read_u32::<LittleEndian>()?;
        let mut number_of_points_by_return = [0; 5];
        for n in number_of_points_by_return.iter_mut() {
            *n = read.read_u32::<LittleEndian>()?;
        }
        let x_scale_factor = read.read_f64::<LittleEndian>()?;
        let y_scale_factor = read.read_f64::<LittleEndian>()?;
        let z_scale_factor = read.read_f64::<LittleEndian>()?;
        let x_offset = read.read_f64::<LittleEndian>()?;
        let y_offset = read.read_f64::<LittleEndian>()?;
        let z_offset = read.read_f64::<LittleEndian>()?;
        let max_x = read.read_f64::<LittleEndian>()?;
        let min_x = read.read_f64::<LittleEndian>()?;
        let max_y = read.read_f64::<LittleEndian>()?;
        let min_y = read.read_f64::<LittleEndian>()?;
        let max_z = read.read_f64::<LittleEndian>()?;
        let min_z = read.read_f64::<LittleEndian>()?;
        let mut known_size = BASE_SIZE;
        let start_of_waveform_data_packet_record = if header_size >= WAVEFORM_SIZE {
            known_size = WAVEFORM_SIZE;
            Some(read.read_u64::<LittleEndian>()?)
        } else {
            None
        };
        let evlr = if header_size >= EVLR_SIZE {
            known_size = EVLR_SIZE;
            Some(Evlr {
                start_of_first_evlr: read.read_u64::<LittleEndian>()?,
                number_of_evlrs: read.read_u32::<LittleEndian>()?,
            })
        } else {
            None
        };
        let large_file = if header_size >= LARGE_FILE_SIZE {
            known_size = LARGE_FILE_SIZE;
            let number_of_point_records = read.read_u64::<LittleEndian>()?;
            let mut number_of_points_by_return = [0; 15];
            for n in number_of_points_by_return.iter_mut() {
                *n = read.read_u64::<LittleEndian>()?;
            }
            Some(LargeFile {
                number_of_point_records,
                number_of_points_by_return,
            })
        } else {
            None
        };
        let gps_time_offset = if header_size >= GPS_TIME_OFFSET_SIZE {
            known_size = GPS_TIME_OFFSET_SIZE;
            Some(read.read_f64::<LittleEndian>()?)
        } else {
            None
        };
        let mut padding = vec![0; usize::from(header_size - known_size)];
        read.read_exact(&mut padding)?;
        Ok(RawHeader {
            file_signature,
            file_source_id,
            global_encoding,
            guid,
            version,
            system_identifier,
            generating_software,
            file_creation_day_of_year,
            file_creation_year,
            header_size,
            offset_to_point_data,
            number_of_variable_length_records,
            point_data_record_format,
            point_data_record_length,
            number_of_point_records,
            number_of_points_by_return,
            x_scale_factor,
            y_scale_factor,
            z_scale_factor,
            x_offset,
            y_offset,
            z_offset,
            max_x,
            min_x,
            max_y,
            min_y,
            max_z,
            min_z,
            start_of_waveform_data_packet_record,
            evlr,
            large_file,
            gps_time_offset,
            padding,
        })
    }

    /// Writes a raw header.
    ///
    /// The same numeric `header_size` gate that drives reading drives
    /// writing; absent optional fields within the declared size are written
    /// as zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::header::RawHeader;
    /// let mut buffer = Vec::new();
    /// RawHeader::default().write_to(&mut buffer).unwrap();
    /// assert_eq!(227, buffer.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_all(&self.file_signature)?;
        write.write_u16::<LittleEndian>(self.file_source_id)?;
        write.write_u16::<LittleEndian>(self.global_encoding)?;
        write.write_all(&self.guid)?;
        write.write_u8(self.version.major)?;
        write.write_u8(self.version.minor)?;
        write.write_all(&self.system_identifier)?;
        write.write_all(&self.generating_software)?;
        write.write_u16::<LittleEndian>(self.file_creation_day_of_year)?;
        write.write_u16::<LittleEndian>(self.file_creation_year)?;
        write.write_u16::<LittleEndian>(self.header_size)?;
        write.write_u32::<LittleEndian>(self.offset_to_point_data)?;
        write.write_u32::<LittleEndian>(self.number_of_variable_length_records)?;
        write.write_u8(self.point_data_record_format)?;
        write.write_u16::<LittleEndian>(self.point_data_record_length)?;
        write.write_u32::<LittleEndian>(self.number_of_point_records)?;
        for n in self.number_of_points_by_return.iter() {
            write.write_u32::<LittleEndian>(*n)?;
        }
        write.write_f64::<LittleEndian>(self.x_scale_factor)?;
        write.write_f64::<LittleEndian>(self.y_scale_factor)?;
        write.write_f64::<LittleEndian>(self.z_scale_factor)?;
        write.write_f64::<LittleEndian>(self.x_offset)?;
        write.write_f64::<LittleEndian>(self.y_offset)?;
        write.write_f64::<LittleEndian>(self.z_offset)?;
        write.write_f64::<LittleEndian>(self.max_x)?;
        write.write_f64::<LittleEndian>(self.min_x)?;
        write.write_f64::<LittleEndian>(self.max_y)?;
        write.write_f64::<LittleEndian>(self.min_y)?;
        write.write_f64::<LittleEndian>(self.max_z)?;
        write.write_f64::<LittleEndian>(self.min_z)?;
        if self.header_size >= WAVEFORM_SIZE {
            write.write_u64::<LittleEndian>(
                self.start_of_waveform_data_packet_record.unwrap_or(0),
            )?;
        }
        if self.header_size >= EVLR_SIZE {
            let evlr = self.evlr.unwrap_or_default();
            write.write_u64::<LittleEndian>(evlr.start_of_first_evlr)?;
            write.write_u32::<LittleEndian>(evlr.number_of_evlrs)?;
        }
        if self.header_size >= LARGE_FILE_SIZE {
            let large_file = self.large_file.unwrap_or_default();
            write.write_u64::<LittleEndian>(large_file.number_of_point_records)?;
            for n in &large_file.number_of_points_by_return {
                write.write_u64::<LittleEndian>(*n)?;
            }
        }
        if self.header_size >= GPS_TIME_OFFSET_SIZE {
            write.write_f64::<LittleEndian>(self.gps_time_offset.unwrap_or(0.))?;
        }
        if !self.padding.is_empty() {
            write.write_all(&self.padding)?;
        }
        Ok(())
    }
}

impl Default for RawHeader {
    fn default() -> RawHeader {
        let version = Version::default();
        RawHeader {
            file_signature: LASF,
            file_source_id: 0,
            global_encoding: 0,
            guid: [0; 16],
            version,
            system_identifier: [0; 32],
            generating_software: [0; 32],
            file_creation_day_of_year: 0,
            file_creation_year: 0,
            header_size: version.header_size(),
            offset_to_point_data: version.header_size().into(),
            number_of_variable_length_records: 0,
            point_data_record_format: 0,
            point_data_record_length: 0,
            number_of_point_records: 0,
            number_of_points_by_return: [0; 5],
            x_scale_factor: 0.,
            y_scale_factor: 0.,
            z_scale_factor: 0.,
            x_offset: 0.,
            y_offset: 0.,
            z_offset: 0.,
            max_x: 0.,
            min_x: 0.,
            max_y: 0.,
            min_y: 0.,
            max_z: 0.,
            min_z: 0.,
            start_of_waveform_data_packet_record: None,
            evlr: None,
            large_file: None,
            gps_time_offset: None,
            padding: Vec::new(),
        }
    }
}
