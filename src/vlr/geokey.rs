//! GeoTIFF key payloads.

use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Write};

/// One GeoTIFF key entry, four u16s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeoKeyEntry {
    /// The key id.
    pub key_id: u16,
    /// Where the key's value lives: 0 for `value_offset` itself, otherwise
    /// the record id of the VLR holding the value array.
    pub tiff_tag_location: u16,
    /// The number of values addressed by this key.
    pub count: u16,
    /// The value, or an offset into the addressed array.
    pub value_offset: u16,
}

/// The payload of a GeoKeyDirectoryTag record.
///
/// A version triple followed by `number_of_keys` 8-byte entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeoKeyDirectory {
    /// Always 1.
    pub key_directory_version: u16,
    /// Always 1.
    pub key_revision: u16,
    /// Always 0.
    pub minor_revision: u16,
    /// The key entries.
    pub keys: Vec<GeoKeyEntry>,
}

impl GeoKeyDirectory {
    /// Parses a geo key directory from a VLR payload.
    ///
    /// The payload must be exactly `8 + 8 * number_of_keys` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::GeoKeyDirectory;
    /// let directory = GeoKeyDirectory::from_bytes(&[1, 0, 1, 0, 0, 0, 0, 0]).unwrap();
    /// assert!(directory.keys.is_empty());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<GeoKeyDirectory> {
        if bytes.len() < 8 {
            return Err(Error::InvalidRecordLength {
                record: "GeoKeyDirectoryTag",
                expected: 8,
                actual: bytes.len(),
            });
        }
        let mut cursor = Cursor::new(bytes);
        let key_directory_version = cursor.read_u16::<LittleEndian>()?;
        let key_revision = cursor.read_u16::<LittleEndian>()?;
        let minor_revision = cursor.read_u16::<LittleEndian>()?;
        let number_of_keys = cursor.read_u16::<LittleEndian>()?;
        let expected = 8 + 8 * usize::from(number_of_keys);
        if bytes.len() != expected {
            return Err(Error::InvalidRecordLength {
                record: "GeoKeyDirectoryTag",
                expected,
                actual: bytes.len(),
            });
        }
        let mut keys = Vec::with_capacity(number_of_keys.into());
        for _ in 0..number_of_keys {
            keys.push(GeoKeyEntry {
                key_id: cursor.read_u16::<LittleEndian>()?,
                tiff_tag_location: cursor.read_u16::<LittleEndian>()?,
                count: cursor.read_u16::<LittleEndian>()?,
                value_offset: cursor.read_u16::<LittleEndian>()?,
            });
        }
        Ok(GeoKeyDirectory {
            key_directory_version,
            key_revision,
            minor_revision,
            keys,
        })
    }

    /// Serializes this geo key directory into a VLR payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(8 + 8 * self.keys.len());
        bytes.write_u16::<LittleEndian>(self.key_directory_version)?;
        bytes.write_u16::<LittleEndian>(self.key_revision)?;
        bytes.write_u16::<LittleEndian>(self.minor_revision)?;
        bytes.write_u16::<LittleEndian>(self.keys.len() as u16)?;
        for key in &self.keys {
            bytes.write_u16::<LittleEndian>(key.key_id)?;
            bytes.write_u16::<LittleEndian>(key.tiff_tag_location)?;
            bytes.write_u16::<LittleEndian>(key.count)?;
            bytes.write_u16::<LittleEndian>(key.value_offset)?;
        }
        Ok(bytes)
    }
}

impl Default for GeoKeyDirectory {
    fn default() -> GeoKeyDirectory {
        GeoKeyDirectory {
            key_directory_version: 1,
            key_revision: 1,
            minor_revision: 0,
            keys: Vec::new(),
        }
    }
}

/// Parses the payload of a GeoDoubleParamsTag record.
///
/// The payload must be a whole number of f64s.
pub fn double_params_from_bytes(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.len() % 8 != 0 {
        return Err(Error::InvalidRecordLength {
            record: "GeoDoubleParamsTag",
            expected: bytes.len() / 8 * 8,
            actual: bytes.len(),
        });
    }
    let mut cursor = Cursor::new(bytes);
    let mut doubles = Vec::with_capacity(bytes.len() / 8);
    for _ in 0..bytes.len() / 8 {
        doubles.push(cursor.read_f64::<LittleEndian>()?);
    }
    Ok(doubles)
}

/// Serializes a GeoDoubleParamsTag payload.
pub fn double_params_to_bytes(doubles: &[f64]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(doubles.len() * 8);
    for &double in doubles {
        bytes.write_f64::<LittleEndian>(double)?;
    }
    Ok(bytes)
}

/// Parses the payload of a GeoAsciiParamsTag record.
///
/// The payload is an ASCII character array; GeoKey entries address substrings
/// by offset, with nulls or pipes as delimiters. The array is kept whole so
/// that offsets remain valid.
pub fn ascii_params_from_bytes(bytes: &[u8]) -> Result<String> {
    if !bytes.is_ascii() {
        return Err(Error::NotAscii(String::from_utf8_lossy(bytes).into_owned()));
    }
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Serializes a GeoAsciiParamsTag payload.
pub fn ascii_params_to_bytes(params: &str) -> Result<Vec<u8>> {
    if !params.is_ascii() {
        return Err(Error::NotAscii(params.to_string()));
    }
    let mut bytes = Vec::new();
    bytes.write_all(params.as_bytes())?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let directory = GeoKeyDirectory {
            keys: vec![
                GeoKeyEntry {
                    key_id: 1024,
                    tiff_tag_location: 0,
                    count: 1,
                    value_offset: 1,
                },
                GeoKeyEntry {
                    key_id: 2048,
                    tiff_tag_location: 34737,
                    count: 7,
                    value_offset: 0,
                },
            ],
            ..Default::default()
        };
        let bytes = directory.to_bytes().unwrap();
        assert_eq!(24, bytes.len());
        assert_eq!(directory, GeoKeyDirectory::from_bytes(&bytes).unwrap());
    }

    #[test]
    fn key_count_mismatch() {
        let mut bytes = GeoKeyDirectory::default().to_bytes().unwrap();
        bytes[6] = 1;
        assert!(GeoKeyDirectory::from_bytes(&bytes).is_err());
    }

    #[test]
    fn double_params() {
        let doubles = vec![1., 2., 3.];
        let bytes = double_params_to_bytes(&doubles).unwrap();
        assert_eq!(doubles, double_params_from_bytes(&bytes).unwrap());
        assert!(double_params_from_bytes(&bytes[1..]).is_err());
    }

    #[test]
    fn ascii_params() {
        let params = "WGS 84|NAVD88\0";
        let bytes = ascii_params_to_bytes(params).unwrap();
        assert_eq!(params, ascii_params_from_bytes(&bytes).unwrap());
        assert!(ascii_params_from_bytes(&[0xff]).is_err());
    }
}
