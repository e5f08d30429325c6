//! The 256-entry classification lookup payload.

use crate::utils::{AsLasStr, FromLasStr};
use crate::{Error, Result};
use std::io::{Cursor, Read, Write};

const NUMBER_OF_ENTRIES: usize = 256;
const DESCRIPTION_LENGTH: usize = 15;
const PAYLOAD_LENGTH: usize = NUMBER_OF_ENTRIES * (1 + DESCRIPTION_LENGTH);

/// One classification lookup entry: a class number and a short description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassificationLookupEntry {
    /// The class number this entry describes.
    pub class_number: u8,
    /// A description of the class, at most 15 characters.
    pub description: String,
}

/// The payload of a ClassificationLookup record.
///
/// Always exactly 256 entries of 16 bytes each.
///
/// # Examples
///
/// ```
/// use las_codec::vlr::ClassificationLookup;
/// let lookup = ClassificationLookup::default();
/// assert_eq!(4096, lookup.to_bytes().unwrap().len());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassificationLookup {
    /// The entries, always 256 of them.
    pub entries: Vec<ClassificationLookupEntry>,
}

impl ClassificationLookup {
    /// Parses a classification lookup from a VLR payload.
    ///
    /// The payload must be exactly 4096 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<ClassificationLookup> {
        if bytes.len() != PAYLOAD_LENGTH {
            return Err(Error::InvalidRecordLength {
                record: "ClassificationLookup",
                expected: PAYLOAD_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut cursor = Cursor::new(bytes);
        let mut entries = Vec::with_capacity(NUMBER_OF_ENTRIES);
        for _ in 0..NUMBER_OF_ENTRIES {
            let mut class_number = [0];
            cursor.read_exact(&mut class_number)?;
            let mut description = [0; DESCRIPTION_LENGTH];
            cursor.read_exact(&mut description)?;
            entries.push(ClassificationLookupEntry {
                class_number: class_number[0],
                description: description.as_ref().as_las_str()?.to_string(),
            });
        }
        Ok(ClassificationLookup { entries })
    }

    /// Serializes this classification lookup into a VLR payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(PAYLOAD_LENGTH);
        for entry in &self.entries {
            bytes.write_all(&[entry.class_number])?;
            let mut description = [0; DESCRIPTION_LENGTH];
            description.as_mut().from_las_str(&entry.description)?;
            bytes.write_all(&description)?;
        }
        Ok(bytes)
    }
}

impl Default for ClassificationLookup {
    fn default() -> ClassificationLookup {
        ClassificationLookup {
            entries: (0..NUMBER_OF_ENTRIES)
                .map(|n| ClassificationLookupEntry {
                    class_number: n as u8,
                    description: String::new(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut lookup = ClassificationLookup::default();
        lookup.entries[2].description = "Ground".to_string();
        let bytes = lookup.to_bytes().unwrap();
        assert_eq!(PAYLOAD_LENGTH, bytes.len());
        assert_eq!(lookup, ClassificationLookup::from_bytes(&bytes).unwrap());
    }

    #[test]
    fn wrong_length() {
        assert!(ClassificationLookup::from_bytes(&[0; 16]).is_err());
    }

    #[test]
    fn description_too_long() {
        let mut lookup = ClassificationLookup::default();
        lookup.entries[0].description = "much much too long to fit".to_string();
        assert!(lookup.to_bytes().is_err());
    }
}
