//! Raw variable length records that map directly onto the byte layout.

use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// The record length after the header.
///
/// Regular VLRs use a u16, extended VLRs a u64. This field always equals the
/// payload length and is recomputed on every write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordLength {
    /// A regular record length.
    Vlr(u16),
    /// An extended record length.
    Evlr(u64),
}

impl RecordLength {
    /// Returns the record length as a usize.
    pub fn get(&self) -> usize {
        match *self {
            RecordLength::Vlr(n) => n.into(),
            RecordLength::Evlr(n) => n as usize,
        }
    }
}

impl Default for RecordLength {
    fn default() -> RecordLength {
        RecordLength::Vlr(0)
    }
}

/// A raw variable length record.
///
/// The header is 54 bytes for regular records and 60 bytes for extended ones;
/// the only difference is the width of the record length field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawVlr {
    /// Reserved for future use, zero in recent revisions.
    pub reserved: u16,
    /// The padded ASCII user id.
    pub user_id: [u8; 16],
    /// The record id, interpreted relative to the user id.
    pub record_id: u16,
    /// The length of the payload that follows the header.
    pub record_length_after_header: RecordLength,
    /// The padded ASCII description.
    pub description: [u8; 32],
    /// The payload bytes.
    pub data: Vec<u8>,
}

impl RawVlr {
    /// Reads a raw VLR.
    ///
    /// Pass `true` to read an extended VLR.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_codec::vlr::RawVlr;
    /// let vlr = RawVlr::read_from(Cursor::new(vec![0; 54]), false).unwrap();
    /// assert!(vlr.data.is_empty());
    /// ```
    pub fn read_from<R: Read>(mut read: R, extended: bool) -> Result<RawVlr> {
        let reserved = read.read_u16::<LittleEndian>()?;
        let mut user_id = [0; 16];
        read.read_exact(&mut user_id)?;
        let record_id = read.read_u16::<LittleEndian>()?;
        let record_length_after_header = if extended {
            RecordLength::Evlr(read.read_u64::<LittleEndian>()?)
        } else {
            RecordLength::Vlr(read.read_u16::<LittleEndian>()?)
        };
        let mut description = [0; 32];
        read.read_exact(&mut description)?;
        let mut data = vec![0; record_length_after_header.get()];
        read.read_exact(&mut data)?;
        Ok(RawVlr {
            reserved,
            user_id,
            record_id,
            record_length_after_header,
            description,
            data,
        })
    }

    /// Writes a raw VLR.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::RawVlr;
    /// let mut buffer = Vec::new();
    /// RawVlr::default().write_to(&mut buffer).unwrap();
    /// assert_eq!(54, buffer.len());
    /// ```
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u16::<LittleEndian>(self.reserved)?;
        write.write_all(&self.user_id)?;
        write.write_u16::<LittleEndian>(self.record_id)?;
        match self.record_length_after_header {
            RecordLength::Vlr(n) => {
                if self.data.len() != usize::from(n) {
                    return Err(Error::InvalidRecordLength {
                        record: "VLR",
                        expected: n.into(),
                        actual: self.data.len(),
                    });
                }
                write.write_u16::<LittleEndian>(n)?;
            }
            RecordLength::Evlr(n) => {
                if self.data.len() as u64 != n {
                    return Err(Error::InvalidRecordLength {
                        record: "EVLR",
                        expected: n as usize,
                        actual: self.data.len(),
                    });
                }
                write.write_u64::<LittleEndian>(n)?;
            }
        }
        write.write_all(&self.description)?;
        write.write_all(&self.data)?;
        Ok(())
    }

    /// Is this an extended VLR?
    pub fn is_extended(&self) -> bool {
        matches!(self.record_length_after_header, RecordLength::Evlr(_))
    }
}
