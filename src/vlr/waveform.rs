//! Waveform packet descriptors.

use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

const PAYLOAD_LENGTH: usize = 26;

/// The payload of a WaveformPacketDescriptor record, 26 bytes.
///
/// Waveform points reference these descriptors by index: descriptor index `n`
/// lives in the VLR with record id `n + 99`, so record ids 100 through 354
/// address the 255 possible descriptors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveformPacketDescriptor {
    /// The number of bits per sample, 8 through 32.
    pub bits_per_sample: u8,
    /// The compression applied to the waveform packets, 0 for none.
    pub waveform_compression_type: u8,
    /// The number of samples in each packet.
    pub number_of_samples: u32,
    /// Picoseconds between samples.
    pub temporal_sample_spacing: u32,
    /// Gain applied to convert raw samples to volts.
    pub digitizer_gain: f64,
    /// Offset applied to convert raw samples to volts.
    pub digitizer_offset: f64,
}

impl WaveformPacketDescriptor {
    /// Parses a waveform packet descriptor from a VLR payload.
    ///
    /// The payload must be exactly 26 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::WaveformPacketDescriptor;
    /// let descriptor = WaveformPacketDescriptor::from_bytes(&[0; 26]).unwrap();
    /// assert!(WaveformPacketDescriptor::from_bytes(&[0; 25]).is_err());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<WaveformPacketDescriptor> {
        if bytes.len() != PAYLOAD_LENGTH {
            return Err(Error::InvalidRecordLength {
                record: "WaveformPacketDescriptor",
                expected: PAYLOAD_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut cursor = Cursor::new(bytes);
        Ok(WaveformPacketDescriptor {
            bits_per_sample: cursor.read_u8()?,
            waveform_compression_type: cursor.read_u8()?,
            number_of_samples: cursor.read_u32::<LittleEndian>()?,
            temporal_sample_spacing: cursor.read_u32::<LittleEndian>()?,
            digitizer_gain: cursor.read_f64::<LittleEndian>()?,
            digitizer_offset: cursor.read_f64::<LittleEndian>()?,
        })
    }

    /// Serializes this descriptor into a VLR payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(PAYLOAD_LENGTH);
        bytes.write_u8(self.bits_per_sample)?;
        bytes.write_u8(self.waveform_compression_type)?;
        bytes.write_u32::<LittleEndian>(self.number_of_samples)?;
        bytes.write_u32::<LittleEndian>(self.temporal_sample_spacing)?;
        bytes.write_f64::<LittleEndian>(self.digitizer_gain)?;
        bytes.write_f64::<LittleEndian>(self.digitizer_offset)?;
        Ok(bytes)
    }
}
