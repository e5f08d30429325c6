//! The global encoding bit field from the header.

use crate::{GpsTimeType, bits};

const GPS_TIME_TYPE: u8 = 0b0000_0001;
const WAVEFORM_DATA_INTERNAL: u8 = 0b0000_0010;
const WAVEFORM_DATA_EXTERNAL: u8 = 0b0000_0100;
const SYNTHETIC_RETURN_NUMBERS: u8 = 0b0000_1000;
const WKT: u8 = 0b0001_0000;
const GPS_TIME_OFFSET: u8 = 0b0010_0000;

/// Global properties of the file, decoded from the header's u16 bit field.
///
/// Bits 6 through 15 are reserved; they are preserved on a read-write
/// round-trip but have no accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalEncoding {
    /// The meaning of gps time in the point records.
    pub gps_time_type: GpsTimeType,

    /// Are the waveform data packets stored inside this file?
    ///
    /// Deprecated in las 1.4, mutually exclusive with the external bit.
    pub waveform_data_internal: bool,

    /// Are the waveform data packets stored in an auxiliary `.wdp` file?
    pub waveform_data_external: bool,

    /// Have the return numbers been synthetically generated?
    pub synthetic_return_numbers: bool,

    /// Is the coordinate reference system carried as Well-Known Text?
    pub wkt: bool,

    /// Does the header's gps time offset field apply to the point times?
    pub gps_time_offset: bool,

    /// The reserved upper bits, kept verbatim.
    pub reserved: u16,
}

impl From<u16> for GlobalEncoding {
    fn from(n: u16) -> GlobalEncoding {
        let low = n as u8;
        GlobalEncoding {
            gps_time_type: if bits::is_set(low, GPS_TIME_TYPE) {
                GpsTimeType::Standard
            } else {
                GpsTimeType::Week
            },
            waveform_data_internal: bits::is_set(low, WAVEFORM_DATA_INTERNAL),
            waveform_data_external: bits::is_set(low, WAVEFORM_DATA_EXTERNAL),
            synthetic_return_numbers: bits::is_set(low, SYNTHETIC_RETURN_NUMBERS),
            wkt: bits::is_set(low, WKT),
            gps_time_offset: bits::is_set(low, GPS_TIME_OFFSET),
            reserved: n & !0x3f,
        }
    }
}

impl From<GlobalEncoding> for u16 {
    fn from(global_encoding: GlobalEncoding) -> u16 {
        let mut low = 0u8;
        low = bits::apply(
            low,
            GPS_TIME_TYPE,
            global_encoding.gps_time_type.is_standard(),
        );
        low = bits::apply(
            low,
            WAVEFORM_DATA_INTERNAL,
            global_encoding.waveform_data_internal,
        );
        low = bits::apply(
            low,
            WAVEFORM_DATA_EXTERNAL,
            global_encoding.waveform_data_external,
        );
        low = bits::apply(
            low,
            SYNTHETIC_RETURN_NUMBERS,
            global_encoding.synthetic_return_numbers,
        );
        low = bits::apply(low, WKT, global_encoding.wkt);
        low = bits::apply(low, GPS_TIME_OFFSET, global_encoding.gps_time_offset);
        global_encoding.reserved | u16::from(low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gps_time_type() {
        assert_eq!(GpsTimeType::Week, GlobalEncoding::from(0).gps_time_type);
        assert_eq!(GpsTimeType::Standard, GlobalEncoding::from(1).gps_time_type);
    }

    #[test]
    fn roundtrip() {
        for n in [0u16, 1, 2, 4, 8, 16, 32, 0b11_1111, 0xffc0, 0xffff] {
            assert_eq!(n, u16::from(GlobalEncoding::from(n)));
        }
    }

    #[test]
    fn wkt_bit() {
        let global_encoding = GlobalEncoding::from(0b0001_0000);
        assert!(global_encoding.wkt);
        assert!(!global_encoding.gps_time_offset);
    }
}
