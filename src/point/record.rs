//! The eleven on-disk point record layouts.
//!
//! Formats 0 through 5 share a 20-byte legacy base block; formats 6 through
//! 10 share a 30-byte extended base block. Optional attribute groups — gps
//! time, color, near infrared, waveform — are appended in a fixed order.
//! Records are immutable values: they are built once, from bytes or from
//! named fields, and converted by value into other variants.

use crate::point::{Format, ScanDirection};
use crate::{Color, Result, bits};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// The classification code that marks overlap points in the legacy layout.
pub const OVERLAP_CLASSIFICATION_CODE: u8 = 12;

const LEGACY_RETURN_NUMBER: u8 = 0b0000_0111;
const LEGACY_NUMBER_OF_RETURNS: u8 = 0b0011_1000;
const LEGACY_NUMBER_OF_RETURNS_SHIFT: u8 = 3;
const LEGACY_SCAN_DIRECTION: u8 = 0b0100_0000;
const LEGACY_EDGE_OF_FLIGHT_LINE: u8 = 0b1000_0000;
const LEGACY_CLASSIFICATION: u8 = 0b0001_1111;
const LEGACY_SYNTHETIC: u8 = 0b0010_0000;
const LEGACY_KEY_POINT: u8 = 0b0100_0000;
const LEGACY_WITHHELD: u8 = 0b1000_0000;

const EXTENDED_RETURN_NUMBER: u8 = 0b0000_1111;
const EXTENDED_NUMBER_OF_RETURNS: u8 = 0b1111_0000;
const EXTENDED_NUMBER_OF_RETURNS_SHIFT: u8 = 4;
const EXTENDED_SYNTHETIC: u8 = 0b0000_0001;
const EXTENDED_KEY_POINT: u8 = 0b0000_0010;
const EXTENDED_WITHHELD: u8 = 0b0000_0100;
const EXTENDED_OVERLAP: u8 = 0b0000_1000;
const EXTENDED_SCANNER_CHANNEL: u8 = 0b0011_0000;
const EXTENDED_SCANNER_CHANNEL_SHIFT: u8 = 4;
const EXTENDED_SCAN_DIRECTION: u8 = 0b0100_0000;
const EXTENDED_EDGE_OF_FLIGHT_LINE: u8 = 0b1000_0000;

/// The 20-byte base block shared by point formats 0 through 5.
///
/// The `returns` byte packs the return number (3 bits), the number of returns
/// (3 bits), the scan direction flag, and the edge of flight line flag. The
/// `classification` byte packs a 5-bit class code with the synthetic,
/// key-point, and withheld flags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LegacyFields {
    /// Scaled x coordinate.
    pub x: i32,
    /// Scaled y coordinate.
    pub y: i32,
    /// Scaled z coordinate.
    pub z: i32,
    /// Pulse return magnitude, normalized to 16 bits.
    pub intensity: u16,
    /// The packed return byte.
    pub returns: u8,
    /// The packed classification byte.
    pub classification: u8,
    /// The scan angle, rounded to the nearest degree.
    pub scan_angle_rank: i8,
    /// Free for use at the user's discretion.
    pub user_data: u8,
    /// The file from which this point originated.
    pub point_source_id: u16,
}

impl LegacyFields {
    /// Packs a return byte from its four sub-fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::{LegacyFields, ScanDirection};
    /// let returns = LegacyFields::pack_returns(1, 2, ScanDirection::RightToLeft, false);
    /// assert_eq!(0b0001_0001, returns);
    /// ```
    pub fn pack_returns(
        return_number: u8,
        number_of_returns: u8,
        scan_direction: ScanDirection,
        edge_of_flight_line: bool,
    ) -> u8 {
        let mut byte = bits::set(0, return_number, LEGACY_RETURN_NUMBER);
        byte = bits::set_shifted(
            byte,
            number_of_returns,
            LEGACY_NUMBER_OF_RETURNS,
            LEGACY_NUMBER_OF_RETURNS_SHIFT,
        );
        byte = bits::apply(
            byte,
            LEGACY_SCAN_DIRECTION,
            scan_direction == ScanDirection::LeftToRight,
        );
        bits::apply(byte, LEGACY_EDGE_OF_FLIGHT_LINE, edge_of_flight_line)
    }

    /// Packs a classification byte from the class code and its three flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::LegacyFields;
    /// assert_eq!(0b0010_0010, LegacyFields::pack_classification(2, true, false, false));
    /// ```
    pub fn pack_classification(
        classification: u8,
        synthetic: bool,
        key_point: bool,
        withheld: bool,
    ) -> u8 {
        let mut byte = bits::set(0, classification, LEGACY_CLASSIFICATION);
        byte = bits::apply(byte, LEGACY_SYNTHETIC, synthetic);
        byte = bits::apply(byte, LEGACY_KEY_POINT, key_point);
        bits::apply(byte, LEGACY_WITHHELD, withheld)
    }

    /// Returns the return number (1 through 7).
    pub fn return_number(&self) -> u8 {
        bits::get(self.returns, LEGACY_RETURN_NUMBER)
    }

    /// Returns the number of returns for this pulse (1 through 7).
    pub fn number_of_returns(&self) -> u8 {
        bits::get_shifted(
            self.returns,
            LEGACY_NUMBER_OF_RETURNS,
            LEGACY_NUMBER_OF_RETURNS_SHIFT,
        )
    }

    /// Returns the scan direction.
    pub fn scan_direction(&self) -> ScanDirection {
        if bits::is_set(self.returns, LEGACY_SCAN_DIRECTION) {
            ScanDirection::LeftToRight
        } else {
            ScanDirection::RightToLeft
        }
    }

    /// Is this point at the edge of a flight line?
    pub fn is_edge_of_flight_line(&self) -> bool {
        bits::is_set(self.returns, LEGACY_EDGE_OF_FLIGHT_LINE)
    }

    /// Returns the 5-bit class code (0 through 31).
    pub fn classification_code(&self) -> u8 {
        bits::get(self.classification, LEGACY_CLASSIFICATION)
    }

    /// Was this point created by a technique other than lidar collection?
    pub fn is_synthetic(&self) -> bool {
        bits::is_set(self.classification, LEGACY_SYNTHETIC)
    }

    /// Is this point a model key-point?
    pub fn is_key_point(&self) -> bool {
        bits::is_set(self.classification, LEGACY_KEY_POINT)
    }

    /// Should this point be excluded from processing?
    pub fn is_withheld(&self) -> bool {
        bits::is_set(self.classification, LEGACY_WITHHELD)
    }

    /// Is this point in the overlap region of two or more swaths?
    ///
    /// The legacy layout has no overlap flag; class code 12 carries that
    /// meaning instead.
    pub fn is_overlap(&self) -> bool {
        self.classification_code() == OVERLAP_CLASSIFICATION_CODE
    }

    fn read_from<R: Read>(mut read: R) -> Result<LegacyFields> {
        Ok(LegacyFields {
            x: read.read_i32::<LittleEndian>()?,
            y: read.read_i32::<LittleEndian>()?,
            z: read.read_i32::<LittleEndian>()?,
            intensity: read.read_u16::<LittleEndian>()?,
            returns: read.read_u8()?,
            classification: read.read_u8()?,
            scan_angle_rank: read.read_i8()?,
            user_data: read.read_u8()?,
            point_source_id: read.read_u16::<LittleEndian>()?,
        })
    }

    fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        write.write_u8(self.returns)?;
        write.write_u8(self.classification)?;
        write.write_i8(self.scan_angle_rank)?;
        write.write_u8(self.user_data)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        Ok(())
    }
}

/// The 30-byte base block shared by point formats 6 through 10.
///
/// The `returns` byte packs the return number and the number of returns, four
/// bits each. The `flags` byte packs the synthetic, key-point, withheld, and
/// overlap flags, the 2-bit scanner channel, the scan direction flag, and the
/// edge of flight line flag. The classification gets a full byte, the scan
/// angle an i16 in 0.006 degree units, and gps time is always present.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtendedFields {
    /// Scaled x coordinate.
    pub x: i32,
    /// Scaled y coordinate.
    pub y: i32,
    /// Scaled z coordinate.
    pub z: i32,
    /// Pulse return magnitude, normalized to 16 bits.
    pub intensity: u16,
    /// The packed return byte.
    pub returns: u8,
    /// The packed flags byte.
    pub flags: u8,
    /// The full ASPRS class code (0 through 255).
    pub classification: u8,
    /// Free for use at the user's discretion.
    pub user_data: u8,
    /// The scan angle in 0.006 degree units, -30_000 through 30_000.
    pub scan_angle: i16,
    /// The file from which this point originated.
    pub point_source_id: u16,
    /// The time this point was acquired.
    pub gps_time: f64,
}

impl ExtendedFields {
    /// Packs a return byte from the return number and number of returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::ExtendedFields;
    /// assert_eq!(0b0010_0001, ExtendedFields::pack_returns(1, 2));
    /// ```
    pub fn pack_returns(return_number: u8, number_of_returns: u8) -> u8 {
        let byte = bits::set(0, return_number, EXTENDED_RETURN_NUMBER);
        bits::set_shifted(
            byte,
            number_of_returns,
            EXTENDED_NUMBER_OF_RETURNS,
            EXTENDED_NUMBER_OF_RETURNS_SHIFT,
        )
    }

    /// Packs a flags byte from its seven sub-fields.
    #[allow(clippy::too_many_arguments)]
    pub fn pack_flags(
        synthetic: bool,
        key_point: bool,
        withheld: bool,
        overlap: bool,
        scanner_channel: u8,
        scan_direction: ScanDirection,
        edge_of_flight_line: bool,
    ) -> u8 {
        let mut byte = bits::apply(0, EXTENDED_SYNTHETIC, synthetic);
        byte = bits::apply(byte, EXTENDED_KEY_POINT, key_point);
        byte = bits::apply(byte, EXTENDED_WITHHELD, withheld);
        byte = bits::apply(byte, EXTENDED_OVERLAP, overlap);
        byte = bits::set_shifted(
            byte,
            scanner_channel,
            EXTENDED_SCANNER_CHANNEL,
            EXTENDED_SCANNER_CHANNEL_SHIFT,
        );
        byte = bits::apply(
            byte,
            EXTENDED_SCAN_DIRECTION,
            scan_direction == ScanDirection::LeftToRight,
        );
        bits::apply(byte, EXTENDED_EDGE_OF_FLIGHT_LINE, edge_of_flight_line)
    }

    /// Returns the return number (1 through 15).
    pub fn return_number(&self) -> u8 {
        bits::get(self.returns, EXTENDED_RETURN_NUMBER)
    }

    /// Returns the number of returns for this pulse (1 through 15).
    pub fn number_of_returns(&self) -> u8 {
        bits::get_shifted(
            self.returns,
            EXTENDED_NUMBER_OF_RETURNS,
            EXTENDED_NUMBER_OF_RETURNS_SHIFT,
        )
    }

    /// Was this point created by a technique other than lidar collection?
    pub fn is_synthetic(&self) -> bool {
        bits::is_set(self.flags, EXTENDED_SYNTHETIC)
    }

    /// Is this point a model key-point?
    pub fn is_key_point(&self) -> bool {
        bits::is_set(self.flags, EXTENDED_KEY_POINT)
    }

    /// Should this point be excluded from processing?
    pub fn is_withheld(&self) -> bool {
        bits::is_set(self.flags, EXTENDED_WITHHELD)
    }

    /// Is this point in the overlap region of two or more swaths?
    pub fn is_overlap(&self) -> bool {
        bits::is_set(self.flags, EXTENDED_OVERLAP)
    }

    /// Returns the scanner channel (0 through 3).
    pub fn scanner_channel(&self) -> u8 {
        bits::get_shifted(
            self.flags,
            EXTENDED_SCANNER_CHANNEL,
            EXTENDED_SCANNER_CHANNEL_SHIFT,
        )
    }

    /// Returns the scan direction.
    pub fn scan_direction(&self) -> ScanDirection {
        if bits::is_set(self.flags, EXTENDED_SCAN_DIRECTION) {
            ScanDirection::LeftToRight
        } else {
            ScanDirection::RightToLeft
        }
    }

    /// Is this point at the edge of a flight line?
    pub fn is_edge_of_flight_line(&self) -> bool {
        bits::is_set(self.flags, EXTENDED_EDGE_OF_FLIGHT_LINE)
    }

    fn read_from<R: Read>(mut read: R) -> Result<ExtendedFields> {
        Ok(ExtendedFields {
            x: read.read_i32::<LittleEndian>()?,
            y: read.read_i32::<LittleEndian>()?,
            z: read.read_i32::<LittleEndian>()?,
            intensity: read.read_u16::<LittleEndian>()?,
            returns: read.read_u8()?,
            flags: read.read_u8()?,
            classification: read.read_u8()?,
            user_data: read.read_u8()?,
            scan_angle: read.read_i16::<LittleEndian>()?,
            point_source_id: read.read_u16::<LittleEndian>()?,
            gps_time: read.read_f64::<LittleEndian>()?,
        })
    }

    fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_i32::<LittleEndian>(self.x)?;
        write.write_i32::<LittleEndian>(self.y)?;
        write.write_i32::<LittleEndian>(self.z)?;
        write.write_u16::<LittleEndian>(self.intensity)?;
        write.write_u8(self.returns)?;
        write.write_u8(self.flags)?;
        write.write_u8(self.classification)?;
        write.write_u8(self.user_data)?;
        write.write_i16::<LittleEndian>(self.scan_angle)?;
        write.write_u16::<LittleEndian>(self.point_source_id)?;
        write.write_f64::<LittleEndian>(self.gps_time)?;
        Ok(())
    }
}

/// The 29-byte waveform packet pointer carried by formats 4, 5, 9, and 10.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Waveform {
    /// This value plus 99 is the record id of the waveform packet descriptor
    /// that describes this point's waveform packet.
    ///
    /// Zero means there is no waveform associated with this point.
    pub wave_packet_descriptor_index: u8,
    /// Offset of this packet from the start of the waveform data, in bytes.
    pub byte_offset_to_waveform_data: u64,
    /// The size of this packet, in bytes.
    pub waveform_packet_size_in_bytes: u32,
    /// Picoseconds from the first digitized value to the associated return.
    pub return_point_waveform_location: f32,
    /// Parametric line equation coefficient for x.
    pub x_t: f32,
    /// Parametric line equation coefficient for y.
    pub y_t: f32,
    /// Parametric line equation coefficient for z.
    pub z_t: f32,
}

impl Waveform {
    fn read_from<R: Read>(mut read: R) -> Result<Waveform> {
        Ok(Waveform {
            wave_packet_descriptor_index: read.read_u8()?,
            byte_offset_to_waveform_data: read.read_u64::<LittleEndian>()?,
            waveform_packet_size_in_bytes: read.read_u32::<LittleEndian>()?,
            return_point_waveform_location: read.read_f32::<LittleEndian>()?,
            x_t: read.read_f32::<LittleEndian>()?,
            y_t: read.read_f32::<LittleEndian>()?,
            z_t: read.read_f32::<LittleEndian>()?,
        })
    }

    fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        write.write_u8(self.wave_packet_descriptor_index)?;
        write.write_u64::<LittleEndian>(self.byte_offset_to_waveform_data)?;
        write.write_u32::<LittleEndian>(self.waveform_packet_size_in_bytes)?;
        write.write_f32::<LittleEndian>(self.return_point_waveform_location)?;
        write.write_f32::<LittleEndian>(self.x_t)?;
        write.write_f32::<LittleEndian>(self.y_t)?;
        write.write_f32::<LittleEndian>(self.z_t)?;
        Ok(())
    }
}

fn read_color<R: Read>(mut read: R) -> Result<Color> {
    Ok(Color {
        red: read.read_u16::<LittleEndian>()?,
        green: read.read_u16::<LittleEndian>()?,
        blue: read.read_u16::<LittleEndian>()?,
    })
}

fn write_color<W: Write>(color: Color, mut write: W) -> Result<()> {
    write.write_u16::<LittleEndian>(color.red)?;
    write.write_u16::<LittleEndian>(color.green)?;
    write.write_u16::<LittleEndian>(color.blue)?;
    Ok(())
}

macro_rules! point_struct {
    (
        $(#[$meta:meta])*
        $name:ident, $base:ident $(, $field:ident: $ty:ty)*
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $name {
            /// The base block.
            pub base: $base,
            $(
                #[allow(missing_docs)]
                pub $field: $ty,
            )*
        }
    };
}

point_struct!(
    /// Point format 0: the legacy base block, 20 bytes.
    Point0,
    LegacyFields
);
point_struct!(
    /// Point format 1: legacy base plus gps time, 28 bytes.
    Point1,
    LegacyFields,
    gps_time: f64
);
point_struct!(
    /// Point format 2: legacy base plus color, 26 bytes.
    Point2,
    LegacyFields,
    color: Color
);
point_struct!(
    /// Point format 3: legacy base plus gps time and color, 34 bytes.
    Point3,
    LegacyFields,
    gps_time: f64,
    color: Color
);
point_struct!(
    /// Point format 4: format 1 plus a waveform packet pointer, 57 bytes.
    Point4,
    LegacyFields,
    gps_time: f64,
    waveform: Waveform
);
point_struct!(
    /// Point format 5: format 3 plus a waveform packet pointer, 63 bytes.
    Point5,
    LegacyFields,
    gps_time: f64,
    color: Color,
    waveform: Waveform
);
point_struct!(
    /// Point format 6: the extended base block, 30 bytes.
    Point6,
    ExtendedFields
);
point_struct!(
    /// Point format 7: extended base plus color, 36 bytes.
    Point7,
    ExtendedFields,
    color: Color
);
point_struct!(
    /// Point format 8: extended base plus color and near infrared, 38 bytes.
    Point8,
    ExtendedFields,
    color: Color,
    nir: u16
);
point_struct!(
    /// Point format 9: format 6 plus a waveform packet pointer, 59 bytes.
    Point9,
    ExtendedFields,
    waveform: Waveform
);
point_struct!(
    /// Point format 10: format 8 plus a waveform packet pointer, 67 bytes.
    Point10,
    ExtendedFields,
    color: Color,
    nir: u16,
    waveform: Waveform
);

impl Point0 {
    /// Reads a format 0 record.
    pub fn read_from<R: Read>(read: R) -> Result<Point0> {
        Ok(Point0 {
            base: LegacyFields::read_from(read)?,
        })
    }

    /// Writes a format 0 record.
    pub fn write_to<W: Write>(&self, write: W) -> Result<()> {
        self.base.write_to(write)
    }
}

impl Point1 {
    /// Reads a format 1 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point1> {
        Ok(Point1 {
            base: LegacyFields::read_from(&mut read)?,
            gps_time: read.read_f64::<LittleEndian>()?,
        })
    }

    /// Writes a format 1 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write.write_f64::<LittleEndian>(self.gps_time)?;
        Ok(())
    }
}

impl Point2 {
    /// Reads a format 2 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point2> {
        Ok(Point2 {
            base: LegacyFields::read_from(&mut read)?,
            color: read_color(&mut read)?,
        })
    }

    /// Writes a format 2 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write_color(self.color, &mut write)
    }
}

impl Point3 {
    /// Reads a format 3 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point3> {
        Ok(Point3 {
            base: LegacyFields::read_from(&mut read)?,
            gps_time: read.read_f64::<LittleEndian>()?,
            color: read_color(&mut read)?,
        })
    }

    /// Writes a format 3 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write.write_f64::<LittleEndian>(self.gps_time)?;
        write_color(self.color, &mut write)
    }
}

impl Point4 {
    /// Reads a format 4 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point4> {
        Ok(Point4 {
            base: LegacyFields::read_from(&mut read)?,
            gps_time: read.read_f64::<LittleEndian>()?,
            waveform: Waveform::read_from(&mut read)?,
        })
    }

    /// Writes a format 4 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write.write_f64::<LittleEndian>(self.gps_time)?;
        self.waveform.write_to(&mut write)
    }
}

impl Point5 {
    /// Reads a format 5 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point5> {
        Ok(Point5 {
            base: LegacyFields::read_from(&mut read)?,
            gps_time: read.read_f64::<LittleEndian>()?,
            color: read_color(&mut read)?,
            waveform: Waveform::read_from(&mut read)?,
        })
    }

    /// Writes a format 5 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write.write_f64::<LittleEndian>(self.gps_time)?;
        write_color(self.color, &mut write)?;
        self.waveform.write_to(&mut write)
    }
}

impl Point6 {
    /// Reads a format 6 record.
    pub fn read_from<R: Read>(read: R) -> Result<Point6> {
        Ok(Point6 {
            base: ExtendedFields::read_from(read)?,
        })
    }

    /// Writes a format 6 record.
    pub fn write_to<W: Write>(&self, write: W) -> Result<()> {
        self.base.write_to(write)
    }
}

impl Point7 {
    /// Reads a format 7 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point7> {
        Ok(Point7 {
            base: ExtendedFields::read_from(&mut read)?,
            color: read_color(&mut read)?,
        })
    }

    /// Writes a format 7 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write_color(self.color, &mut write)
    }
}

impl Point8 {
    /// Reads a format 8 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point8> {
        Ok(Point8 {
            base: ExtendedFields::read_from(&mut read)?,
            color: read_color(&mut read)?,
            nir: read.read_u16::<LittleEndian>()?,
        })
    }

    /// Writes a format 8 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write_color(self.color, &mut write)?;
        write.write_u16::<LittleEndian>(self.nir)?;
        Ok(())
    }
}

impl Point9 {
    /// Reads a format 9 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point9> {
        Ok(Point9 {
            base: ExtendedFields::read_from(&mut read)?,
            waveform: Waveform::read_from(&mut read)?,
        })
    }

    /// Writes a format 9 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        self.waveform.write_to(&mut write)
    }
}

impl Point10 {
    /// Reads a format 10 record.
    pub fn read_from<R: Read>(mut read: R) -> Result<Point10> {
        Ok(Point10 {
            base: ExtendedFields::read_from(&mut read)?,
            color: read_color(&mut read)?,
            nir: read.read_u16::<LittleEndian>()?,
            waveform: Waveform::read_from(&mut read)?,
        })
    }

    /// Writes a format 10 record.
    pub fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        self.base.write_to(&mut write)?;
        write_color(self.color, &mut write)?;
        write.write_u16::<LittleEndian>(self.nir)?;
        self.waveform.write_to(&mut write)
    }
}

/// A point record in any of the eleven formats.
///
/// This is a closed enum: one variant per on-disk layout. Records read and
/// write exactly [Format::len] bytes, and unchanged fields round-trip
/// byte-identically.
///
/// ```
/// use std::io::Cursor;
/// use las_codec::point::{Format, PointRecord};
///
/// let format = Format::new(1).unwrap();
/// let buffer = vec![0; format.len() as usize];
/// let record = PointRecord::read_from(Cursor::new(&buffer), format).unwrap();
/// let mut output = Vec::new();
/// record.write_to(&mut output).unwrap();
/// assert_eq!(buffer, output);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum PointRecord {
    Format0(Point0),
    Format1(Point1),
    Format2(Point2),
    Format3(Point3),
    Format4(Point4),
    Format5(Point5),
    Format6(Point6),
    Format7(Point7),
    Format8(Point8),
    Format9(Point9),
    Format10(Point10),
}

impl PointRecord {
    /// Reads a point record in the given format.
    ///
    /// Exactly [Format::len] bytes are consumed; a short read is a structural
    /// error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_codec::point::{Format, PointRecord};
    /// let buffer = vec![0; 20];
    /// let record = PointRecord::read_from(Cursor::new(buffer), Format::new(0).unwrap()).unwrap();
    /// ```
    pub fn read_from<R: Read>(read: R, format: Format) -> Result<PointRecord> {
        Ok(match format.n() {
            0 => PointRecord::Format0(Point0::read_from(read)?),
            1 => PointRecord::Format1(Point1::read_from(read)?),
            2 => PointRecord::Format2(Point2::read_from(read)?),
            3 => PointRecord::Format3(Point3::read_from(read)?),
            4 => PointRecord::Format4(Point4::read_from(read)?),
            5 => PointRecord::Format5(Point5::read_from(read)?),
            6 => PointRecord::Format6(Point6::read_from(read)?),
            7 => PointRecord::Format7(Point7::read_from(read)?),
            8 => PointRecord::Format8(Point8::read_from(read)?),
            9 => PointRecord::Format9(Point9::read_from(read)?),
            _ => PointRecord::Format10(Point10::read_from(read)?),
        })
    }

    /// Writes this point record.
    ///
    /// Exactly [Format::len] bytes are produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::PointRecord;
    /// let mut buffer = Vec::new();
    /// PointRecord::default().write_to(&mut buffer).unwrap();
    /// assert_eq!(20, buffer.len());
    /// ```
    pub fn write_to<W: Write>(&self, write: W) -> Result<()> {
        match self {
            PointRecord::Format0(point) => point.write_to(write),
            PointRecord::Format1(point) => point.write_to(write),
            PointRecord::Format2(point) => point.write_to(write),
            PointRecord::Format3(point) => point.write_to(write),
            PointRecord::Format4(point) => point.write_to(write),
            PointRecord::Format5(point) => point.write_to(write),
            PointRecord::Format6(point) => point.write_to(write),
            PointRecord::Format7(point) => point.write_to(write),
            PointRecord::Format8(point) => point.write_to(write),
            PointRecord::Format9(point) => point.write_to(write),
            PointRecord::Format10(point) => point.write_to(write),
        }
    }

    /// Returns this record's format.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::PointRecord;
    /// assert_eq!(0, PointRecord::default().format().n());
    /// ```
    pub fn format(&self) -> Format {
        let n = match self {
            PointRecord::Format0(_) => 0,
            PointRecord::Format1(_) => 1,
            PointRecord::Format2(_) => 2,
            PointRecord::Format3(_) => 3,
            PointRecord::Format4(_) => 4,
            PointRecord::Format5(_) => 5,
            PointRecord::Format6(_) => 6,
            PointRecord::Format7(_) => 7,
            PointRecord::Format8(_) => 8,
            PointRecord::Format9(_) => 9,
            PointRecord::Format10(_) => 10,
        };
        Format::new(n).expect("format numbers 0-10 are always valid")
    }

    /// Returns this record's scaled integer coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::PointRecord;
    /// assert_eq!(0, PointRecord::default().xyz().x);
    /// ```
    pub fn xyz(&self) -> crate::Vector<i32> {
        match self {
            PointRecord::Format0(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format1(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format2(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format3(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format4(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format5(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format6(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format7(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format8(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format9(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
            PointRecord::Format10(point) => crate::Vector::new(point.base.x, point.base.y, point.base.z),
        }
    }

    /// Returns this record's return number.
    pub fn return_number(&self) -> u8 {
        match self {
            PointRecord::Format0(point) => point.base.return_number(),
            PointRecord::Format1(point) => point.base.return_number(),
            PointRecord::Format2(point) => point.base.return_number(),
            PointRecord::Format3(point) => point.base.return_number(),
            PointRecord::Format4(point) => point.base.return_number(),
            PointRecord::Format5(point) => point.base.return_number(),
            PointRecord::Format6(point) => point.base.return_number(),
            PointRecord::Format7(point) => point.base.return_number(),
            PointRecord::Format8(point) => point.base.return_number(),
            PointRecord::Format9(point) => point.base.return_number(),
            PointRecord::Format10(point) => point.base.return_number(),
        }
    }

    /// Returns this record's gps time, if its format carries one.
    pub fn gps_time(&self) -> Option<f64> {
        match self {
            PointRecord::Format0(_) | PointRecord::Format2(_) => None,
            PointRecord::Format1(point) => Some(point.gps_time),
            PointRecord::Format3(point) => Some(point.gps_time),
            PointRecord::Format4(point) => Some(point.gps_time),
            PointRecord::Format5(point) => Some(point.gps_time),
            PointRecord::Format6(point) => Some(point.base.gps_time),
            PointRecord::Format7(point) => Some(point.base.gps_time),
            PointRecord::Format8(point) => Some(point.base.gps_time),
            PointRecord::Format9(point) => Some(point.base.gps_time),
            PointRecord::Format10(point) => Some(point.base.gps_time),
        }
    }

    /// Returns this record's color, if its format carries one.
    pub fn color(&self) -> Option<Color> {
        match self {
            PointRecord::Format2(point) => Some(point.color),
            PointRecord::Format3(point) => Some(point.color),
            PointRecord::Format5(point) => Some(point.color),
            PointRecord::Format7(point) => Some(point.color),
            PointRecord::Format8(point) => Some(point.color),
            PointRecord::Format10(point) => Some(point.color),
            _ => None,
        }
    }

    /// Returns this record's near infrared value, if its format carries one.
    pub fn nir(&self) -> Option<u16> {
        match self {
            PointRecord::Format8(point) => Some(point.nir),
            PointRecord::Format10(point) => Some(point.nir),
            _ => None,
        }
    }

    /// Returns this record's waveform packet pointer, if its format carries one.
    pub fn waveform(&self) -> Option<Waveform> {
        match self {
            PointRecord::Format4(point) => Some(point.waveform),
            PointRecord::Format5(point) => Some(point.waveform),
            PointRecord::Format9(point) => Some(point.waveform),
            PointRecord::Format10(point) => Some(point.waveform),
            _ => None,
        }
    }
}

impl Default for PointRecord {
    fn default() -> PointRecord {
        PointRecord::Format0(Point0::default())
    }
}
