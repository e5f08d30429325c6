//! Extra bytes descriptors.
//!
//! An ExtraBytes record describes additional per-point attributes appended to
//! each point record. Each 192-byte item names one attribute, gives its data
//! type, and optionally carries no-data, min, max, scale, and offset values.
//! The meaning of the 8-byte value slots depends on the item's data type, so
//! values are a tagged union, not a single concrete type.

use crate::utils::{AsLasStr, FromLasStr};
use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use num_traits::ToPrimitive;
use std::io::{Cursor, Read, Write};

const ITEM_LENGTH: usize = 192;
const NAME_LENGTH: usize = 32;
const DESCRIPTION_LENGTH: usize = 32;

const NO_DATA_BIT: u8 = 0b0000_0001;
const MIN_BIT: u8 = 0b0000_0010;
const MAX_BIT: u8 = 0b0000_0100;
const SCALE_BIT: u8 = 0b0000_1000;
const OFFSET_BIT: u8 = 0b0001_0000;

/// The data type of one extra bytes attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataType {
    /// The item declares its own byte width in its options byte.
    #[default]
    Undocumented,
    /// u8
    U8,
    /// i8
    I8,
    /// u16
    U16,
    /// i16
    I16,
    /// u32
    U32,
    /// i32
    I32,
    /// u64
    U64,
    /// i64
    I64,
    /// f32
    F32,
    /// f64
    F64,
}

impl DataType {
    /// Creates a data type from its discriminant.
    ///
    /// Discriminants above 10 (the deprecated array types among them) are
    /// rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::DataType;
    /// assert_eq!(DataType::F64, DataType::new(10).unwrap());
    /// assert!(DataType::new(11).is_err());
    /// ```
    pub fn new(n: u8) -> Result<DataType> {
        match n {
            0 => Ok(DataType::Undocumented),
            1 => Ok(DataType::U8),
            2 => Ok(DataType::I8),
            3 => Ok(DataType::U16),
            4 => Ok(DataType::I16),
            5 => Ok(DataType::U32),
            6 => Ok(DataType::I32),
            7 => Ok(DataType::U64),
            8 => Ok(DataType::I64),
            9 => Ok(DataType::F32),
            10 => Ok(DataType::F64),
            _ => Err(Error::InvalidDataType(n)),
        }
    }

    fn n(&self) -> u8 {
        match self {
            DataType::Undocumented => 0,
            DataType::U8 => 1,
            DataType::I8 => 2,
            DataType::U16 => 3,
            DataType::I16 => 4,
            DataType::U32 => 5,
            DataType::I32 => 6,
            DataType::U64 => 7,
            DataType::I64 => 8,
            DataType::F32 => 9,
            DataType::F64 => 10,
        }
    }

    /// Returns the width in bytes of one value of this type.
    ///
    /// Undocumented items have no intrinsic width; they declare it in their
    /// options byte, so this returns `None`.
    pub fn width(&self) -> Option<usize> {
        match self {
            DataType::Undocumented => None,
            DataType::U8 | DataType::I8 => Some(1),
            DataType::U16 | DataType::I16 => Some(2),
            DataType::U32 | DataType::I32 | DataType::F32 => Some(4),
            DataType::U64 | DataType::I64 | DataType::F64 => Some(8),
        }
    }
}

/// A no-data, min, or max value, interpreted through the item's data type.
///
/// Integer values are upcast into the 8-byte slot; undocumented items keep
/// their raw slot bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// An unsigned value.
    Unsigned(u64),
    /// A signed value.
    Signed(i64),
    /// A floating point value.
    Float(f64),
    /// The uninterpreted slot bytes of an undocumented item.
    Raw([u8; 8]),
}

impl Value {
    /// Converts this value to an f64, if it is numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::Value;
    /// assert_eq!(Some(42.), Value::Signed(42).to_f64());
    /// assert_eq!(None, Value::Raw([0; 8]).to_f64());
    /// ```
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Unsigned(n) => n.to_f64(),
            Value::Signed(n) => n.to_f64(),
            Value::Float(n) => Some(*n),
            Value::Raw(_) => None,
        }
    }

    fn read_from<R: Read>(mut read: R, data_type: DataType) -> Result<Value> {
        match data_type {
            DataType::Undocumented => {
                let mut raw = [0; 8];
                read.read_exact(&mut raw)?;
                Ok(Value::Raw(raw))
            }
            DataType::U8 | DataType::U16 | DataType::U32 | DataType::U64 => {
                Ok(Value::Unsigned(read.read_u64::<LittleEndian>()?))
            }
            DataType::I8 | DataType::I16 | DataType::I32 | DataType::I64 => {
                Ok(Value::Signed(read.read_i64::<LittleEndian>()?))
            }
            DataType::F32 | DataType::F64 => Ok(Value::Float(read.read_f64::<LittleEndian>()?)),
        }
    }

    fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        match self {
            Value::Unsigned(n) => write.write_u64::<LittleEndian>(*n)?,
            Value::Signed(n) => write.write_i64::<LittleEndian>(*n)?,
            Value::Float(n) => write.write_f64::<LittleEndian>(*n)?,
            Value::Raw(raw) => write.write_all(raw)?,
        }
        Ok(())
    }
}

impl Default for Value {
    fn default() -> Value {
        Value::Raw([0; 8])
    }
}

/// The options byte of one extra bytes item.
///
/// For typed items, five bits signal which of the optional values are
/// meaningful. For undocumented items, the byte holds the attribute's width
/// in bytes instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options(pub u8);

impl Options {
    /// Is the no-data value meaningful?
    pub fn has_no_data(&self) -> bool {
        self.0 & NO_DATA_BIT != 0
    }

    /// Is the min value meaningful?
    pub fn has_min(&self) -> bool {
        self.0 & MIN_BIT != 0
    }

    /// Is the max value meaningful?
    pub fn has_max(&self) -> bool {
        self.0 & MAX_BIT != 0
    }

    /// Is the scale meaningful?
    pub fn has_scale(&self) -> bool {
        self.0 & SCALE_BIT != 0
    }

    /// Is the offset meaningful?
    pub fn has_offset(&self) -> bool {
        self.0 & OFFSET_BIT != 0
    }
}

/// One 192-byte extra bytes item descriptor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraBytesItem {
    /// The attribute's data type.
    pub data_type: DataType,
    /// The options byte.
    pub options: Options,
    /// The attribute's name, at most 32 characters.
    pub name: String,
    /// The no-data marker.
    pub no_data: Value,
    /// The smallest meaningful value.
    pub min: Value,
    /// The largest meaningful value.
    pub max: Value,
    /// Multiplied into raw values when the scale option is set.
    pub scale: f64,
    /// Added to scaled values when the offset option is set.
    pub offset: f64,
    /// A description of the attribute, at most 32 characters.
    pub description: String,
}

impl ExtraBytesItem {
    /// Returns the width in bytes of this attribute in each point record.
    ///
    /// Undocumented items declare their width in the options byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::{DataType, ExtraBytesItem, Options};
    /// let item = ExtraBytesItem { data_type: DataType::U32, ..Default::default() };
    /// assert_eq!(4, item.byte_width());
    /// let item = ExtraBytesItem { options: Options(3), ..Default::default() };
    /// assert_eq!(3, item.byte_width());
    /// ```
    pub fn byte_width(&self) -> usize {
        self.data_type
            .width()
            .unwrap_or_else(|| usize::from(self.options.0))
    }

    fn read_from<R: Read>(mut read: R) -> Result<ExtraBytesItem> {
        let mut reserved = [0; 2];
        read.read_exact(&mut reserved)?;
        let data_type = DataType::new(read.read_u8()?)?;
        let options = Options(read.read_u8()?);
        let mut name = [0; NAME_LENGTH];
        read.read_exact(&mut name)?;
        let mut unused = [0; 4];
        read.read_exact(&mut unused)?;
        let mut deprecated = [0; 16];
        let no_data = Value::read_from(&mut read, data_type)?;
        read.read_exact(&mut deprecated)?;
        let min = Value::read_from(&mut read, data_type)?;
        read.read_exact(&mut deprecated)?;
        let max = Value::read_from(&mut read, data_type)?;
        read.read_exact(&mut deprecated)?;
        let scale = read.read_f64::<LittleEndian>()?;
        read.read_exact(&mut deprecated)?;
        let offset = read.read_f64::<LittleEndian>()?;
        read.read_exact(&mut deprecated)?;
        let mut description = [0; DESCRIPTION_LENGTH];
        read.read_exact(&mut description)?;
        Ok(ExtraBytesItem {
            data_type,
            options,
            name: name.as_ref().as_las_str()?.to_string(),
            no_data,
            min,
            max,
            scale,
            offset,
            description: description.as_ref().as_las_str()?.to_string(),
        })
    }

    fn write_to<W: Write>(&self, mut write: W) -> Result<()> {
        let deprecated = [0; 16];
        write.write_all(&[0; 2])?;
        write.write_u8(self.data_type.n())?;
        write.write_u8(self.options.0)?;
        let mut name = [0; NAME_LENGTH];
        name.as_mut().from_las_str(&self.name)?;
        write.write_all(&name)?;
        write.write_all(&[0; 4])?;
        self.no_data.write_to(&mut write)?;
        write.write_all(&deprecated)?;
        self.min.write_to(&mut write)?;
        write.write_all(&deprecated)?;
        self.max.write_to(&mut write)?;
        write.write_all(&deprecated)?;
        write.write_f64::<LittleEndian>(self.scale)?;
        write.write_all(&deprecated)?;
        write.write_f64::<LittleEndian>(self.offset)?;
        write.write_all(&deprecated)?;
        let mut description = [0; DESCRIPTION_LENGTH];
        description.as_mut().from_las_str(&self.description)?;
        write.write_all(&description)?;
        Ok(())
    }
}

/// The payload of an ExtraBytes record: a sequence of item descriptors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraBytes {
    /// The item descriptors, in the order their attributes appear in each
    /// point record.
    pub items: Vec<ExtraBytesItem>,
}

impl ExtraBytes {
    /// Parses extra bytes descriptors from a VLR payload.
    ///
    /// The payload must be a whole number of 192-byte items.
    pub fn from_bytes(bytes: &[u8]) -> Result<ExtraBytes> {
        if bytes.len() % ITEM_LENGTH != 0 {
            return Err(Error::InvalidRecordLength {
                record: "ExtraBytes",
                expected: bytes.len() / ITEM_LENGTH * ITEM_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut cursor = Cursor::new(bytes);
        let mut items = Vec::with_capacity(bytes.len() / ITEM_LENGTH);
        for _ in 0..bytes.len() / ITEM_LENGTH {
            items.push(ExtraBytesItem::read_from(&mut cursor)?);
        }
        Ok(ExtraBytes { items })
    }

    /// Serializes these descriptors into a VLR payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.items.len() * ITEM_LENGTH);
        for item in &self.items {
            item.write_to(&mut bytes)?;
        }
        Ok(bytes)
    }

    /// Returns each item's byte offset in the point's extra bytes region.
    ///
    /// Offsets are cumulative, since undocumented items are not uniformly
    /// sized.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::vlr::{ExtraBytes, ExtraBytesItem, Options};
    /// let extra_bytes = ExtraBytes {
    ///     items: [4, 8, 2]
    ///         .iter()
    ///         .map(|&width| ExtraBytesItem {
    ///             options: Options(width),
    ///             ..Default::default()
    ///         })
    ///         .collect(),
    /// };
    /// assert_eq!(vec![0, 4, 12], extra_bytes.byte_offsets());
    /// ```
    pub fn byte_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.items.len());
        let mut offset = 0;
        for item in &self.items {
            offsets.push(offset);
            offset += item.byte_width();
        }
        offsets
    }

    /// Returns the total width of the extra bytes region in each point
    /// record.
    pub fn byte_width(&self) -> usize {
        self.items.iter().map(|item| item.byte_width()).sum()
    }
}
