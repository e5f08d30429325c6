use crate::{Error, Result};
use std::fmt;

/// A point record format, numbered 0 through 10.
///
/// The format number determines which optional attribute groups — gps time,
/// color, near infrared, waveform — are present in each record, whether the
/// record uses the legacy or the extended flag layout, and the exact record
/// size. Sizes and field offsets are constants of the format, never computed
/// from data.
///
/// ```
/// use las_codec::point::Format;
/// let format = Format::new(8).unwrap();
/// assert!(format.has_color());
/// assert!(format.has_nir());
/// assert!(format.is_extended());
/// assert_eq!(38, format.len());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Format(u8);

impl Format {
    /// Creates a new point format.
    ///
    /// Returns an error if the number is not in 0..=10.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert!(Format::new(0).is_ok());
    /// assert!(Format::new(11).is_err());
    /// ```
    pub fn new(n: u8) -> Result<Format> {
        if n <= 10 {
            Ok(Format(n))
        } else {
            Err(Error::InvalidPointFormat(n))
        }
    }

    /// Returns all eleven point formats, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert_eq!(11, Format::all().count());
    /// ```
    pub fn all() -> impl Iterator<Item = Format> {
        (0..=10).map(Format)
    }

    /// Returns this format's number.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert_eq!(3, Format::new(3).unwrap().n());
    /// ```
    pub fn n(&self) -> u8 {
        self.0
    }

    /// Does this format use the extended (three flag bytes, full
    /// classification byte, i16 scan angle) record layout?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert!(!Format::new(5).unwrap().is_extended());
    /// assert!(Format::new(6).unwrap().is_extended());
    /// ```
    pub fn is_extended(&self) -> bool {
        self.0 >= 6
    }

    /// Does this format carry gps time?
    ///
    /// All extended formats do.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert!(!Format::new(0).unwrap().has_gps_time());
    /// assert!(Format::new(1).unwrap().has_gps_time());
    /// ```
    pub fn has_gps_time(&self) -> bool {
        !matches!(self.0, 0 | 2)
    }

    /// Does this format carry RGB color?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert!(Format::new(2).unwrap().has_color());
    /// assert!(!Format::new(6).unwrap().has_color());
    /// ```
    pub fn has_color(&self) -> bool {
        matches!(self.0, 2 | 3 | 5 | 7 | 8 | 10)
    }

    /// Does this format carry a near infrared channel?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert!(Format::new(8).unwrap().has_nir());
    /// assert!(!Format::new(7).unwrap().has_nir());
    /// ```
    pub fn has_nir(&self) -> bool {
        matches!(self.0, 8 | 10)
    }

    /// Does this format carry a waveform packet pointer?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert!(Format::new(4).unwrap().has_waveform());
    /// assert!(!Format::new(6).unwrap().has_waveform());
    /// ```
    pub fn has_waveform(&self) -> bool {
        matches!(self.0, 4 | 5 | 9 | 10)
    }

    /// Returns the size in bytes of one record in this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::Format;
    /// assert_eq!(20, Format::new(0).unwrap().len());
    /// assert_eq!(34, Format::new(3).unwrap().len());
    /// assert_eq!(67, Format::new(10).unwrap().len());
    /// ```
    pub fn len(&self) -> u16 {
        let mut len = if self.is_extended() { 30 } else { 20 };
        if !self.is_extended() && self.has_gps_time() {
            len += 8;
        }
        if self.has_color() {
            len += 6;
        }
        if self.has_nir() {
            len += 2;
        }
        if self.has_waveform() {
            len += 29;
        }
        len
    }

    /// Returns false, since every format has a nonzero size.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<Format> for u8 {
    fn from(format: Format) -> u8 {
        format.0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point format {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lens() {
        let lens = [20, 28, 26, 34, 57, 63, 30, 36, 38, 59, 67];
        for (format, len) in Format::all().zip(lens) {
            assert_eq!(len, format.len(), "{}", format);
        }
    }

    #[test]
    fn capabilities() {
        let gps_time = [1, 3, 4, 5, 6, 7, 8, 9, 10];
        let color = [2, 3, 5, 7, 8, 10];
        let nir = [8, 10];
        let waveform = [4, 5, 9, 10];
        for format in Format::all() {
            assert_eq!(gps_time.contains(&format.n()), format.has_gps_time());
            assert_eq!(color.contains(&format.n()), format.has_color());
            assert_eq!(nir.contains(&format.n()), format.has_nir());
            assert_eq!(waveform.contains(&format.n()), format.has_waveform());
            assert_eq!(format.n() >= 6, format.is_extended());
        }
    }

    #[test]
    fn out_of_range() {
        assert!(Format::new(11).is_err());
        assert!(Format::new(255).is_err());
    }
}
