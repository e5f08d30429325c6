//! Utility traits for the padded ASCII strings in las headers and vlrs.

use crate::{Error, Result};

/// Interprets bytes as a las string.
///
/// Las strings are ASCII and zero-filled after the last character, but not all
/// las data in the wild follows those rules. This trait has a permissive
/// method, which does its best to produce some sort of `&str`, and a strict
/// one, which enforces the rules.
pub trait AsLasStr {
    /// Interprets the bytes as a `&str`, permissively.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::utils::AsLasStr;
    /// assert_eq!("LiDAR", [76, 105, 68, 65, 82, 0, 33].as_las_str().unwrap());
    /// ```
    fn as_las_str(&self) -> Result<&str>;

    /// Interprets the bytes as a `&str`, enforcing the las rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::utils::AsLasStr;
    /// assert!([76, 105, 68, 65, 82, 0, 33].as_las_str_strict().is_err());
    /// ```
    fn as_las_str_strict(&self) -> Result<&str>;
}

impl AsLasStr for [u8] {
    fn as_las_str(&self) -> Result<&str> {
        if let Some(position) = self.iter().position(|&byte| byte == 0) {
            std::str::from_utf8(&self[..position])
        } else {
            std::str::from_utf8(self)
        }
        .map_err(Error::from)
    }

    fn as_las_str_strict(&self) -> Result<&str> {
        let s = if let Some(position) = self.iter().position(|&byte| byte == 0) {
            if self[position..].iter().all(|&byte| byte == 0) {
                std::str::from_utf8(&self[..position])?
            } else {
                return Err(Error::NotZeroFilled(self.to_vec()));
            }
        } else {
            std::str::from_utf8(self)?
        };
        if s.is_ascii() {
            Ok(s)
        } else {
            Err(Error::NotAscii(s.to_string()))
        }
    }
}

/// Writes a string into a fixed-size byte slot, zero-filling the remainder.
pub trait FromLasStr {
    /// Modifies `self` to match the provided string.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::utils::FromLasStr;
    /// let mut bytes = [1; 5];
    /// bytes.from_las_str("Lidar").unwrap();
    /// assert_eq!(b"Lidar", &bytes);
    /// ```
    fn from_las_str(&mut self, s: &str) -> Result<()>;
}

impl FromLasStr for [u8] {
    fn from_las_str(&mut self, s: &str) -> Result<()> {
        if s.len() > self.len() {
            return Err(Error::StringTooLong {
                string: s.to_string(),
                len: self.len(),
            });
        }
        for (a, b) in self.iter_mut().zip(s.bytes().chain(std::iter::repeat(0))) {
            *a = b;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_las_str_empty() {
        let buf = [0; 0];
        assert_eq!("", buf.as_las_str().unwrap());
        assert_eq!("", buf.as_las_str_strict().unwrap());
    }

    #[test]
    fn as_las_str_not_filled() {
        let buf = [76, 0, 33];
        assert_eq!("L", buf.as_las_str().unwrap());
        assert!(buf.as_las_str_strict().is_err());
    }

    #[test]
    fn as_las_str_unicode() {
        let buf = [240, 159, 146, 150];
        assert_eq!("\u{1f496}", buf.as_las_str().unwrap());
        assert!(buf.as_las_str_strict().is_err());
    }

    #[test]
    fn from_las_str_fills_with_zeros() {
        let mut data = [1, 1];
        data.from_las_str("B").unwrap();
        assert_eq!([66, 0], data);
    }

    #[test]
    fn from_las_str_too_long() {
        let mut data = [0];
        assert!(data.from_las_str("Be").is_err());
    }
}
