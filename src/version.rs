use crate::Result;
use crate::feature::Feature;
use std::fmt;

/// The las version of a file.
///
/// All released versions share the major number 1. Minor revisions 0 through
/// 5 are supported by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    pub major: u8,
    /// The minor version.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// let version = Version::new(1, 4);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Checks whether this version supports the feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{Version, feature::Waveforms};
    /// assert!(!Version::new(1, 2).supports::<Waveforms>());
    /// assert!(Version::new(1, 4).supports::<Waveforms>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        F::is_supported_by(*self)
    }

    /// Checks whether this version supports the feature, returning an error if not.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::{Version, feature::Waveforms};
    /// assert!(Version::new(1, 2).verify_support_for::<Waveforms>().is_err());
    /// assert!(Version::new(1, 4).verify_support_for::<Waveforms>().is_ok());
    /// ```
    pub fn verify_support_for<F: Feature>(&self) -> Result<()> {
        if self.supports::<F>() {
            Ok(())
        } else {
            Err(crate::Error::UnsupportedFeature {
                version: *self,
                feature: F::name(),
            })
        }
    }

    /// Returns this version's header size.
    ///
    /// This is the size of the header block as first published for the
    /// version. Readers must not rely on it for parsing — the on-disk
    /// `header_size` field is authoritative — but writers use it to lay out
    /// new files.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// assert_eq!(227, Version::new(1, 2).header_size());
    /// assert_eq!(375, Version::new(1, 4).header_size());
    /// ```
    pub fn header_size(&self) -> u16 {
        match self.minor {
            0..=2 => 227,
            3 => 235,
            4 => 375,
            _ => 383,
        }
    }

    /// Returns the largest point format number this version allows.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// assert_eq!(3, Version::new(1, 2).max_point_format());
    /// assert_eq!(10, Version::new(1, 4).max_point_format());
    /// ```
    pub fn max_point_format(&self) -> u8 {
        match self.minor {
            0 | 1 => 1,
            2 => 3,
            3 => 5,
            _ => 10,
        }
    }

    /// Returns true if this version is one this crate supports.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::Version;
    /// assert!(Version::new(1, 4).is_supported());
    /// assert!(!Version::new(2, 0).is_supported());
    /// ```
    pub fn is_supported(&self) -> bool {
        self.major == 1 && self.minor <= 5
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 2)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version::new(major, minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "las {}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Version::new(1, 2) < Version::new(1, 4));
        assert!(Version::new(1, 4) < Version::new(2, 0));
    }

    #[test]
    fn header_sizes() {
        assert_eq!(227, Version::new(1, 0).header_size());
        assert_eq!(227, Version::new(1, 2).header_size());
        assert_eq!(235, Version::new(1, 3).header_size());
        assert_eq!(375, Version::new(1, 4).header_size());
        assert_eq!(383, Version::new(1, 5).header_size());
    }

    #[test]
    fn max_point_formats() {
        assert_eq!(1, Version::new(1, 0).max_point_format());
        assert_eq!(1, Version::new(1, 1).max_point_format());
        assert_eq!(3, Version::new(1, 2).max_point_format());
        assert_eq!(5, Version::new(1, 3).max_point_format());
        assert_eq!(10, Version::new(1, 4).max_point_format());
        assert_eq!(10, Version::new(1, 5).max_point_format());
    }
}
