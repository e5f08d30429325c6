//! Programmatically determine whether a las version supports a feature.
//!
//! Features are structures that implement the [Feature] trait. The most common
//! way to use features is via [Version::supports] or
//! [Version::verify_support_for]:
//!
//! ```
//! use las_codec::feature::Waveforms;
//! use las_codec::Version;
//!
//! let las_1_2 = Version::new(1, 2);
//! assert!(!las_1_2.supports::<Waveforms>());
//! assert!(las_1_2.verify_support_for::<Waveforms>().is_err());
//!
//! let las_1_4 = Version::new(1, 4);
//! assert!(las_1_4.supports::<Waveforms>());
//! assert!(las_1_4.verify_support_for::<Waveforms>().is_ok());
//! ```

use crate::Version;

const MAJOR: u8 = 1;

/// A trait implemented by each feature.
pub trait Feature {
    /// Is this feature supported by this version?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::feature::{Feature, Waveforms};
    /// use las_codec::Version;
    /// assert!(!Waveforms::is_supported_by(Version::new(1, 2)));
    /// assert!(Waveforms::is_supported_by(Version::new(1, 4)));
    /// ```
    fn is_supported_by(version: Version) -> bool;

    /// Returns the name of this feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::feature::{Feature, Waveforms};
    /// assert_eq!("Waveforms", Waveforms::name());
    /// ```
    fn name() -> &'static str;
}

macro_rules! features {
    (   $(
            $(#[$meta:meta])*
            $name:ident ($($versions:expr),+);
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $name {}

            impl Feature for $name {
                fn is_supported_by(version: Version) -> bool {
                    [$($versions),+]
                        .into_iter()
                        .map(|minor| Version::new(MAJOR, minor))
                        .any(|v| version == v)
                }

                fn name() -> &'static str {
                    stringify!($name)
                }
            }
        )+
    }
}

features! {
    /// Does the header allow a file source id, or is that field reserved?
    FileSourceId(1, 2, 3, 4, 5);
    /// Is there a bit flag to set the type of time value in each point?
    GpsStandardTime(2, 3, 4, 5);
    /// Does this file support waveforms?
    Waveforms(3, 4, 5);
    /// Is there a bit flag to indicate synthetic return numbers?
    SyntheticReturnNumbers(3, 4, 5);
    /// Does this file support 64-bit point counts?
    LargeFiles(4, 5);
    /// Does this file support extended variable length records?
    Evlrs(4, 5);
    /// Can the coordinate reference system be carried as Well-Known Text?
    Wkt(4, 5);
    /// Does the header carry a file-wide gps time offset?
    GpsTimeOffset(5);
    /// Are GeoTIFF coordinate system vlrs still allowed?
    GeoTiffCrs(0, 1, 2, 3, 4);
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! feature {
        ($name:ident, $feature:ident, $($minor:expr),+) => {
            #[test]
            fn $name() {
                let supported = [$($minor),+];
                for minor in 0..6 {
                    let version = Version::new(1, minor);
                    assert_eq!(
                        supported.contains(&minor),
                        version.supports::<$feature>(),
                        "{}",
                        version,
                    );
                }
            }
        };
    }

    feature!(file_source_id, FileSourceId, 1, 2, 3, 4, 5);
    feature!(gps_standard_time, GpsStandardTime, 2, 3, 4, 5);
    feature!(waveforms, Waveforms, 3, 4, 5);
    feature!(large_files, LargeFiles, 4, 5);
    feature!(evlrs, Evlrs, 4, 5);
    feature!(wkt, Wkt, 4, 5);
    feature!(gps_time_offset, GpsTimeOffset, 5);
    feature!(geotiff_crs, GeoTiffCrs, 0, 1, 2, 3, 4);
}
