//! Gps time epoch and offset arithmetic.
//!
//! Las point records store time in one of two encodings, selected by the
//! header's global encoding bit: gps week time (seconds since the start of
//! the gps week in which the data were collected) or adjusted standard gps
//! time (satellite gps time minus 1e9, which moves the value near zero to
//! preserve floating point resolution). Las 1.5 additionally carries a
//! file-wide time offset in the header.
//!
//! Conversions to calendar datetimes ignore leap seconds, as the las
//! specification does.

use chrono::{DateTime, Utc};
use std::fmt;

/// The amount subtracted from satellite gps time to produce adjusted
/// standard gps time.
pub const ADJUSTED_STANDARD_TIME_OFFSET: f64 = 1_000_000_000.0;

/// The number of seconds in a gps week.
pub const SECONDS_PER_WEEK: f64 = 604_800.0;

/// The gps epoch, 1980-01-06T00:00:00Z, as a unix timestamp.
pub const GPS_EPOCH_UNIX_SECONDS: i64 = 315_964_800;

/// The meaning of gps time in the point records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GpsTimeType {
    /// Gps week time, the same as las 1.0 and 1.1.
    #[default]
    Week,
    /// Standard (satellite) gps time minus 1e9.
    Standard,
}

impl GpsTimeType {
    /// Returns true if this time type is gps standard time.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::GpsTimeType;
    /// assert!(!GpsTimeType::Week.is_standard());
    /// assert!(GpsTimeType::Standard.is_standard());
    /// ```
    pub fn is_standard(&self) -> bool {
        matches!(self, GpsTimeType::Standard)
    }
}

impl fmt::Display for GpsTimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsTimeType::Week => write!(f, "gps week time"),
            GpsTimeType::Standard => write!(f, "adjusted standard gps time"),
        }
    }
}

/// Converts adjusted standard gps time to satellite gps time.
///
/// # Examples
///
/// ```
/// use las_codec::gps_time;
/// assert_eq!(1_000_000_042., gps_time::satellite_from_adjusted(42.));
/// ```
pub fn satellite_from_adjusted(adjusted: f64) -> f64 {
    adjusted + ADJUSTED_STANDARD_TIME_OFFSET
}

/// Converts satellite gps time to adjusted standard gps time.
///
/// # Examples
///
/// ```
/// use las_codec::gps_time;
/// assert_eq!(42., gps_time::adjusted_from_satellite(1_000_000_042.));
/// ```
pub fn adjusted_from_satellite(satellite: f64) -> f64 {
    satellite - ADJUSTED_STANDARD_TIME_OFFSET
}

/// Splits satellite gps time into a week number and seconds-of-week.
///
/// # Examples
///
/// ```
/// use las_codec::gps_time;
/// let (week, seconds) = gps_time::week_and_seconds(604_800. * 2. + 42.);
/// assert_eq!(2, week);
/// assert_eq!(42., seconds);
/// ```
pub fn week_and_seconds(satellite: f64) -> (u32, f64) {
    let week = (satellite / SECONDS_PER_WEEK).floor();
    (week as u32, satellite - week * SECONDS_PER_WEEK)
}

/// Rebuilds satellite gps time from a week number and seconds-of-week.
///
/// # Examples
///
/// ```
/// use las_codec::gps_time;
/// assert_eq!(604_842., gps_time::satellite_from_week(1, 42.));
/// ```
pub fn satellite_from_week(week: u32, seconds: f64) -> f64 {
    f64::from(week) * SECONDS_PER_WEEK + seconds
}

/// Converts satellite gps time to a calendar datetime, ignoring leap seconds.
///
/// Returns `None` if the time is out of chrono's representable range.
///
/// # Examples
///
/// ```
/// use las_codec::gps_time;
/// let datetime = gps_time::datetime_from_satellite(0.).unwrap();
/// assert_eq!("1980-01-06 00:00:00 UTC", datetime.to_string());
/// ```
pub fn datetime_from_satellite(satellite: f64) -> Option<DateTime<Utc>> {
    if !satellite.is_finite() {
        return None;
    }
    let seconds = satellite.floor();
    let nanoseconds = ((satellite - seconds) * 1e9).round() as u32;
    DateTime::from_timestamp(GPS_EPOCH_UNIX_SECONDS + seconds as i64, nanoseconds)
}

/// Converts a calendar datetime to satellite gps time, ignoring leap seconds.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use las_codec::gps_time;
/// let datetime = DateTime::from_timestamp(315_964_800, 0).unwrap();
/// assert_eq!(0., gps_time::satellite_from_datetime(datetime));
/// ```
pub fn satellite_from_datetime(datetime: DateTime<Utc>) -> f64 {
    let unix = datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) / 1e9;
    unix - GPS_EPOCH_UNIX_SECONDS as f64
}
