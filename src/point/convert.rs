//! Conversion between the eleven point formats.
//!
//! Every conversion is total: widening fills absent attribute groups with
//! zeros, narrowing drops them. Narrowing is documented information loss, not
//! an error. The legacy and extended base blocks map onto each other through
//! a single pair of projections so that chained conversions agree with direct
//! ones whenever the intermediate format retains every field the target
//! needs.

use crate::point::{
    ExtendedFields, Format, LegacyFields, OVERLAP_CLASSIFICATION_CODE, Point0, Point1, Point2,
    Point3, Point4, Point5, Point6, Point7, Point8, Point9, Point10, PointRecord,
};

const LEGACY_MAX_RETURN: u8 = 7;
const LEGACY_MAX_CLASSIFICATION: u8 = 31;

/// Converts a legacy scan angle rank (whole degrees) to an extended scan
/// angle (0.006 degree units).
///
/// Rounds half away from zero.
///
/// # Examples
///
/// ```
/// use las_codec::point::scan_angle_from_rank;
/// assert_eq!(0, scan_angle_from_rank(0));
/// assert_eq!(167, scan_angle_from_rank(1));
/// assert_eq!(15_000, scan_angle_from_rank(90));
/// assert_eq!(-15_000, scan_angle_from_rank(-90));
/// ```
pub fn scan_angle_from_rank(rank: i8) -> i16 {
    (f64::from(rank) * 30_000. / 180.).round() as i16
}

/// Converts an extended scan angle (0.006 degree units) to a legacy scan
/// angle rank (whole degrees).
///
/// Rounds half away from zero, then saturates to the i8 range.
///
/// # Examples
///
/// ```
/// use las_codec::point::rank_from_scan_angle;
/// assert_eq!(1, rank_from_scan_angle(167));
/// assert_eq!(90, rank_from_scan_angle(15_000));
/// assert_eq!(127, rank_from_scan_angle(i16::MAX));
/// ```
pub fn rank_from_scan_angle(scan_angle: i16) -> i8 {
    let rank = (f64::from(scan_angle) * 180. / 30_000.).round();
    rank.clamp(f64::from(i8::MIN), f64::from(i8::MAX)) as i8
}

fn widen(base: LegacyFields, gps_time: f64) -> ExtendedFields {
    ExtendedFields {
        x: base.x,
        y: base.y,
        z: base.z,
        intensity: base.intensity,
        returns: ExtendedFields::pack_returns(base.return_number(), base.number_of_returns()),
        flags: ExtendedFields::pack_flags(
            base.is_synthetic(),
            base.is_key_point(),
            base.is_withheld(),
            base.is_overlap(),
            0,
            base.scan_direction(),
            base.is_edge_of_flight_line(),
        ),
        classification: base.classification_code(),
        user_data: base.user_data,
        scan_angle: scan_angle_from_rank(base.scan_angle_rank),
        point_source_id: base.point_source_id,
        gps_time,
    }
}

fn narrow(base: ExtendedFields) -> LegacyFields {
    let classification = if base.is_overlap() {
        OVERLAP_CLASSIFICATION_CODE
    } else {
        base.classification.min(LEGACY_MAX_CLASSIFICATION)
    };
    LegacyFields {
        x: base.x,
        y: base.y,
        z: base.z,
        intensity: base.intensity,
        returns: LegacyFields::pack_returns(
            base.return_number().min(LEGACY_MAX_RETURN),
            base.number_of_returns().min(LEGACY_MAX_RETURN),
            base.scan_direction(),
            base.is_edge_of_flight_line(),
        ),
        classification: LegacyFields::pack_classification(
            classification,
            base.is_synthetic(),
            base.is_key_point(),
            base.is_withheld(),
        ),
        scan_angle_rank: rank_from_scan_angle(base.scan_angle),
        user_data: base.user_data,
        point_source_id: base.point_source_id,
    }
}

impl PointRecord {
    fn legacy_base(&self) -> LegacyFields {
        match self {
            PointRecord::Format0(point) => point.base,
            PointRecord::Format1(point) => point.base,
            PointRecord::Format2(point) => point.base,
            PointRecord::Format3(point) => point.base,
            PointRecord::Format4(point) => point.base,
            PointRecord::Format5(point) => point.base,
            PointRecord::Format6(point) => narrow(point.base),
            PointRecord::Format7(point) => narrow(point.base),
            PointRecord::Format8(point) => narrow(point.base),
            PointRecord::Format9(point) => narrow(point.base),
            PointRecord::Format10(point) => narrow(point.base),
        }
    }

    fn extended_base(&self) -> ExtendedFields {
        let gps_time = self.gps_time().unwrap_or_default();
        match self {
            PointRecord::Format0(point) => widen(point.base, gps_time),
            PointRecord::Format1(point) => widen(point.base, gps_time),
            PointRecord::Format2(point) => widen(point.base, gps_time),
            PointRecord::Format3(point) => widen(point.base, gps_time),
            PointRecord::Format4(point) => widen(point.base, gps_time),
            PointRecord::Format5(point) => widen(point.base, gps_time),
            PointRecord::Format6(point) => point.base,
            PointRecord::Format7(point) => point.base,
            PointRecord::Format8(point) => point.base,
            PointRecord::Format9(point) => point.base,
            PointRecord::Format10(point) => point.base,
        }
    }

    /// Converts this record into the target format.
    ///
    /// Attribute groups the target carries but this record lacks are zeroed,
    /// and groups the target lacks are dropped. Narrowing an extended record
    /// to a legacy format saturates return counts to 7 and class codes to 31,
    /// and maps the overlap flag onto class code 12.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_codec::point::{Format, Point1, PointRecord};
    /// let record = PointRecord::Format1(Point1 { gps_time: 42., ..Default::default() });
    /// let converted = record.convert(Format::new(6).unwrap());
    /// assert_eq!(Some(42.), converted.gps_time());
    /// assert_eq!(None, record.convert(Format::new(0).unwrap()).gps_time());
    /// ```
    pub fn convert(&self, target: Format) -> PointRecord {
        let gps_time = self.gps_time().unwrap_or_default();
        let color = self.color().unwrap_or_default();
        let nir = self.nir().unwrap_or_default();
        let waveform = self.waveform().unwrap_or_default();
        match target.n() {
            0 => PointRecord::Format0(Point0 {
                base: self.legacy_base(),
            }),
            1 => PointRecord::Format1(Point1 {
                base: self.legacy_base(),
                gps_time,
            }),
            2 => PointRecord::Format2(Point2 {
                base: self.legacy_base(),
                color,
            }),
            3 => PointRecord::Format3(Point3 {
                base: self.legacy_base(),
                gps_time,
                color,
            }),
            4 => PointRecord::Format4(Point4 {
                base: self.legacy_base(),
                gps_time,
                waveform,
            }),
            5 => PointRecord::Format5(Point5 {
                base: self.legacy_base(),
                gps_time,
                color,
                waveform,
            }),
            6 => PointRecord::Format6(Point6 {
                base: self.extended_base(),
            }),
            7 => PointRecord::Format7(Point7 {
                base: self.extended_base(),
                color,
            }),
            8 => PointRecord::Format8(Point8 {
                base: self.extended_base(),
                color,
                nir,
            }),
            9 => PointRecord::Format9(Point9 {
                base: self.extended_base(),
                waveform,
            }),
            _ => PointRecord::Format10(Point10 {
                base: self.extended_base(),
                color,
                nir,
                waveform,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::ScanDirection;

    fn legacy_record() -> PointRecord {
        PointRecord::Format3(Point3 {
            base: LegacyFields {
                x: 1,
                y: 2,
                z: 3,
                intensity: 4,
                returns: LegacyFields::pack_returns(2, 3, ScanDirection::LeftToRight, true),
                classification: LegacyFields::pack_classification(5, true, false, true),
                scan_angle_rank: -30,
                user_data: 6,
                point_source_id: 7,
            },
            gps_time: 42.,
            color: crate::Color::new(1, 2, 3),
        })
    }

    #[test]
    fn widening_is_loss_free() {
        let record = legacy_record();
        let extended = record.convert(Format::new(7).unwrap());
        let base = match extended {
            PointRecord::Format7(point) => point.base,
            _ => unreachable!(),
        };
        assert_eq!(2, base.return_number());
        assert_eq!(3, base.number_of_returns());
        assert_eq!(5, base.classification);
        assert!(base.is_synthetic());
        assert!(!base.is_key_point());
        assert!(base.is_withheld());
        assert!(!base.is_overlap());
        assert_eq!(ScanDirection::LeftToRight, base.scan_direction());
        assert!(base.is_edge_of_flight_line());
        assert_eq!(-5_000, base.scan_angle);
        assert_eq!(42., base.gps_time);
        assert_eq!(Some(crate::Color::new(1, 2, 3)), extended.color());
    }

    #[test]
    fn widening_then_narrowing_restores_the_original() {
        let record = legacy_record();
        let roundtrip = record
            .convert(Format::new(8).unwrap())
            .convert(Format::new(3).unwrap());
        assert_eq!(record, roundtrip);
    }

    #[test]
    fn narrowing_saturates() {
        let record = PointRecord::Format6(Point6 {
            base: ExtendedFields {
                returns: ExtendedFields::pack_returns(11, 15),
                classification: 200,
                scan_angle: 30_000,
                ..Default::default()
            },
        });
        let base = match record.convert(Format::new(0).unwrap()) {
            PointRecord::Format0(point) => point.base,
            _ => unreachable!(),
        };
        assert_eq!(7, base.return_number());
        assert_eq!(7, base.number_of_returns());
        assert_eq!(31, base.classification_code());
        assert_eq!(127, base.scan_angle_rank);
    }

    #[test]
    fn narrowing_an_in_range_scan_angle_is_exact() {
        let record = PointRecord::Format6(Point6 {
            base: ExtendedFields {
                scan_angle: 15_000,
                ..Default::default()
            },
        });
        let base = match record.convert(Format::new(0).unwrap()) {
            PointRecord::Format0(point) => point.base,
            _ => unreachable!(),
        };
        assert_eq!(90, base.scan_angle_rank);
    }

    #[test]
    fn overlap_maps_onto_class_twelve_and_back() {
        let record = PointRecord::Format6(Point6 {
            base: ExtendedFields {
                flags: ExtendedFields::pack_flags(
                    false,
                    false,
                    false,
                    true,
                    0,
                    ScanDirection::RightToLeft,
                    false,
                ),
                classification: 2,
                ..Default::default()
            },
        });
        let legacy = match record.convert(Format::new(0).unwrap()) {
            PointRecord::Format0(point) => point.base,
            _ => unreachable!(),
        };
        assert_eq!(OVERLAP_CLASSIFICATION_CODE, legacy.classification_code());
        assert!(legacy.is_overlap());

        let back = PointRecord::Format0(Point0 { base: legacy }).convert(Format::new(6).unwrap());
        let extended = match back {
            PointRecord::Format6(point) => point.base,
            _ => unreachable!(),
        };
        assert!(extended.is_overlap());
        assert_eq!(OVERLAP_CLASSIFICATION_CODE, extended.classification);
    }

    #[test]
    fn narrowing_zeroes_nothing_it_keeps() {
        let record = PointRecord::Format8(Point8 {
            base: ExtendedFields {
                gps_time: 7.,
                ..Default::default()
            },
            color: crate::Color::new(9, 9, 9),
            nir: 11,
        });
        let narrowed = record.convert(Format::new(2).unwrap());
        assert_eq!(None, narrowed.gps_time());
        assert_eq!(Some(crate::Color::new(9, 9, 9)), narrowed.color());
        assert_eq!(None, narrowed.nir());
    }

    #[test]
    fn scan_angle_quantum_multiples_are_exact() {
        for rank in i8::MIN..=i8::MAX {
            assert_eq!(rank, rank_from_scan_angle(scan_angle_from_rank(rank)));
        }
    }
}
