//! The full point format conversion matrix.

use las_codec::Color;
use las_codec::point::{ExtendedFields, Format, Point10, PointRecord, ScanDirection, Waveform};

fn formats() -> impl Iterator<Item = Format> {
    (0..=10).map(|n| Format::new(n).unwrap())
}

/// A record with every attribute group populated, converted into the source
/// format.
fn sample(format: Format) -> PointRecord {
    let record = PointRecord::Format10(Point10 {
        base: ExtendedFields {
            x: -17,
            y: 2_000,
            z: 3,
            intensity: 800,
            returns: ExtendedFields::pack_returns(3, 5),
            flags: ExtendedFields::pack_flags(
                true,
                false,
                true,
                false,
                0,
                ScanDirection::LeftToRight,
                true,
            ),
            classification: 9,
            user_data: 13,
            scan_angle: -2_500,
            point_source_id: 77,
            gps_time: 987.25,
        },
        color: Color::new(1, 2, 3),
        nir: 4,
        waveform: Waveform {
            wave_packet_descriptor_index: 2,
            byte_offset_to_waveform_data: 1_024,
            waveform_packet_size_in_bytes: 512,
            return_point_waveform_location: 0.5,
            x_t: 1.,
            y_t: 2.,
            z_t: 3.,
        },
    });
    record.convert(format)
}

#[test]
fn every_pair_produces_the_target_format() {
    for source in formats() {
        let record = sample(source);
        for target in formats() {
            assert_eq!(target, record.convert(target).format());
        }
    }
}

#[test]
fn conversion_is_total_and_never_panics_on_defaults() {
    for source in formats() {
        let record = PointRecord::default().convert(source);
        for target in formats() {
            let converted = record.convert(target);
            assert_eq!(target.has_gps_time(), converted.gps_time().is_some());
            assert_eq!(target.has_color(), converted.color().is_some());
            assert_eq!(target.has_nir(), converted.nir().is_some());
            assert_eq!(target.has_waveform(), converted.waveform().is_some());
        }
    }
}

#[test]
fn shared_attribute_groups_survive() {
    for source in formats() {
        let record = sample(source);
        for target in formats() {
            let converted = record.convert(target);
            if source.has_gps_time() && target.has_gps_time() {
                assert_eq!(record.gps_time(), converted.gps_time());
            }
            if source.has_color() && target.has_color() {
                assert_eq!(record.color(), converted.color());
            }
            if source.has_nir() && target.has_nir() {
                assert_eq!(record.nir(), converted.nir());
            }
            if source.has_waveform() && target.has_waveform() {
                assert_eq!(record.waveform(), converted.waveform());
            }
        }
    }
}

#[test]
fn absent_groups_fill_with_zeros() {
    let record = sample(Format::new(0).unwrap());
    let widened = record.convert(Format::new(10).unwrap());
    assert_eq!(Some(0.), widened.gps_time());
    assert_eq!(Some(Color::default()), widened.color());
    assert_eq!(Some(0), widened.nir());
    assert_eq!(Some(Waveform::default()), widened.waveform());
}

#[test]
fn chaining_through_the_widest_format_agrees_with_direct_conversion() {
    let widest = Format::new(10).unwrap();
    for source in formats() {
        let record = sample(source);
        for target in formats() {
            assert_eq!(
                record.convert(target),
                record.convert(widest).convert(target),
                "source {source}, target {target}"
            );
        }
    }
}

#[test]
fn conversion_to_the_same_format_is_identity() {
    for format in formats() {
        let record = sample(format);
        assert_eq!(record, record.convert(format));
    }
}
