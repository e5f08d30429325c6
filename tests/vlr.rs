//! Typed variable length records through a full write-read cycle.

use las_codec::vlr::{
    ClassificationLookup, DataType, ExtraBytes, ExtraBytesItem, GeoKeyDirectory, GeoKeyEntry,
    Options, Record, Value, Vlr, record_id,
};
use las_codec::{Builder, Reader, Writer};
use std::io::Cursor;

fn roundtrip(builder: Builder) -> Vec<Vlr> {
    let header = builder.into_header().unwrap();
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut cursor, header).unwrap();
    writer.close().unwrap();
    drop(writer);
    cursor.set_position(0);
    let reader = Reader::new(cursor).unwrap();
    reader.header().all_vlrs().to_vec()
}

fn projection_vlr(record_id: u16, record: Record) -> Vlr {
    Vlr {
        user_id: las_codec::vlr::LASF_PROJECTION.to_string(),
        record_id,
        record,
        ..Default::default()
    }
}

fn spec_vlr(record_id: u16, record: Record) -> Vlr {
    Vlr {
        user_id: las_codec::vlr::LASF_SPEC.to_string(),
        record_id,
        record,
        ..Default::default()
    }
}

#[test]
fn geotiff_crs_records() {
    let directory = GeoKeyDirectory {
        keys: vec![
            GeoKeyEntry {
                key_id: 1024,
                tiff_tag_location: 0,
                count: 1,
                value_offset: 1,
            },
            GeoKeyEntry {
                key_id: 2049,
                tiff_tag_location: 34737,
                count: 6,
                value_offset: 0,
            },
        ],
        ..Default::default()
    };
    let mut builder = Builder::default();
    builder.vlrs.push(projection_vlr(
        record_id::GEO_KEY_DIRECTORY,
        Record::GeoKeyDirectory(directory.clone()),
    ));
    builder.vlrs.push(projection_vlr(
        record_id::GEO_DOUBLE_PARAMS,
        Record::GeoDoubleParams(vec![0.5, -0.5]),
    ));
    builder.vlrs.push(projection_vlr(
        record_id::GEO_ASCII_PARAMS,
        Record::GeoAsciiParams("NAD83|".to_string()),
    ));

    let vlrs = roundtrip(builder);
    assert_eq!(3, vlrs.len());
    assert_eq!(Record::GeoKeyDirectory(directory), vlrs[0].record);
    assert_eq!(Record::GeoDoubleParams(vec![0.5, -0.5]), vlrs[1].record);
    assert_eq!(
        Record::GeoAsciiParams("NAD83|".to_string()),
        vlrs[2].record
    );
}

#[test]
fn wkt_records() {
    let mut builder = Builder::default();
    builder.version = (1, 4).into();
    builder.vlrs.push(projection_vlr(
        record_id::OGC_COORDINATE_SYSTEM_WKT,
        Record::OgcCoordinateSystemWkt("PROJCS[\"fake\"]".to_string()),
    ));
    let vlrs = roundtrip(builder);
    assert_eq!(
        Record::OgcCoordinateSystemWkt("PROJCS[\"fake\"]".to_string()),
        vlrs[0].record
    );
}

#[test]
fn extra_bytes_descriptors() {
    let extra_bytes = ExtraBytes {
        items: vec![
            ExtraBytesItem {
                data_type: DataType::U16,
                options: Options(0b0000_0111),
                name: "reflectance".to_string(),
                no_data: Value::Unsigned(u64::from(u16::MAX)),
                min: Value::Unsigned(0),
                max: Value::Unsigned(1_000),
                description: "calibrated reflectance".to_string(),
                ..Default::default()
            },
            ExtraBytesItem {
                data_type: DataType::I16,
                options: Options(0b0001_1000),
                name: "height".to_string(),
                no_data: Value::Signed(0),
                min: Value::Signed(0),
                max: Value::Signed(0),
                scale: 0.01,
                offset: -10.,
                ..Default::default()
            },
        ],
    };
    assert_eq!(4, extra_bytes.byte_width());

    let mut builder = Builder::default();
    builder.extra_bytes = extra_bytes.byte_width() as u16;
    builder.vlrs.push(spec_vlr(
        record_id::EXTRA_BYTES,
        Record::ExtraBytes(extra_bytes.clone()),
    ));
    let vlrs = roundtrip(builder);
    assert_eq!(Record::ExtraBytes(extra_bytes), vlrs[0].record);
}

#[test]
fn classification_lookup() {
    let lookup = ClassificationLookup::default();
    let mut builder = Builder::default();
    builder.vlrs.push(spec_vlr(
        record_id::CLASSIFICATION_LOOKUP,
        Record::ClassificationLookup(lookup.clone()),
    ));
    let vlrs = roundtrip(builder);
    assert_eq!(Record::ClassificationLookup(lookup), vlrs[0].record);
}

#[test]
fn text_area_description_and_superseded() {
    let mut builder = Builder::default();
    builder.vlrs.push(spec_vlr(
        record_id::TEXT_AREA_DESCRIPTION,
        Record::TextAreaDescription("the area of interest".to_string()),
    ));
    builder
        .vlrs
        .push(spec_vlr(record_id::SUPERSEDED, Record::Superseded));
    let vlrs = roundtrip(builder);
    assert_eq!(
        Record::TextAreaDescription("the area of interest".to_string()),
        vlrs[0].record
    );
    assert_eq!(Record::Superseded, vlrs[1].record);
    assert!(vlrs[1].is_empty());
}

#[test]
fn unknown_vendor_records_pass_through() {
    let mut builder = Builder::default();
    builder.vlrs.push(Vlr {
        user_id: "SomeVendor".to_string(),
        record_id: 12_345,
        description: "proprietary".to_string(),
        record: Record::Unknown(vec![0xde, 0xad, 0xbe, 0xef]),
        ..Default::default()
    });
    let vlrs = roundtrip(builder);
    assert_eq!("SomeVendor", vlrs[0].user_id);
    assert_eq!("proprietary", vlrs[0].description);
    assert_eq!(Record::Unknown(vec![0xde, 0xad, 0xbe, 0xef]), vlrs[0].record);
}

#[test]
fn waveform_data_packets_as_an_evlr() {
    let mut builder = Builder::default();
    builder.version = (1, 4).into();
    builder.vlrs.push(Vlr {
        user_id: las_codec::vlr::LASF_SPEC.to_string(),
        record_id: record_id::WAVEFORM_DATA_PACKETS,
        record: Record::WaveformDataPackets(vec![1; 100]),
        is_extended: true,
        ..Default::default()
    });
    let vlrs = roundtrip(builder);
    assert!(vlrs[0].is_extended());
    assert_eq!(Record::WaveformDataPackets(vec![1; 100]), vlrs[0].record);
}
