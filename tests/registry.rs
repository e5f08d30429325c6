//! Record processor dispatch while reading files.

use las_codec::vlr::{Record, Vlr};
use las_codec::{Builder, Reader, Registry, Writer};
use std::io::Cursor;

fn file_with(vlr: Vlr) -> Cursor<Vec<u8>> {
    let mut builder = Builder::default();
    builder.vlrs.push(vlr);
    let header = builder.into_header().unwrap();
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut cursor, header).unwrap();
    writer.close().unwrap();
    drop(writer);
    cursor.set_position(0);
    cursor
}

#[test]
fn a_custom_registration_parses_vendor_records() {
    let cursor = file_with(Vlr {
        user_id: "MyCompany".to_string(),
        record_id: 42,
        record: Record::Unknown(b"important".to_vec()),
        ..Default::default()
    });

    let registry = Registry::new();
    registry.register(Some("MyCompany"), 42, |raw| {
        Ok(Record::TextAreaDescription(
            String::from_utf8_lossy(&raw.data).into_owned(),
        ))
    });
    let reader = Reader::with_registry(cursor, &registry).unwrap();
    assert_eq!(
        Record::TextAreaDescription("important".to_string()),
        reader.header().all_vlrs()[0].record
    );
}

#[test]
fn the_default_registry_leaves_vendor_records_opaque() {
    let cursor = file_with(Vlr {
        user_id: "MyCompany".to_string(),
        record_id: 42,
        record: Record::Unknown(b"important".to_vec()),
        ..Default::default()
    });
    let reader = Reader::new(cursor).unwrap();
    assert_eq!(
        Record::Unknown(b"important".to_vec()),
        reader.header().all_vlrs()[0].record
    );
}

#[test]
fn an_empty_registry_keeps_even_known_records_opaque() {
    let cursor = file_with(Vlr {
        user_id: las_codec::vlr::LASF_SPEC.to_string(),
        record_id: las_codec::vlr::record_id::TEXT_AREA_DESCRIPTION,
        record: Record::TextAreaDescription("hello".to_string()),
        ..Default::default()
    });
    let registry = Registry::empty();
    let reader = Reader::with_registry(cursor, &registry).unwrap();
    assert_eq!(
        Record::Unknown(b"hello".to_vec()),
        reader.header().all_vlrs()[0].record
    );
}

#[test]
fn a_failed_registration_leaves_the_original_factory_in_place() {
    let registry = Registry::new();
    assert!(
        registry
            .try_register(
                Some(las_codec::vlr::LASF_SPEC),
                las_codec::vlr::record_id::TEXT_AREA_DESCRIPTION,
                |_| Ok(Record::Superseded),
            )
            .is_err()
    );

    let cursor = file_with(Vlr {
        user_id: las_codec::vlr::LASF_SPEC.to_string(),
        record_id: las_codec::vlr::record_id::TEXT_AREA_DESCRIPTION,
        record: Record::TextAreaDescription("hello".to_string()),
        ..Default::default()
    });
    let reader = Reader::with_registry(cursor, &registry).unwrap();
    assert_eq!(
        Record::TextAreaDescription("hello".to_string()),
        reader.header().all_vlrs()[0].record
    );
}

#[test]
fn registries_are_shareable_across_threads() {
    use std::sync::Arc;

    let registry = Arc::new(Registry::new());
    let handles: Vec<_> = (0..4u16)
        .map(|n| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry.register(Some("Thread"), n, |_| Ok(Record::Superseded));
                let cursor = file_with(Vlr {
                    user_id: "Thread".to_string(),
                    record_id: n,
                    record: Record::Unknown(Vec::new()),
                    ..Default::default()
                });
                let reader = Reader::with_registry(cursor, &registry).unwrap();
                assert_eq!(Record::Superseded, reader.header().all_vlrs()[0].record);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
