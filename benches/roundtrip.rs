use criterion::{Criterion, criterion_group, criterion_main};
use las_codec::point::{Format, PointRecord};
use las_codec::{Builder, Reader, Writer};
use std::io::Cursor;

fn roundtrip(format: Format, npoints: usize) {
    let mut builder = Builder::default();
    builder.version = if format.is_extended() {
        (1, 4).into()
    } else {
        (1, 2).into()
    };
    builder.point_format = format;
    builder.global_encoding.wkt = format.is_extended();
    let header = builder.into_header().unwrap();
    let record = PointRecord::default().convert(format);

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = Writer::new(&mut cursor, header).unwrap();
    for _ in 0..npoints {
        writer.write(&record).unwrap();
    }
    writer.close().unwrap();
    drop(writer);

    cursor.set_position(0);
    let mut reader = Reader::new(cursor).unwrap();
    while let Some(point) = reader.read_point().unwrap() {
        std::hint::black_box(point);
    }
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    for npoints in [0, 1, 100, 10_000] {
        group.bench_function(format!("format_1_{}_points", npoints), |b| {
            b.iter(|| roundtrip(Format::new(1).unwrap(), npoints))
        });
    }
    group.bench_function("format_7_10_000_points", |b| {
        b.iter(|| roundtrip(Format::new(7).unwrap(), 10_000))
    });
    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let record = PointRecord::default().convert(Format::new(3).unwrap());
    let target = Format::new(8).unwrap();
    c.bench_function("convert_3_to_8", |b| {
        b.iter(|| std::hint::black_box(record.convert(target)))
    });
}

criterion_group!(benches, bench_roundtrip, bench_conversion);
criterion_main!(benches);
