//! Read and write [ASPRS las](https://www.asprs.org/divisions-committees/lidar-division/laser-las-file-format-exchange-activities)
//! point cloud data.
//!
//! The las format is a fixed sequential binary layout: a header, a block of
//! variable length records (vlrs), the point records, and, since las 1.4, a
//! trailing block of extended variable length records (evlrs). This crate
//! decodes and encodes all of it for las 1.0 through 1.5, point formats 0
//! through 10, always little-endian.
//!
//! # Reading
//!
//! Create a [Reader] from a path or from anything that is `Read + Seek`, then
//! pull points one at a time or all at once:
//!
//! ```no_run
//! use las_codec::Reader;
//!
//! let mut reader = Reader::from_path("points.las").unwrap();
//! while let Some(point) = reader.read_point().unwrap() {
//!     println!("return {} of {}", point.return_number(), point.format());
//! }
//! ```
//!
//! # Writing
//!
//! A [Writer] takes its configuration from a [Header], built with a
//! [Builder]. The header block is rewritten when the writer closes, so counts
//! and bounds reflect the points actually written:
//!
//! ```
//! use std::io::Cursor;
//! use las_codec::{Builder, Writer};
//! use las_codec::point::{Format, Point7, PointRecord};
//!
//! let mut builder = Builder::default();
//! builder.version = (1, 4).into();
//! builder.global_encoding.wkt = true;
//! builder.point_format = Format::new(7).unwrap();
//! let header = builder.into_header().unwrap();
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
//! writer.write(&PointRecord::Format7(Point7::default())).unwrap();
//! writer.close().unwrap();
//! ```
//!
//! # Converting points
//!
//! Any point record converts to any of the eleven formats; attributes the
//! target cannot carry are dropped or clamped, never errors:
//!
//! ```
//! use las_codec::point::{Format, PointRecord};
//!
//! let point = PointRecord::default();
//! let extended = point.convert(Format::new(6).unwrap());
//! assert_eq!(Some(0.), extended.gps_time());
//! ```
//!
//! # Variable length records
//!
//! Known vlr payloads decode into typed [vlr::Record] values through a
//! [Registry] of record processors; unknown payloads pass through as raw
//! bytes. Register your own processors to extend the set.

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]

pub mod bits;
pub mod feature;
pub mod gps_time;
pub mod header;
pub mod point;
pub mod utils;
pub mod vlr;

mod bounds;
mod color;
mod error;
mod global_encoding;
mod reader;
mod registry;
mod transform;
mod vector;
mod version;
mod writer;

pub use bounds::Bounds;
pub use color::Color;
pub use error::Error;
pub use global_encoding::GlobalEncoding;
pub use gps_time::GpsTimeType;
pub use header::{Builder, Header};
pub use reader::Reader;
pub use registry::Registry;
pub use transform::Transform;
pub use vector::Vector;
pub use version::Version;
pub use vlr::Vlr;
pub use writer::Writer;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
