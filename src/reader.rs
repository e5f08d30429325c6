//! Read las data.
//!
//! Reading proceeds in the file's fixed sequential order: signature and
//! header, regular VLRs, point records, then extended VLRs. The EVLRs are
//! pulled in during construction, so once a [Reader] exists its header is
//! complete.
//!
//! ```
//! use std::io::Cursor;
//! use las_codec::{Header, Reader, Writer};
//!
//! let mut cursor = Cursor::new(Vec::new());
//! Writer::new(&mut cursor, Header::default()).unwrap().close().unwrap();
//! cursor.set_position(0);
//! let reader = Reader::new(cursor).unwrap();
//! assert_eq!(0, reader.header().number_of_points());
//! ```

use crate::header::{Builder, Header, RawHeader};
use crate::point::PointRecord;
use crate::vlr::{RawVlr, Vlr};
use crate::{Registry, Result, registry};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Reads a header, its variable length records, and point records.
#[derive(Debug)]
pub struct Reader<R> {
    header: Header,
    position: u64,
    read: R,
}

impl Reader<BufReader<File>> {
    /// Opens a reader for the file at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        Reader::new(BufReader::new(File::open(path)?))
    }
}

impl<R: Read + Seek> Reader<R> {
    /// Creates a reader, dispatching VLRs through the default registry.
    pub fn new(read: R) -> Result<Reader<R>> {
        Reader::with_registry(read, registry::default())
    }

    /// Creates a reader, dispatching VLRs through the given registry.
    pub fn with_registry(mut read: R, registry: &Registry) -> Result<Reader<R>> {
        let raw = RawHeader::read_from(&mut read)?;
        let number_of_variable_length_records = raw.number_of_variable_length_records;
        let offset_to_point_data = u64::from(raw.offset_to_point_data);
        let evlr = raw.evlr;
        let mut builder = Builder::new(raw)?;
        for _ in 0..number_of_variable_length_records {
            let raw_vlr = RawVlr::read_from(&mut read, false)?;
            builder.vlrs.push(Vlr::with_registry(&raw_vlr, registry)?);
        }
        let position = read.stream_position()?;
        if position < offset_to_point_data {
            let mut padding = vec![0; (offset_to_point_data - position) as usize];
            read.read_exact(&mut padding)?;
            builder.vlr_padding = padding;
        }
        if let Some(evlr) = evlr {
            read.seek(SeekFrom::Start(evlr.start_of_first_evlr))?;
            for _ in 0..evlr.number_of_evlrs {
                let raw_vlr = RawVlr::read_from(&mut read, true)?;
                builder.vlrs.push(Vlr::with_registry(&raw_vlr, registry)?);
            }
            read.seek(SeekFrom::Start(offset_to_point_data))?;
        }
        Ok(Reader {
            header: builder.into_header()?,
            position: 0,
            read,
        })
    }

    /// Returns this reader's header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the next point record, or `None` past the last one.
    ///
    /// Extra bytes beyond the format's layout are read and discarded.
    pub fn read_point(&mut self) -> Result<Option<PointRecord>> {
        if self.position >= self.header.number_of_points() {
            return Ok(None);
        }
        let record = PointRecord::read_from(&mut self.read, self.header.point_format())?;
        if self.header.extra_bytes() > 0 {
            let mut extra = vec![0; usize::from(self.header.extra_bytes())];
            self.read.read_exact(&mut extra)?;
        }
        self.position += 1;
        Ok(Some(record))
    }

    /// Reads all remaining point records.
    pub fn read_points(&mut self) -> Result<Vec<PointRecord>> {
        let mut points = Vec::new();
        while let Some(point) = self.read_point()? {
            points.push(point);
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Writer;
    use crate::point::{Format, Point1};
    use std::io::Cursor;

    #[test]
    fn roundtrip_points() {
        let mut builder = Builder::default();
        builder.point_format = Format::new(1).unwrap();
        let header = builder.into_header().unwrap();
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = Writer::new(&mut cursor, header).unwrap();
        for n in 0..3 {
            writer
                .write(&PointRecord::Format1(Point1 {
                    gps_time: f64::from(n),
                    ..Default::default()
                }))
                .unwrap();
        }
        writer.close().unwrap();
        drop(writer);

        cursor.set_position(0);
        let mut reader = Reader::new(cursor).unwrap();
        assert_eq!(3, reader.header().number_of_points());
        let points = reader.read_points().unwrap();
        assert_eq!(3, points.len());
        assert_eq!(Some(2.), points[2].gps_time());
        assert!(reader.read_point().unwrap().is_none());
    }
}
