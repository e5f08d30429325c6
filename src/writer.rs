//! Write las data.
//!
//! A [Writer] takes its configuration from a [Header]. The header block is
//! written up front with zeroed counts and bounds, updated as points are
//! written, and rewritten on [close](Writer::close):
//!
//! ```
//! use std::io::Cursor;
//! use las_codec::{Header, Writer};
//! let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
//! writer.write(&Default::default()).unwrap();
//! writer.close().unwrap();
//! ```

use crate::header::Header;
use crate::point::PointRecord;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

/// Writes a header, its variable length records, and point records.
///
/// The header must be rewritten when the writer closes; for convenience the
/// `Drop` implementation closes an open writer, logging any error. Call
/// [close](Writer::close) explicitly to handle errors yourself.
#[derive(Debug)]
pub struct Writer<W: Write + Seek> {
    closed: bool,
    header: Header,
    start: u64,
    write: W,
}

impl Writer<BufWriter<File>> {
    /// Creates a writer for the file at the given path.
    pub fn from_path<P: AsRef<Path>>(path: P, header: Header) -> Result<Writer<BufWriter<File>>> {
        Writer::new(BufWriter::new(File::create(path)?), header)
    }
}

impl<W: Write + Seek> Writer<W> {
    /// Creates a writer, writing the header block and the regular VLRs.
    ///
    /// The header's counts and bounds are zeroed; they accumulate as points
    /// are written.
    pub fn new(mut write: W, mut header: Header) -> Result<Writer<W>> {
        let start = write.stream_position()?;
        header.clear();
        header.into_raw().and_then(|raw| raw.write_to(&mut write))?;
        for vlr in header.vlrs() {
            vlr.clone()
                .into_raw(false)
                .and_then(|raw| raw.write_to(&mut write))?;
        }
        if !header.vlr_padding().is_empty() {
            write.write_all(header.vlr_padding())?;
        }
        Ok(Writer {
            closed: false,
            header,
            start,
            write,
        })
    }

    /// Returns this writer's header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Writes a point record.
    ///
    /// The record's format must match the header's. Extra bytes declared by
    /// the header are zero-filled.
    pub fn write(&mut self, record: &PointRecord) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        if record.format() != self.header.point_format() {
            return Err(Error::PointFormatMismatch {
                expected: self.header.point_format(),
                actual: record.format(),
            });
        }
        record.write_to(&mut self.write)?;
        if self.header.extra_bytes() > 0 {
            self.write
                .write_all(&vec![0; usize::from(self.header.extra_bytes())])?;
        }
        self.header.add_point_record(record);
        Ok(())
    }

    /// Writes the extended VLRs and rewrites the header block.
    ///
    /// Writing after a close is an error.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::ClosedWriter);
        }
        for vlr in self.header.evlrs() {
            vlr.clone()
                .into_raw(true)
                .and_then(|raw| raw.write_to(&mut self.write))?;
        }
        let end = self.write.stream_position()?;
        self.write.seek(SeekFrom::Start(self.start))?;
        self.header
            .into_raw()
            .and_then(|raw| raw.write_to(&mut self.write))?;
        self.write.seek(SeekFrom::Start(end))?;
        self.closed = true;
        Ok(())
    }
}

impl<W: Write + Seek> Drop for Writer<W> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(err) = self.close() {
                log::error!("error while closing writer on drop: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Builder;
    use crate::point::{Format, Point0, Point1};
    use std::io::Cursor;

    #[test]
    fn closed_writer_rejects_points() {
        let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
        writer.close().unwrap();
        assert!(matches!(
            writer.write(&PointRecord::default()),
            Err(Error::ClosedWriter)
        ));
        assert!(matches!(writer.close(), Err(Error::ClosedWriter)));
    }

    #[test]
    fn format_mismatch() {
        let mut builder = Builder::default();
        builder.point_format = Format::new(1).unwrap();
        let header = builder.into_header().unwrap();
        let mut writer = Writer::new(Cursor::new(Vec::new()), header).unwrap();
        assert!(matches!(
            writer.write(&PointRecord::Format0(Point0::default())),
            Err(Error::PointFormatMismatch { .. })
        ));
        assert!(
            writer
                .write(&PointRecord::Format1(Point1::default()))
                .is_ok()
        );
        writer.close().unwrap();
    }

    #[test]
    fn counts_accumulate() {
        let mut writer = Writer::new(Cursor::new(Vec::new()), Header::default()).unwrap();
        writer.write(&PointRecord::default()).unwrap();
        writer.write(&PointRecord::default()).unwrap();
        assert_eq!(2, writer.header().number_of_points());
        writer.close().unwrap();
    }
}
