//! Line-oriented reading and writing of S-Record streams.

use log::debug;
use std::io::{BufRead, Write};

use crate::error::LoadError;
use crate::program::Program;
use crate::srecord::{decode_record, encode_record, Record};

/// Reads records one line at a time from a byte source.
pub struct RecordReader<R: BufRead> {
    source: R,
    line_number: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(source: R) -> RecordReader<R> {
        RecordReader {
            source,
            line_number: 0,
        }
    }

    /// Read and decode the next record line. `Ok(None)` at end of stream.
    pub fn read_record(&mut self) -> Result<Option<Record>, LoadError> {
        let mut line = String::new();
        let bytes_read = self
            .source
            .read_line(&mut line)
            .map_err(|e| LoadError::Io(format!("failed to read record line: {}", e)))?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        match decode_record(&line) {
            Ok(record) => Ok(Some(record)),
            Err(error) => Err(LoadError::Record(self.line_number, error)),
        }
    }

    /// Decode every record in the stream.
    ///
    /// The first malformed line fails the whole stream; nothing collected up
    /// to that point is returned. The error carries the offending 1-based
    /// line number.
    pub fn read_all(&mut self) -> Result<Vec<Record>, LoadError> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        debug!("read {} S-Record(s)", records.len());
        Ok(records)
    }
}

/// Writes records one line at a time to a byte sink.
pub struct RecordWriter<W: Write> {
    sink: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W) -> RecordWriter<W> {
        RecordWriter { sink }
    }

    /// Encode one record and write it as a single newline-terminated line.
    pub fn write_record(&mut self, record: &Record) -> Result<(), LoadError> {
        let line = encode_record(record).map_err(LoadError::Encode)?;
        writeln!(self.sink, "{}", line)
            .map_err(|e| LoadError::Io(format!("failed to write record line: {}", e)))
    }

    /// Write a full record list in order.
    pub fn write_all(&mut self, records: &[Record]) -> Result<(), LoadError> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }
}

/// S-Record data type for a block address: S1, S2, or S3 by width.
fn data_record_type(address: u32) -> u8 {
    if address <= 0xFFFF {
        1
    } else if address <= 0x00FF_FFFF {
        2
    } else {
        3
    }
}

/// Terminator type matching the entry address width: S9, S8, or S7.
fn terminator_record_type(address: u32) -> u8 {
    if address <= 0xFFFF {
        9
    } else if address <= 0x00FF_FFFF {
        8
    } else {
        7
    }
}

/// Write a program as a linked S-Record stream: an S0 header, one data
/// record per non-empty block (S1/S2/S3 chosen by address width), and a
/// terminator carrying the entry address (0 when the program has none).
pub fn write_program<W: Write>(program: &Program, sink: W) -> Result<(), LoadError> {
    let mut writer = RecordWriter::new(sink);

    writer.write_record(&Record::new(0, 0, b"HDR".to_vec()))?;
    for block in &program.blocks {
        if block.data.is_empty() {
            continue;
        }
        let record_type = data_record_type(block.address);
        writer.write_record(&Record::new(record_type, block.address, block.data.clone()))?;
    }

    let entry_address = program.entry_address.unwrap_or(0);
    writer.write_record(&Record::new(
        terminator_record_type(entry_address),
        entry_address,
        Vec::new(),
    ))?;

    debug!(
        "wrote S-Record program: entry {:#06x}, {} block(s)",
        entry_address,
        program.blocks.len()
    );
    Ok(())
}
