//! Normalized memory blocks and the linked-program assembly rule.

use log::debug;
use std::fmt::{Display, Error, Formatter};

use crate::error::LoadError;
use crate::srecord::Record;

/// A contiguous run of bytes destined for a starting address, independent of
/// the dialect it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlock {
    pub address: u32,
    pub data: Vec<u8>,
}

/// A loaded image: zero or more memory blocks, plus the execution entry
/// address when the dialect provides one (only the S19 assembly rule does).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub entry_address: Option<u32>,
    pub blocks: Vec<MemoryBlock>,
}

impl From<&Record> for MemoryBlock {
    fn from(record: &Record) -> MemoryBlock {
        MemoryBlock {
            address: record.address,
            data: record.data.clone(),
        }
    }
}

/// Convert records to blocks verbatim, in order. No merging of adjacent or
/// overlapping ranges is performed; each record stays a discrete block.
pub fn to_memory_blocks(records: &[Record]) -> Vec<MemoryBlock> {
    records.iter().map(MemoryBlock::from).collect()
}

/// Assemble a linked S19 program from a fully decoded record list.
///
/// The records are stable-sorted by (type, address), then validated:
/// exactly one S0 header, at least one S1 data record, exactly one S9
/// terminator. The terminator's address becomes the entry address and the
/// S1 records become the memory blocks, in their sorted-range order.
pub fn assemble_s19(mut records: Vec<Record>) -> Result<Program, LoadError> {
    records.sort_by(|left, right| {
        (left.record_type, left.address).cmp(&(right.record_type, right.address))
    });

    let header_count = records.iter().filter(|r| r.record_type == 0).count();
    if header_count != 1 {
        return Err(LoadError::MissingOrDuplicateHeader(header_count));
    }

    let data_records: Vec<&Record> = records.iter().filter(|r| r.record_type == 1).collect();
    if data_records.is_empty() {
        return Err(LoadError::NoDataRecords);
    }

    let terminator_count = records.iter().filter(|r| r.record_type == 9).count();
    if terminator_count != 1 {
        return Err(LoadError::MissingOrDuplicateTerminator(terminator_count));
    }
    // The count above proved there is exactly one S9
    let entry_address = records
        .iter()
        .find(|r| r.record_type == 9)
        .map(|r| r.address)
        .ok_or(LoadError::MissingOrDuplicateTerminator(0))?;

    let blocks: Vec<MemoryBlock> = data_records.into_iter().map(MemoryBlock::from).collect();
    debug!(
        "assembled S19 program: entry {:#06x}, {} block(s)",
        entry_address,
        blocks.len()
    );

    Ok(Program {
        entry_address: Some(entry_address),
        blocks,
    })
}

impl Display for MemoryBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for (row, chunk) in self.data.chunks(16).enumerate() {
            write!(f, "{:04X}:", self.address as usize + row * 16)?;
            for byte in chunk {
                write!(f, " {:02X}", byte)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self.entry_address {
            Some(entry) => writeln!(f, "entry point: {:#06x}", entry)?,
            None => writeln!(f, "entry point: none")?,
        }
        writeln!(f, "{} memory block(s)", self.blocks.len())?;
        for block in &self.blocks {
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}
