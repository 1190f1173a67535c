//! Raw binary images with a two-byte little-endian load address prefix.

use log::debug;
use std::io::{BufRead, ErrorKind, Read};

use crate::error::LoadError;
use crate::program::{MemoryBlock, Program};

/// Read one binary image block from the stream.
///
/// The first two bytes are the little-endian load address; everything after
/// them is the payload. A stream too short to hold the prefix, or one with
/// an empty payload, yields `Ok(None)`.
pub fn read_block<R: BufRead + ?Sized>(source: &mut R) -> Result<Option<MemoryBlock>, LoadError> {
    let mut prefix = [0u8; 2];
    match source.read_exact(&mut prefix) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(LoadError::Io(format!("failed to read address prefix: {}", e))),
    }
    let address = u32::from(u16::from_le_bytes(prefix));

    let mut data = Vec::new();
    source
        .read_to_end(&mut data)
        .map_err(|e| LoadError::Io(format!("failed to read image payload: {}", e)))?;
    if data.is_empty() {
        return Ok(None);
    }

    debug!("read binary image: {:#06x}, {} byte(s)", address, data.len());
    Ok(Some(MemoryBlock { address, data }))
}

/// Read a binary image stream as a program: at most one block, no entry
/// address.
pub fn read_program<R: BufRead + ?Sized>(source: &mut R) -> Result<Program, LoadError> {
    let blocks = match read_block(source)? {
        Some(block) => vec![block],
        None => Vec::new(),
    };
    Ok(Program {
        entry_address: None,
        blocks,
    })
}
