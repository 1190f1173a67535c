//! The tolerant `AAAA:` hex dump dialect.
//!
//! Lines look like `C000: 48 44 52` or `C000:484452`. There is no checksum
//! and no terminator; a line that fails to parse simply ends the stream.

use log::debug;
use std::io::BufRead;

use crate::error::LoadError;
use crate::hex::{begins_with_hex_byte, decode_hex, decode_hex_byte};
use crate::program::{MemoryBlock, Program};

/// Skip leading spaces and tabs.
fn eat_whitespace(mut data: &[u8]) -> &[u8] {
    while let Some((&first, rest)) = data.split_first() {
        if first == b' ' || first == b'\t' {
            data = rest;
        } else {
            break;
        }
    }
    data
}

/// Decode one dump line into a memory block.
///
/// The line must open with a four-digit uppercase hex address and a colon.
/// Byte tokens after the colon are exactly two hex digits each; collection
/// stops at the first token that is not one, keeping what came before. A
/// line with a valid prefix but no bytes yields an empty block.
pub fn decode_line(line: &str) -> Option<MemoryBlock> {
    let bytes = line.trim_end().as_bytes();
    if bytes.len() < 5 {
        return None;
    }

    let address = decode_hex(&bytes[..4])?;
    if bytes[4] != b':' {
        return None;
    }

    let mut data = Vec::new();
    let mut rest = &bytes[5..];
    loop {
        rest = eat_whitespace(rest);
        if !begins_with_hex_byte(rest) {
            break;
        }
        // begins_with_hex_byte guarantees two hex digits are present
        match decode_hex_byte(&rest[..2]) {
            Some(byte) => data.push(byte),
            None => break,
        }
        rest = &rest[2..];
    }

    Some(MemoryBlock { address, data })
}

/// Read a whole dump stream into a program.
///
/// Reading stops quietly at end of stream or at the first line that fails
/// to parse; everything decoded so far is kept. Blocks with no bytes are
/// dropped, and the dialect never supplies an entry address.
pub fn read_program<R: BufRead + ?Sized>(source: &mut R) -> Result<Program, LoadError> {
    let mut blocks = Vec::new();

    loop {
        let mut line = String::new();
        let bytes_read = source
            .read_line(&mut line)
            .map_err(|e| LoadError::Io(format!("failed to read dump line: {}", e)))?;
        if bytes_read == 0 {
            break;
        }
        match decode_line(&line) {
            Some(block) => blocks.push(block),
            None => break,
        }
    }

    blocks.retain(|block| !block.data.is_empty());
    debug!("read simple hex dump: {} block(s)", blocks.len());

    Ok(Program {
        entry_address: None,
        blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_line_with_spaced_bytes() {
        let block = decode_line("C000: 48 44 52").unwrap();
        assert_eq!(block.address, 0xC000);
        assert_eq!(block.data, vec![0x48, 0x44, 0x52]);
    }

    #[test]
    fn test_packed_and_spaced_bytes_decode_alike() {
        assert_eq!(decode_line("C000:484452"), decode_line("C000: 48 44 52"));
    }

    #[test]
    fn test_short_trailing_token_stops_collection() {
        let block = decode_line("0000: 12 3").unwrap();
        assert_eq!(block.data, vec![0x12]);
    }

    #[test]
    fn test_single_digit_tokens_collect_nothing() {
        let block = decode_line("0000: 1 2 3").unwrap();
        assert_eq!(block.data, Vec::<u8>::new());
    }

    #[test]
    fn test_bare_prefix_is_an_empty_block() {
        let block = decode_line("1234:").unwrap();
        assert_eq!(block.address, 0x1234);
        assert!(block.data.is_empty());
    }

    #[test]
    fn test_bad_prefixes_are_rejected() {
        assert_eq!(decode_line(""), None);
        assert_eq!(decode_line("C00: 48"), None);
        assert_eq!(decode_line("C000 48 44"), None);
        assert_eq!(decode_line("c000: 48"), None);
        assert_eq!(decode_line("GGGG: 48"), None);
    }

    #[test]
    fn test_lowercase_byte_stops_collection() {
        let block = decode_line("0000: 48 4f 52").unwrap();
        assert_eq!(block.data, vec![0x48]);
    }

    #[test]
    fn test_read_program_suppresses_empty_blocks() {
        let dump = "C000: 48 44\n1234:\nD000: 52\n";
        let program = read_program(&mut Cursor::new(dump)).unwrap();
        assert_eq!(program.entry_address, None);
        assert_eq!(program.blocks.len(), 2);
        assert_eq!(program.blocks[0].address, 0xC000);
        assert_eq!(program.blocks[1].address, 0xD000);
    }

    #[test]
    fn test_read_program_stops_at_first_bad_line() {
        let dump = "C000: 48 44\nnot a dump line\nD000: 52\n";
        let program = read_program(&mut Cursor::new(dump)).unwrap();
        assert_eq!(program.blocks.len(), 1);
        assert_eq!(program.blocks[0].address, 0xC000);
    }
}
