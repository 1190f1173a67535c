//! Motorola S-Record codec.
//!
//! One record per ASCII line:
//!
//! ```text
//! S <type:1 digit> <byte count:2 hex> <address:4|6|8 hex> <data:hex pairs> <checksum:2 hex>
//! ```
//!
//! The byte-count field declares the number of bytes from the address field
//! through the checksum, inclusive. The checksum is the one's complement of
//! the truncated sum of the byte-count, address, and data bytes, and is
//! verified on every decode.

use crate::error::RecordError;
use crate::hex::{decode_hex, decode_hex_byte, is_decimal_digit};

/// Two hex characters encode one byte on the wire.
pub const CHARS_PER_BYTE: usize = 2;

/// The decoded form of one S-Record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record type digit, 0-9 (4 is reserved)
    pub record_type: u8,
    /// Memory address for types 0-3, count for 5/6, entry point for 7-9
    pub address: u32,
    /// Data segment; always empty for types 5-9
    pub data: Vec<u8>,
    /// Checksum as read from (or destined for) the stream
    pub checksum: u8,
}

impl Record {
    /// Build a record carrying the checksum the encoder would emit for it.
    pub fn new(record_type: u8, address: u32, data: Vec<u8>) -> Record {
        let address_bytes = address_width(record_type).unwrap_or(2);
        let byte_count = (address_bytes + data.len() + 1) as u8;
        let checksum = record_checksum(byte_count, address, address_bytes, &data);
        Record {
            record_type,
            address,
            data,
            checksum,
        }
    }
}

/// Address field width in bytes for a record type. `None` for the reserved
/// type 4 and anything past 9.
pub fn address_width(record_type: u8) -> Option<usize> {
    match record_type {
        0 | 1 | 5 | 9 => Some(2),
        2 | 6 | 8 => Some(3),
        3 | 7 => Some(4),
        _ => None,
    }
}

/// Types 0-3 carry a data segment; types 5-9 keep all their information in
/// the address field.
pub fn carries_data(record_type: u8) -> bool {
    record_type <= 3
}

/// Smallest legal value of the byte-count field for a record type: the
/// address bytes plus the checksum byte, plus at least one data byte for the
/// data-carrying types.
pub fn min_byte_count(record_type: u8) -> Option<u8> {
    let address_bytes = address_width(record_type)?;
    Some((address_bytes + 1 + usize::from(carries_data(record_type))) as u8)
}

/// One's-complement checksum over the byte-count field, the address bytes
/// (most significant first), and the data bytes.
pub fn record_checksum(byte_count: u8, address: u32, address_bytes: usize, data: &[u8]) -> u8 {
    let mut sum = u32::from(byte_count);

    for shift in (0..address_bytes).rev() {
        sum += (address >> (shift * 8)) & 0xFF;
    }
    for &byte in data {
        sum += u32::from(byte);
    }
    0xFF - (sum & 0xFF) as u8
}

/// Decode a line as whichever record type its type digit declares.
pub fn decode_record(line: &str) -> Result<Record, RecordError> {
    let bytes = line.trim().as_bytes();

    if bytes.is_empty() || bytes[0] != b'S' {
        return Err(RecordError::MalformedStart);
    }
    let digit = match bytes.get(1) {
        Some(&digit) if is_decimal_digit(digit) => digit - b'0',
        _ => return Err(RecordError::MalformedStart),
    };
    if address_width(digit).is_none() {
        return Err(RecordError::ReservedType(digit));
    }
    decode_fields(bytes, digit)
}

/// Decode an S0 header record. The address must be exactly zero.
pub fn decode_type0(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 0)
}

/// Decode an S1 data record (16-bit address).
pub fn decode_type1(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 1)
}

/// Decode an S2 data record (24-bit address).
pub fn decode_type2(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 2)
}

/// Decode an S3 data record (32-bit address).
pub fn decode_type3(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 3)
}

/// Type 4 is reserved by the format and never decodes.
pub fn decode_type4(_line: &str) -> Result<Record, RecordError> {
    Err(RecordError::ReservedType(4))
}

/// Decode an S5 record-count record (16-bit count in the address field).
pub fn decode_type5(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 5)
}

/// Decode an S6 record-count record (24-bit count in the address field).
pub fn decode_type6(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 6)
}

/// Decode an S7 terminator record (32-bit entry address).
pub fn decode_type7(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 7)
}

/// Decode an S8 terminator record (24-bit entry address).
pub fn decode_type8(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 8)
}

/// Decode an S9 terminator record (16-bit entry address).
pub fn decode_type9(line: &str) -> Result<Record, RecordError> {
    decode_fields(line.trim().as_bytes(), 9)
}

fn decode_fields(bytes: &[u8], expected_type: u8) -> Result<Record, RecordError> {
    let address_bytes = match address_width(expected_type) {
        Some(width) => width,
        None => return Err(RecordError::ReservedType(expected_type)),
    };
    let address_chars = address_bytes * CHARS_PER_BYTE;

    if bytes.is_empty() || bytes[0] != b'S' {
        return Err(RecordError::MalformedStart);
    }
    match bytes.get(1) {
        Some(&digit) if is_decimal_digit(digit) => {
            let found = digit - b'0';
            if found != expected_type {
                return Err(RecordError::TypeMismatch(expected_type, found));
            }
        }
        _ => return Err(RecordError::MalformedStart),
    }

    let byte_count = bytes
        .get(2..4)
        .and_then(decode_hex_byte)
        .ok_or(RecordError::InvalidByteCount)?;
    // min_byte_count is Some for every type that reaches this point
    if byte_count < min_byte_count(expected_type).unwrap_or(u8::MAX) {
        return Err(RecordError::InvalidByteCount);
    }

    let address = bytes
        .get(4..4 + address_chars)
        .and_then(decode_hex)
        .ok_or(RecordError::InvalidAddress)?;
    if expected_type == 0 && address != 0 {
        return Err(RecordError::InvalidHeaderAddress(address));
    }

    // Everything after the address is data plus a mandatory 2-char checksum
    let tail = match bytes.get(4 + address_chars..) {
        Some(tail) if tail.len() >= CHARS_PER_BYTE => tail,
        _ => return Err(RecordError::InvalidAddress),
    };
    let (data_hex, checksum_hex) = tail.split_at(tail.len() - CHARS_PER_BYTE);

    let stored_checksum = decode_hex_byte(checksum_hex).ok_or(RecordError::ChecksumMismatch)?;

    if !carries_data(expected_type) && !data_hex.is_empty() {
        return Err(RecordError::UnexpectedData(expected_type));
    }
    if data_hex.len() % CHARS_PER_BYTE != 0 {
        return Err(RecordError::ByteCountMismatch(
            byte_count,
            data_hex.len() / CHARS_PER_BYTE,
        ));
    }

    let mut data = Vec::with_capacity(data_hex.len() / CHARS_PER_BYTE);
    for pair in data_hex.chunks(CHARS_PER_BYTE) {
        // A non-hex data pair can never checksum correctly
        data.push(decode_hex_byte(pair).ok_or(RecordError::ChecksumMismatch)?);
    }

    let declared_data_bytes = usize::from(byte_count) - address_bytes - 1;
    if data.len() != declared_data_bytes {
        return Err(RecordError::ByteCountMismatch(byte_count, data.len()));
    }

    let computed = record_checksum(byte_count, address, address_bytes, &data);
    if computed != stored_checksum {
        return Err(RecordError::ChecksumMismatch);
    }

    Ok(Record {
        record_type: expected_type,
        address,
        data,
        checksum: stored_checksum,
    })
}

/// Encode a record as one S-Record line (no trailing newline).
///
/// The byte-count and checksum fields are recomputed from the address and
/// data; round-tripping a well-formed record through `decode_record` yields
/// the record back.
pub fn encode_record(record: &Record) -> Result<String, RecordError> {
    let address_bytes = match address_width(record.record_type) {
        Some(width) => width,
        None => return Err(RecordError::ReservedType(record.record_type)),
    };
    if address_bytes < 4 && (record.address >> (address_bytes * 8)) != 0 {
        return Err(RecordError::InvalidAddress);
    }

    let byte_count = address_bytes + record.data.len() + 1;
    if byte_count > 0xFF {
        return Err(RecordError::InvalidByteCount);
    }

    let mut line = format!("S{}{:02X}", record.record_type, byte_count);
    match address_bytes {
        2 => line.push_str(&format!("{:04X}", record.address)),
        3 => line.push_str(&format!("{:06X}", record.address)),
        _ => line.push_str(&format!("{:08X}", record.address)),
    }
    for &byte in &record.data {
        line.push_str(&format!("{:02X}", byte));
    }

    let checksum = record_checksum(byte_count as u8, record.address, address_bytes, &record.data);
    line.push_str(&format!("{:02X}", checksum));
    Ok(line)
}
