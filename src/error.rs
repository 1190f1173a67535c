// Codec and loader error handling

use std::fmt;

/// Everything that can invalidate a single S-Record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Line does not begin with `S` followed by a decimal type digit
    MalformedStart,
    /// Record type digit differs from the one the caller asked for
    TypeMismatch(u8, u8), // expected, found
    /// Record type 4 (or anything past 9) has no defined layout
    ReservedType(u8),
    /// Byte-count field missing, non-hex, or below the legal minimum for the type
    InvalidByteCount,
    /// Address field missing, too short, or not uppercase hex
    InvalidAddress,
    /// S0 header records must carry address zero
    InvalidHeaderAddress(u32),
    /// Record types 5-9 must have an empty data segment
    UnexpectedData(u8), // record type
    /// Data segment length disagrees with the byte-count field
    ByteCountMismatch(u8, usize), // declared byte count, actual data bytes
    /// Stored checksum (or a non-hex data/checksum field) fails verification
    ChecksumMismatch,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::MalformedStart => {
                write!(f, "record does not start with 'S' and a type digit")
            }
            RecordError::TypeMismatch(expected, found) => {
                write!(f, "expected record type {} but found type {}", expected, found)
            }
            RecordError::ReservedType(record_type) => {
                write!(f, "record type {} is reserved and never valid", record_type)
            }
            RecordError::InvalidByteCount => {
                write!(f, "byte-count field is missing, non-hex, or too small for the record type")
            }
            RecordError::InvalidAddress => {
                write!(f, "address field is missing, truncated, or not uppercase hex")
            }
            RecordError::InvalidHeaderAddress(address) => {
                write!(f, "header record address must be 0, found {:#06x}", address)
            }
            RecordError::UnexpectedData(record_type) => {
                write!(f, "record type {} must not carry a data segment", record_type)
            }
            RecordError::ByteCountMismatch(declared, actual) => {
                write!(
                    f,
                    "byte count {} does not match {} data byte(s) in the record",
                    declared, actual
                )
            }
            RecordError::ChecksumMismatch => {
                write!(f, "record checksum does not verify against the record contents")
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Errors surfaced by the stream readers, the dialect dispatcher, and the
/// S19 program assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A record line failed to decode; the first field is the 1-based line number
    Record(usize, RecordError),
    /// A record could not be encoded for writing
    Encode(RecordError),
    /// Underlying read or write failure
    Io(String),
    /// Path does not exist
    FileNotFound(String),
    /// Path exists but could not be opened for reading
    FileUnreadable(String),
    /// Filename suffix matches no known dialect
    UnsupportedFormat(String),
    /// S19 programs need exactly one S0 header record
    MissingOrDuplicateHeader(usize),
    /// S19 programs need at least one S1 data record
    NoDataRecords,
    /// S19 programs need exactly one S9 terminator record
    MissingOrDuplicateTerminator(usize),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Record(line, error) => {
                write!(f, "line {}: {}", line, error)
            }
            LoadError::Encode(error) => {
                write!(f, "cannot encode record: {}", error)
            }
            LoadError::Io(message) => {
                write!(f, "I/O error: {}", message)
            }
            LoadError::FileNotFound(path) => {
                write!(f, "file not found: {}", path)
            }
            LoadError::FileUnreadable(message) => {
                write!(f, "file could not be read: {}", message)
            }
            LoadError::UnsupportedFormat(suffix) => {
                write!(f, "unsupported image format '{}'", suffix)
            }
            LoadError::MissingOrDuplicateHeader(count) => {
                write!(f, "expected exactly one S0 header record, found {}", count)
            }
            LoadError::NoDataRecords => {
                write!(f, "no S1 data records in the stream")
            }
            LoadError::MissingOrDuplicateTerminator(count) => {
                write!(f, "expected exactly one S9 terminator record, found {}", count)
            }
        }
    }
}

impl std::error::Error for LoadError {}
