//! romload: a multi-dialect program image codec for emulated
//! microprocessors.
//!
//! Four on-disk dialects are supported, selected by filename suffix:
//!
//! * `.prg`: raw binary with a two-byte little-endian load address prefix
//! * `.shex`: a tolerant `AAAA: XX XX` hex dump
//! * `.srec`: a flat Motorola S-Record stream, every record kept verbatim
//! * `.s19`: a linked S-Record program with a header, data records, and a
//!   terminator carrying the entry address
//!
//! All four decode into the same [`program::Program`] shape. The usual
//! entry point is [`loader::load_program`]; the individual codecs are
//! public for callers that already hold an open stream.

#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod hex;
pub mod loader;
pub mod prg;
pub mod program;
pub mod simplehex;
pub mod srecord;
pub mod stream;
