//! End-to-end loads through the filename dispatcher, using real temp files.

use romload::error::LoadError;
use romload::loader::load_program;
use std::fs;
use std::path::PathBuf;

/// A temp file that cleans up after itself.
struct TempImage {
    path: PathBuf,
}

impl TempImage {
    fn new(name: &str, contents: &[u8]) -> TempImage {
        let path = std::env::temp_dir().join(format!("romload_{}_{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        TempImage { path }
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[test_log::test]
fn test_load_s19_program() {
    let image = TempImage::new(
        "linked.s19",
        b"S00600004844521B\nS106C0004844525B\nS903C0003C\n",
    );
    let program = load_program(&image.path).unwrap();
    assert_eq!(program.entry_address, Some(0xC000));
    assert_eq!(program.blocks.len(), 1);
    assert_eq!(program.blocks[0].address, 0xC000);
    assert_eq!(program.blocks[0].data, vec![0x48, 0x44, 0x52]);
}

#[test_log::test]
fn test_load_flat_srec_keeps_every_record() {
    let image = TempImage::new(
        "flat.srec",
        b"S00600004844521B\nS106C0004844525B\nS903C0003C\n",
    );
    let program = load_program(&image.path).unwrap();
    assert_eq!(program.entry_address, None);
    // Header and terminator survive as blocks in a flat load
    assert_eq!(program.blocks.len(), 3);
    assert_eq!(program.blocks[0].data, b"HDR".to_vec());
    assert_eq!(program.blocks[2].address, 0xC000);
    assert!(program.blocks[2].data.is_empty());
}

#[test_log::test]
fn test_load_simple_hex_dump() {
    let image = TempImage::new("dump.shex", b"C000: 48 44 52\n1234:\nD000:EA\n");
    let program = load_program(&image.path).unwrap();
    assert_eq!(program.entry_address, None);
    assert_eq!(program.blocks.len(), 2);
    assert_eq!(program.blocks[0].address, 0xC000);
    assert_eq!(program.blocks[1].data, vec![0xEA]);
}

#[test_log::test]
fn test_load_binary_image() {
    let image = TempImage::new("basic.prg", &[0x01, 0x08, 0xA9, 0x00]);
    let program = load_program(&image.path).unwrap();
    assert_eq!(program.entry_address, None);
    assert_eq!(program.blocks.len(), 1);
    assert_eq!(program.blocks[0].address, 0x0801);
    assert_eq!(program.blocks[0].data, vec![0xA9, 0x00]);
}

#[test_log::test]
fn test_unknown_suffix_is_rejected() {
    let image = TempImage::new("rom.bin", &[0x00]);
    match load_program(&image.path) {
        Err(LoadError::UnsupportedFormat(suffix)) => assert_eq!(suffix, ".bin"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
}

#[test_log::test]
fn test_missing_file_is_reported_before_suffix_check() {
    match load_program("/no/such/place/rom.bin") {
        Err(LoadError::FileNotFound(_)) => {}
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test_log::test]
fn test_s19_checksum_failure_names_the_line() {
    let image = TempImage::new(
        "broken.s19",
        b"S00600004844521B\nS106C0004844525C\nS903C0003C\n",
    );
    match load_program(&image.path) {
        Err(LoadError::Record(line, _)) => assert_eq!(line, 2),
        other => panic!("expected a record error, got {:?}", other),
    }
}
