//! Filename-driven dialect dispatch.
//!
//! The filename suffix picks the codec: `.prg` for raw binary images,
//! `.shex` for the tolerant hex dump, `.srec` for a flat record stream,
//! and `.s19` for a linked program. Matching is case sensitive.

use indexmap::IndexMap;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::LoadError;
use crate::prg;
use crate::program::{assemble_s19, to_memory_blocks, Program};
use crate::simplehex;
use crate::stream::RecordReader;

type ReadProgramFn = fn(&mut dyn BufRead) -> Result<Program, LoadError>;

lazy_static! {
    /// Suffix to codec table, in documentation order.
    static ref FILE_TYPE_TABLE: IndexMap<&'static str, ReadProgramFn> = {
        let mut table: IndexMap<&'static str, ReadProgramFn> = IndexMap::new();
        table.insert(".prg", read_prg_program as ReadProgramFn);
        table.insert(".shex", read_simple_hex_program as ReadProgramFn);
        table.insert(".srec", read_srec_program as ReadProgramFn);
        table.insert(".s19", read_s19_program as ReadProgramFn);
        table
    };
}

/// Read a raw binary image.
pub fn read_prg_program(source: &mut dyn BufRead) -> Result<Program, LoadError> {
    prg::read_program(source)
}

/// Read a tolerant hex dump.
pub fn read_simple_hex_program(source: &mut dyn BufRead) -> Result<Program, LoadError> {
    simplehex::read_program(source)
}

/// Read a flat S-Record stream: every record becomes a block, header and
/// terminator records included, and no entry address is derived.
pub fn read_srec_program(source: &mut dyn BufRead) -> Result<Program, LoadError> {
    let records = RecordReader::new(source).read_all()?;
    Ok(Program {
        entry_address: None,
        blocks: to_memory_blocks(&records),
    })
}

/// Read a linked S19 program: the record list must satisfy the one-header,
/// some-data, one-terminator rule, and the terminator supplies the entry
/// address.
pub fn read_s19_program(source: &mut dyn BufRead) -> Result<Program, LoadError> {
    let records = RecordReader::new(source).read_all()?;
    assemble_s19(records)
}

/// The filename suffix including its dot, or the empty string when the
/// filename has no dot at all.
fn suffix_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(index) => name[index..].to_string(),
        None => String::new(),
    }
}

/// Open a program image file and decode it with the codec its suffix names.
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(LoadError::FileNotFound(display));
    }
    let file = File::open(path)
        .map_err(|e| LoadError::FileUnreadable(format!("{}: {}", display, e)))?;

    let suffix = suffix_of(path);
    let read_fn = FILE_TYPE_TABLE
        .get(suffix.as_str())
        .ok_or_else(|| LoadError::UnsupportedFormat(suffix.clone()))?;

    info!("loading '{}' as '{}'", display, suffix);
    let mut reader = BufReader::new(file);
    let program = read_fn(&mut reader)?;
    debug!(
        "loaded {} block(s), entry {:?}",
        program.blocks.len(),
        program.entry_address
    );
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_of() {
        assert_eq!(suffix_of(Path::new("game.s19")), ".s19");
        assert_eq!(suffix_of(Path::new("dir.d/game.prg")), ".prg");
        assert_eq!(suffix_of(Path::new("archive.tar.shex")), ".shex");
        assert_eq!(suffix_of(Path::new("noext")), "");
        assert_eq!(suffix_of(Path::new(".hidden")), ".hidden");
    }

    #[test]
    fn test_table_covers_every_dialect() {
        for suffix in [".prg", ".shex", ".srec", ".s19"] {
            assert!(FILE_TYPE_TABLE.contains_key(suffix), "missing {}", suffix);
        }
        assert_eq!(FILE_TYPE_TABLE.len(), 4);
    }

    #[test]
    fn test_suffix_matching_is_case_sensitive() {
        assert!(!FILE_TYPE_TABLE.contains_key(".S19"));
        assert!(!FILE_TYPE_TABLE.contains_key(".PRG"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_program("/no/such/dir/game.s19");
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }
}
