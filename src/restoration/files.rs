//! Whole-file reads and writes shared by keyword loading and restoration.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::source::{SourceError, SourceResult};

/// Reads a source file, reporting a missing file as `SourceError::NotFound`.
///
/// An empty file is not an error and yields an empty string.
pub fn read_source(path: &Path) -> SourceResult<String> {
    fs::read_to_string(path).map_err(|e| SourceError::read(path, e))
}

/// Writes `lines` to `path`, one per line, replacing any existing file.
pub fn write_lines<I, S>(path: &Path, lines: I) -> SourceResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = fs::File::create(path).map_err(|e| SourceError::write(path, e))?;
    let mut writer = std::io::BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|e| SourceError::write(path, e))?;
    }

    writer.flush().map_err(|e| SourceError::write(path, e))
}
