//! Destinations for restored lines.
//!
//! A console sink streams each line as soon as it is produced; a file sink
//! collects the lines and writes them when finished. Both receive exactly the
//! same line content in the same order.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::files::write_lines;

/// Receives restored lines in input order.
#[cfg_attr(test, mockall::automock)]
pub trait LineSink {
    /// Accepts the next output line (without a trailing newline).
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Called once after the last line.
    fn finish(&mut self) -> io::Result<()>;
}

/// Streams lines to any writer, typically stdout.
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleSink<io::Stdout> {
    /// Creates a sink on the process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineSink for ConsoleSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Collects lines and persists them to a file on `finish`.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lines: Vec<String>,
}

impl FileSink {
    /// Creates a sink that will write to `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lines: Vec::new(),
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        write_lines(&self.path, &self.lines).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_and_file_sinks_agree() {
        let lines = ["The <Cat> sat", "", "on ['mat', 'hat']"];

        let mut console = ConsoleSink::new(Vec::new());
        for line in lines {
            console.write_line(line).unwrap();
        }
        console.finish().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut file = FileSink::new(dir.path().join("restored.txt"));
        for line in lines {
            file.write_line(line).unwrap();
        }
        file.finish().unwrap();

        let written = std::fs::read(file.path()).unwrap();
        assert_eq!(console.into_inner(), written);
    }

    #[test]
    fn test_file_sink_writes_nothing_before_finish() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("late.txt"));
        sink.write_line("pending").unwrap();
        assert!(!sink.path().exists());
    }
}
