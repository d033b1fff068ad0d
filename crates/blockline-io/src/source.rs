//! Line sources: pull-based producers of terminator-inclusive lines

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{Error, Result};

/// A pull-based producer of lines.
///
/// Lines keep their original terminators (`\n` or `\r\n`); the final line of
/// a stream may carry none. `Ok(None)` signals end of input. Everything
/// upstream of this trait (decoding, connections, retries) is the source's
/// own business; consumers only ever see text lines or end of input.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>>;

    /// Completion hook, called once when a run over this source ends.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Reads terminator-inclusive lines from any buffered reader.
///
/// A line that is not valid UTF-8 is replaced by an empty line (keeping the
/// terminator it arrived with, if any) so one bad line cannot abort the rest
/// of the stream. Such lines are counted and logged.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    invalid_lines: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            invalid_lines: 0,
        }
    }

    /// Number of undecodable lines replaced so far.
    pub fn invalid_lines(&self) -> usize {
        self.invalid_lines
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(Some(line)),
            Err(err) => {
                self.invalid_lines += 1;
                let bytes = err.as_bytes();
                warn!(
                    line_bytes = bytes.len(),
                    "replacing undecodable line with an empty line"
                );
                let terminator = if bytes.ends_with(b"\r\n") {
                    "\r\n"
                } else if bytes.ends_with(b"\n") {
                    "\n"
                } else {
                    ""
                };
                Ok(Some(terminator.to_string()))
            }
        }
    }
}

/// Line source over a file on disk.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    inner: ReaderSource<BufReader<File>>,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: ReaderSource::new(BufReader::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn invalid_lines(&self) -> usize {
        self.inner.invalid_lines()
    }
}

impl LineSource for FileSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        self.inner.next_line()
    }
}

/// In-memory line source, the primary test vehicle.
pub struct MemorySource {
    lines: std::vec::IntoIter<String>,
}

impl MemorySource {
    /// Splits `text` into terminator-inclusive lines.
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        Self {
            lines: lines.into_iter(),
        }
    }

    /// Uses `lines` as-is; each entry should already carry its terminator.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter(),
        }
    }
}

impl LineSource for MemorySource {
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next())
    }
}
