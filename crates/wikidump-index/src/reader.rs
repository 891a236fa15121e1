//! Random-access extraction of one record from the dump.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use wikidump_core::config::DEFAULT_MAX_ABSTRACT_LINES;
use wikidump_core::error::{Error, Result};
use wikidump_core::patterns::{TITLE_PREFIX, TITLE_SUFFIX};
use wikidump_core::ResolvedDocument;

const URL_OPEN: &str = "<url>";
const URL_CLOSE: &str = "</url>";
const ABSTRACT_OPEN: &str = "<abstract>";
const ABSTRACT_CLOSE: &str = "</abstract>";

/// Reads records at known byte offsets.
///
/// Owns its handle; the cursor position is private to this reader.
pub struct RecordReader<R> {
    inner: BufReader<R>,
    len: u64,
    max_abstract_lines: usize,
    source: PathBuf,
}

impl RecordReader<File> {
    pub fn open(dump: &Path) -> Result<Self> {
        let file = File::open(dump).map_err(|e| Error::io(dump, e))?;
        Self::new(file, dump)
    }
}

impl<R: Read + Seek> RecordReader<R> {
    pub fn new(mut inner: R, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let len = inner.seek(SeekFrom::End(0)).map_err(|e| Error::io(&source, e))?;
        Ok(Self { inner: BufReader::new(inner), len, max_abstract_lines: DEFAULT_MAX_ABSTRACT_LINES, source })
    }

    pub fn with_max_abstract_lines(mut self, n: usize) -> Self {
        self.max_abstract_lines = n.max(1);
        self
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the record whose title line starts at `offset`.
    ///
    /// Missing or malformed fields come back as `None`; only an offset past
    /// the end of the dump or an I/O failure is an error.
    pub fn read(&mut self, offset: u64) -> Result<ResolvedDocument> {
        if offset > self.len {
            return Err(Error::Seek { offset, len: self.len });
        }
        self.inner.seek(SeekFrom::Start(offset)).map_err(|e| Error::io(&self.source, e))?;
        let title_line = self.next_line()?.unwrap_or_default();
        let url_line = self.next_line()?.unwrap_or_default();
        let abstract_text = self.read_abstract(offset)?;

        let title = capture_between(&title_line, TITLE_PREFIX, TITLE_SUFFIX).map(str::to_string);
        let url = capture_between(&url_line, URL_OPEN, URL_CLOSE).map(str::to_string);
        if url.is_none() {
            warn!(offset, "record has no url line");
        }
        Ok(ResolvedDocument { title, url, abstract_text, score: None })
    }

    /// Collects the abstract that must start on the line after the url.
    fn read_abstract(&mut self, offset: u64) -> Result<Option<String>> {
        let mut parts: Vec<String> = Vec::new();
        while parts.len() < self.max_abstract_lines {
            let Some(line) = self.next_line()? else {
                return Ok(None);
            };
            let line = line.trim();
            if parts.is_empty() && !line.contains(ABSTRACT_OPEN) {
                debug!(offset, "no abstract after url line");
                return Ok(None);
            }
            parts.push(line.to_string());
            if line.contains(ABSTRACT_CLOSE) {
                let joined = parts.join(" ");
                return Ok(capture_between(&joined, ABSTRACT_OPEN, ABSTRACT_CLOSE).map(str::to_string));
            }
        }
        warn!(offset, limit = self.max_abstract_lines, "abstract not closed within line limit");
        Ok(None)
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.inner.read_until(b'\n', &mut buf).map_err(|e| Error::io(&self.source, e))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Text between the first `open` and the last `close` that follows it.
fn capture_between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let end = text[start..].rfind(close)?;
    Some(&text[start..start + end])
}
