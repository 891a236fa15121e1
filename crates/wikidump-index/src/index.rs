use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use wikidump_core::error::{Error, Result};

/// Bumped whenever the on-disk layout of [`HashIndex::save`] changes.
pub const FORMAT_VERSION: u32 = 1;

/// Stripped line text -> byte offset of the line's first byte in the dump.
///
/// Built in one sequential pass and never updated afterwards. When the same
/// stripped line occurs several times, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashIndex {
    entries: HashMap<String, u64>,
    dump_len: u64,
}

#[derive(Serialize, Deserialize)]
struct Envelope<E> {
    format_version: u32,
    dump_len: u64,
    entries: E,
}

impl HashIndex {
    pub fn build(dump: &Path) -> Result<Self> {
        Self::build_with_progress(dump, ProgressBar::hidden())
    }

    /// Same as [`HashIndex::build`], advancing `pb` by bytes consumed.
    pub fn build_with_progress(dump: &Path, pb: ProgressBar) -> Result<Self> {
        let file = File::open(dump).map_err(|e| Error::io(dump, e))?;
        let len = file.metadata().map_err(|e| Error::io(dump, e))?.len();
        pb.set_length(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        info!(dump = %dump.display(), bytes = len, "building hash index");
        let index = Self::from_reader(BufReader::new(file), |pos| pb.set_position(pos))
            .map_err(|e| Error::io(dump, e))?;
        pb.finish_with_message("index built");
        info!(entries = index.len(), "hash index built");
        Ok(index)
    }

    /// Indexes every non-empty stripped line of `reader`.
    pub fn from_reader<R: BufRead>(mut reader: R, mut on_progress: impl FnMut(u64)) -> std::io::Result<Self> {
        let mut entries = HashMap::new();
        let mut buf = Vec::new();
        let mut offset = 0u64;
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf)?;
            if n == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let stripped = line.trim();
            if !stripped.is_empty() {
                entries.insert(stripped.to_string(), offset);
            }
            offset += n as u64;
            on_progress(offset);
        }
        Ok(Self { entries, dump_len: offset })
    }

    pub fn get(&self, line: &str) -> Option<u64> {
        self.entries.get(line).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Byte length of the dump this index was built from.
    pub fn dump_len(&self) -> u64 {
        self.dump_len
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let envelope = Envelope { format_version: FORMAT_VERSION, dump_len: self.dump_len, entries: &self.entries };
        serde_json::to_writer(&mut writer, &envelope).map_err(|e| Error::io(path, e.into()))?;
        writer.flush().map_err(|e| Error::io(path, e))?;
        info!(path = %path.display(), entries = self.len(), "hash index saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let envelope: Envelope<HashMap<String, u64>> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| {
                if e.is_io() {
                    Error::io(path, e.into())
                } else {
                    Error::IndexFormat { path: path.to_path_buf(), reason: e.to_string() }
                }
            })?;
        if envelope.format_version != FORMAT_VERSION {
            return Err(Error::IndexFormat {
                path: path.to_path_buf(),
                reason: format!("unsupported format version {} (expected {FORMAT_VERSION})", envelope.format_version),
            });
        }
        debug!(path = %path.display(), entries = envelope.entries.len(), "hash index loaded");
        Ok(Self { entries: envelope.entries, dump_len: envelope.dump_len })
    }

    /// Compares the dump's current length with the one recorded at build time.
    ///
    /// Returns `false` and logs a warning on mismatch. Equal lengths do not
    /// prove the dump is unchanged; detecting staleness reliably is left to
    /// the caller.
    pub fn check_dump(&self, dump: &Path) -> Result<bool> {
        let len = std::fs::metadata(dump).map_err(|e| Error::io(dump, e))?.len();
        if len != self.dump_len {
            warn!(dump = %dump.display(), expected = self.dump_len, actual = len, "dump size differs from index; index may be stale");
            return Ok(false);
        }
        Ok(true)
    }
}
