use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;

use wikidump_core::error::Result;
use wikidump_core::patterns::title_probes;
use wikidump_core::traits::DocumentResolver;
use wikidump_core::{Query, ResolvedDocument};

use crate::index::HashIndex;
use crate::reader::RecordReader;

/// Point lookups through a prebuilt [`HashIndex`].
///
/// Each query costs at most three index probes and one seek, whatever the
/// size of the dump.
pub struct HashLookup<'a, R> {
    index: &'a HashIndex,
    reader: RecordReader<R>,
}

impl<'a> HashLookup<'a, File> {
    pub fn open(dump: &Path, index: &'a HashIndex) -> Result<Self> {
        Ok(Self::new(index, RecordReader::open(dump)?))
    }
}

impl<'a, R: Read + Seek> HashLookup<'a, R> {
    pub fn new(index: &'a HashIndex, reader: RecordReader<R>) -> Self {
        Self { index, reader }
    }

    /// Resolves one query, stopping at the most specific title line present.
    pub fn lookup_one(&mut self, query: &Query) -> Result<ResolvedDocument> {
        for probe in title_probes(query)? {
            if let Some(offset) = self.index.get(&probe.line) {
                debug!(line = %probe.line, offset, "index hit");
                let mut doc = self.reader.read(offset)?;
                doc.score = Some(probe.specificity.score());
                return Ok(doc);
            }
        }
        debug!(name = %query.name, year = ?query.year, "no index hit");
        Ok(ResolvedDocument::not_found())
    }
}

impl<R: Read + Seek> DocumentResolver for HashLookup<'_, R> {
    fn resolve(&mut self, queries: &[Query]) -> Result<Vec<ResolvedDocument>> {
        queries.iter().map(|q| self.lookup_one(q)).collect()
    }
}
