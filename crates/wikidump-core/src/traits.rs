use crate::error::Result;
use crate::types::{Query, ResolvedDocument};

/// A strategy that resolves queries against a dump.
///
/// Implementations return exactly one document per query, in query order.
/// A query that is not found yields [`ResolvedDocument::not_found`]; only
/// structural failures (I/O, invalid input) are errors.
pub trait DocumentResolver {
    fn resolve(&mut self, queries: &[Query]) -> Result<Vec<ResolvedDocument>>;
}
