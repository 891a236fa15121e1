use wikidump_core::{Candidate, Query};

/// Reduces batch-major scan results to one candidate per query.
///
/// The highest score wins; among equal scores the earliest batch wins, so
/// the outcome follows dump order and is deterministic. A query that never
/// matched gets [`Candidate::none`].
pub fn select(queries: &[Query], batches: Vec<Vec<Candidate>>) -> Vec<Candidate> {
    transpose(queries.len(), batches).into_iter().map(best_of).collect()
}

/// Query-major view of batch-major results: one list per query, in batch order.
pub fn transpose(query_count: usize, batches: Vec<Vec<Candidate>>) -> Vec<Vec<Candidate>> {
    let mut per_query = vec![Vec::with_capacity(batches.len()); query_count];
    for batch in batches {
        for (list, candidate) in per_query.iter_mut().zip(batch) {
            list.push(candidate);
        }
    }
    per_query
}

fn best_of(candidates: Vec<Candidate>) -> Candidate {
    // strict comparison keeps the first of equal scores
    candidates
        .into_iter()
        .fold(Candidate::none(), |best, c| if c.score > best.score { c } else { best })
}
