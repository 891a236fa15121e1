//! Domain types shared by the hash and streaming resolvers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A film to locate in the dump: a title plus an optional release year.
///
/// Queries carry no identity of their own; callers keep results in a
/// sequence parallel to the queries they submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub name: String,
    pub year: Option<u32>,
}

impl Query {
    pub fn new(name: impl Into<String>, year: Option<u32>) -> Self {
        Self { name: name.into(), year }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidQuery("query name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// How constrained a matching pattern is. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Specificity {
    /// Bare name.
    Name = 1,
    /// Name followed by the "film" qualifier.
    Film = 2,
    /// Name, year and the "film" qualifier.
    YearFilm = 3,
}

impl Specificity {
    pub fn score(self) -> u8 {
        self as u8
    }
}

/// One search unit's proposal for a query.
///
/// `score` is `-1` when nothing matched; such a candidate never carries a
/// title or url. Use [`Candidate::none`] and [`Candidate::matched`] rather
/// than building the struct by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub score: i32,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl Candidate {
    pub const NO_MATCH: i32 = -1;

    pub fn none() -> Self {
        Self { score: Self::NO_MATCH, title: None, url: None }
    }

    pub fn matched(specificity: Specificity, title: String, url: String) -> Self {
        Self { score: i32::from(specificity.score()), title: Some(title), url: Some(url) }
    }

    pub fn is_match(&self) -> bool {
        self.score != Self::NO_MATCH
    }
}

impl Default for Candidate {
    fn default() -> Self {
        Self::none()
    }
}

/// The externally visible result of resolving one query.
///
/// Every field is `None` when the query was not found. `abstract_text` is
/// only ever populated by the hash strategy; the streaming strategies report
/// title and url only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDocument {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Specificity of the pattern or probe that produced this document.
    pub score: Option<u8>,
}

impl ResolvedDocument {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn is_found(&self) -> bool {
        self.title.is_some() || self.url.is_some()
    }
}

impl From<Candidate> for ResolvedDocument {
    fn from(c: Candidate) -> Self {
        if !c.is_match() {
            return Self::not_found();
        }
        Self {
            title: c.title,
            url: c.url,
            abstract_text: None,
            score: u8::try_from(c.score).ok(),
        }
    }
}

/// Counts over a batch of resolved documents, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub resolved: usize,
    pub total: usize,
}

impl Resolution {
    pub fn of(docs: &[ResolvedDocument]) -> Self {
        Self { resolved: docs.iter().filter(|d| d.is_found()).count(), total: docs.len() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_blank_name_is_invalid() {
        assert!(matches!(Query::new("", None).validate(), Err(Error::InvalidQuery(_))));
        assert!(matches!(Query::new("   ", Some(1995)).validate(), Err(Error::InvalidQuery(_))));
        assert!(Query::new("Heat", Some(1995)).validate().is_ok());
    }

    #[test]
    fn unmatched_candidate_converts_to_empty_document() {
        let doc = ResolvedDocument::from(Candidate::none());
        assert_eq!(doc, ResolvedDocument::not_found());
        assert!(!doc.is_found());
    }

    #[test]
    fn matched_candidate_keeps_score_and_drops_abstract() {
        let c = Candidate::matched(Specificity::YearFilm, "Heat (1995 film)".into(), "u".into());
        let doc = ResolvedDocument::from(c);
        assert_eq!(doc.score, Some(3));
        assert_eq!(doc.title.as_deref(), Some("Heat (1995 film)"));
        assert!(doc.abstract_text.is_none());
    }

    #[test]
    fn specificity_orders_by_score() {
        assert!(Specificity::YearFilm > Specificity::Film);
        assert!(Specificity::Film > Specificity::Name);
        assert_eq!(Specificity::Film.score(), 2);
    }
}
