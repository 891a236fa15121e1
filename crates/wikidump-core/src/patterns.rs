//! Pattern generation for film queries.
//!
//! A query expands into at most three matchers, most specific first:
//! `name .. year .. film`, `name .. film`, and the bare name. The streaming
//! scanner uses them as regular expressions over a block of lines; the hash
//! lookup uses the equivalent literal title lines as index keys.

use regex::Regex;

use crate::error::{Error, Result};
use crate::types::{Query, Specificity};

/// Literal wrapper around a record's title, as it appears in the dump.
pub const TITLE_PREFIX: &str = "<title>Wikipedia: ";
pub const TITLE_SUFFIX: &str = "</title>";

/// A compiled matcher over a multi-line text block.
///
/// Capture group 1 is the full title, group 2 the url.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub specificity: Specificity,
    pub matcher: Regex,
}

/// An exact title line to probe the hash index with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleProbe {
    pub specificity: Specificity,
    pub line: String,
}

/// Wraps a display title into the title line the dump uses for it.
pub fn title_line(title: &str) -> String {
    format!("{TITLE_PREFIX}{title}{TITLE_SUFFIX}")
}

/// Regex patterns for `query`, strictly descending in specificity.
///
/// The name is escaped, so titles containing regex metacharacters are
/// matched literally.
pub fn generate(query: &Query) -> Result<Vec<Pattern>> {
    query.validate()?;
    let name = regex::escape(&query.name);
    let mut bodies = Vec::with_capacity(3);
    if let Some(year) = query.year {
        bodies.push((Specificity::YearFilm, format!("{name}.*{year}.*film.*")));
    }
    bodies.push((Specificity::Film, format!("{name}.*film.*")));
    bodies.push((Specificity::Name, name));

    bodies
        .into_iter()
        .map(|(specificity, body)| {
            let source = format!(
                r"{}({}){}\s*<url>(.*)</url>",
                regex::escape(TITLE_PREFIX),
                body,
                regex::escape(TITLE_SUFFIX)
            );
            let matcher = Regex::new(&source)
                .map_err(|e| Error::InvalidQuery(format!("cannot compile pattern for {:?}: {e}", query.name)))?;
            Ok(Pattern { specificity, matcher })
        })
        .collect()
}

/// Literal title lines for `query`, in the same precedence as [`generate`].
pub fn title_probes(query: &Query) -> Result<Vec<TitleProbe>> {
    query.validate()?;
    let name = &query.name;
    let mut probes = Vec::with_capacity(3);
    if let Some(year) = query.year {
        probes.push(TitleProbe { specificity: Specificity::YearFilm, line: title_line(&format!("{name} ({year} film)")) });
    }
    probes.push(TitleProbe { specificity: Specificity::Film, line: title_line(&format!("{name} (film)")) });
    probes.push(TitleProbe { specificity: Specificity::Name, line: title_line(name) });
    Ok(probes)
}
