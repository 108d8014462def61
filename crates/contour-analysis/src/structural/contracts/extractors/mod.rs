//! Backend route and frontend client extractors.

pub mod client;
pub mod express;

pub use client::ClientCallExtractor;
pub use express::ExpressRouteExtractor;

/// Alternation of escaped identifiers, longest first.
pub(crate) fn identifier_alternation(names: &[String]) -> String {
    let mut names: Vec<&String> = names.iter().collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();
    names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|")
}
