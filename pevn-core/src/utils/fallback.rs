//! Ordered fallback over optional sources.
//!
//! A source counts as present when it is `Some` and not the empty string.
//! Sources are consulted in the order given, so precedence is whatever the
//! call site lists first.

/// Return the first present source, if any.
pub fn first_present<I, S>(sources: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .flatten()
        .find(|value| !value.as_ref().is_empty())
        .map(|value| value.as_ref().to_string())
}

/// Return the first present source, or `default` when none is.
pub fn first_present_or<I, S>(sources: I, default: &str) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    first_present(sources).unwrap_or_else(|| default.to_string())
}
