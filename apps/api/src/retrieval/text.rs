//! Small text-matching helpers shared by alias expansion and intent routing.

/// Lower-cases a name and collapses runs of whitespace, giving the canonical
/// key used by both the alias map and the intent router.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when `term` occurs in `haystack` without being glued to a neighbouring
/// letter or digit, so "r" matches "python or r" but not "worker".
///
/// Both arguments are expected to be lower-cased already.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    let term = term.trim();
    let (Some(first), Some(last)) = (term.chars().next(), term.chars().last()) else {
        return false;
    };

    haystack.match_indices(term).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = !first.is_alphanumeric()
            || haystack[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = !last.is_alphanumeric()
            || haystack[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
