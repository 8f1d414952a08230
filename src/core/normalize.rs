use std::collections::BTreeSet;

/// Normalize a name for comparison: trim, lowercase, collapse runs of
/// internal whitespace to a single space.
///
/// "Pit  Bull " and "pit bull" normalize to the same string, so casing and
/// whitespace never depress a similarity score.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Build a normalized breed set from raw breed names, dropping blanks.
///
/// BTreeSet keeps iteration order stable so shared-breed lists come out
/// deterministic.
pub fn breed_set<'a, I>(breeds: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    breeds
        .into_iter()
        .map(|b| normalize(b))
        .filter(|b| !b.is_empty())
        .collect()
}

/// Jaccard index of two sets: |A ∩ B| / |A ∪ B|.
///
/// Both sets empty is defined as 0.0, not NaN, so downstream sorting stays
/// total.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;

    intersection / union
}
