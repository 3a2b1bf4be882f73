use crate::source::types::DataSource;
use std::cmp::Ordering;

/// Total display order over sources.
///
/// Primary key is the classification priority (Global, then Transitive,
/// then Direct; unclassified sources last). Secondary key is a
/// case-insensitive label comparison with a case-sensitive tiebreak so the
/// order stays deterministic.
pub fn compare_sources(a: &DataSource, b: &DataSource) -> Ordering {
    rank(a)
        .cmp(&rank(b))
        .then_with(|| compare_labels(&a.label, &b.label))
}

/// Stable in-place sort by [`compare_sources`].
pub fn sort_sources(sources: &mut [DataSource]) {
    sources.sort_by(compare_sources);
}

fn rank(source: &DataSource) -> u8 {
    source.source_type.map_or(u8::MAX, |t| t.priority())
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
