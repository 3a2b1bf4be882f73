use crate::error::FilterParseError;
use crate::form::FormGraph;
use crate::source::types::{DataSource, GraphFieldSource, SourceType};
use ahash::AHashSet;
use std::sync::Arc;

/// An explicit allow-list of source classifications.
///
/// The original system read this from an ambient query parameter; here it is
/// always passed explicitly into [`SourceResolver::resolve`].
#[derive(Debug, Clone, Default)]
pub struct SourceTypeFilter {
    allowed: AHashSet<SourceType>,
}

impl SourceTypeFilter {
    /// Parses a comma-separated tag list, e.g. `"Global,Direct"`.
    pub fn parse(param: &str) -> Result<Self, FilterParseError> {
        param
            .split(',')
            .map(|tag| tag.trim().parse::<SourceType>())
            .collect()
    }

    pub fn allows(&self, source: &DataSource) -> bool {
        source
            .source_type
            .is_some_and(|t| self.allowed.contains(&t))
    }
}

impl FromIterator<SourceType> for SourceTypeFilter {
    fn from_iter<I: IntoIterator<Item = SourceType>>(iter: I) -> Self {
        Self {
            allowed: iter.into_iter().collect(),
        }
    }
}

/// Produces the candidate source list for a target node: the fixed global
/// sources concatenated with one source per ancestor, classified by
/// ancestry level.
pub struct SourceResolver {
    graph: Arc<FormGraph>,
    globals: Vec<DataSource>,
}

impl SourceResolver {
    /// Global sources are normalized to `SourceType::Global` regardless of
    /// what the provider tagged them with.
    pub fn new(graph: Arc<FormGraph>, globals: Vec<DataSource>) -> Self {
        let globals = globals
            .into_iter()
            .map(|mut source| {
                source.source_type = Some(SourceType::Global);
                source
            })
            .collect();
        Self { graph, globals }
    }

    /// Resolves the candidate sources for `target_node_id`, excluding the
    /// target itself. Ancestors one edge upstream classify as Direct, deeper
    /// ones as Transitive; each carries a lazy field loader scoped to that
    /// ancestor node. With a filter, only sources whose classification is on
    /// the allow-list are returned.
    pub fn resolve(
        &self,
        target_node_id: &str,
        filter: Option<&SourceTypeFilter>,
    ) -> Vec<DataSource> {
        let mut sources = self.globals.clone();

        for (ancestor_id, level) in self.graph.index().ancestor_levels(target_node_id) {
            let Some(node) = self.graph.node(&ancestor_id) else {
                log::debug!("Ancestor '{ancestor_id}' has no node entry; skipping");
                continue;
            };
            let source_type = if level == 1 {
                SourceType::Direct
            } else {
                SourceType::Transitive
            };
            sources.push(DataSource::new(
                node.id.clone(),
                node.data.name.clone(),
                Some(source_type),
                Arc::new(GraphFieldSource::new(Arc::clone(&self.graph), &node.id)),
            ));
        }

        match filter {
            Some(filter) => sources.into_iter().filter(|s| filter.allows(s)).collect(),
            None => sources,
        }
    }
}
