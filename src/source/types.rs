use crate::error::FieldLoadError;
use crate::form::{FormField, FormGraph};
use crate::graph::collect_fields;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Classification of a data source relative to a target node.
///
/// Global sources are available regardless of graph position; Direct sources
/// sit one edge upstream of the target, Transitive sources further away. The
/// classification is computed fresh per target node — it is never a global
/// property of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    Global,
    Direct,
    Transitive,
}

impl SourceType {
    /// Display priority: Global first, then Transitive, then Direct.
    pub(crate) fn priority(self) -> u8 {
        match self {
            SourceType::Global => 0,
            SourceType::Transitive => 1,
            SourceType::Direct => 2,
        }
    }
}

impl FromStr for SourceType {
    type Err = crate::error::FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Global" => Ok(SourceType::Global),
            "Direct" => Ok(SourceType::Direct),
            "Transitive" => Ok(SourceType::Transitive),
            other => Err(crate::error::FilterParseError::UnknownSourceType(
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Global => write!(f, "Global"),
            SourceType::Direct => write!(f, "Direct"),
            SourceType::Transitive => write!(f, "Transitive"),
        }
    }
}

/// A lazy, potentially remote producer of a source's fields.
///
/// Implementations carry no memoization; callers that want caching and
/// single-flight behavior go through a `ResolverSession`.
#[async_trait]
pub trait FieldSource: Send + Sync {
    async fn load_fields(&self) -> Result<Vec<FormField>, FieldLoadError>;
}

/// A candidate upstream supplier of field values for some target node.
#[derive(Clone)]
pub struct DataSource {
    pub id: String,
    pub label: String,
    pub source_type: Option<SourceType>,
    loader: Arc<dyn FieldSource>,
}

impl DataSource {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        source_type: Option<SourceType>,
        loader: Arc<dyn FieldSource>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            source_type,
            loader,
        }
    }

    /// Invokes the underlying producer. Re-invocable; every call triggers a
    /// fresh load.
    pub async fn load_fields(&self) -> Result<Vec<FormField>, FieldLoadError> {
        self.loader.load_fields().await
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("source_type", &self.source_type)
            .finish_non_exhaustive()
    }
}

/// Field producer backed by the graph: collects the field schemas of one
/// node and its ancestors.
pub struct GraphFieldSource {
    graph: Arc<FormGraph>,
    node_id: String,
}

impl GraphFieldSource {
    pub fn new(graph: Arc<FormGraph>, node_id: impl Into<String>) -> Self {
        Self {
            graph,
            node_id: node_id.into(),
        }
    }
}

#[async_trait]
impl FieldSource for GraphFieldSource {
    async fn load_fields(&self) -> Result<Vec<FormField>, FieldLoadError> {
        let Some(node) = self.graph.node(&self.node_id) else {
            return Ok(Vec::new());
        };
        Ok(collect_fields(node, &self.graph))
    }
}

/// Field producer over a fixed list; used for global sources and tests.
pub struct StaticFieldSource {
    fields: Vec<FormField>,
}

impl StaticFieldSource {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }
}

#[async_trait]
impl FieldSource for StaticFieldSource {
    async fn load_fields(&self) -> Result<Vec<FormField>, FieldLoadError> {
        Ok(self.fields.clone())
    }
}
