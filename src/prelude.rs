//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so embedders can
//! pull in the core surface with a single `use`.

// Graph model
pub use crate::form::{Edge, FlowPackage, FormField, FormGraph, FormNode, IntoFormGraph, RawForm};
pub use crate::graph::{GraphIndex, collect_fields};

// Source resolution
pub use crate::source::{
    DataSource, FieldSource, ResolverSession, SourceResolver, SourceType, SourceTypeFilter,
    StaticFieldSource, compare_sources, sort_sources,
};

// Mappings
pub use crate::mapping::{
    FieldMapping, MappingEntry, MappingSet, MappingStore, MemoryMappingStore,
    ResolutionSequencer, UNRESOLVED_SOURCE_LABEL, resolve_mapping_text,
};

// Error types
pub use crate::error::{FieldLoadError, GraphError, PersistenceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
