use thiserror::Error;

/// Errors that can occur while loading a graph package.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Failed to parse graph package JSON: {0}")]
    JsonParseError(String),
}

/// Errors that can occur when converting a custom graph format into a `FormGraph`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Invalid custom graph data: {0}")]
    ValidationError(String),
}

/// Errors that can occur while a data source loads its fields.
#[derive(Error, Debug, Clone)]
pub enum FieldLoadError {
    #[error("Source '{source_id}' failed to load its fields: {message}")]
    SourceUnavailable { source_id: String, message: String },
}

/// Errors that can occur while parsing a source-type allow-list.
#[derive(Error, Debug, Clone)]
pub enum FilterParseError {
    #[error("Unknown source type '{0}' in filter (expected Global, Direct or Transitive)")]
    UnknownSourceType(String),
}

/// Errors that can occur against the mapping store.
///
/// Load and save failures are surfaced as-is: the engine does not retry and
/// never partially applies a save.
#[derive(Error, Debug, Clone)]
pub enum PersistenceError {
    #[error("Failed to load mappings: {0}")]
    LoadError(String),

    #[error("Failed to save mappings: {0}")]
    SaveError(String),
}
