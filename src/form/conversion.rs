use super::definition::FormGraph;
use crate::error::GraphConversionError;

/// A trait for custom data models that can be converted into a `FormGraph`.
///
/// This is the primary extension point for making the engine format-agnostic.
/// Implement it on your own structs to provide a translation layer from your
/// graph payload format into the canonical model.
///
/// # Example
///
/// ```rust,no_run
/// use prefill::prelude::*;
/// use prefill::error::GraphConversionError;
/// use prefill::form::{Edge, IntoFormGraph};
///
/// // 1. Define your custom structs for parsing your format.
/// struct MyBlueprint { node_ids: Vec<String>, links: Vec<(String, String)> }
///
/// // 2. Implement `IntoFormGraph` for your top-level struct.
/// impl IntoFormGraph for MyBlueprint {
///     fn into_form_graph(self) -> std::result::Result<FormGraph, GraphConversionError> {
///         let edges: Vec<Edge> = self
///             .links
///             .into_iter()
///             .map(|(source, target)| Edge { source, target })
///             .collect();
///         // Your logic to build `FormNode` and `RawForm` lists as well.
///         Ok(FormGraph::new(vec![], &edges, vec![]))
///     }
/// }
/// ```
pub trait IntoFormGraph {
    /// Consumes the object and converts it into the canonical graph model.
    fn into_form_graph(self) -> Result<FormGraph, GraphConversionError>;
}

impl IntoFormGraph for crate::form::FlowPackage {
    fn into_form_graph(self) -> Result<FormGraph, GraphConversionError> {
        Ok(FormGraph::from_package(self))
    }
}
