//! # Prefill - Source Resolution for Hierarchical Form Graphs
//!
//! **Prefill** answers one question: for a field on a node in a form graph,
//! which upstream entities may supply that field's value? Forms are vertices
//! in a directed acyclic graph whose edges mean "prerequisite of"; a field
//! can be prefilled from any ancestor form or from a fixed set of global
//! sources. The engine classifies and orders those sources, collects their
//! fields, renders stored mappings as human-readable text, and converts the
//! mapping structure to and from its flat persisted form.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic: it operates on a canonical [`FormGraph`]
//! model. The primary workflow is:
//!
//! 1.  **Load Your Graph**: Parse your graph payload into a
//!     [`form::FlowPackage`] (the JSON wire shape), or implement
//!     [`form::IntoFormGraph`] for your own structs.
//! 2.  **Resolve Sources**: Build a [`SourceResolver`] from the graph and
//!     your global sources, and resolve the candidate list for a target
//!     node, optionally restricted by a [`SourceTypeFilter`].
//! 3.  **Load Fields**: Open a [`ResolverSession`] and load fields through
//!     it; concurrent loads for the same source are deduplicated.
//! 4.  **Render Mappings**: Use [`mapping::resolve_mapping_text`] (or a
//!     [`mapping::ResolutionSequencer`] when updates can race) for display,
//!     and [`MappingSet`] to move between the nested structure and the flat
//!     [`mapping::MappingEntry`] payload a [`mapping::MappingStore`]
//!     persists.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prefill::prelude::*;
//! use std::sync::Arc;
//!
//! # fn run_example() -> prefill::prelude::Result<()> {
//! let package_json = std::fs::read_to_string("path/to/graph.json")?;
//! let graph = Arc::new(FormGraph::from_json(&package_json)?);
//!
//! let resolver = SourceResolver::new(Arc::clone(&graph), vec![]);
//! let mut sources = resolver.resolve("node-b", None);
//! sort_sources(&mut sources);
//!
//! let session = ResolverSession::new();
//! let runtime = tokio::runtime::Builder::new_current_thread().build()?;
//! let mapping = FieldMapping::new("node-a", "email");
//! let text = runtime.block_on(resolve_mapping_text(
//!     "Email",
//!     &mapping,
//!     &sources,
//!     &session,
//! ))?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod form;
pub mod graph;
pub mod mapping;
pub mod prelude;
pub mod source;

pub use form::FormGraph;
pub use mapping::MappingSet;
pub use source::{ResolverSession, SourceResolver, SourceTypeFilter};
