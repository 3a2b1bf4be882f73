use crate::error::GraphError;
use crate::form::types::{Edge, FieldItems, FieldSpec, FlowPackage, FormNode, RawForm};
use crate::graph::GraphIndex;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A resolved field projection used for matching and display.
///
/// `name` falls back to the raw field id when the schema carries no title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub avantos_type: String,
    pub format: Option<String>,
    pub items: Option<FieldItems>,
}

impl FormField {
    /// Projects a schema property into a `FormField`.
    pub fn from_spec(id: &str, spec: &FieldSpec) -> Self {
        Self {
            id: id.to_string(),
            name: spec
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| id.to_string()),
            field_type: spec.field_type.clone(),
            avantos_type: spec.avantos_type.clone().unwrap_or_default(),
            format: spec.format.clone(),
            items: spec.items.clone(),
        }
    }

    /// Whether this field can supply a value for a target field of the given
    /// avantos type and (for arrays) item constraints.
    ///
    /// Array targets additionally require an equal item type and an equal
    /// enum set; enum order is irrelevant.
    pub fn accepts(&self, target_avantos_type: &str, target_items: Option<&FieldItems>) -> bool {
        if self.avantos_type != target_avantos_type {
            return false;
        }
        if target_avantos_type == "array" {
            let (Some(own), Some(target)) = (self.items.as_ref(), target_items) else {
                return false;
            };
            if own.item_type != target.item_type {
                return false;
            }
            return canonical_options(own) == canonical_options(target);
        }
        true
    }
}

fn canonical_options(items: &FieldItems) -> Option<Vec<String>> {
    items
        .options
        .as_ref()
        .map(|opts| opts.iter().map(|v| v.to_string()).sorted().collect())
}

impl RawForm {
    /// Returns the form's fields in display order: fields referenced by the
    /// UI schema first (in element order), unreferenced fields appended in
    /// schema declaration order.
    pub fn ordered_fields(&self) -> Vec<FormField> {
        let mut fields = Vec::with_capacity(self.field_schema.properties.len());
        let mut emitted: AHashSet<&str> = AHashSet::new();

        for element in &self.ui_schema.elements {
            let Some(field_id) = element.scope.rsplit('/').next() else {
                continue;
            };
            if let Some(spec) = self.field_schema.properties.get(field_id)
                && emitted.insert(field_id)
            {
                fields.push(FormField::from_spec(field_id, spec));
            }
        }
        for (field_id, spec) in &self.field_schema.properties {
            if !emitted.contains(field_id.as_str()) {
                fields.push(FormField::from_spec(field_id, spec));
            }
        }
        fields
    }
}

/// The canonical in-memory model of a form graph: nodes, their form
/// metadata, and a prebuilt ancestry index over the edges.
///
/// This is the target structure for any custom graph format conversion.
#[derive(Debug, Clone)]
pub struct FormGraph {
    nodes: Vec<FormNode>,
    forms: Vec<RawForm>,
    node_lookup: AHashMap<String, usize>,
    form_lookup: AHashMap<String, usize>,
    index: GraphIndex,
}

impl FormGraph {
    pub fn new(nodes: Vec<FormNode>, edges: &[Edge], forms: Vec<RawForm>) -> Self {
        let node_lookup = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        let form_lookup = forms
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();

        Self {
            nodes,
            forms,
            node_lookup,
            form_lookup,
            index: GraphIndex::from_edges(edges),
        }
    }

    pub fn from_package(package: FlowPackage) -> Self {
        Self::new(package.nodes, &package.edges, package.forms)
    }

    /// Parses a graph package from its JSON wire representation.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let package: FlowPackage =
            serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))?;
        Ok(Self::from_package(package))
    }

    pub fn nodes(&self) -> &[FormNode] {
        &self.nodes
    }

    pub fn node(&self, node_id: &str) -> Option<&FormNode> {
        self.node_lookup.get(node_id).map(|&i| &self.nodes[i])
    }

    pub fn form(&self, form_id: &str) -> Option<&RawForm> {
        self.form_lookup.get(form_id).map(|&i| &self.forms[i])
    }

    /// Resolves the form metadata a node's `component_id` points at.
    pub fn form_for(&self, node: &FormNode) -> Option<&RawForm> {
        self.form(&node.data.component_id)
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }
}
