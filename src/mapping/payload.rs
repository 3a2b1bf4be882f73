use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A stored assignment of a target field to a field on a source form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub source_form_id: String,
    pub source_field_id: String,
}

impl FieldMapping {
    pub fn new(source_form_id: impl Into<String>, source_field_id: impl Into<String>) -> Self {
        Self {
            source_form_id: source_form_id.into(),
            source_field_id: source_field_id.into(),
        }
    }
}

/// Flat wire record for one persisted mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub target_node_id: String,
    pub target_field_id: String,
    pub source_form_id: String,
    pub source_field_id: String,
}

/// The nested in-memory mapping structure:
/// target node id -> target field id -> mapping.
///
/// Both levels are insertion-ordered, so flattening a restructured payload
/// reproduces the original entry order. A `None` value means "explicitly
/// unmapped": it shadows nothing at this layer but is dropped when the set
/// is flattened for persistence.
///
/// No referential validation happens in either direction; a source form or
/// field id that no longer exists passes through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingSet {
    targets: IndexMap<String, IndexMap<String, Option<FieldMapping>>>,
}

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the nested structure from a flat entry list.
    ///
    /// A duplicate `(targetNodeId, targetFieldId)` key keeps the position of
    /// its first occurrence, and the later entry's value wins.
    pub fn restructure(entries: &[MappingEntry]) -> Self {
        let mut set = Self::new();
        for entry in entries {
            set.targets.entry(entry.target_node_id.clone()).or_default().insert(
                entry.target_field_id.clone(),
                Some(FieldMapping::new(
                    entry.source_form_id.clone(),
                    entry.source_field_id.clone(),
                )),
            );
        }
        set
    }

    /// Flattens the nested structure back into the persisted entry list,
    /// iterating targets and fields in insertion order. Cleared (`None`)
    /// entries are omitted.
    pub fn flatten(&self) -> Vec<MappingEntry> {
        self.targets
            .iter()
            .flat_map(|(node_id, fields)| {
                fields.iter().filter_map(|(field_id, mapping)| {
                    mapping.as_ref().map(|m| MappingEntry {
                        target_node_id: node_id.clone(),
                        target_field_id: field_id.clone(),
                        source_form_id: m.source_form_id.clone(),
                        source_field_id: m.source_field_id.clone(),
                    })
                })
            })
            .collect_vec()
    }

    pub fn get(&self, target_node_id: &str, target_field_id: &str) -> Option<&FieldMapping> {
        self.targets
            .get(target_node_id)?
            .get(target_field_id)?
            .as_ref()
    }

    /// Assigns a mapping; last write wins.
    pub fn set(&mut self, target_node_id: &str, target_field_id: &str, mapping: FieldMapping) {
        self.targets
            .entry(target_node_id.to_string())
            .or_default()
            .insert(target_field_id.to_string(), Some(mapping));
    }

    /// Marks a field as explicitly unmapped. The marker survives in memory
    /// (see [`is_cleared`](Self::is_cleared)) but is not persisted.
    pub fn clear(&mut self, target_node_id: &str, target_field_id: &str) {
        self.targets
            .entry(target_node_id.to_string())
            .or_default()
            .insert(target_field_id.to_string(), None);
    }

    /// Whether the field carries the explicit "unmapped" marker, as opposed
    /// to never having been mapped at all. Both read as `None` through
    /// [`get`](Self::get) and neither survives flattening.
    pub fn is_cleared(&self, target_node_id: &str, target_field_id: &str) -> bool {
        matches!(
            self.targets
                .get(target_node_id)
                .and_then(|fields| fields.get(target_field_id)),
            Some(None)
        )
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
