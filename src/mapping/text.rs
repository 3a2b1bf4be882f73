use crate::error::FieldLoadError;
use crate::mapping::payload::FieldMapping;
use crate::source::{DataSource, ResolverSession};
use ahash::AHashMap;
use std::sync::Mutex;

/// Sentinel rendered in place of the source label when a stored mapping
/// references a source that no longer exists in the resolved list.
pub const UNRESOLVED_SOURCE_LABEL: &str = "(unknown source)";

/// Renders a stored mapping as `"<originalTitle>: <sourceLabel>.<fieldLabel>"`.
///
/// The source is looked up by id in the resolved source list for the target.
/// When found, its fields are loaded through the session and the field label
/// is the field's name, falling back to the raw field id if the field is
/// gone or nameless. When the source itself is gone, the source label is the
/// explicit [`UNRESOLVED_SOURCE_LABEL`] sentinel.
///
/// A load failure on a found source is surfaced to the caller.
pub async fn resolve_mapping_text(
    original_title: &str,
    mapping: &FieldMapping,
    sources: &[DataSource],
    session: &ResolverSession,
) -> Result<String, FieldLoadError> {
    let Some(source) = sources.iter().find(|s| s.id == mapping.source_form_id) else {
        log::warn!(
            "Mapping references unknown source '{}'; rendering unresolved",
            mapping.source_form_id
        );
        return Ok(format!(
            "{original_title}: {UNRESOLVED_SOURCE_LABEL}.{}",
            mapping.source_field_id
        ));
    };

    let fields = session.load_fields(source).await?;
    let field_label = fields
        .iter()
        .find(|f| f.id == mapping.source_field_id)
        .map(|f| f.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| mapping.source_field_id.clone());

    Ok(format!("{original_title}: {}.{field_label}", source.label))
}

/// Per-field monotonic request counters for display-text resolution.
///
/// Resolving a mapping's text suspends on a field load; without ordering, a
/// slow load issued for an old mapping can complete after a newer one and
/// stomp its result. Callers take a ticket before resolving and check it
/// after: a completed resolution whose ticket is stale gets discarded.
#[derive(Default)]
pub struct ResolutionSequencer {
    latest: Mutex<AHashMap<(String, String), u64>>,
}

/// Proof of a resolution request issued for one target field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTicket {
    key: (String, String),
    seq: u64,
}

impl ResolutionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket for `(target_node_id, target_field_id)`,
    /// invalidating every ticket issued for that field before it.
    pub fn begin(&self, target_node_id: &str, target_field_id: &str) -> ResolutionTicket {
        let key = (target_node_id.to_string(), target_field_id.to_string());
        let mut latest = self.latest.lock().expect("sequencer lock poisoned");
        let seq = latest.entry(key.clone()).or_insert(0);
        *seq += 1;
        ResolutionTicket { key, seq: *seq }
    }

    /// Whether no newer request has been issued for the ticket's field.
    pub fn is_current(&self, ticket: &ResolutionTicket) -> bool {
        let latest = self.latest.lock().expect("sequencer lock poisoned");
        latest.get(&ticket.key) == Some(&ticket.seq)
    }

    /// Resolves a mapping's display text, returning `Ok(None)` when a newer
    /// request for the same target field was issued while this one was in
    /// flight (last *issued* wins, never last completed).
    pub async fn resolve(
        &self,
        target_node_id: &str,
        target_field_id: &str,
        original_title: &str,
        mapping: &FieldMapping,
        sources: &[DataSource],
        session: &ResolverSession,
    ) -> Result<Option<String>, FieldLoadError> {
        let ticket = self.begin(target_node_id, target_field_id);
        let text = resolve_mapping_text(original_title, mapping, sources, session).await?;
        if self.is_current(&ticket) {
            Ok(Some(text))
        } else {
            log::debug!(
                "Discarding stale resolution for field '{target_field_id}' on node '{target_node_id}'"
            );
            Ok(None)
        }
    }
}
