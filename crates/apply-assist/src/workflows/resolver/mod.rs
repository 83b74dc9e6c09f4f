//! Field semantic resolver: maps free-text control signals to canonical keys.
//!
//! Matching is bidirectional substring containment over normalized text and
//! is ambiguous by construction. The synonym table's declaration order is the
//! tie-break, so a short signal such as `name` resolves to whichever entry's
//! alias contains it first (`firstName` with the built-in table) rather than
//! to the broadest key.

mod normalizer;
mod synonyms;

pub use normalizer::normalize_signal;
pub use synonyms::{SynonymEntry, SynonymTable};

use crate::workflows::form::ControlDescriptor;
use crate::workflows::profile::CanonicalKey;

/// Ordered resolver with aliases normalized once up front.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    entries: Vec<(CanonicalKey, Vec<String>)>,
}

impl FieldResolver {
    pub fn new() -> Self {
        Self::with_table(&SynonymTable::default())
    }

    pub fn with_table(table: &SynonymTable) -> Self {
        let entries = table
            .entries()
            .iter()
            .map(|entry| {
                let aliases = entry
                    .aliases
                    .iter()
                    .map(|alias| normalize_signal(alias))
                    .filter(|alias| !alias.is_empty())
                    .collect();
                (entry.key, aliases)
            })
            .collect();
        Self { entries }
    }

    /// Returns the first canonical key, in table order, with an alias that
    /// contains or is contained in the normalized signal.
    pub fn resolve(&self, signal: &str) -> Option<CanonicalKey> {
        let normalized = normalize_signal(signal);
        if normalized.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|(_, aliases)| {
                aliases.iter().any(|alias| {
                    normalized.contains(alias.as_str()) || alias.contains(normalized.as_str())
                })
            })
            .map(|(key, _)| *key)
    }

    pub fn resolve_control(&self, control: &ControlDescriptor) -> Option<CanonicalKey> {
        self.resolve(&control.signal_text())
    }
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new()
    }
}
