//! Applicant profile: the nested document, the canonical key vocabulary, and
//! the flattened key → value view the form filler reads from.

pub mod domain;
mod flatten;
mod key;

pub use domain::{PersonalProfile, ProfileError};
pub use flatten::{flatten, SYNTHETIC_AVAILABLE_FULL_TIME};
pub use key::CanonicalKey;

use serde::Serialize;
use std::collections::BTreeMap;

/// Scalar or short list value held by a flat profile slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Text(String),
    List(Vec<String>),
}

impl FlatValue {
    /// Rendering used when the value is typed into a control.
    pub fn render(&self) -> String {
        match self {
            FlatValue::Text(text) => text.clone(),
            FlatValue::List(items) => items.join(", "),
        }
    }
}

/// Canonical key → value mapping. Every vocabulary key owns a slot; an empty
/// slot means the profile has no data for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatProfile {
    slots: BTreeMap<CanonicalKey, Option<FlatValue>>,
}

impl FlatProfile {
    pub(crate) fn empty() -> Self {
        Self {
            slots: CanonicalKey::ALL.iter().map(|key| (*key, None)).collect(),
        }
    }

    pub(crate) fn set(&mut self, key: CanonicalKey, value: FlatValue) {
        self.slots.insert(key, Some(value));
    }

    pub(crate) fn set_text(&mut self, key: CanonicalKey, value: Option<&str>) {
        let cleaned = value
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| FlatValue::Text(text.to_string()));
        self.slots.insert(key, cleaned);
    }

    pub fn value(&self, key: CanonicalKey) -> Option<&FlatValue> {
        self.slots.get(&key).and_then(Option::as_ref)
    }

    pub fn text(&self, key: CanonicalKey) -> Option<String> {
        self.value(key).map(FlatValue::render)
    }

    pub fn has_slot(&self, key: CanonicalKey) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn filled_len(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_some()).count()
    }

    /// Overrides a slot, e.g. when the caller wants a one-off answer.
    pub fn with_value(mut self, key: CanonicalKey, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.set_text(key, Some(value.as_str()));
        self
    }
}
