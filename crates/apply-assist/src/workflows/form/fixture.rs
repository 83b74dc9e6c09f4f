use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

use super::domain::{ChoiceOption, ControlHandle, ControlKind};
use super::page::{FormPage, PageError};

/// JSON description of a page: its visible text, whether a verification
/// challenge is showing, and its controls in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormFixture {
    pub page_text: String,
    pub challenge: bool,
    pub controls: Vec<FixtureControl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixtureControl {
    pub handle: ControlHandle,
    pub kind: ControlKind,
    pub name: Option<String>,
    pub id: Option<String>,
    pub label: String,
    /// Legend of the radio/checkbox group the control belongs to.
    pub group_label: String,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub accept: Option<String>,
    pub required: bool,
    /// Current value; for selects the selected option's value.
    pub value: String,
    /// `value` attribute of a radio or checkbox.
    pub option_value: Option<String>,
    pub checked: bool,
    pub options: Vec<ChoiceOption>,
    /// Every write to this control fails.
    pub broken: bool,
}

impl Default for FixtureControl {
    fn default() -> Self {
        Self {
            handle: ControlHandle::new(""),
            kind: ControlKind::SingleLineText,
            name: None,
            id: None,
            label: String::new(),
            group_label: String::new(),
            placeholder: None,
            aria_label: None,
            accept: None,
            required: false,
            value: String::new(),
            option_value: None,
            checked: false,
            options: Vec::new(),
            broken: false,
        }
    }
}

impl FixtureControl {
    pub fn new(handle: &str, kind: ControlKind) -> Self {
        Self {
            handle: ControlHandle::new(handle),
            kind,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read form fixture: {0}")]
    Io(#[from] std::io::Error),
    #[error("form fixture is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormFixture {
    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

/// [`FormPage`] over a [`FormFixture`] held in memory. A showing challenge is
/// reported once and then treated as solved.
#[derive(Debug)]
pub struct InMemoryPage {
    state: Mutex<FormFixture>,
}

impl InMemoryPage {
    pub fn new(fixture: FormFixture) -> Self {
        Self {
            state: Mutex::new(fixture),
        }
    }

    /// Current state of the page, including every write made so far.
    pub fn snapshot(&self) -> FormFixture {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn value_of(&self, handle: &str) -> Option<String> {
        self.snapshot()
            .controls
            .into_iter()
            .find(|control| control.handle.as_str() == handle)
            .map(|control| control.value)
    }

    pub fn checked(&self, handle: &str) -> bool {
        self.snapshot()
            .controls
            .iter()
            .any(|control| control.handle.as_str() == handle && control.checked)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FormFixture) -> Result<T, PageError>) -> Result<T, PageError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| PageError::Other("fixture state poisoned".to_string()))?;
        f(&mut state)
    }

    fn read<T>(
        &self,
        handle: &ControlHandle,
        f: impl FnOnce(&FixtureControl) -> T,
    ) -> Result<T, PageError> {
        self.with_state(|state| {
            state
                .controls
                .iter()
                .find(|control| &control.handle == handle)
                .map(f)
                .ok_or_else(|| PageError::NotFound(handle.clone()))
        })
    }

    fn write(
        &self,
        handle: &ControlHandle,
        f: impl FnOnce(&mut FixtureControl) -> Result<(), PageError>,
    ) -> Result<(), PageError> {
        self.with_state(|state| {
            let control = state
                .controls
                .iter_mut()
                .find(|control| &control.handle == handle)
                .ok_or_else(|| PageError::NotFound(handle.clone()))?;
            if control.broken {
                return Err(PageError::NotInteractable(handle.clone()));
            }
            f(control)
        })
    }
}

#[async_trait]
impl FormPage for InMemoryPage {
    async fn enumerate_controls(&self, kind: ControlKind) -> Result<Vec<ControlHandle>, PageError> {
        self.with_state(|state| {
            Ok(state
                .controls
                .iter()
                .filter(|control| control.kind == kind)
                .map(|control| control.handle.clone())
                .collect())
        })
    }

    async fn attribute(
        &self,
        handle: &ControlHandle,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        self.read(handle, |control| match name {
            "name" => control.name.clone(),
            "id" => control.id.clone(),
            "placeholder" => control.placeholder.clone(),
            "aria-label" => control.aria_label.clone(),
            "accept" => control.accept.clone(),
            "value" => control.option_value.clone(),
            "required" => control.required.then(String::new),
            _ => None,
        })
    }

    async fn label_text(&self, handle: &ControlHandle) -> Result<String, PageError> {
        self.read(handle, |control| control.label.clone())
    }

    async fn group_label(&self, handle: &ControlHandle) -> Result<String, PageError> {
        self.read(handle, |control| control.group_label.clone())
    }

    async fn current_value(&self, handle: &ControlHandle) -> Result<String, PageError> {
        self.read(handle, |control| control.value.clone())
    }

    async fn is_checked(&self, handle: &ControlHandle) -> Result<bool, PageError> {
        self.read(handle, |control| control.checked)
    }

    async fn options(&self, handle: &ControlHandle) -> Result<Vec<ChoiceOption>, PageError> {
        self.read(handle, |control| control.options.clone())
    }

    async fn set_value(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError> {
        self.write(handle, |control| {
            control.value = value.to_string();
            Ok(())
        })
    }

    async fn set_checked(&self, handle: &ControlHandle, checked: bool) -> Result<(), PageError> {
        self.with_state(|state| {
            let target = state
                .controls
                .iter()
                .find(|control| &control.handle == handle)
                .ok_or_else(|| PageError::NotFound(handle.clone()))?;
            if target.broken {
                return Err(PageError::NotInteractable(handle.clone()));
            }
            let exclusive_group = (checked && target.kind == ControlKind::ExclusiveChoice)
                .then(|| target.name.clone())
                .flatten();

            for control in state.controls.iter_mut() {
                if &control.handle == handle {
                    control.checked = checked;
                } else if exclusive_group.is_some()
                    && control.kind == ControlKind::ExclusiveChoice
                    && control.name == exclusive_group
                {
                    control.checked = false;
                }
            }
            Ok(())
        })
    }

    async fn select_option(
        &self,
        handle: &ControlHandle,
        option_label: &str,
    ) -> Result<(), PageError> {
        self.write(handle, |control| {
            let option = control
                .options
                .iter()
                .find(|option| option.label == option_label || option.value == option_label)
                .ok_or_else(|| {
                    PageError::Other(format!("option '{option_label}' not offered"))
                })?;
            control.value = if option.value.is_empty() {
                option.label.clone()
            } else {
                option.value.clone()
            };
            Ok(())
        })
    }

    async fn set_file(&self, handle: &ControlHandle, path: &Path) -> Result<(), PageError> {
        self.write(handle, |control| {
            control.value = path.display().to_string();
            Ok(())
        })
    }

    async fn page_text(&self) -> Result<String, PageError> {
        self.with_state(|state| Ok(state.page_text.clone()))
    }

    async fn detect_challenge(&self) -> Result<bool, PageError> {
        self.with_state(|state| Ok(std::mem::take(&mut state.challenge)))
    }
}
