use super::domain::{ChoiceOption, ControlHandle, ControlKind};
use async_trait::async_trait;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// The narrow surface the filler needs from a rendered page. Implementations
/// wrap a browser driver; tests use the in-memory fixture page.
#[async_trait]
pub trait FormPage: Send + Sync {
    async fn enumerate_controls(&self, kind: ControlKind) -> Result<Vec<ControlHandle>, PageError>;

    /// Attribute value, `None` when the attribute is absent.
    async fn attribute(
        &self,
        handle: &ControlHandle,
        name: &str,
    ) -> Result<Option<String>, PageError>;

    async fn label_text(&self, handle: &ControlHandle) -> Result<String, PageError>;

    /// Question text shared by a radio or checkbox group (a legend, say).
    async fn group_label(&self, _handle: &ControlHandle) -> Result<String, PageError> {
        Ok(String::new())
    }

    async fn current_value(&self, handle: &ControlHandle) -> Result<String, PageError>;

    async fn is_checked(&self, handle: &ControlHandle) -> Result<bool, PageError>;

    async fn options(&self, handle: &ControlHandle) -> Result<Vec<ChoiceOption>, PageError>;

    async fn set_value(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError>;

    async fn set_checked(&self, handle: &ControlHandle, checked: bool) -> Result<(), PageError>;

    async fn select_option(
        &self,
        handle: &ControlHandle,
        option_label: &str,
    ) -> Result<(), PageError>;

    async fn set_file(&self, handle: &ControlHandle, path: &Path) -> Result<(), PageError>;

    async fn page_text(&self) -> Result<String, PageError>;

    /// Whether an external verification widget is currently shown.
    async fn detect_challenge(&self) -> Result<bool, PageError>;
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("control {0} not found")]
    NotFound(ControlHandle),
    #[error("control {0} is not interactable")]
    NotInteractable(ControlHandle),
    #[error("page interaction timed out after {0:?}")]
    Timeout(Duration),
    #[error("page error: {0}")]
    Other(String),
}

/// Runs one page interaction under the per-control time limit.
pub(crate) async fn bounded<T, F>(limit: Duration, interaction: F) -> Result<T, PageError>
where
    F: Future<Output = Result<T, PageError>>,
{
    match tokio::time::timeout(limit, interaction).await {
        Ok(result) => result,
        Err(_) => Err(PageError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_interaction_becomes_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, PageError>(())
        };
        match bounded(Duration::from_millis(50), slow).await {
            Err(PageError::Timeout(limit)) => assert_eq!(limit, Duration::from_millis(50)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fast_interaction_passes_through() {
        let value = bounded(Duration::from_secs(1), async { Ok::<_, PageError>(7) })
            .await
            .expect("completes");
        assert_eq!(value, 7);
    }
}
