use tracing::info;

use super::{EscalationError, HumanChannel};

/// Final checkpoint before a form is submitted. Asks the human unless the
/// auto-submit opt-in is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionGate {
    auto_submit: bool,
}

impl SubmissionGate {
    pub fn new(auto_submit: bool) -> Self {
        Self { auto_submit }
    }

    pub fn auto_submit(&self) -> bool {
        self.auto_submit
    }

    pub async fn approve(
        &self,
        human: &HumanChannel,
        job_title: &str,
        employer: &str,
    ) -> Result<bool, EscalationError> {
        if self.auto_submit {
            info!(job_title, employer, "auto-submit enabled; submitting without confirmation");
            return Ok(true);
        }

        let approved = human.confirm_submission(job_title, employer).await?;
        info!(job_title, employer, approved, "submission decision");
        Ok(approved)
    }
}
