use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tracing::warn;

use super::{EscalationRequest, EscalationResponse, Responder};

/// Interactive responder over the process's stdin/stdout. End of input is
/// read as a blank answer or a refusal.
pub struct ConsoleResponder {
    input: Lines<BufReader<Stdin>>,
    output: Stdout,
}

impl ConsoleResponder {
    pub fn new() -> Self {
        Self {
            input: BufReader::new(io::stdin()).lines(),
            output: io::stdout(),
        }
    }

    async fn prompt(&mut self, context: &str, question: &str) -> Option<String> {
        let text = format!("\n{context}\n{question} ");
        if let Err(err) = self.output.write_all(text.as_bytes()).await {
            warn!(error = %err, "failed to write escalation prompt");
        }
        if let Err(err) = self.output.flush().await {
            warn!(error = %err, "failed to flush escalation prompt");
        }

        match self.input.next_line().await {
            Ok(line) => line,
            Err(err) => {
                warn!(error = %err, "failed to read escalation answer");
                None
            }
        }
    }
}

impl Default for ConsoleResponder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_yes(answer: Option<&str>) -> bool {
    matches!(
        answer.map(|answer| answer.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes")
    )
}

#[async_trait]
impl Responder for ConsoleResponder {
    async fn respond(&mut self, request: &EscalationRequest) -> EscalationResponse {
        let context = request.context();
        match request {
            EscalationRequest::Challenge => {
                self.prompt(&context, "Press Enter once it is solved.").await;
                EscalationResponse::Resolved
            }
            EscalationRequest::MissingValue { .. } => {
                let answer = self.prompt(&context, "Value:").await;
                EscalationResponse::Value(answer)
            }
            EscalationRequest::ConfirmSubmission { .. }
            | EscalationRequest::ConfirmContinuation { .. } => {
                let answer = self.prompt(&context, "Proceed? [y/N]").await;
                EscalationResponse::Confirmed(is_yes(answer.as_deref()))
            }
        }
    }

    async fn withdrawn(&mut self, _request: &EscalationRequest) {
        let notice = "\n(No answer needed any more; moving on.)\n";
        if let Err(err) = self.output.write_all(notice.as_bytes()).await {
            warn!(error = %err, "failed to write withdrawal notice");
        }
        if let Err(err) = self.output.flush().await {
            warn!(error = %err, "failed to flush withdrawal notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_yes;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes(Some(" Y ")));
        assert!(is_yes(Some("yes")));
        assert!(!is_yes(Some("")));
        assert!(!is_yes(Some("sure")));
        assert!(!is_yes(None));
    }
}
