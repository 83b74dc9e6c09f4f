use async_trait::async_trait;
use std::collections::VecDeque;

use super::{EscalationRequest, EscalationResponse, Responder};

/// Replays queued answers in order and records every request it saw. Once
/// the queue is empty it answers like a human who walked away: challenges
/// count as solved, values stay blank, confirmations are refused.
#[derive(Debug, Default)]
pub struct ScriptedResponder {
    answers: VecDeque<EscalationResponse>,
    requests: Vec<EscalationRequest>,
}

impl ScriptedResponder {
    pub fn new(answers: impl IntoIterator<Item = EscalationResponse>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[EscalationRequest] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

fn fallback(request: &EscalationRequest) -> EscalationResponse {
    match request {
        EscalationRequest::Challenge => EscalationResponse::Resolved,
        EscalationRequest::MissingValue { .. } => EscalationResponse::Value(None),
        EscalationRequest::ConfirmSubmission { .. }
        | EscalationRequest::ConfirmContinuation { .. } => EscalationResponse::Confirmed(false),
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(&mut self, request: &EscalationRequest) -> EscalationResponse {
        self.requests.push(request.clone());
        self.answers
            .pop_front()
            .unwrap_or_else(|| fallback(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queue_then_fallbacks() {
        let mut responder = ScriptedResponder::new([EscalationResponse::Confirmed(true)]);
        let confirm = EscalationRequest::ConfirmContinuation {
            prompt: "Continue?".to_string(),
        };
        assert_eq!(
            responder.respond(&confirm).await,
            EscalationResponse::Confirmed(true)
        );
        assert_eq!(
            responder.respond(&confirm).await,
            EscalationResponse::Confirmed(false)
        );
        assert_eq!(
            responder.respond(&EscalationRequest::Challenge).await,
            EscalationResponse::Resolved
        );
        assert_eq!(responder.requests().len(), 3);
        assert_eq!(responder.remaining(), 0);
    }
}
