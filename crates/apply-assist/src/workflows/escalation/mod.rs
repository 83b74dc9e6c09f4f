//! Human escalation protocol: request/response messages between the fill
//! engine and whatever adapter speaks to the human.
//!
//! The engine holds a [`HumanChannel`] and awaits answers; an adapter drains
//! the matching [`EscalationInbox`] and replies through a oneshot per request.
//! Challenge and confirmation requests never time out.

mod console;
mod gate;
mod scripted;

pub use console::ConsoleResponder;
pub use gate::SubmissionGate;
pub use scripted::ScriptedResponder;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Something only the human can settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum EscalationRequest {
    Challenge,
    MissingValue { field_hint: String },
    ConfirmSubmission { job_title: String, employer: String },
    ConfirmContinuation { prompt: String },
}

impl EscalationRequest {
    /// What is being asked and why, shown before blocking.
    pub fn context(&self) -> String {
        match self {
            EscalationRequest::Challenge => {
                "A verification challenge is blocking the form. Solve it in the browser, then confirm.".to_string()
            }
            EscalationRequest::MissingValue { field_hint } => format!(
                "Required field '{field_hint}' has no matching profile data. Enter a value or leave blank to skip."
            ),
            EscalationRequest::ConfirmSubmission { job_title, employer } => format!(
                "The form for '{job_title}' at {employer} is filled. Review it and confirm submission."
            ),
            EscalationRequest::ConfirmContinuation { prompt } => prompt.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response", content = "value", rename_all = "snake_case")]
pub enum EscalationResponse {
    Resolved,
    Value(Option<String>),
    Confirmed(bool),
}

#[derive(Debug, Error)]
pub enum EscalationError {
    #[error("no human responder is connected")]
    Disconnected,
    #[error("responder answered {response:?} to a {expected} request")]
    UnexpectedResponse {
        expected: &'static str,
        response: EscalationResponse,
    },
    #[error("no answer within {0:?}")]
    TimedOut(Duration),
}

/// A request waiting for its answer.
#[derive(Debug)]
pub struct PendingEscalation {
    pub request: EscalationRequest,
    reply: oneshot::Sender<EscalationResponse>,
}

impl PendingEscalation {
    pub fn respond(self, response: EscalationResponse) -> Result<(), EscalationError> {
        self.reply
            .send(response)
            .map_err(|_| EscalationError::Disconnected)
    }
}

/// Engine-side handle. Cloning shares the same responder.
#[derive(Debug, Clone)]
pub struct HumanChannel {
    sender: mpsc::Sender<PendingEscalation>,
    missing_value_timeout: Option<Duration>,
}

/// Adapter-side end of the channel.
#[derive(Debug)]
pub struct EscalationInbox {
    receiver: mpsc::Receiver<PendingEscalation>,
}

impl EscalationInbox {
    /// Next request, `None` once every channel handle is dropped.
    pub async fn recv(&mut self) -> Option<PendingEscalation> {
        self.receiver.recv().await
    }
}

pub fn escalation_channel(capacity: usize) -> (HumanChannel, EscalationInbox) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (
        HumanChannel {
            sender,
            missing_value_timeout: None,
        },
        EscalationInbox { receiver },
    )
}

impl HumanChannel {
    /// Bounds only missing-value requests; an elapsed wait counts as no answer.
    pub fn with_missing_value_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.missing_value_timeout = timeout;
        self
    }

    async fn ask(
        &self,
        request: EscalationRequest,
        timeout: Option<Duration>,
    ) -> Result<EscalationResponse, EscalationError> {
        info!(context = %request.context(), "waiting for human");
        let (reply, answer) = oneshot::channel();
        self.sender
            .send(PendingEscalation { request, reply })
            .await
            .map_err(|_| EscalationError::Disconnected)?;

        let response = match timeout {
            Some(limit) => tokio::time::timeout(limit, answer)
                .await
                .map_err(|_| EscalationError::TimedOut(limit))?,
            None => answer.await,
        };
        let response = response.map_err(|_| EscalationError::Disconnected)?;
        debug!(?response, "human responded");
        Ok(response)
    }

    /// Blocks until the human reports the challenge solved.
    pub async fn wait_for_challenge(&self) -> Result<(), EscalationError> {
        match self.ask(EscalationRequest::Challenge, None).await? {
            EscalationResponse::Resolved | EscalationResponse::Confirmed(true) => Ok(()),
            response => Err(EscalationError::UnexpectedResponse {
                expected: "challenge",
                response,
            }),
        }
    }

    /// The human's value for a field, `None` when left blank.
    pub async fn ask_for_missing_value(
        &self,
        field_hint: &str,
    ) -> Result<Option<String>, EscalationError> {
        let request = EscalationRequest::MissingValue {
            field_hint: field_hint.to_string(),
        };
        match self.ask(request, self.missing_value_timeout).await? {
            EscalationResponse::Value(value) => Ok(value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())),
            response => Err(EscalationError::UnexpectedResponse {
                expected: "missing value",
                response,
            }),
        }
    }

    pub async fn confirm_submission(
        &self,
        job_title: &str,
        employer: &str,
    ) -> Result<bool, EscalationError> {
        let request = EscalationRequest::ConfirmSubmission {
            job_title: job_title.to_string(),
            employer: employer.to_string(),
        };
        self.confirmation(request, "submission").await
    }

    pub async fn confirm_continuation(&self, prompt: &str) -> Result<bool, EscalationError> {
        let request = EscalationRequest::ConfirmContinuation {
            prompt: prompt.to_string(),
        };
        self.confirmation(request, "continuation").await
    }

    async fn confirmation(
        &self,
        request: EscalationRequest,
        expected: &'static str,
    ) -> Result<bool, EscalationError> {
        match self.ask(request, None).await? {
            EscalationResponse::Confirmed(confirmed) => Ok(confirmed),
            response => Err(EscalationError::UnexpectedResponse { expected, response }),
        }
    }
}

/// Adapter that turns requests into answers.
#[async_trait]
pub trait Responder: Send {
    async fn respond(&mut self, request: &EscalationRequest) -> EscalationResponse;

    /// Called when the requester stopped waiting before `respond` finished.
    async fn withdrawn(&mut self, _request: &EscalationRequest) {}
}

/// Drains the inbox with `responder` until every channel handle is dropped,
/// then hands the responder back. A request whose requester gave up (for
/// example on a missing-value timeout) is abandoned mid-answer so the next
/// request is not stuck behind it.
pub fn spawn_responder<R>(mut inbox: EscalationInbox, mut responder: R) -> JoinHandle<R>
where
    R: Responder + 'static,
{
    tokio::spawn(async move {
        while let Some(mut pending) = inbox.recv().await {
            if pending.reply.is_closed() {
                debug!(request = ?pending.request, "skipping escalation nobody waits for");
                continue;
            }

            let answered = tokio::select! {
                response = responder.respond(&pending.request) => Some(response),
                _ = pending.reply.closed() => None,
            };
            let Some(response) = answered else {
                debug!(request = ?pending.request, "escalation withdrawn before it was answered");
                responder.withdrawn(&pending.request).await;
                continue;
            };
            if pending.respond(response).is_err() {
                debug!("escalation requester went away before the answer arrived");
            }
        }
        responder
    })
}
