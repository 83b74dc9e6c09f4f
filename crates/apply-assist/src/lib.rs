//! Human-in-the-loop assistant for web application forms: flattens an
//! applicant profile, screens targets for suitability, resolves and fills
//! form controls, and escalates to the human when it cannot decide.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
