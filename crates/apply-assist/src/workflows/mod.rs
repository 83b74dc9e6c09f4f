pub mod escalation;
pub mod form;
pub mod profile;
pub mod resolver;
pub mod suitability;
