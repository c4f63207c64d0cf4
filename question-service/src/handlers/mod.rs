//! HTTP handlers for the question service.

pub mod health;
pub mod question;

pub use health::{health_check, readiness_check};
pub use question::generate_questions;
