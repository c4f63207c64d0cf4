//! question-service: turns a topic prompt into LLM-generated quiz questions
//! served over `GET /question/{prompt}/{number}`.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
