//! LLM Prompt Scenarios
//!
//! Language and tone policies plus the review reply prompt composer.

pub mod language;
pub mod review_reply;
pub mod tone;
