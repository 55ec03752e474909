//! LLM Service Module
//!
//! Generates public replies to marketplace reviews through an external
//! completion API.
//!
//! # Architecture
//! ```text
//! ┌──────────────────┐    ┌──────────────┐
//! │ Language / Tone  │ →  │   Prompt     │
//! │ policy resolvers │    │   composer   │
//! └──────────────────┘    └──────┬───────┘
//!                                ▼
//!                        ┌──────────────┐    ┌──────────────────┐
//!                        │ ReplyService │ →  │ CompletionClient │ ← trait
//!                        └──────────────┘    └────────┬─────────┘
//!                                                     ▼
//!                                              ┌─────────────┐
//!                                              │OpenAIClient │
//!                                              └─────────────┘
//! ```

mod client;
mod models;
mod scenarios;
mod service;

pub use client::{CompletionClient, OpenAIClient};
pub use models::*;
pub use scenarios::language::{
    DEFAULT_LANGUAGE, LanguagePolicy, default_language_policy, normalize_language_code,
    resolve_language_policy, supported_language_codes,
};
pub use scenarios::review_reply::{
    DEFAULT_MARKETPLACE, DEFAULT_PRODUCT_NAME, FALLBACK_REPLY, PromptPair, ReviewRequest,
    compose_prompts,
};
pub use scenarios::tone::{DEFAULT_RATING, ToneBand, TonePolicy, resolve_tone_policy, tone_instruction};
pub use service::{CompletionSettings, ReplyResult, ReplyService, extract_reply_text};

#[cfg(test)]
mod tests;
