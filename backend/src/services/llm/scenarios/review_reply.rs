//! Review Reply Scenario - public seller replies to marketplace reviews

use super::language::{LanguagePolicy, resolve_language_policy};
use super::tone::{resolve_tone_policy, tone_instruction};

pub const DEFAULT_MARKETPLACE: &str = "Shopee";
pub const DEFAULT_PRODUCT_NAME: &str = "the product";
pub const FALLBACK_REPLY: &str = "Thank you for your review!";

const GLOBAL_GUIDELINES: &str = "\
- Never mention that you are an AI, a bot, or an assistant.
- Never invent order numbers, tracking details, shipping dates, refund amounts, or store policies.
- Do not promise anything beyond what the review itself states.
- Never ask the customer to change, raise, or remove their rating.
- If the sentiment is positive, thank the customer sincerely.
- If the sentiment is negative, acknowledge the issue, apologize, and offer support.
- Keep the tone friendly, professional, and on-brand for the shop.
- The output must be ready to copy and paste as the public reply: no placeholders, no brackets, no signatures like [Shop Name].";

// ============================================================================
// Request
// ============================================================================

/// Normalized review input. Every field is already defaulted; `review_text`
/// is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRequest {
    pub marketplace: String,
    pub rating: f64,
    pub product_name: String,
    pub language: String,
    pub review_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system_prompt: String,
    pub user_prompt: String,
}

impl ReviewRequest {
    /// Resolve the language and tone policies and compose both prompts.
    pub fn build_prompts(&self) -> PromptPair {
        let language = resolve_language_policy(&self.language);
        match resolve_tone_policy(self.rating) {
            Some(tone) => tracing::debug!("Tone band for rating {}: {}", self.rating, tone.band.as_str()),
            None => tracing::debug!("No tone band matches rating {}", self.rating),
        }
        compose_prompts(self, language, tone_instruction(self.rating))
    }
}

// ============================================================================
// Prompt Composition
// ============================================================================

pub fn compose_prompts(req: &ReviewRequest, language: &LanguagePolicy, tone: &str) -> PromptPair {
    let system_prompt = format!(
        "You are a customer service specialist for an online seller on {marketplace}. \
Your job is to write the seller's public reply to a customer review of \"{product}\".

## Reply Language: {label}
{rules}

## Tone
{tone}

## Context
- Marketplace: {marketplace}
- Product: {product}

## Guidelines
{guidelines}",
        marketplace = req.marketplace,
        product = req.product_name,
        label = language.label,
        rules = language.rules,
        tone = tone,
        guidelines = GLOBAL_GUIDELINES,
    );

    let user_prompt = format!(
        "Customer rating: {rating} out of 5
Marketplace: {marketplace}
Product: {product}
Reply language: {label}

Customer review:
\"\"\"
{review}
\"\"\"

Write ONLY the public reply text. Do not include labels, headings, quotes, or explanations.",
        rating = req.rating,
        marketplace = req.marketplace,
        product = req.product_name,
        label = language.label,
        review = req.review_text,
    );

    PromptPair { system_prompt, user_prompt }
}
