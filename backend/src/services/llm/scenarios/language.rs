//! Language policies for reply prompts
//!
//! Each recognized language code maps to a display label and a block of
//! strict rules that is embedded verbatim into the system prompt. Unknown
//! codes resolve to the English policy, so resolution never fails.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePolicy {
    pub code: &'static str,
    pub label: &'static str,
    pub rules: &'static str,
}

// First entry is the fallback policy.
static LANGUAGE_TABLE: [LanguagePolicy; 7] = [
    LanguagePolicy {
        code: "english",
        label: "English",
        rules: "\
- Write the ENTIRE reply in English only.
- Do NOT use Tagalog, Filipino, or any other language, not even single words or greetings.
- Even if the review is written in another language, reply in English.",
    },
    LanguagePolicy {
        code: "tagalog",
        label: "Tagalog (Filipino)",
        rules: "\
- Write the ENTIRE reply in natural, polite Tagalog (Filipino) only.
- Do NOT mix in English words or phrases. Use Tagalog equivalents for common terms.
- Brand names and the product name may stay as written.
- Even if the review is written in English or Taglish, reply in pure Tagalog.",
    },
    LanguagePolicy {
        code: "taglish",
        label: "Taglish (Tagalog-English mix)",
        rules: "\
- Write the reply in natural Taglish: a Filipino-based mix of Tagalog and English.
- Tagalog should carry the sentence structure; English words and short phrases may be mixed in the way Filipino customers naturally talk online.
- Keep it friendly and conversational, not overly formal.
- Do NOT use any language other than Tagalog and English.",
    },
    LanguagePolicy {
        code: "auto",
        label: "Auto-detect (match the review's language)",
        rules: "\
- Detect the dominant language of the customer's review.
- Write the ENTIRE reply in that same language.
- If the review is in Taglish, reply in Taglish. If it is in English, reply in English.
- Do NOT switch to a different language or add translations.",
    },
    LanguagePolicy {
        code: "vietnamese",
        label: "Vietnamese",
        rules: "\
- Write the ENTIRE reply in Vietnamese only, with correct diacritics.
- Do NOT mix in English or any other language, not even single words or greetings.
- Brand names and the product name may stay as written.",
    },
    LanguagePolicy {
        code: "indonesian",
        label: "Indonesian (Bahasa Indonesia)",
        rules: "\
- Write the ENTIRE reply in Bahasa Indonesia only.
- Do NOT mix in English, Malay slang, or any other language.
- Brand names and the product name may stay as written.",
    },
    LanguagePolicy {
        code: "thai",
        label: "Thai",
        rules: "\
- Write the ENTIRE reply in Thai only, using Thai script.
- Do NOT mix in English or any other language, not even single words or greetings.
- Brand names and the product name may stay as written.",
    },
];

static LANGUAGE_POLICIES: Lazy<HashMap<&'static str, &'static LanguagePolicy>> =
    Lazy::new(|| LANGUAGE_TABLE.iter().map(|policy| (policy.code, policy)).collect());

/// Lowercase and trim a requested language code; empty means English.
pub fn normalize_language_code(raw: &str) -> String {
    let code = raw.trim().to_lowercase();
    if code.is_empty() { DEFAULT_LANGUAGE.to_string() } else { code }
}

pub fn default_language_policy() -> &'static LanguagePolicy {
    &LANGUAGE_TABLE[0]
}

/// Resolve the policy for a language code. Never fails.
pub fn resolve_language_policy(code: &str) -> &'static LanguagePolicy {
    let code = normalize_language_code(code);
    match LANGUAGE_POLICIES.get(code.as_str()) {
        Some(&policy) => policy,
        None => {
            tracing::debug!("Unrecognized language code '{}', falling back to {}", code, DEFAULT_LANGUAGE);
            default_language_policy()
        },
    }
}

/// Recognized codes, in table order.
pub fn supported_language_codes() -> Vec<&'static str> {
    LANGUAGE_TABLE.iter().map(|policy| policy.code).collect()
}
