//! Tone policies keyed by review rating

pub const DEFAULT_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneBand {
    Thankful,
    Positive,
    GentleApology,
    ClearApology,
    SeriousApology,
}

impl ToneBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thankful => "thankful",
            Self::Positive => "positive",
            Self::GentleApology => "gentle_apology",
            Self::ClearApology => "clear_apology",
            Self::SeriousApology => "serious_apology",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonePolicy {
    pub band: ToneBand,
    pub instruction: &'static str,
}

struct ToneRule {
    matches: fn(f64) -> bool,
    policy: TonePolicy,
}

fn five_or_more(rating: f64) -> bool {
    rating >= 5.0
}

fn exactly_four(rating: f64) -> bool {
    rating == 4.0
}

fn exactly_three(rating: f64) -> bool {
    rating == 3.0
}

fn exactly_two(rating: f64) -> bool {
    rating == 2.0
}

fn one_or_less(rating: f64) -> bool {
    rating <= 1.0
}

// Evaluated in order; first match wins. Ratings 2..4 match exactly, so
// fractional values between bands (e.g. 4.5) match nothing.
static TONE_RULES: [ToneRule; 5] = [
    ToneRule {
        matches: five_or_more,
        policy: TonePolicy {
            band: ToneBand::Thankful,
            instruction: "The customer is very happy. Sound warm, thankful and appreciative. \
                          Celebrate their satisfaction and invite them to shop with us again.",
        },
    },
    ToneRule {
        matches: exactly_four,
        policy: TonePolicy {
            band: ToneBand::Positive,
            instruction: "The customer is satisfied. Sound positive and appreciative, \
                          thank them for the good feedback and say we hope to serve them again.",
        },
    },
    ToneRule {
        matches: exactly_three,
        policy: TonePolicy {
            band: ToneBand::GentleApology,
            instruction: "The customer is neutral or mixed. Thank them, gently apologize for anything \
                          that fell short, and sound hopeful that their next experience will be better.",
        },
    },
    ToneRule {
        matches: exactly_two,
        policy: TonePolicy {
            band: ToneBand::ClearApology,
            instruction: "The customer is disappointed. Clearly apologize for the experience, \
                          acknowledge the specific problem, and invite them to contact our support \
                          team through the marketplace chat so we can help.",
        },
    },
    ToneRule {
        matches: one_or_less,
        policy: TonePolicy {
            band: ToneBand::SeriousApology,
            instruction: "The customer is very unhappy. Be serious and sincere: apologize without excuses, \
                          acknowledge the problem they described, and invite them to contact our support \
                          team through the marketplace chat so we can make it right.",
        },
    },
];

/// Band for a rating, or `None` when no band matches.
pub fn resolve_tone_policy(rating: f64) -> Option<&'static TonePolicy> {
    TONE_RULES.iter().find(|rule| (rule.matches)(rating)).map(|rule| &rule.policy)
}

/// Tone instruction text; empty when no band matches.
pub fn tone_instruction(rating: f64) -> &'static str {
    resolve_tone_policy(rating).map(|policy| policy.instruction).unwrap_or("")
}
