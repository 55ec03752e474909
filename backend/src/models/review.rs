use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::services::llm::{
    DEFAULT_MARKETPLACE, DEFAULT_PRODUCT_NAME, DEFAULT_RATING, ReviewRequest,
    normalize_language_code,
};
use crate::utils::{ApiError, ApiResult};

pub const MISSING_REVIEW_TEXT: &str = "Missing reviewText in request.";

/// Body of `POST /api/replypilot`
///
/// Every field is optional at the decoding level; wrong JSON types fall back
/// to the field default instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyPilotRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Lazada")]
    pub marketplace: Option<String>,

    /// Number or numeric string; anything else means 5
    #[serde(default, deserialize_with = "lenient_rating")]
    #[schema(value_type = Option<f64>, example = 5)]
    pub rating: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Wireless Mouse")]
    pub product_name: Option<String>,

    /// english, tagalog, taglish, auto, vietnamese, indonesian, thai
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "taglish")]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Nasira agad yung mouse.")]
    pub review_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReplyPilotResponse {
    pub reply: String,
}

impl ReplyPilotRequest {
    /// Apply defaults and reject empty review text.
    pub fn into_review_request(self) -> ApiResult<ReviewRequest> {
        let review_text = self.review_text.unwrap_or_default().trim().to_string();
        if review_text.is_empty() {
            return Err(ApiError::validation_error(MISSING_REVIEW_TEXT));
        }

        Ok(ReviewRequest {
            marketplace: non_blank_or(self.marketplace, DEFAULT_MARKETPLACE),
            rating: self.rating.unwrap_or(DEFAULT_RATING),
            product_name: non_blank_or(self.product_name, DEFAULT_PRODUCT_NAME),
            language: normalize_language_code(self.language.as_deref().unwrap_or_default()),
            review_text,
        })
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(rating.filter(|r| !r.is_nan()))
}
