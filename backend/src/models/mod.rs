pub mod review;

pub use review::{MISSING_REVIEW_TEXT, ReplyPilotRequest, ReplyPilotResponse};
