use serde::{Deserialize, Serialize};

/// Answers to the three feedback questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    pub q1: String,
    pub q2: String,
    pub q3: String,
}
