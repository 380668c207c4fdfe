// src/models/quiz.rs

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use utoipa::ToSchema;

/// Category id the client sends to play across every category.
pub const ALL_CATEGORIES: i64 = 0;

/// DTO for asking the next quiz question.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizRequest {
    /// Ids already served in this session.
    pub previous_questions: Option<Vec<i64>>,
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizCategory {
    /// Display name, informational only. The client sends "click" for all categories.
    #[serde(rename = "type", default)]
    pub category_type: Option<String>,

    /// Accepts `2` as well as `"2"`. `0` means all categories.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[schema(value_type = i64)]
    pub id: i64,
}

impl QuizCategory {
    /// The category to filter on, or `None` for all categories.
    pub fn filter(&self) -> Option<i64> {
        (self.id != ALL_CATEGORIES).then_some(self.id)
    }
}
