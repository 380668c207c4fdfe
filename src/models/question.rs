// src/models/question.rs

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::prelude::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: i64,

    /// The trivia prompt.
    pub question: String,

    pub answer: String,

    /// Id of the owning row in 'categories'.
    pub category: i64,

    /// 1 (easy) to 5 (hard).
    pub difficulty: i64,
}

/// DTO for creating a new question.
///
/// Every field is optional at the serde level so an empty object still
/// reaches validation and is rejected as unprocessable.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionRequest {
    #[validate(required, length(min = 1))]
    pub question: Option<String>,

    #[validate(required, length(min = 1))]
    pub answer: Option<String>,

    /// Accepts `5` as well as `"5"`.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[schema(value_type = Option<i64>)]
    #[validate(required)]
    pub category: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[schema(value_type = Option<i64>)]
    #[validate(required, range(min = 1, max = 5))]
    pub difficulty: Option<i64>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl CreateQuestionRequest {
    /// Trims the text fields. Returns `None` if anything is missing or blank.
    pub fn into_new_question(self) -> Option<NewQuestion> {
        let question = self.question?.trim().to_string();
        let answer = self.answer?.trim().to_string();
        if question.is_empty() || answer.is_empty() {
            return None;
        }

        Some(NewQuestion {
            question,
            answer,
            category: self.category?,
            difficulty: self.difficulty?,
        })
    }
}

/// DTO for a substring search over question text.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// `POST /questions` either searches or creates, depending on whether the
/// body carries a `searchTerm`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PostQuestionsBody {
    Search(SearchRequest),
    Create(CreateQuestionRequest),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_is_accepted_as_a_string() {
        let body: PostQuestionsBody = serde_json::from_value(json!({
            "question": "Who wrote the screenplay for Rocky ?",
            "answer": "Sylvester Stallone",
            "category": "5",
            "difficulty": 2,
        }))
        .unwrap();

        let PostQuestionsBody::Create(req) = body else {
            panic!("expected a create request");
        };
        assert!(req.validate().is_ok());
        assert_eq!(
            req.into_new_question(),
            Some(NewQuestion {
                question: "Who wrote the screenplay for Rocky ?".to_string(),
                answer: "Sylvester Stallone".to_string(),
                category: 5,
                difficulty: 2,
            })
        );
    }

    #[test]
    fn search_term_selects_search() {
        let body: PostQuestionsBody =
            serde_json::from_value(json!({ "searchTerm": "Mahal" })).unwrap();
        assert!(matches!(body, PostQuestionsBody::Search(req) if req.search_term == "Mahal"));
    }

    #[test]
    fn empty_object_is_a_create_that_fails_validation() {
        let body: PostQuestionsBody = serde_json::from_value(json!({})).unwrap();
        let PostQuestionsBody::Create(req) = body else {
            panic!("expected a create request");
        };
        assert!(req.validate().is_err());
        assert!(req.into_new_question().is_none());
    }

    #[test]
    fn difficulty_out_of_range_fails_validation() {
        let req = CreateQuestionRequest {
            question: Some("Q".into()),
            answer: Some("A".into()),
            category: Some(1),
            difficulty: Some(9),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn blank_text_is_not_a_new_question() {
        let req = CreateQuestionRequest {
            question: Some("   ".into()),
            answer: Some("A".into()),
            category: Some(1),
            difficulty: Some(1),
        };
        assert!(req.into_new_question().is_none());
    }
}
