// src/models/responses.rs

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::question::Question;

/// Category id -> display name. Serialized as a JSON object with string keys.
pub type CategoryMap = BTreeMap<i64, String>;

/// One page of `GET /questions`.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
    pub current_category: Option<i64>,
}

/// Search results and per-category listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionList {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedQuestion {
    pub success: bool,
    /// Id generated for the new question.
    pub created: i64,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedQuestion {
    pub success: bool,
    pub deleted: i64,
    pub total_questions: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub success: bool,
    pub categories: CategoryMap,
    pub total_categories: i64,
}

/// `question` is null once the session has seen every candidate.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizQuestion {
    pub success: bool,
    pub question: Option<Question>,
}
