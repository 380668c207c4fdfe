// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    error::ErrorBody,
    handlers::{categories, questions, quiz},
    models::{
        category::Category,
        question::{CreateQuestionRequest, PostQuestionsBody, Question, SearchRequest},
        quiz::{QuizCategory, QuizRequest},
        responses::{
            CategoryList, CreatedQuestion, DeletedQuestion, QuestionList, QuestionPage,
            QuizQuestion,
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Trivia API"),
    paths(
        categories::list_categories,
        categories::questions_by_category,
        questions::list_questions,
        questions::delete_question,
        questions::post_questions,
        quiz::next_question
    ),
    components(schemas(
        Category,
        Question,
        CreateQuestionRequest,
        SearchRequest,
        PostQuestionsBody,
        QuizRequest,
        QuizCategory,
        QuestionPage,
        QuestionList,
        CreatedQuestion,
        DeletedQuestion,
        CategoryList,
        QuizQuestion,
        ErrorBody
    ))
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
