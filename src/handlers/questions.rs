// src/handlers/questions.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use sqlx::AnyPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    handlers::categories::{category_exists, category_map},
    models::{
        question::{CreateQuestionRequest, PostQuestionsBody, Question},
        responses::{CreatedQuestion, DeletedQuestion, QuestionList, QuestionPage},
    },
    utils::{
        pagination::{Page, PageParams},
        search::{contains_pattern, fold_case},
    },
};

async fn count_questions(pool: &AnyPool) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

async fn fetch_page(pool: &AnyPool, page: &Page) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty
        FROM questions
        ORDER BY id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.size)
    .bind(page.offset())
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch page {} of questions: {:?}", page.number, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(questions)
}

/// Lists questions one page at a time, together with all categories.
///
/// A page past the end is a 404, never an empty success.
#[utoipa::path(
    get,
    path = "/questions",
    tag = "questions",
    params(PageParams),
    responses(
        (status = 200, description = "One page of questions", body = QuestionPage),
        (status = 400, description = "Malformed page number", body = crate::error::ErrorBody),
        (status = 404, description = "Page out of range", body = crate::error::ErrorBody)
    )
)]
pub async fn list_questions(
    State(pool): State<AnyPool>,
    State(config): State<Config>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let page = Page::new(params.page, config.questions_per_page)?;

    let questions = fetch_page(&pool, &page).await?;
    if questions.is_empty() {
        return Err(AppError::NotFound(format!("page {} is empty", page.number)));
    }

    let total_questions = count_questions(&pool).await?;
    let categories = category_map(&pool).await?;

    Ok(Json(QuestionPage {
        success: true,
        questions,
        total_questions,
        categories,
        current_category: None,
    }))
}

/// Deletes a question by ID.
#[utoipa::path(
    delete,
    path = "/questions/{id}",
    tag = "questions",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question deleted", body = DeletedQuestion),
        (status = 422, description = "No such question", body = crate::error::ErrorBody)
    )
)]
pub async fn delete_question(
    State(pool): State<AnyPool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id.map_err(|e| AppError::Unprocessable(e.body_text()))?;

    let result = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::Unprocessable(format!("question {} does not exist", id)));
    }

    tracing::info!("Deleted question {}", id);

    Ok(Json(DeletedQuestion {
        success: true,
        deleted: id,
        total_questions: count_questions(&pool).await?,
    }))
}

/// Creates a question, or searches when the body carries `searchTerm`.
#[utoipa::path(
    post,
    path = "/questions",
    tag = "questions",
    params(PageParams),
    request_body = PostQuestionsBody,
    responses(
        (status = 200, description = "Question created. A body with `searchTerm` answers with a QuestionList instead", body = CreatedQuestion),
        (status = 422, description = "Malformed payload or unknown category", body = crate::error::ErrorBody)
    )
)]
pub async fn post_questions(
    State(pool): State<AnyPool>,
    State(config): State<Config>,
    params: Result<Query<PageParams>, QueryRejection>,
    payload: Result<Json<PostQuestionsBody>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload.map_err(|e| AppError::Unprocessable(e.body_text()))?;

    match body {
        PostQuestionsBody::Search(req) => {
            Ok(search_questions(&pool, &req.search_term).await?.into_response())
        }
        PostQuestionsBody::Create(req) => {
            let Query(params) = params.map_err(|e| AppError::Unprocessable(e.body_text()))?;
            let page = Page::new(params.page, config.questions_per_page)
                .map_err(|e| AppError::Unprocessable(e.to_string()))?;
            Ok(create_question(&pool, &page, req).await?.into_response())
        }
    }
}

/// Case-insensitive substring search over the question text.
async fn search_questions(pool: &AnyPool, term: &str) -> Result<Json<QuestionList>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty
        FROM questions
        WHERE COALESCE(search_text, LOWER(question)) LIKE $1 ESCAPE '\'
        ORDER BY id
        "#,
    )
    .bind(contains_pattern(term))
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to search questions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(QuestionList {
        success: true,
        total_questions: questions.len() as i64,
        questions,
        current_category: None,
    }))
}

async fn create_question(
    pool: &AnyPool,
    page: &Page,
    payload: CreateQuestionRequest,
) -> Result<Json<CreatedQuestion>, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Unprocessable(validation_errors.to_string()));
    }

    let new = payload
        .into_new_question()
        .ok_or_else(|| AppError::Unprocessable("question and answer must not be blank".to_string()))?;

    if !category_exists(pool, new.category).await? {
        return Err(AppError::Unprocessable(format!(
            "category {} does not exist",
            new.category
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions (question, answer, category, difficulty, search_text)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .bind(fold_case(&new.question))
    .fetch_one(pool)
    .await
    .map_err(|e| {
        // The category can vanish between the check and the insert.
        if e.as_database_error()
            .is_some_and(|db| db.is_foreign_key_violation())
        {
            AppError::Unprocessable(format!("category {} does not exist", new.category))
        } else {
            tracing::error!("Failed to create question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    tracing::info!("Created question {} in category {}", id, new.category);

    Ok(Json(CreatedQuestion {
        success: true,
        created: id,
        questions: fetch_page(pool, page).await?,
        total_questions: count_questions(pool).await?,
    }))
}
