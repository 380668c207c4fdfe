// src/handlers/categories.rs

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};
use sqlx::AnyPool;

use crate::{
    error::AppError,
    models::{
        category::Category,
        question::Question,
        responses::{CategoryList, CategoryMap, QuestionList},
    },
};

/// Loads every category keyed by id.
pub(crate) async fn category_map(pool: &AnyPool) -> Result<CategoryMap, AppError> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch categories: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(categories
        .into_iter()
        .map(|c| (c.id, c.category_type))
        .collect())
}

pub(crate) async fn category_exists(pool: &AnyPool, id: i64) -> Result<bool, AppError> {
    let found = sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Lists all categories as an id -> name map.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    responses(
        (status = 200, description = "All categories", body = CategoryList),
        (status = 404, description = "No category is seeded", body = crate::error::ErrorBody)
    )
)]
pub async fn list_categories(State(pool): State<AnyPool>) -> Result<impl IntoResponse, AppError> {
    let categories = category_map(&pool).await?;

    if categories.is_empty() {
        return Err(AppError::NotFound("no categories".to_string()));
    }

    Ok(Json(CategoryList {
        success: true,
        total_categories: categories.len() as i64,
        categories,
    }))
}

/// Lists every question of one category.
#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Questions of the category", body = QuestionList),
        (status = 400, description = "Unknown category", body = crate::error::ErrorBody)
    )
)]
pub async fn questions_by_category(
    State(pool): State<AnyPool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id.map_err(|e| AppError::BadRequest(e.body_text()))?;

    if !category_exists(&pool, id).await? {
        return Err(AppError::BadRequest(format!("category {} does not exist", id)));
    }

    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty
        FROM questions
        WHERE category = $1
        ORDER BY id
        "#,
    )
    .bind(id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questions of category {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(QuestionList {
        success: true,
        total_questions: questions.len() as i64,
        questions,
        current_category: Some(id),
    }))
}
