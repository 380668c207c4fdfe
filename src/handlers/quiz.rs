// src/handlers/quiz.rs

use std::collections::HashSet;
use std::future::Future;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use rand::{Rng, seq::SliceRandom};
use sqlx::AnyPool;

use crate::{
    error::AppError,
    handlers::categories::category_exists,
    models::{question::Question, quiz::QuizRequest, responses::QuizQuestion},
};

/// Picks one candidate id uniformly at random, skipping ids already served.
/// Returns `None` when nothing is left.
pub fn pick_next<R: Rng + ?Sized>(candidates: &[i64], previous: &[i64], rng: &mut R) -> Option<i64> {
    let seen: HashSet<i64> = previous.iter().copied().collect();
    let remaining: Vec<i64> = candidates
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();

    remaining.choose(rng).copied()
}

/// Picks and loads candidates until one still exists.
///
/// A picked id whose row is gone (deleted after the candidates were read) is
/// skipped and another one is picked, so `None` only means no candidate is left.
pub async fn next_available<T, F, Fut>(
    candidates: &[i64],
    previous: &[i64],
    mut fetch: F,
) -> Result<Option<T>, AppError>
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<Option<T>, AppError>>,
{
    let mut skipped = previous.to_vec();

    loop {
        let Some(id) = pick_next(candidates, &skipped, &mut rand::thread_rng()) else {
            return Ok(None);
        };

        match fetch(id).await? {
            Some(found) => return Ok(Some(found)),
            None => {
                tracing::debug!("Quiz candidate {} vanished, picking again", id);
                skipped.push(id);
            }
        }
    }
}

async fn fetch_question(pool: &AnyPool, id: i64) -> Result<Option<Question>, AppError> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty
        FROM questions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(question)
}

async fn candidate_ids(pool: &AnyPool, category: Option<i64>) -> Result<Vec<i64>, AppError> {
    let ids = match category {
        Some(category) => {
            sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE category = $1")
                .bind(category)
                .fetch_all(pool)
                .await
        }
        None => {
            sqlx::query_scalar::<_, i64>("SELECT id FROM questions")
                .fetch_all(pool)
                .await
        }
    }
    .map_err(|e| {
        tracing::error!("Failed to fetch quiz candidates: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(ids)
}

/// Serves the next quiz question of a session.
///
/// * `quiz_category.id == 0` plays across every category.
/// * Ids in `previous_questions` are never served again.
/// * `question` is null once the candidates are exhausted.
#[utoipa::path(
    post,
    path = "/quizzes",
    tag = "quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next question, or null when none is left", body = QuizQuestion),
        (status = 400, description = "Missing session data or unknown category", body = crate::error::ErrorBody)
    )
)]
pub async fn next_question(
    State(pool): State<AnyPool>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let (Some(previous), Some(quiz_category)) = (req.previous_questions, req.quiz_category) else {
        return Err(AppError::BadRequest(
            "previous_questions and quiz_category are required".to_string(),
        ));
    };

    let category = quiz_category.filter();
    if let Some(id) = category {
        if !category_exists(&pool, id).await? {
            return Err(AppError::BadRequest(format!("category {} does not exist", id)));
        }
    }

    let candidates = candidate_ids(&pool, category).await?;
    let question = next_available(&candidates, &previous, |id| fetch_question(&pool, id)).await?;

    if question.is_none() {
        tracing::debug!(
            category = ?category,
            served = previous.len(),
            "Quiz session has no question left"
        );
    }

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}
