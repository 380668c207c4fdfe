// src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

/// Represents the 'categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,

    /// Display name (e.g., "Science", "Art").
    /// Mapped from the column 'type' since `type` is a reserved keyword in Rust.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub category_type: String,
}
