use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;

/// Query string of the paginated listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number, defaults to 1.
    pub page: Option<i64>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    pub fn new(number: Option<i64>, size: i64) -> Result<Self, AppError> {
        let number = number.unwrap_or(1);
        if number < 1 {
            return Err(AppError::BadRequest(format!("invalid page number {}", number)));
        }
        Ok(Self { number, size })
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }
}
