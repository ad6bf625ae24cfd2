//! Database models for categories.

use crate::types::CategoryId;
use bon::Builder;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new category
#[derive(Debug, Clone, Builder)]
pub struct CategoryCreateDBRequest {
    pub name: String,
}

/// Database response for a category
#[derive(Debug, Clone, FromRow)]
pub struct CategoryDBResponse {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
