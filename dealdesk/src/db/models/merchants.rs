//! Database models for merchants.

use crate::types::MerchantId;
use bon::Builder;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new merchant
#[derive(Debug, Clone, Builder)]
pub struct MerchantCreateDBRequest {
    pub name: String,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
}

/// Database response for a merchant
#[derive(Debug, Clone, FromRow)]
pub struct MerchantDBResponse {
    pub id: MerchantId,
    pub name: String,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
