//! Database models for offers.

use crate::db::models::merchants::MerchantDBResponse;
use crate::types::{CategoryId, MerchantId, OfferId};
use bon::Builder;
use chrono::{DateTime, Utc};

/// Database request for creating a new offer
#[derive(Debug, Clone, Builder)]
pub struct OfferCreateDBRequest {
    pub title: String,
    pub description: Option<String>,
    pub merchant_id: MerchantId,
    pub category_id: Option<CategoryId>,
    #[builder(default = true)]
    pub is_active: bool,
    /// Creation time override; the database default (`NOW()`) is used when unset
    pub created_at: Option<DateTime<Utc>>,
}

/// Database response for an offer
#[derive(Debug, Clone)]
pub struct OfferDBResponse {
    pub id: OfferId,
    pub title: String,
    pub description: Option<String>,
    pub merchant_id: MerchantId,
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// An offer together with the merchant that publishes it
#[derive(Debug, Clone)]
pub struct OfferWithMerchantDBResponse {
    pub offer: OfferDBResponse,
    pub merchant: MerchantDBResponse,
}
