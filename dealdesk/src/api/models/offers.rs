//! API response models for offers.

use super::merchants::MerchantResponse;
use crate::db::models::offers::{OfferDBResponse, OfferWithMerchantDBResponse};
use crate::types::{CategoryId, MerchantId, OfferId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An offer published by a merchant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: OfferId,
    #[schema(example = "20% off trail shoes")]
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = "uuid")]
    pub merchant_id: MerchantId,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// The publishing merchant (included by the offer listing and detail endpoints, omitted
    /// from search results)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<MerchantResponse>,
}

impl OfferResponse {
    pub fn with_merchant(mut self, merchant: MerchantResponse) -> Self {
        self.merchant = Some(merchant);
        self
    }
}

impl From<OfferDBResponse> for OfferResponse {
    fn from(db: OfferDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            merchant_id: db.merchant_id,
            category_id: db.category_id,
            is_active: db.is_active,
            created_at: db.created_at,
            merchant: None,
        }
    }
}

impl From<OfferWithMerchantDBResponse> for OfferResponse {
    fn from(db: OfferWithMerchantDBResponse) -> Self {
        OfferResponse::from(db.offer).with_merchant(MerchantResponse::from(db.merchant))
    }
}
