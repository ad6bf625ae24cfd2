//! API response models for merchants.

use crate::db::models::merchants::MerchantDBResponse;
use crate::types::MerchantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A merchant publishing offers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MerchantResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: MerchantId,
    #[schema(example = "Acme Outdoors")]
    pub name: String,
    /// Merchant storefront, when known
    #[schema(example = "https://acme.example")]
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MerchantDBResponse> for MerchantResponse {
    fn from(db: MerchantDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            website_url: db.website_url,
            logo_url: db.logo_url,
            created_at: db.created_at,
        }
    }
}
