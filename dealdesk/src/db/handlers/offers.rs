//! Database repository for offers.

use crate::db::{
    errors::Result,
    handlers::{contains_pattern, repository::Repository},
    models::{
        merchants::MerchantDBResponse,
        offers::{OfferCreateDBRequest, OfferDBResponse, OfferWithMerchantDBResponse},
    },
};
use crate::types::{CategoryId, MerchantId, OfferId, abbrev_uuid};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, QueryBuilder};
use tracing::instrument;

const OFFER_COLUMNS: &str = "id, title, description, merchant_id, category_id, is_active, created_at";

/// Sort order for offer listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OfferOrder {
    /// `created_at` descending
    #[default]
    NewestFirst,
    /// `title` ascending
    Title,
}

/// Filter for listing offers
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    pub active_only: bool,
    /// Case-insensitive substring match on title
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub order: OfferOrder,
}

impl OfferFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    pub fn with_search(mut self, search: String) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn ordered_by(mut self, order: OfferOrder) -> Self {
        self.order = order;
        self
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Offer {
    pub id: OfferId,
    pub title: String,
    pub description: Option<String>,
    pub merchant_id: MerchantId,
    pub category_id: Option<CategoryId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Offer> for OfferDBResponse {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id,
            title: offer.title,
            description: offer.description,
            merchant_id: offer.merchant_id,
            category_id: offer.category_id,
            is_active: offer.is_active,
            created_at: offer.created_at,
        }
    }
}

// Offer joined with its merchant; merchant columns are prefixed to avoid clashes
#[derive(Debug, Clone, FromRow)]
struct OfferWithMerchant {
    #[sqlx(flatten)]
    pub offer: Offer,
    pub merchant_name: String,
    pub merchant_website_url: Option<String>,
    pub merchant_logo_url: Option<String>,
    pub merchant_created_at: DateTime<Utc>,
}

impl From<OfferWithMerchant> for OfferWithMerchantDBResponse {
    fn from(row: OfferWithMerchant) -> Self {
        let merchant = MerchantDBResponse {
            id: row.offer.merchant_id,
            name: row.merchant_name,
            website_url: row.merchant_website_url,
            logo_url: row.merchant_logo_url,
            created_at: row.merchant_created_at,
        };
        Self {
            offer: OfferDBResponse::from(row.offer),
            merchant,
        }
    }
}

pub struct Offers<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Offers<'c> {
    type CreateRequest = OfferCreateDBRequest;
    type Response = OfferDBResponse;
    type Id = OfferId;
    type Filter = OfferFilter;

    #[instrument(skip(self, request), fields(title = %request.title, merchant_id = %abbrev_uuid(&request.merchant_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let sql = format!(
            r#"
            INSERT INTO offers (title, description, merchant_id, category_id, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()))
            RETURNING {OFFER_COLUMNS}
            "#
        );
        let offer = sqlx::query_as::<_, Offer>(&sql)
            .bind(&request.title)
            .bind(&request.description)
            .bind(request.merchant_id)
            .bind(request.category_id)
            .bind(request.is_active)
            .bind(request.created_at)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(OfferDBResponse::from(offer))
    }

    #[instrument(skip(self), fields(offer_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let sql = format!("SELECT {OFFER_COLUMNS} FROM offers WHERE id = $1");
        let offer = sqlx::query_as::<_, Offer>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(offer.map(OfferDBResponse::from))
    }

    #[instrument(skip(self, filter), fields(active_only = filter.active_only, limit = filter.limit, search = filter.search.is_some()), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new(format!("SELECT {OFFER_COLUMNS} FROM offers WHERE 1=1"));

        if filter.active_only {
            query.push(" AND is_active = true");
        }

        if let Some(ref search) = filter.search {
            query.push(" AND title ILIKE ");
            query.push_bind(contains_pattern(search));
        }

        match filter.order {
            OfferOrder::NewestFirst => query.push(" ORDER BY created_at DESC, id"),
            OfferOrder::Title => query.push(" ORDER BY title ASC, id"),
        };

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let offers = query.build_query_as::<Offer>().fetch_all(&mut *self.db).await?;

        tracing::debug!("Retrieved {} offers", offers.len());

        Ok(offers.into_iter().map(OfferDBResponse::from).collect())
    }
}

impl<'c> Offers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Every active offer with its merchant, newest first
    #[instrument(skip(self), err)]
    pub async fn list_active_with_merchants(&mut self) -> Result<Vec<OfferWithMerchantDBResponse>> {
        let rows = sqlx::query_as::<_, OfferWithMerchant>(
            r#"
            SELECT
                o.id, o.title, o.description, o.merchant_id, o.category_id, o.is_active, o.created_at,
                m.name AS merchant_name,
                m.website_url AS merchant_website_url,
                m.logo_url AS merchant_logo_url,
                m.created_at AS merchant_created_at
            FROM offers o
            JOIN merchants m ON m.id = o.merchant_id
            WHERE o.is_active = true
            ORDER BY o.created_at DESC, o.id
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows.into_iter().map(OfferWithMerchantDBResponse::from).collect())
    }
}
