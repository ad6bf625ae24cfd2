//! Database repository for merchants.

use crate::db::{
    errors::Result,
    handlers::{contains_pattern, repository::Repository},
    models::merchants::{MerchantCreateDBRequest, MerchantDBResponse},
};
use crate::types::{MerchantId, abbrev_uuid};
use sqlx::{PgConnection, QueryBuilder};
use tracing::instrument;

/// Filter for listing merchants
#[derive(Debug, Clone, Default)]
pub struct MerchantFilter {
    /// Case-insensitive substring match on name
    pub search: Option<String>,
    pub limit: Option<i64>,
}

impl MerchantFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: String) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub struct Merchants<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Merchants<'c> {
    type CreateRequest = MerchantCreateDBRequest;
    type Response = MerchantDBResponse;
    type Id = MerchantId;
    type Filter = MerchantFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let merchant = sqlx::query_as::<_, MerchantDBResponse>(
            r#"
            INSERT INTO merchants (name, website_url, logo_url)
            VALUES ($1, $2, $3)
            RETURNING id, name, website_url, logo_url, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.website_url)
        .bind(&request.logo_url)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(merchant)
    }

    #[instrument(skip(self), fields(merchant_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let merchant = sqlx::query_as::<_, MerchantDBResponse>(
            "SELECT id, name, website_url, logo_url, created_at FROM merchants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(merchant)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, search = filter.search.is_some()), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::new("SELECT id, name, website_url, logo_url, created_at FROM merchants WHERE 1=1");

        if let Some(ref search) = filter.search {
            query.push(" AND name ILIKE ");
            query.push_bind(contains_pattern(search));
        }

        query.push(" ORDER BY name ASC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ");
            query.push_bind(limit);
        }

        let merchants = query.build_query_as::<MerchantDBResponse>().fetch_all(&mut *self.db).await?;

        tracing::debug!("Retrieved {} merchants", merchants.len());

        Ok(merchants)
    }
}

impl<'c> Merchants<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up a merchant by its unique name
    #[instrument(skip(self), err)]
    pub async fn get_by_name(&mut self, name: &str) -> Result<Option<MerchantDBResponse>> {
        let merchant = sqlx::query_as::<_, MerchantDBResponse>(
            "SELECT id, name, website_url, logo_url, created_at FROM merchants WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(merchant)
    }
}
