//! Test helpers for building apps and catalogue fixtures.

use crate::config::{Config, DatabaseConfig, PoolSettings};
use crate::db::handlers::{Categories, Merchants, Offers, Repository};
use crate::db::models::{
    categories::{CategoryCreateDBRequest, CategoryDBResponse},
    merchants::{MerchantCreateDBRequest, MerchantDBResponse},
    offers::{OfferCreateDBRequest, OfferDBResponse},
};
use crate::types::MerchantId;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub async fn create_test_app(pool: PgPool) -> (TestServer, Config) {
    create_test_app_with_config(pool, create_test_config()).await
}

pub async fn create_test_app_with_config(pool: PgPool, config: Config) -> (TestServer, Config) {
    let app = crate::Application::new_with_pool(config.clone(), pool)
        .await
        .expect("Failed to create application");

    (app.into_test_server(), config)
}

pub fn create_test_config() -> Config {
    Config {
        database: DatabaseConfig::External {
            // Tests hand in their own pool
            url: "postgres://localhost/dealdesk_test".to_string(),
            pool: PoolSettings {
                max_connections: 2,
                ..Default::default()
            },
        },
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    }
}

pub async fn create_test_category(pool: &PgPool, name: &str) -> CategoryDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Categories::new(&mut conn)
        .create(&CategoryCreateDBRequest::builder().name(name.to_string()).build())
        .await
        .expect("Failed to create test category")
}

pub async fn create_test_merchant(pool: &PgPool, name: &str) -> MerchantDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let request = MerchantCreateDBRequest::builder()
        .name(name.to_string())
        .website_url(format!("https://{}.example", name.to_lowercase().replace(' ', "-")))
        .build();
    Merchants::new(&mut conn)
        .create(&request)
        .await
        .expect("Failed to create test merchant")
}

pub async fn create_test_offer(
    pool: &PgPool,
    merchant_id: MerchantId,
    title: &str,
    is_active: bool,
    created_at: DateTime<Utc>,
) -> OfferDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let request = OfferCreateDBRequest::builder()
        .title(title.to_string())
        .merchant_id(merchant_id)
        .is_active(is_active)
        .created_at(created_at)
        .build();
    Offers::new(&mut conn).create(&request).await.expect("Failed to create test offer")
}
