//! # dealdesk: merchant offer catalogue
//!
//! `dealdesk` serves a read-only catalogue of merchants, categories and offers as JSON, along
//! with a placeholder storefront page. It is deliberately thin: every endpoint receives a
//! request, runs one repository query (two concurrent ones for search) against PostgreSQL and
//! serializes the rows.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum); persistence is PostgreSQL via
//! SQLx, either external or an embedded instance for development (`embedded-db` feature).
//!
//! - The **API layer** ([`api`]) exposes `/api/categories`, `/api/merchants`, `/api/offers`
//!   and `/api/search`, documented with OpenAPI at `/api/docs`.
//! - The **database layer** ([`db`]) uses the repository pattern; each table has a repository
//!   that owns its queries.
//! - Unmatched paths outside `/api` fall through to the embedded storefront placeholder.
//!
//! A single connection pool is created at startup and shared through [`AppState`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use dealdesk::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = dealdesk::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     dealdesk::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations are embedded in the binary and run on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! dealdesk::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
mod static_assets;
pub mod telemetry;
#[cfg(test)]
mod test_utils;
mod types;

use crate::{
    config::{CorsOrigin, SeedConfig},
    db::{
        handlers::{Categories, Merchants, Offers, Repository},
        models::offers::OfferCreateDBRequest,
    },
    openapi::ApiDoc,
};
use anyhow::Context;
use axum::{
    Router,
    http::{self, HeaderValue, Method},
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder().db(pool).config(config).build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the dealdesk database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Insert the configured catalogue entries the first time the application starts.
///
/// Runs in one transaction and records completion in `system_config`, so restarts never
/// re-insert offers or overwrite manual edits. Categories and merchants that already exist by
/// name are kept as they are. An empty seed section does nothing and leaves the flag unset.
///
/// # Errors
///
/// Returns an error if an offer names a merchant or category that is neither seeded nor
/// already present, or if any database operation fails. Nothing is written in that case.
#[instrument(skip_all)]
pub async fn seed_catalog(seed: &SeedConfig, db: &PgPool) -> anyhow::Result<()> {
    if seed.categories.is_empty() && seed.merchants.is_empty() && seed.offers.is_empty() {
        debug!("No seed data configured");
        return Ok(());
    }

    let mut tx = db.begin().await?;

    let seeded = sqlx::query_scalar::<_, bool>("SELECT value FROM system_config WHERE key = 'catalog_seeded'")
        .fetch_optional(&mut *tx)
        .await?;

    if let Some(true) = seeded {
        info!("Catalogue already seeded, skipping seeding operations");
        tx.commit().await?;
        return Ok(());
    }

    info!(
        categories = seed.categories.len(),
        merchants = seed.merchants.len(),
        offers = seed.offers.len(),
        "Seeding catalogue"
    );

    for name in &seed.categories {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }

    for merchant in &seed.merchants {
        sqlx::query(
            "INSERT INTO merchants (name, website_url, logo_url)
             VALUES ($1, $2, $3)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(&merchant.name)
        .bind(&merchant.website_url)
        .bind(&merchant.logo_url)
        .execute(&mut *tx)
        .await?;
    }

    for offer in &seed.offers {
        let merchant = Merchants::new(&mut tx)
            .get_by_name(&offer.merchant)
            .await?
            .with_context(|| format!("Seed offer '{}' references unknown merchant '{}'", offer.title, offer.merchant))?;

        let category_id = match &offer.category {
            Some(name) => {
                let category = Categories::new(&mut tx)
                    .get_by_name(name)
                    .await?
                    .with_context(|| format!("Seed offer '{}' references unknown category '{}'", offer.title, name))?;
                Some(category.id)
            }
            None => None,
        };

        let request = OfferCreateDBRequest::builder()
            .title(offer.title.clone())
            .maybe_description(offer.description.clone())
            .merchant_id(merchant.id)
            .maybe_category_id(category_id)
            .is_active(offer.is_active)
            .build();
        Offers::new(&mut tx).create(&request).await?;
    }

    sqlx::query(
        "UPDATE system_config SET value = true, updated_at = NOW()
         WHERE key = 'catalog_seeded'",
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    debug!("Catalogue seeded successfully");

    Ok(())
}

/// Start the embedded database if configured, connect the pool and run migrations
async fn setup_database(config: &Config) -> anyhow::Result<(Option<db::embedded::EmbeddedDatabase>, PgPool)> {
    let (embedded_db, database_url) = match &config.database {
        config::DatabaseConfig::Embedded { data_dir, persistent, .. } => {
            info!("Starting with embedded database (persistent: {})", persistent);
            if !persistent {
                info!("persistent=false: database will be ephemeral and data will be lost on shutdown");
            }
            #[cfg(feature = "embedded-db")]
            {
                let embedded_db = db::embedded::EmbeddedDatabase::start(data_dir.clone(), *persistent).await?;
                let url = embedded_db.connection_string().to_string();
                (Some(embedded_db), url)
            }
            #[cfg(not(feature = "embedded-db"))]
            {
                let _ = data_dir;
                anyhow::bail!(
                    "Embedded database is configured but the feature is not enabled. \
                     Rebuild with --features embedded-db to use embedded database."
                );
            }
        }
        config::DatabaseConfig::External { url, .. } => {
            info!("Using external database");
            (None::<db::embedded::EmbeddedDatabase>, url.clone())
        }
    };

    let pool = config
        .database
        .pool_settings()
        .pool_options()
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    migrator().run(&pool).await?;

    Ok((embedded_db, pool))
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    // A wildcard anywhere in the list allows every origin
    let allow_origin = if config.cors.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &config.cors.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                // Url serializes a bare origin with a trailing slash; browsers send it without
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([http::header::ACCEPT, http::header::CONTENT_TYPE])
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router.
///
/// - `/api/*` catalogue endpoints
/// - `/api/docs` (Scalar) and `/api/openapi.json`
/// - `/healthz`
/// - `/internal/metrics` when `enable_metrics` is set
/// - embedded static assets for everything else
///
/// CORS and request tracing wrap the whole router.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    let api_routes = Router::new()
        .route("/categories", get(api::handlers::categories::list_categories))
        .route("/categories/{id}", get(api::handlers::categories::get_category))
        .route("/merchants", get(api::handlers::merchants::list_merchants))
        .route("/merchants/{id}", get(api::handlers::merchants::get_merchant))
        .route("/offers", get(api::handlers::offers::list_offers))
        .route("/offers/{id}", get(api::handlers::offers::get_offer))
        .route("/search", get(api::handlers::search::search))
        .route("/openapi.json", get(|| async { axum::Json(ApiDoc::openapi()) }));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .with_state(state.clone())
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()))
        .fallback(api::handlers::static_assets::serve_embedded_asset);

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// The assembled application: router, connection pool and (optionally) an embedded database.
///
/// 1. **Create**: [`Application::new`] starts the database, runs migrations and seeds the catalogue
/// 2. **Serve**: [`Application::serve`] binds to the configured address and handles requests
/// 3. **Shutdown**: when the shutdown future resolves, in-flight requests drain, the pool closes
///    and the embedded database (if any) stops
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
    embedded_db: Option<db::embedded::EmbeddedDatabase>,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting dealdesk with configuration: {:#?}", config);

        let (embedded_db, pool) = setup_database(&config).await?;
        let mut app = Self::new_with_pool(config, pool).await?;
        app.embedded_db = embedded_db;
        Ok(app)
    }

    /// Create an application around an existing, already migrated pool
    pub async fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        seed_catalog(&config.seed, &pool).await?;

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&app_state)?;

        Ok(Self {
            router,
            config,
            pool,
            embedded_db: None,
        })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("Failed to bind {bind_addr}"))?;
        info!(
            "dealdesk listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        if let Some(embedded_db) = self.embedded_db {
            info!("Shutting down embedded database...");
            embedded_db.stop().await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{AppState, build_router, seed_catalog};
    use crate::config::{SeedConfig, SeedMerchant, SeedOffer};
    use crate::test_utils::*;
    use axum_test::TestServer;
    use sqlx::{PgPool, postgres::PgPoolOptions};

    /// Router over a pool that never connects; only paths that skip the database may be exercised
    fn offline_server() -> TestServer {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://dealdesk@127.0.0.1:1/unreachable")
            .expect("Failed to create lazy pool");
        let state = AppState::builder().db(pool).config(create_test_config()).build();
        let router = build_router(&state).expect("Failed to build router");
        TestServer::new(router).expect("Failed to create test server")
    }

    fn seed_config() -> SeedConfig {
        SeedConfig {
            categories: vec!["Electronics".to_string(), "Travel".to_string()],
            merchants: vec![
                SeedMerchant {
                    name: "Acme".to_string(),
                    website_url: Some("https://acme.example".to_string()),
                    logo_url: None,
                },
                SeedMerchant {
                    name: "Globetrotter".to_string(),
                    website_url: None,
                    logo_url: None,
                },
            ],
            offers: vec![
                SeedOffer {
                    title: "Noise-cancelling headphones -30%".to_string(),
                    description: None,
                    merchant: "Acme".to_string(),
                    category: Some("Electronics".to_string()),
                    is_active: true,
                },
                SeedOffer {
                    title: "Last-minute city breaks".to_string(),
                    description: Some("Weekend deals".to_string()),
                    merchant: "Globetrotter".to_string(),
                    category: Some("Travel".to_string()),
                    is_active: false,
                },
            ],
        }
    }

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let server = offline_server();

        let response = server.get("/healthz").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[tokio::test]
    async fn test_blank_search_needs_no_database() {
        let server = offline_server();

        for path in ["/api/search", "/api/search?q=", "/api/search?q=%20%09"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            response.assert_json(&serde_json::json!({"merchants": [], "offers": []}));
        }
    }

    #[tokio::test]
    async fn test_search_with_nul_is_rejected_before_the_database() {
        let server = offline_server();

        let response = server.get("/api/search?q=a%00b").await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_openapi_document_and_docs_page() {
        let server = offline_server();

        let json = server.get("/api/openapi.json").await;
        json.assert_status_ok();
        let content = json.text();
        assert!(content.contains("\"openapi\""));
        assert!(content.contains("DealDesk API"));

        server.get("/api/docs").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_storefront_fallback() {
        let server = offline_server();

        let response = server.get("/").await;
        response.assert_status_ok();
        assert!(response.text().contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let server = offline_server();

        let response = server
            .method(axum::http::Method::OPTIONS, "/api/offers")
            .add_header("origin", "https://shop.example.com")
            .add_header("access-control-request-method", "GET")
            .await;

        assert_eq!(
            response.headers().get("access-control-allow-origin").map(|v| v.to_str().unwrap()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_metrics_disabled_falls_through() {
        let server = offline_server();

        let content = server.get("/internal/metrics").await.text();
        assert!(!content.contains("# TYPE"));
    }

    #[sqlx::test]
    async fn test_build_router_with_metrics_enabled(pool: PgPool) {
        let mut config = create_test_config();
        config.enable_metrics = true;
        let state = AppState::builder().db(pool).config(config).build();
        let server = TestServer::new(build_router(&state).unwrap()).unwrap();

        server.get("/healthz").await.assert_status_ok();

        let metrics = server.get("/internal/metrics").await;
        metrics.assert_status_ok();
        assert!(metrics.text().contains("# TYPE"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_seed_catalog_is_idempotent(pool: PgPool) {
        let seed = seed_config();

        seed_catalog(&seed, &pool).await.expect("First seeding should succeed");
        assert_eq!(count(&pool, "categories").await, 2);
        assert_eq!(count(&pool, "merchants").await, 2);
        assert_eq!(count(&pool, "offers").await, 2);

        // Manual edits survive a restart
        sqlx::query("DELETE FROM offers WHERE title = 'Last-minute city breaks'")
            .execute(&pool)
            .await
            .unwrap();

        seed_catalog(&seed, &pool).await.expect("Second seeding should succeed");
        assert_eq!(count(&pool, "offers").await, 1);
        assert_eq!(count(&pool, "merchants").await, 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_seeded_catalogue_is_served(pool: PgPool) {
        let mut config = create_test_config();
        config.seed = seed_config();
        let (server, _) = create_test_app_with_config(pool, config).await;

        let offers: serde_json::Value = server.get("/api/offers").await.json();
        let offers = offers.as_array().unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0]["title"], "Noise-cancelling headphones -30%");
        assert_eq!(offers[0]["merchant"]["websiteUrl"], "https://acme.example");

        let search: serde_json::Value = server.get("/api/search?q=city").await.json();
        assert_eq!(search["offers"][0]["isActive"], false);
    }

    #[sqlx::test]
    async fn test_seed_with_unknown_merchant_writes_nothing(pool: PgPool) {
        let mut seed = seed_config();
        seed.offers[0].merchant = "Nobody".to_string();

        let err = seed_catalog(&seed, &pool).await.unwrap_err();
        assert!(err.to_string().contains("Nobody"));

        assert_eq!(count(&pool, "categories").await, 0);
        let seeded = sqlx::query_scalar::<_, bool>("SELECT value FROM system_config WHERE key = 'catalog_seeded'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!seeded);
    }
}
