//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Categories** (`/api/categories/*`): Offer categories, sorted by name
//! - **Merchants** (`/api/merchants/*`): Merchants publishing offers, sorted by name
//! - **Offers** (`/api/offers/*`): Active offers with their merchant, newest first
//! - **Search** (`/api/search?q=`): Substring search over merchant names and offer titles
//!
//! All endpoints are read-only and unauthenticated. API documentation is available at
//! `/api/docs` when the server is running.

pub mod handlers;
pub mod models;
