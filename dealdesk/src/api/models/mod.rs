//! API request and response data models.
//!
//! API models are distinct from database models so the wire format can evolve independently of
//! storage. All responses serialize with camelCase field names and are annotated with `utoipa`
//! for the generated OpenAPI document.
//!
//! - [`categories`]: Category listings
//! - [`merchants`]: Merchant listings
//! - [`offers`]: Offers, optionally carrying their merchant
//! - [`search`]: Search query parameters and the combined result set

pub mod categories;
pub mod merchants;
pub mod offers;
pub mod search;
