//! HTTP request handlers for all API endpoints.
//!
//! Each handler acquires a pooled connection from [`crate::AppState`], runs a repository
//! query and serializes the result as JSON. Errors are converted to responses by
//! [`crate::errors::Error`].
//!
//! # Handler Modules
//!
//! - [`categories`]: Category listing and lookup
//! - [`merchants`]: Merchant listing and lookup
//! - [`offers`]: Active offer listing and offer lookup, with merchants embedded
//! - [`search`]: Concurrent merchant/offer substring search
//! - [`static_assets`]: Placeholder storefront pages

pub mod categories;
pub mod merchants;
pub mod offers;
pub mod search;
pub mod static_assets;
