//! Database record models matching table schemas.
//!
//! These structs correspond to rows of the catalogue tables and are what repositories in
//! [`crate::db::handlers`] accept and return. They are kept separate from the API models in
//! [`crate::api::models`] so the storage and wire representations can evolve independently.
//!
//! - [`categories`]: Offer categories
//! - [`merchants`]: Merchants that publish offers
//! - [`offers`]: Offers, each owned by one merchant and optionally filed under a category

pub mod categories;
pub mod merchants;
pub mod offers;
