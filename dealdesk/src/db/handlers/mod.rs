//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction and provides strongly-typed
//! operations for one table, returning models from [`crate::db::models`].
//!
//! - [`Categories`]: Offer categories
//! - [`Merchants`]: Merchants, with substring search on name
//! - [`Offers`]: Offers, with active-only listing, title search and merchant joins
//!
//! ```ignore
//! use dealdesk::db::handlers::{Merchants, Repository, merchants::MerchantFilter};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Merchants::new(&mut conn);
//!     let merchants = repo.list(&MerchantFilter::new().with_search("shoe".to_string())).await?;
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod merchants;
pub mod offers;
pub mod repository;

pub use categories::Categories;
pub use merchants::Merchants;
pub use offers::Offers;
pub use repository::Repository;

/// Build a `LIKE` pattern matching any value that contains `needle`.
///
/// `%`, `_` and `\` in the needle are escaped so they match literally. Queries using the
/// pattern must keep the default `\` escape character.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
