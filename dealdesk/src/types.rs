//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases so signatures say which table they point at:
//!
//! - [`CategoryId`]: Category identifier
//! - [`MerchantId`]: Merchant identifier
//! - [`OfferId`]: Offer identifier
//!
//! [`abbrev_uuid`] shortens UUIDs to their first 8 characters for log fields.

use uuid::Uuid;

pub type CategoryId = Uuid;
pub type MerchantId = Uuid;
pub type OfferId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
