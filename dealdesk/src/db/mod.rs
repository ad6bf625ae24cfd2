//! Database layer for data persistence and access.
//!
//! Data access uses SQLx with PostgreSQL and follows the repository pattern:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (api::handlers - HTTP route handlers)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! Repositories are created from a pooled connection or a transaction. Read-only handlers
//! acquire a connection straight from the pool; multi-statement writes (startup seeding) run
//! inside a transaction.
//!
//! Migrations live in the crate's `migrations/` directory and are applied on startup through
//! [`crate::migrator`].

pub mod embedded;
pub mod errors;
pub mod handlers;
pub mod models;
