//! # Trust Index Database Crate
//!
//! This crate is the storage adapter of the trust index API. It owns the
//! PostgreSQL schema (`countries` and `country_year`) and every SQL query the
//! service runs.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** The rest of the application only sees the `TrustStore`
//!   trait and the raw row structs it returns; SQL stays in this crate.
//! - **Raw rows out:** Numeric columns are returned as text and `sources_used`
//!   as serialized JSON. Callers decide what counts as malformed data.
//! - **Asynchronous & Pooled:** One lazily-connecting `PgPool` is shared by
//!   every request.
//! - **Parameterized only:** No query text is assembled from request input.
//!
//! ## Public API
//!
//! - `connect`: Builds the connection pool from `DatabaseSettings`.
//! - `run_migrations`: Applies the embedded schema migrations.
//! - `TrustStore`: The read interface used by the query service.
//! - `DbRepository`: The PostgreSQL implementation of `TrustStore`.
//! - `MemoryStore`: An in-process implementation for tests.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod rows;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryStore;
pub use repository::DbRepository;
pub use rows::{CatalogRow, CountryRow, RecordRow, ScoreRow};
pub use store::TrustStore;
