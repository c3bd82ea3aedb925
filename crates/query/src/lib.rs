//! The read path of the trust index: turns stored `country_year` records into
//! the catalog, snapshot and country detail payloads.

use database::TrustStore;
use std::sync::Arc;

pub mod catalog;
pub mod detail;
pub mod error;
pub mod mapper;
pub mod snapshot;
pub mod sources;
pub mod year;

pub use error::QueryError;
pub use sources::SourceAggregator;
pub use year::resolve_year;

/// Answers catalog, snapshot and detail requests against a `TrustStore`.
///
/// Holds no state besides the store handle; clones share the same store and
/// every call is an independent read.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn TrustStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn TrustStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn TrustStore {
        self.store.as_ref()
    }
}
