use crate::environment::Environment;
use crate::index::error::QueryError;

pub(crate) mod client;
pub use client::IndexClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Parameters of a single index query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchParams {
    /// Free-text filter; `None` lists objects in index order.
    pub query: Option<String>,
    /// Page size for the single page returned.
    pub hits_per_page: u32,
}

/// Acknowledgement returned by the index after an object upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// IDs assigned to the saved objects, in submission order.
    pub object_ids: Vec<String>,
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SearchIndex: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Run a query against an index. Returns the raw hits; callers own the
    /// decoding.
    async fn search(
        &self,
        index_name: &str,
        params: SearchParams,
    ) -> Result<Vec<serde_json::Value>, QueryError>;

    /// Upsert objects into an index.
    async fn save_objects(
        &self,
        index_name: &str,
        objects: Vec<serde_json::Value>,
    ) -> Result<SaveReceipt, QueryError>;
}
