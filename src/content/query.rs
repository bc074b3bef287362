//! Content Query Facade
//!
//! Issues list/search queries against the search-index boundary and
//! normalizes raw hits into validated [`ContentRecord`]s. Malformed hits are
//! logged and dropped; well-formed neighbors survive.

use crate::content::record::ContentRecord;
use crate::index::error::QueryError;
use crate::index::{SaveReceipt, SearchIndex, SearchParams};
use std::sync::Arc;

pub struct ContentQuery {
    index: Arc<dyn SearchIndex>,
    index_name: String,
}

impl ContentQuery {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        let index_name = index.environment().content_index().to_string();
        Self { index, index_name }
    }

    /// Fetch the first page of content records, in index order.
    pub async fn fetch_all(&self, page_size: u32) -> Result<Vec<ContentRecord>, QueryError> {
        let params = SearchParams {
            query: None,
            hits_per_page: page_size,
        };
        let hits = self.index.search(&self.index_name, params).await?;
        Ok(Self::decode_hits(&hits))
    }

    /// Fetch content records matching a free-text term.
    pub async fn search(
        &self,
        term: &str,
        page_size: u32,
    ) -> Result<Vec<ContentRecord>, QueryError> {
        let params = SearchParams {
            query: Some(term.to_string()),
            hits_per_page: page_size,
        };
        let hits = self.index.search(&self.index_name, params).await?;
        Ok(Self::decode_hits(&hits))
    }

    /// Upsert a single record into the index.
    pub async fn save(&self, record: &ContentRecord) -> Result<SaveReceipt, QueryError> {
        let object = serde_json::to_value(record)?;
        self.index
            .save_objects(&self.index_name, vec![object])
            .await
    }

    fn decode_hits(hits: &[serde_json::Value]) -> Vec<ContentRecord> {
        let mut records = Vec::with_capacity(hits.len());
        for hit in hits {
            match ContentRecord::from_hit(hit) {
                Some(record) => records.push(record),
                None => log::warn!("Dropping malformed content hit: {}", hit),
            }
        }
        records
    }
}
