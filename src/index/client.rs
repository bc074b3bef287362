//! Search-Index Service Client
//!
//! A client for the hosted search index holding content items. The wire
//! shape (query bodies, batch upserts) stays inside this module; consumers
//! only ever see raw hits and receipts.

use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::index::error::QueryError;
use crate::index::{SaveReceipt, SearchIndex, SearchParams};
use reqwest::{Client, ClientBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("chaincms/", env!("CARGO_PKG_VERSION"));

// Search application credentials. Read-only key, safe to embed; writes are
// authorized server-side per session.
const SEARCH_APP_ID: &str = "7YIXP6UJE4";
const SEARCH_API_KEY: &str = "d996dc6831a6c5b37d19240a77d6f135";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    hits_per_page: u32,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    hits: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct BatchRequest {
    requests: Vec<BatchOperation>,
}

#[derive(Debug, Serialize)]
struct BatchOperation {
    action: &'static str,
    body: Value,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(rename = "objectIDs")]
    object_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IndexClient {
    client: Client,
    environment: Environment,
}

impl IndexClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.search_base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, QueryError> {
        if !response.status().is_success() {
            return Err(QueryError::from_response(response).await);
        }
        Ok(response)
    }

    async fn post_request<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, QueryError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Search-Application-Id", SEARCH_APP_ID)
            .header("X-Search-API-Key", SEARCH_API_KEY)
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl SearchIndex for IndexClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn search(
        &self,
        index_name: &str,
        params: SearchParams,
    ) -> Result<Vec<Value>, QueryError> {
        let endpoint = format!("1/indexes/{}/query", urlencoding::encode(index_name));
        let request = QueryRequest {
            query: params.query.as_deref(),
            hits_per_page: params.hits_per_page,
        };
        let response: QueryResponse = self.post_request(&endpoint, &request).await?;
        Ok(response.hits)
    }

    async fn save_objects(
        &self,
        index_name: &str,
        objects: Vec<Value>,
    ) -> Result<SaveReceipt, QueryError> {
        let endpoint = format!("1/indexes/{}/batch", urlencoding::encode(index_name));
        let request = BatchRequest {
            requests: objects
                .into_iter()
                .map(|body| BatchOperation {
                    action: "updateObject",
                    body,
                })
                .collect(),
        };
        let response: BatchResponse = self.post_request(&endpoint, &request).await?;
        Ok(SaveReceipt {
            object_ids: response.object_ids,
        })
    }
}
