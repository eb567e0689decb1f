//! Search engine adapter / 搜索引擎适配器
//!
//! Bridges the application's indexing and query lifecycle to an external
//! Meilisearch instance. Architecture principles / 架构原则:
//! - The adapter only composes requests and reconciles results; ranking,
//!   tokenization and storage belong to the engine
//! - Indexing is best-effort: transport failures are logged and swallowed
//!   so record lifecycle hooks never break on an unreachable engine
//! - Query failures always propagate - a failed search has no safe
//!   default result
//! - Call direction: application → adapter → engine client (unidirectional)

pub mod types;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::query::SearchQuery;
use crate::searchable::{RecordStore, Searchable};
pub use types::{Hit, SearchHits, SearchOptions};

/// Per-index engine handle (primitive operations only) / 索引句柄
#[async_trait]
pub trait EngineIndex: Send + Sync {
    /// Index uid / 索引uid
    fn uid(&self) -> &str;

    /// Upsert a document batch; `primary_key` names the unique document
    /// field. Re-issuing the same keys overwrites - idempotent.
    async fn add_documents(
        &self,
        documents: Vec<Map<String, Value>>,
        primary_key: &str,
    ) -> Result<()>;

    /// Delete the documents with the given keys. Absent keys are a no-op
    /// at the engine level.
    async fn delete_documents(&self, keys: &[Value]) -> Result<()>;

    /// Drop every document in the index / 清空索引
    async fn delete_all_documents(&self) -> Result<()>;

    /// Run one search request / 执行搜索
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchHits>;
}

pub type IndexBox = Box<dyn EngineIndex>;

/// Engine client handing out per-index handles / 引擎客户端
pub trait EngineClient: Send + Sync {
    fn index(&self, uid: &str) -> IndexBox;
}

/// The adapter itself. Holds nothing but the client handle and the
/// soft-delete flag, both fixed at construction; every call is otherwise
/// stateless, so no locking is needed and callers parallelize externally.
pub struct SearchEngine {
    client: Arc<dyn EngineClient>,
    soft_delete: bool,
}

impl SearchEngine {
    pub fn new(client: Arc<dyn EngineClient>, soft_delete: bool) -> Self {
        Self {
            client,
            soft_delete,
        }
    }

    /// Underlying client, for engine-specific operations not modeled by
    /// the adapter / 底层客户端逃生门
    pub fn client(&self) -> Arc<dyn EngineClient> {
        self.client.clone()
    }

    /// Upsert a record batch into its index / 更新索引
    ///
    /// The target index comes from the first record; batches are assumed
    /// homogeneous and this is not validated. Records whose searchable
    /// projection is empty contribute no document. Transport failures are
    /// logged and swallowed.
    pub async fn update<M: Searchable>(&self, records: &mut [M]) {
        if records.is_empty() {
            return;
        }

        let index = self.client.index(&records[0].index_name());
        let primary_key = records[0].key_name();

        if self.soft_delete && records[0].uses_soft_delete() {
            for record in records.iter_mut() {
                record.push_soft_delete_metadata();
            }
        }

        let documents: Vec<Map<String, Value>> = records
            .iter()
            .filter_map(|record| {
                let mut document = record.to_search_document();
                if document.is_empty() {
                    return None;
                }
                document.extend(record.search_metadata());
                Some(document)
            })
            .collect();

        if documents.is_empty() {
            return;
        }

        if let Err(e) = index.add_documents(documents, &primary_key).await {
            tracing::error!("Meilisearch error, check server status: {}", e);
        }
    }

    /// Remove a record batch from its index / 删除索引记录
    pub async fn delete<M: Searchable>(&self, records: &[M]) {
        if records.is_empty() {
            return;
        }

        let index = self.client.index(&records[0].index_name());
        let keys: Vec<Value> = records.iter().map(|record| record.search_key()).collect();

        if let Err(e) = index.delete_documents(&keys).await {
            tracing::error!("Meilisearch error, check server status: {}", e);
        }
    }

    /// Drop all documents of a record type's index / 清空记录类型的索引
    pub async fn flush<M: Searchable>(&self, model: &M) {
        let index = self.client.index(&model.index_name());

        if let Err(e) = index.delete_all_documents().await {
            tracing::error!("Meilisearch error, check server status: {}", e);
        }
    }

    /// Run a search / 执行搜索
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchHits> {
        let mut options = SearchOptions::new();
        options.filters = query.filters();
        options.limit = query.limit;
        self.perform_search(query, options).await
    }

    /// Run a paginated search, 1-based pages / 分页搜索
    pub async fn paginate(
        &self,
        query: &SearchQuery,
        per_page: usize,
        page: usize,
    ) -> Result<SearchHits> {
        let mut options = SearchOptions::new()
            .with_limit(per_page)
            .with_offset(page.saturating_sub(1) * per_page);
        options.filters = query.filters();
        self.perform_search(query, options).await
    }

    async fn perform_search(
        &self,
        query: &SearchQuery,
        options: SearchOptions,
    ) -> Result<SearchHits> {
        let index = self.client.index(query.resolve_index());

        if let Some(callback) = &query.callback {
            return callback(index.as_ref(), &query.query, options).await;
        }

        index.search(&query.query, &options).await
    }

    /// Pluck the primary keys out of a raw result set, preserving hit
    /// order / 提取命中记录的主键
    ///
    /// The key field is inferred from the first field of the first hit,
    /// which relies on the engine returning fields in stored order. Use
    /// [`SearchEngine::map`] with its explicit key name when possible.
    pub fn map_ids(&self, results: &SearchHits) -> Vec<Value> {
        let key = match results.hits.first().and_then(|hit| hit.keys().next()) {
            Some(key) => key.clone(),
            None => return Vec::new(),
        };

        results
            .hits
            .iter()
            .filter_map(|hit| hit.get(&key).cloned())
            .collect()
    }

    /// Reconcile raw hits back into stored records / 命中结果对账
    ///
    /// Keys are plucked by the model's declared key name, candidate
    /// records batch-fetched from the store, hits pointing at records that
    /// no longer exist dropped, and the survivors re-sorted to the
    /// engine's relevance order (store fetch order is unspecified).
    pub async fn map<S: RecordStore>(
        &self,
        query: &SearchQuery,
        results: Option<&SearchHits>,
        model: &S::Record,
        store: &S,
    ) -> Result<Vec<S::Record>> {
        let results = match results {
            Some(results) if !results.hits.is_empty() => results,
            _ => return Ok(Vec::new()),
        };

        let key_name = model.key_name();
        let keys: Vec<Value> = results
            .hits
            .iter()
            .filter_map(|hit| hit.get(&key_name).cloned())
            .collect();

        // Rank of each key in the engine's relevance order
        let positions: HashMap<String, usize> = keys
            .iter()
            .enumerate()
            .map(|(position, key)| (key.to_string(), position))
            .collect();

        let mut records = store.lookup_by_keys(query, &keys).await?;
        records.retain(|record| keys.contains(&record.search_key()));
        records.sort_by_key(|record| {
            positions
                .get(&record.search_key().to_string())
                .copied()
                .unwrap_or(usize::MAX)
        });

        Ok(records)
    }

    /// Engine-reported total match count, taken verbatim from the
    /// response - it may exceed the page actually returned.
    pub fn total_count(&self, results: &SearchHits) -> u64 {
        results.total_hits
    }
}
