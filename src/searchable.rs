//! Record capability contracts / 记录能力契约
//!
//! Any record type the adapter can index implements [`Searchable`]; the
//! persistence side exposes batch lookup through [`RecordStore`]. Both are
//! explicit trait contracts checked at compile time - the adapter never
//! duck-types its collaborators.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::query::SearchQuery;

/// Soft-delete flag indexed alongside a record (0 = live, 1 = trashed),
/// so trashed-but-retained records can be included or excluded in search
/// without physical removal.
pub const SOFT_DELETE_FIELD: &str = "__soft_deleted";

/// Capability contract for indexable record types / 可索引记录类型的能力契约
pub trait Searchable: Send + Sync {
    /// Index uid this record type's documents live under / 记录所在索引
    fn index_name(&self) -> String;

    /// Name of the primary key field inside the document / 主键字段名
    fn key_name(&self) -> String;

    /// Primary key value of this record / 主键值
    fn search_key(&self) -> Value;

    /// Searchable projection of this record / 可检索字段投影
    ///
    /// An empty map means the record contributes no document and is
    /// skipped during indexing.
    fn to_search_document(&self) -> Map<String, Value>;

    /// Transport metadata merged into every document; wins on field
    /// collision with the projection.
    fn search_metadata(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Whether this record type carries a soft-delete flag
    fn uses_soft_delete(&self) -> bool {
        false
    }

    /// Attach the soft-delete flag to the record's metadata before
    /// serialization. Default is a no-op for hard-delete record types;
    /// soft-delete types merge [`SOFT_DELETE_FIELD`] into their metadata.
    fn push_soft_delete_metadata(&mut self) {}

    /// Start a search query bound to this record type's index
    fn search(&self, query: impl Into<String>) -> SearchQuery
    where
        Self: Sized,
    {
        SearchQuery::new(self.index_name(), query)
    }
}

/// Batch record lookup by primary keys / 按主键批量取回记录
///
/// The persistent store is an external collaborator; the adapter only
/// needs this one operation to reconcile search hits.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Searchable;

    /// Fetch the records for the given keys, constrained by the active
    /// query scope. Keys with no matching record are silently omitted;
    /// result order is unspecified.
    async fn lookup_by_keys(
        &self,
        query: &SearchQuery,
        keys: &[Value],
    ) -> Result<Vec<Self::Record>>;
}
