//! Search query specification / 搜索查询规格
//!
//! One [`SearchQuery`] describes a single search call: free-text query,
//! accumulated filter predicates, paging options and the target index.
//! Constructed fresh per call (usually via [`crate::Searchable::search`])
//! and discarded after rendering.

use std::fmt;
use std::fmt::Display;
use std::sync::Arc;

use anyhow::Result;
use futures::future::BoxFuture;

use super::filter::{render_filters, Operator, Predicate};
use crate::engine::types::{SearchHits, SearchOptions};
use crate::engine::EngineIndex;

/// Raw search callback / 原始搜索回调
///
/// Receives the resolved index handle, the free-text query and the
/// assembled options, and takes over the request entirely - the generated
/// filter pipeline is bypassed.
pub type SearchCallback = Arc<
    dyn for<'a> Fn(&'a dyn EngineIndex, &'a str, SearchOptions) -> BoxFuture<'a, Result<SearchHits>>
        + Send
        + Sync,
>;

pub struct SearchQuery {
    /// Free-text query string / 全文查询串
    pub query: String,
    /// Index the bound record type stores its documents under
    pub index: String,
    /// Explicit index override, takes precedence over `index`
    pub index_override: Option<String>,
    /// Accumulated predicates, rendered in insertion order
    wheres: Vec<Predicate>,
    /// Maximum number of hits to request
    pub limit: Option<usize>,
    /// Raw callback bypassing the generated filter pipeline
    pub callback: Option<SearchCallback>,
}

impl SearchQuery {
    pub fn new(index: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            index: index.into(),
            index_override: None,
            wheres: Vec::new(),
            limit: None,
            callback: None,
        }
    }

    /// Equality predicate / 等值条件
    pub fn where_eq(self, field: impl Into<String>, value: impl Display) -> Self {
        self.where_op(field, "=", value)
    }

    /// Comparison predicate with an explicit operator token / 显式运算符条件
    ///
    /// Supported tokens: `=`, `>`, `<`, `>=`, `<=`, `!=`, `<>`. Anything
    /// else appends no predicate - a silent no-op, not an error. Use
    /// [`Operator`] directly when compile-time checking is wanted.
    pub fn where_op(mut self, field: impl Into<String>, operator: &str, value: impl Display) -> Self {
        if let Some(operator) = Operator::parse(operator) {
            self.wheres.push(Predicate::Compare {
                field: field.into(),
                operator,
                value: value.to_string(),
            });
        }
        self
    }

    /// Set membership predicate / 集合内条件
    ///
    /// Empty value sets append no predicate.
    pub fn where_in<V: Display>(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<String> = values.into_iter().map(|value| value.to_string()).collect();
        if !values.is_empty() {
            self.wheres.push(Predicate::SetIn {
                field: field.into(),
                values,
            });
        }
        self
    }

    /// Set exclusion predicate / 集合外条件
    pub fn where_not_in<V: Display>(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values: Vec<String> = values.into_iter().map(|value| value.to_string()).collect();
        if !values.is_empty() {
            self.wheres.push(Predicate::SetNotIn {
                field: field.into(),
                values,
            });
        }
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Search a different index than the record type's default
    pub fn within_index(mut self, uid: impl Into<String>) -> Self {
        self.index_override = Some(uid.into());
        self
    }

    /// Hand the request over to a raw callback / 交给原始回调处理
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: for<'a> Fn(&'a dyn EngineIndex, &'a str, SearchOptions) -> BoxFuture<'a, Result<SearchHits>>
            + Send
            + Sync
            + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Accumulated predicates, in insertion order
    pub fn predicates(&self) -> &[Predicate] {
        &self.wheres
    }

    /// Full filter expression: the AND-join of all fragments
    pub fn filters(&self) -> Option<String> {
        render_filters(&self.wheres)
    }

    /// Target index, with the explicit override winning
    pub fn resolve_index(&self) -> &str {
        self.index_override.as_deref().unwrap_or(&self.index)
    }
}

impl fmt::Debug for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchQuery")
            .field("query", &self.query)
            .field("index", &self.index)
            .field("index_override", &self.index_override)
            .field("wheres", &self.wheres)
            .field("limit", &self.limit)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_eq_defaults_to_equality() {
        let query = SearchQuery::new("pages", "hello").where_eq("title", "intro");
        assert_eq!(query.filters().unwrap(), "title=\"intro\"");
    }

    #[test]
    fn test_unsupported_operator_is_a_no_op() {
        let query = SearchQuery::new("pages", "hello")
            .where_op("title", "~", "intro")
            .where_op("title", "LIKE", "intro");
        assert_eq!(query.predicates().len(), 0);
        assert_eq!(query.filters(), None);
    }

    #[test]
    fn test_numbers_render_quoted() {
        let query = SearchQuery::new("pages", "hello").where_op("stars", ">=", 50);
        assert_eq!(query.filters().unwrap(), "stars>=\"50\"");
    }

    #[test]
    fn test_where_in_and_empty_set() {
        let query = SearchQuery::new("pages", "hello")
            .where_in("color", ["red", "blue"])
            .where_in("tag", Vec::<String>::new());
        assert_eq!(query.predicates().len(), 1);
        assert_eq!(query.filters().unwrap(), "(color=\"red\" OR color=\"blue\")");
    }

    #[test]
    fn test_where_not_in() {
        let query = SearchQuery::new("pages", "hello").where_not_in("color", ["red"]);
        assert_eq!(query.filters().unwrap(), "NOT (color=\"red\")");
    }

    #[test]
    fn test_chained_predicates_and_join_in_order() {
        let query = SearchQuery::new("pages", "hello")
            .where_eq("status", "published")
            .where_op("stars", ">", 3)
            .where_not_in("color", ["red"]);
        assert_eq!(
            query.filters().unwrap(),
            "status=\"published\" AND stars>\"3\" AND NOT (color=\"red\")"
        );
    }

    #[test]
    fn test_index_override_wins() {
        let query = SearchQuery::new("pages", "hello");
        assert_eq!(query.resolve_index(), "pages");
        let query = query.within_index("pages_staging");
        assert_eq!(query.resolve_index(), "pages_staging");
    }
}
