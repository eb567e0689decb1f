//! Meilisearch adapter layer for application records / 应用记录的 Meilisearch 适配层
//!
//! Two components composed in a pipeline / 两个组件组成管道:
//! - Filter construction: fluent predicate calls rendered into the
//!   engine's native filter syntax ([`query`])
//! - Engine adapter: indexing (upsert/delete/flush) and querying
//!   (search/paginate), reconciling raw hits back into ordered
//!   application records ([`engine`])
//!
//! The engine itself and the record store are external collaborators,
//! reached only through the [`engine::EngineClient`] and
//! [`searchable::RecordStore`] contracts.

pub mod client;
pub mod config;
pub mod engine;
pub mod query;
pub mod searchable;

pub use client::MeiliClient;
pub use config::SearchConfig;
pub use engine::{EngineClient, EngineIndex, Hit, IndexBox, SearchEngine, SearchHits, SearchOptions};
pub use query::{Operator, Predicate, SearchCallback, SearchQuery};
pub use searchable::{RecordStore, Searchable, SOFT_DELETE_FIELD};

/// Wire an engine from configuration / 按配置装配引擎
pub fn engine_from_config(config: &SearchConfig) -> anyhow::Result<SearchEngine> {
    let client = MeiliClient::from_config(config)?;
    Ok(SearchEngine::new(std::sync::Arc::new(client), config.soft_delete))
}
