//! Query specification and filter rendering / 查询规格与过滤渲染
//!
//! Data flow: predicate calls → [`Predicate`] list → rendered filter
//! string → attached to the engine search request by the adapter.

pub mod builder;
pub mod filter;

pub use builder::{SearchCallback, SearchQuery};
pub use filter::{render_filters, Operator, Predicate};
