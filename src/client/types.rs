//! Meilisearch REST API wire types / REST API 传输类型

use serde::{Deserialize, Serialize};

use crate::engine::SearchOptions;

/// Receipt returned by asynchronous write endpoints / 写入操作回执
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    #[serde(rename = "updateId")]
    pub update_id: u64,
}

/// Error body returned by the engine / 引擎错误响应
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "errorCode", default)]
    pub error_code: String,
    #[serde(rename = "errorType", default)]
    pub error_type: String,
    #[serde(rename = "errorLink", default)]
    pub error_link: String,
}

/// Index descriptor / 索引描述
#[derive(Debug, Clone, Deserialize)]
pub struct IndexInfo {
    pub uid: String,
    #[serde(rename = "primaryKey", default)]
    pub primary_key: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /indexes` / 建索引请求体
#[derive(Debug, Clone, Serialize)]
pub struct CreateIndexRequest<'a> {
    pub uid: &'a str,
    #[serde(rename = "primaryKey", skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<&'a str>,
}

/// Body of `POST /indexes/{uid}/search` / 搜索请求体
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub q: &'a str,
    #[serde(flatten)]
    pub options: &'a SearchOptions,
}
