//! Search configuration module / 搜索配置模块
//!
//! Manages adapter configuration loaded from search.json
//! Creates default config file on first run / 首次运行时创建默认配置文件
//!
//! Values are read once at wiring time and handed to the engine
//! explicitly; core logic never reaches back into configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search adapter configuration / 搜索适配器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Meilisearch host / Meilisearch 地址
    pub host: String,
    /// API key sent as X-Meili-API-Key, None for unprotected instances / API密钥
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// HTTP timeout in seconds / HTTP 超时
    pub timeout_secs: u64,
    /// Index a soft-delete flag with every record instead of removing it / 软删除
    pub soft_delete: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1:7700".to_string(),
            api_key: None,
            timeout_secs: 30,
            soft_delete: false,
        }
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("search.json")
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<SearchConfig, String> {
    let config_path = get_config_path();

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: SearchConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded search configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = SearchConfig::default();
        save_config(&config)?;
        tracing::info!("Created default search configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config: &SearchConfig) -> Result<(), String> {
    let config_path = get_config_path();

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.host, "http://127.0.0.1:7700");
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.soft_delete);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = SearchConfig {
            host: "http://search.internal:7700".to_string(),
            api_key: Some("masterKey".to_string()),
            timeout_secs: 10,
            soft_delete: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.host, config.host);
        assert_eq!(parsed.api_key, config.api_key);
        assert!(parsed.soft_delete);
    }

    #[test]
    fn test_api_key_omitted_from_serialized_form_when_unset() {
        let json = serde_json::to_string(&SearchConfig::default()).unwrap();
        assert!(!json.contains("api_key"));
    }
}
