//! End-to-end walkthrough / 端到端演示
//!
//! Wires an engine from configuration, indexes a few records, runs
//! filtered and paginated searches and reconciles the hits back into
//! ordered records. Needs a running Meilisearch instance (default
//! http://127.0.0.1:7700).

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meilibridge::{
    config, MeiliClient, RecordStore, Searchable, SearchEngine, SearchQuery, SOFT_DELETE_FIELD,
};

#[derive(Debug, Clone)]
struct Article {
    id: u64,
    title: String,
    body: String,
    category: String,
    stars: i64,
    published_at: i64,
    metadata: Map<String, Value>,
}

impl Article {
    fn new(id: u64, title: &str, body: &str, category: &str, stars: i64) -> Self {
        Self {
            id,
            title: title.to_string(),
            body: body.to_string(),
            category: category.to_string(),
            stars,
            published_at: Utc::now().timestamp(),
            metadata: Map::new(),
        }
    }
}

impl Searchable for Article {
    fn index_name(&self) -> String {
        "articles".to_string()
    }

    fn key_name(&self) -> String {
        "id".to_string()
    }

    fn search_key(&self) -> Value {
        json!(self.id)
    }

    fn to_search_document(&self) -> Map<String, Value> {
        let mut document = Map::new();
        document.insert("id".to_string(), json!(self.id));
        document.insert("title".to_string(), json!(self.title));
        document.insert("body".to_string(), json!(self.body));
        document.insert("category".to_string(), json!(self.category));
        document.insert("stars".to_string(), json!(self.stars));
        document.insert("published_at".to_string(), json!(self.published_at));
        document
    }

    fn search_metadata(&self) -> Map<String, Value> {
        self.metadata.clone()
    }

    fn uses_soft_delete(&self) -> bool {
        true
    }

    fn push_soft_delete_metadata(&mut self) {
        self.metadata
            .insert(SOFT_DELETE_FIELD.to_string(), json!(0));
    }
}

/// In-memory stand-in for the application's persistent store
struct ArticleStore {
    articles: Vec<Article>,
}

#[async_trait]
impl RecordStore for ArticleStore {
    type Record = Article;

    async fn lookup_by_keys(&self, _query: &SearchQuery, keys: &[Value]) -> Result<Vec<Article>> {
        Ok(self
            .articles
            .iter()
            .filter(|article| keys.contains(&article.search_key()))
            .cloned()
            .collect())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meilibridge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;

    // The concrete client doubles as the escape hatch for operations the
    // adapter does not model (index management, health)
    let client = MeiliClient::from_config(&app_config)?;
    client.health().await?;
    if client.get_index("articles").await.is_err() {
        client.create_index("articles", Some("id")).await?;
    }

    let engine = SearchEngine::new(Arc::new(client), app_config.soft_delete);

    let mut articles = vec![
        Article::new(1, "Ownership in practice", "borrow checker field notes", "systems", 87),
        Article::new(2, "Async pitfalls", "cancellation and timeouts", "systems", 42),
        Article::new(3, "Styling forms", "css grid recipes", "web", 13),
    ];
    engine.update(&mut articles).await;
    tracing::info!("indexed {} articles", articles.len());

    // Document writes are processed asynchronously on the engine side
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;

    let query = articles[0]
        .search("rust")
        .where_op("stars", ">=", 40)
        .where_in("category", ["systems", "web"])
        .with_limit(10);
    let results = engine.search(&query).await?;
    tracing::info!(
        "{} of {} total matches on this page",
        results.hits.len(),
        engine.total_count(&results)
    );

    let store = ArticleStore {
        articles: articles.clone(),
    };
    let ordered = engine
        .map(&query, Some(&results), &articles[0], &store)
        .await?;
    for article in &ordered {
        println!("#{:<3} {:<24} {} stars", article.id, article.title, article.stars);
    }

    let second_page = engine.paginate(&query, 2, 2).await?;
    tracing::info!("page 2 carries {} hits", second_page.hits.len());

    Ok(())
}
