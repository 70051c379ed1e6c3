use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use log::info;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// 建立 MongoDB 连接并做一次 ping，连接失败时尽早暴露
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let mut client_options = ClientOptions::parse(&config.url).await.context("MongoDB URI parse error")?;
    client_options.app_name = Some("skill-swap-api".to_string());

    let client = Client::with_options(client_options).context("MongoDB client init error")?;
    let db = client.database(&config.db_name);
    db.run_command(doc! { "ping": 1 }).await.with_context(|| format!("MongoDB ping failed: {}", config.db_name))?;

    info!("connected to MongoDB database {}", config.db_name);
    Ok(db)
}
