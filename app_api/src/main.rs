use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use app_api::handlers;
use biz_service::biz_service::Stores;
use biz_service::store::memory_store::MemoryUserStore;
use common::config::{AppConfig, StoreKind};
use common::repository::db;
use env_logger::Env;
use log::warn;
use std::path::Path;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 读取配置文件
    let config_file = std::env::var("APP_CONFIG").unwrap_or_else(|_| "api-config.toml".to_string());
    AppConfig::init(&config_file).map_err(std::io::Error::other)?;
    let app_cfg = AppConfig::get();
    //初始化日志
    init_log(&app_cfg);

    let stores = build_stores(&app_cfg).await.map_err(std::io::Error::other)?;

    let address_and_port = format!("{}:{}", &app_cfg.get_server().host, &app_cfg.get_server().port);
    warn!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            // 配置 控制器
            .configure(|cfg| {
                handlers::configure_services(cfg, &stores);
                handlers::configure(cfg);
            })
    })
    .keep_alive(actix_web::http::KeepAlive::Timeout(std::time::Duration::from_secs(600)))
    .bind(address_and_port)?
    .run()
    .await
}

fn init_log(cfg: &AppConfig) {
    let level = cfg.get_sys().log_level;
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

async fn build_stores(cfg: &AppConfig) -> anyhow::Result<Stores> {
    let database = cfg.get_database();
    match database.kind {
        StoreKind::Mongo => {
            let db = db::connect(&database).await?;
            Ok(Stores::mongo(&db).await?)
        }
        StoreKind::Memory => {
            let users = MemoryUserStore::new();
            if let Some(seed) = &database.seed_file {
                users.load_seed(Path::new(seed))?;
            }
            warn!("using in-memory store, data is lost on restart");
            Ok(Stores::memory(users))
        }
    }
}
