pub mod common_handler;
pub mod friend_request_handler;
pub mod swagger;
pub mod user_handler;

use actix_web::web;
use biz_service::biz_service::Stores;

/// 注册各接口依赖的服务实例
pub fn configure_services(cfg: &mut web::ServiceConfig, stores: &Stores) {
    cfg.app_data(web::Data::new(stores.match_service()));
    cfg.app_data(web::Data::new(stores.friend_service()));
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    swagger::configure(cfg);
    common_handler::configure(cfg);
    user_handler::configure(cfg);
    friend_request_handler::configure(cfg);
}
