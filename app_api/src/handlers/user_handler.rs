use crate::auth::AuthUser;
use actix_web::{Responder, get, web};
use biz_service::biz_service::friend_service::FriendService;
use biz_service::biz_service::match_service::MatchService;
use biz_service::entitys::user_entity::{UserBriefDto, UserProfileDto};
use common::errors::AppError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(recommend_users);
    cfg.service(friend_list);
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "用户-推荐",
    summary = "推荐会教我想学技能的用户",
    params(("x-user-id" = String, Header, description = "调用方用户 ID")),
    responses(
        (status = 200, description = "候选用户", body = Vec<UserProfileDto>),
        (status = 401, description = "缺少身份"),
        (status = 404, description = "用户不存在")
    )
)]
#[get("/api/users")]
pub async fn recommend_users(auth: AuthUser, service: web::Data<MatchService>) -> Result<impl Responder, AppError> {
    let list = service.recommend(&auth.uid).await?;
    Ok(web::Json(list))
}

#[utoipa::path(
    get,
    path = "/api/users/friends",
    tag = "用户-推荐",
    summary = "获取好友列表",
    params(("x-user-id" = String, Header, description = "调用方用户 ID")),
    responses(
        (status = 200, description = "好友资料", body = Vec<UserBriefDto>),
        (status = 401, description = "缺少身份"),
        (status = 404, description = "用户不存在")
    )
)]
#[get("/api/users/friends")]
pub async fn friend_list(auth: AuthUser, service: web::Data<FriendService>) -> Result<impl Responder, AppError> {
    let list = service.list_friends(&auth.uid).await?;
    Ok(web::Json(list))
}
