use crate::auth::AuthUser;
use crate::result::result_message;
use actix_web::{HttpResponse, Responder, get, route, web};
use biz_service::biz_service::friend_service::FriendService;
use biz_service::entitys::friend_request_entity::{FriendRequestDto, FriendRequestsDto};
use common::errors::AppError;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(friend_request_send);
    cfg.service(friend_request_accept);
    cfg.service(friend_request_incoming);
    cfg.service(friend_request_outgoing);
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct IdPath {
    /// 用户 ID 或申请 ID
    #[validate(length(min = 1, max = 64))]
    pub id: String,
}

#[utoipa::path(
    post,
    path = "/api/users/friend-request/{id}",
    tag = "好友-申请",
    summary = "向指定用户发送好友申请",
    params(IdPath, ("x-user-id" = String, Header, description = "调用方用户 ID")),
    responses(
        (status = 201, description = "已创建的申请", body = FriendRequestDto),
        (status = 400, description = "给自己发送、已是好友或申请已存在"),
        (status = 401, description = "缺少身份"),
        (status = 404, description = "接收方不存在")
    )
)]
#[route("/api/users/friend-request/{id}", method = "POST")]
pub async fn friend_request_send(auth: AuthUser, path: web::Path<IdPath>, service: web::Data<FriendService>) -> Result<impl Responder, AppError> {
    path.validate()?;
    let request = service.send_request(&auth.uid, &path.id).await?;
    Ok(HttpResponse::Created().json(request))
}

#[utoipa::path(
    method(post, patch),
    path = "/api/users/friend-request/{id}/accept",
    tag = "好友-申请",
    summary = "接受好友申请",
    params(IdPath, ("x-user-id" = String, Header, description = "调用方用户 ID")),
    responses(
        (status = 200, description = "{\"message\": \"Friend request accepted\"}", body = Object),
        (status = 401, description = "缺少身份"),
        (status = 403, description = "不是该申请的接收方"),
        (status = 404, description = "申请不存在")
    )
)]
#[route("/api/users/friend-request/{id}/accept", method = "POST", method = "PATCH")]
pub async fn friend_request_accept(auth: AuthUser, path: web::Path<IdPath>, service: web::Data<FriendService>) -> Result<impl Responder, AppError> {
    path.validate()?;
    service.accept_request(&path.id, &auth.uid).await?;
    Ok(web::Json(result_message("Friend request accepted")))
}

#[utoipa::path(
    get,
    path = "/api/users/friend-requests",
    tag = "好友-申请",
    summary = "收到的待处理申请与已通过的申请",
    params(("x-user-id" = String, Header, description = "调用方用户 ID")),
    responses((status = 200, description = "通知面板", body = FriendRequestsDto))
)]
#[get("/api/users/friend-requests")]
pub async fn friend_request_incoming(auth: AuthUser, service: web::Data<FriendService>) -> Result<impl Responder, AppError> {
    let requests = service.list_incoming_requests(&auth.uid).await?;
    Ok(web::Json(requests))
}

#[utoipa::path(
    get,
    path = "/api/users/outgoing-friend-requests",
    tag = "好友-申请",
    summary = "自己发出的待处理申请",
    params(("x-user-id" = String, Header, description = "调用方用户 ID")),
    responses((status = 200, description = "待处理申请", body = Vec<FriendRequestDto>))
)]
#[get("/api/users/outgoing-friend-requests")]
pub async fn friend_request_outgoing(auth: AuthUser, service: web::Data<FriendService>) -> Result<impl Responder, AppError> {
    let requests = service.list_outgoing_requests(&auth.uid).await?;
    Ok(web::Json(requests))
}
