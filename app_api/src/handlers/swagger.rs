use crate::handlers::common_handler::*;
use crate::handlers::friend_request_handler::*;
use crate::handlers::user_handler::*;
use actix_web::{HttpResponse, Responder, get, web};
use biz_service::entitys::friend_request_entity::{FriendRequestDto, FriendRequestStatus, FriendRequestsDto, PartyDto};
use biz_service::entitys::user_entity::{UserBriefDto, UserProfileDto};
use log::error;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        status,

        //用户-推荐
        recommend_users,
        friend_list,

        //好友-申请
        friend_request_send,
        friend_request_accept,
        friend_request_incoming,
        friend_request_outgoing,
    ),
    components(schemas(
        UserProfileDto,
        UserBriefDto,
        FriendRequestDto,
        FriendRequestsDto,
        FriendRequestStatus,
        PartyDto,
    )),
    tags(
        (name = "skill-swap-api", description = "Skill matching and friend requests")
    )
)]
pub struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}
#[get("/openapi.json")]
async fn openapi_json() -> impl Responder {
    match ApiDoc::openapi().to_json() {
        Ok(body) => HttpResponse::Ok().content_type("application/json").body(body),
        Err(e) => {
            error!("openapi render failed: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
