use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use common::errors::AppError;
use common::UserId;
use futures::future::{Ready, ready};

/// 网关完成认证后写入的调用方用户 ID
pub const USER_ID_HEADER: &str = "x-user-id";

/// 当前调用方，直接信任上游网关注入的身份
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: UserId,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(build_auth_user(req))
    }
}

fn build_auth_user(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let uid = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized - No user identity provided".to_string()))?;
    Ok(AuthUser { uid: uid.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn reads_identity_header() {
        let req = TestRequest::default().insert_header((USER_ID_HEADER, " 65a1f0c2e4b0a1b2c3d4e501 ")).to_http_request();
        assert_eq!(build_auth_user(&req).unwrap().uid, "65a1f0c2e4b0a1b2c3d4e501");
    }

    #[test]
    fn missing_or_blank_identity_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(build_auth_user(&req), Err(AppError::Unauthorized(_))));

        let req = TestRequest::default().insert_header((USER_ID_HEADER, "  ")).to_http_request();
        assert!(matches!(build_auth_user(&req), Err(AppError::Unauthorized(_))));
    }
}
