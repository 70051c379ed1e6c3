use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use mongodb::error::Error as MongoError;
use serde::Serialize;
use thiserror::Error;

/// HTTP 错误响应结构，只暴露可读的 message
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    // ==== 常规业务错误 ====
    #[error("{0}")]
    NotFound(String),

    /// 请求语义不合法，例如给自己发好友申请
    #[error("{0}")]
    InvalidOperation(String),

    #[error("Bad request: {0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// 违反「已是好友 / 一对用户最多一条申请」约束
    #[error("{0}")]
    Conflict(String),

    // ==== 系统错误 ====
    #[error("MongoDB error: {0}")]
    Mongo(#[from] MongoError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidOperation(_) | AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Mongo(_) | AppError::Json(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            AppError::Mongo(e) => {
                error!("{:?}", e);
                "Internal Server Error".to_string()
            }
            AppError::Json(e) => {
                error!("{:?}", e);
                "Internal Server Error".to_string()
            }
            AppError::Internal(e) => {
                error!("{}", e);
                "Internal Server Error".to_string()
            }
            e => e.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse { message })
    }
}
