use serde_json::Value;

/// 只带提示信息的响应体，与错误响应同形
pub fn result_message(msg: &str) -> Value {
    serde_json::json!({ "message": msg })
}

pub fn result_status() -> Value {
    serde_json::json!({ "status": "ok" })
}
