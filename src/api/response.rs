use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;

/// Common `{success, message, data, error}` wrapper for every JSON reply.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }),
    )
}

pub fn success_with_message<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    let (status, Json(mut body)) = success(data);
    body.message = Some(message.to_string());
    (status, Json(body))
}

pub fn error(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        status,
        Json(ApiResponse {
            success: false,
            message: Some(message),
            data: None,
            error: None,
        }),
    )
}

/// Failure that also carries the raw cause. Only the probe route exposes this.
pub fn error_with_cause(status: StatusCode, message: &str, cause: String) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, Json(mut body)) = error(status, message.to_string());
    body.error = Some(cause);
    (status, Json(body))
}
