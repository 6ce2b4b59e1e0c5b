use actix_web::{HttpRequest, HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时的统一错误响应
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("请求体解析失败: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

/// Query 参数解析失败时的统一错误响应
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let message = format!("查询参数解析失败: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}
