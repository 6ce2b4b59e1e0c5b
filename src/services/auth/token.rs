use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::responses::{RefreshResponse, TokenVerificationResponse},
};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 使用 Cookie 中的 refresh token 换发新的 access token
pub async fn handle_refresh_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::TokenInvalid,
            "Missing refresh token",
        )));
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshResponse { access_token },
            "Token refreshed",
        ))),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Invalid refresh token",
            )))
        }
    }
}

// 走到这里说明 RequireJWT 已放行
pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

/// 注销：清空 refresh token cookie 并失效缓存的认证上下文
pub async fn handle_logout(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 带 Authorization 头时顺带失效缓存条目
    if let Some(token) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        && let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
    {
        cache.get_ref().remove(&format!("user:{token}")).await;
    }

    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();
    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::success_empty("Logged out")))
}
