use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, auth::responses::MeResponse, profiles::entities::Landing,
};

use super::AuthService;

/// 当前登录身份：账号、资料与落地页
pub async fn handle_me(_service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(current) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let landing = Landing::resolve(current.account.is_staff, current.profile.as_ref());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MeResponse {
            account: current.account,
            profile: current.profile,
            landing,
        },
        "OK",
    )))
}
