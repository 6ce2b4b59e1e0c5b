use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, profiles::requests::UpdateProfileRequest};

use super::ProfileService;

pub async fn handle_update_profile(
    service: &ProfileService,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    match storage.update_profile(user_id, update_request).await {
        Ok(Some(profile)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "Profile updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AccountNotProvisioned,
            "Account has no profile, contact administrator",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update profile: {e}"),
            )),
        ),
    }
}
