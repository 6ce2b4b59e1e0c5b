use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::EnrollmentService;

/// 学生退课。记录置为不活跃，成绩保留，重选后可见。
pub async fn handle_drop(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    match storage.drop_course(user_id, course_id).await {
        Ok(true) => {
            tracing::info!("User {} dropped course {}", user_id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Dropped")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "No active enrollment for this course",
        ))),
        Err(e) => {
            tracing::error!(
                "Failed to drop course {} for user {}: {}",
                course_id,
                user_id,
                e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to drop course",
                )),
            )
        }
    }
}
