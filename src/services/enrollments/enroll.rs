use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::GradeSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::EnrollmentService;

/// 学生选课。容量检查在存储层事务内完成，
/// 满员时返回 409 而不是静默忽略。
pub async fn handle_enroll(
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

    match storage.enroll_course(user_id, course_id).await {
        Ok(enrollment) => {
            tracing::info!("User {} enrolled in course {}", user_id, course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "Enrolled")))
        }
        Err(GradeSystemError::CapacityExceeded(msg)) => {
            tracing::info!(
                "Enrollment rejected for user {} in course {}: {}",
                user_id,
                course_id,
                msg
            );
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseCapacityExceeded,
                "Course is full",
            )))
        }
        Err(GradeSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::CourseNotFound, "Course not found"),
        )),
        Err(e) => {
            tracing::error!(
                "Failed to enroll user {} in course {}: {}",
                user_id,
                course_id,
                e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EnrollFailed,
                    "Failed to enroll",
                )),
            )
        }
    }
}
