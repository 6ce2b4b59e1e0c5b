use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::EnrollmentService;

/// 学生本人成绩单：活跃选课的课程、成绩与平均分
pub async fn handle_transcript(
    service: &EnrollmentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    match storage.get_transcript(user_id).await {
        Ok(transcript) => Ok(HttpResponse::Ok().json(ApiResponse::success(transcript, "OK"))),
        Err(e) => {
            tracing::error!("Failed to build transcript for user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to build transcript",
                )),
            )
        }
    }
}
