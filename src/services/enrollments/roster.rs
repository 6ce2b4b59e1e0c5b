use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};

use super::EnrollmentService;

/// 课程名单：活跃选课的学生与成绩，任课教师或管理员可见
pub async fn handle_roster(
    service: &EnrollmentService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = service.check_course_ownership(course_id, request).await {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    match storage.get_roster(course_id).await {
        Ok(roster) => Ok(HttpResponse::Ok().json(ApiResponse::success(roster, "OK"))),
        Err(e) => {
            tracing::error!("Failed to build roster for course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to build roster",
                )),
            )
        }
    }
}
