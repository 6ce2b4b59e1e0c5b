use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, courses::responses::CourseDetail};

use super::CourseService;

pub async fn handle_get_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get course {}: {}", course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get course",
                )),
            );
        }
    };

    let active = match storage.count_active_enrollments(course_id).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!(
                "Failed to count enrollments for course {}: {}",
                course_id,
                e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to get course",
                )),
            );
        }
    };

    // 任课教师展示名需要额外查一次账号
    let teacher_name = match course.teacher_id {
        Some(teacher_user_id) => match storage.get_account_by_id(teacher_user_id).await {
            Ok(account) => account.map(|a| a.display_name.unwrap_or(a.username)),
            Err(_) => None,
        },
        None => None,
    };

    let detail = CourseDetail::from_course(course, active, teacher_name);
    Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "OK")))
}
