use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};

use super::CourseService;

pub async fn handle_update_course(
    service: &CourseService,
    course_id: i64,
    update_request: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(max_students) = update_request.max_students
        && max_students <= 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "max_students must be positive",
        )));
    }

    if let Some(teacher_user_id) = update_request.teacher_id {
        match storage.get_teacher_by_user_id(teacher_user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::TeacherNotFound,
                    "Teacher not found",
                )));
            }
            Err(e) => {
                tracing::error!("Failed to check teacher {}: {}", teacher_user_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to update course",
                    )),
                );
            }
        }
    }

    match storage.update_course(course_id, update_request).await {
        Ok(Some(course)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to update course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update course",
                )),
            )
        }
    }
}
