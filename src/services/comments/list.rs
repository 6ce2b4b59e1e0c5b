use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, PaginationQuery};

use super::CommentService;

pub async fn handle_list_comments(
    service: &CommentService,
    course_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 课程必须存在
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
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
                    "Failed to list comments",
                )),
            );
        }
    }

    match storage.list_comments_with_pagination(course_id, query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "OK"))),
        Err(e) => {
            tracing::error!("Failed to list comments for course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list comments",
                )),
            )
        }
    }
}
