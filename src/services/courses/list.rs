use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, courses::requests::CourseListQuery};

use super::CourseService;

pub async fn handle_list_courses(
    service: &CourseService,
    query: CourseListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "OK"))),
        Err(e) => {
            tracing::error!("Failed to list courses: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list courses",
                )),
            )
        }
    }
}
