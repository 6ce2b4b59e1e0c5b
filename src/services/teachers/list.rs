use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, PaginationQuery};

use super::TeacherService;

pub async fn handle_list_teachers(
    service: &TeacherService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "OK"))),
        Err(e) => {
            tracing::error!("Failed to list teachers: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to list teachers",
                )),
            )
        }
    }
}
