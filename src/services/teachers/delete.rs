use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::TeacherService;

/// 注销教师账号。资料与档案级联删除，课程任课教师置空。
pub async fn handle_delete_teacher(
    service: &TeacherService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 不允许注销自己
    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Cannot delete your own account",
        )));
    }

    // 目标必须是教师账号
    match storage.get_teacher_by_user_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to check teacher {}: {}", user_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete teacher",
                )),
            );
        }
    }

    match storage.delete_teacher(user_id).await {
        Ok(true) => {
            tracing::info!("Teacher account {} deleted", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete teacher {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to delete teacher",
                )),
            )
        }
    }
}
