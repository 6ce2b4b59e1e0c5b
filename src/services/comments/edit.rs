use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, comments::requests::PostCommentRequest};

use super::{CommentService, post::MAX_COMMENT_LENGTH};

/// 编辑课程留言。仅限留言本人。
pub async fn handle_edit_comment(
    service: &CommentService,
    course_id: i64,
    comment_id: i64,
    edit_request: PostCommentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let content = edit_request.content.trim();
    if content.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Comment content is required",
        )));
    }
    if content.len() > MAX_COMMENT_LENGTH {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Comment content is too long",
        )));
    }

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let comment = match storage.get_comment_by_id(comment_id).await {
        Ok(Some(comment)) if comment.course_id == course_id => comment,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CommentNotFound,
                "Comment not found",
            )));
        }
        Err(e) => {
            tracing::error!("Failed to get comment {}: {}", comment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to edit comment",
                )),
            );
        }
    };

    if comment.user_id != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only the comment author can edit it",
        )));
    }

    match storage.update_comment(comment_id, content).await {
        Ok(Some(updated)) => {
            tracing::info!("User {} edited comment {}", user_id, comment_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Comment updated")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CommentNotFound,
            "Comment not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to update comment {}: {}", comment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to edit comment",
                )),
            )
        }
    }
}
