use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, comments::requests::PostCommentRequest,
    users::entities::AccountRole,
};

use super::CommentService;

pub(super) const MAX_COMMENT_LENGTH: usize = 2000;

/// 发表课程留言。允许：该课程的在读学生、任课教师、管理员。
pub async fn handle_post_comment(
    service: &CommentService,
    course_id: i64,
    post_request: PostCommentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let content = post_request.content.trim();
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

    let Some(current) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

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
                    "Failed to post comment",
                )),
            );
        }
    };

    // 发言权限：管理员、任课教师、或该课程的在读学生
    let is_admin = current
        .account
        .authorize(current.profile.as_ref(), &AccountRole::Admin);
    let is_course_teacher = course.teacher_id == Some(current.account.id);

    let allowed = if is_admin || is_course_teacher {
        true
    } else {
        match storage.get_enrollment(current.account.id, course_id).await {
            Ok(Some(enrollment)) => enrollment.is_active,
            Ok(None) => false,
            Err(e) => {
                tracing::error!(
                    "Failed to check enrollment for user {} in course {}: {}",
                    current.account.id,
                    course_id,
                    e
                );
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to post comment",
                    )),
                );
            }
        }
    };

    if !allowed {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CommentNotAllowed,
            "Only enrolled students and the course teacher can comment",
        )));
    }

    match storage
        .post_comment(course_id, current.account.id, content)
        .await
    {
        Ok(comment) => {
            tracing::info!(
                "User {} commented on course {}",
                current.account.id,
                course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(comment, "Comment posted")))
        }
        Err(e) => {
            tracing::error!("Failed to post comment on course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to post comment",
                )),
            )
        }
    }
}
