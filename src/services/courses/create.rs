use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::AccountRole;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::storage::Storage;

use super::CourseService;

pub async fn handle_create_course(
    service: &CourseService,
    mut create_request: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let role = RequireJWT::extract_user_role(request);

    let Some(uid) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if create_request.course_code.trim().is_empty() || create_request.course_name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Course code and name are required",
        )));
    }

    if create_request.max_students <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "max_students must be positive",
        )));
    }

    // 权限校验
    if let Err(resp) =
        check_course_create_permission(role, uid, &mut create_request, &storage).await
    {
        return Ok(resp);
    }

    // 课程编码唯一
    match storage.get_course_by_code(&create_request.course_code).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseCodeAlreadyExists,
                "Course code already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check course code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseCreateFailed,
                    "Failed to create course",
                )),
            );
        }
    }

    match storage.create_course(create_request).await {
        Ok(course) => {
            info!("Course {} created by {}", course.course_code, uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course created")))
        }
        Err(e) => {
            error!("Failed to create course: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseCreateFailed,
                    "Failed to create course",
                )),
            )
        }
    }
}

/// 权限校验辅助函数。
/// 管理员可为任意教师建课；教师只能建自己任课的课程（任课教师落到本人账号）。
async fn check_course_create_permission(
    role: Option<AccountRole>,
    uid: i64,
    create_request: &mut CreateCourseRequest,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match role {
        Some(AccountRole::Admin) => {
            if let Some(teacher_user_id) = create_request.teacher_id {
                match storage.get_teacher_by_user_id(teacher_user_id).await {
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                            ErrorCode::TeacherNotFound,
                            "Teacher not found",
                        )));
                    }
                    Err(e) => {
                        error!("Failed to check teacher {}: {}", teacher_user_id, e);
                        return Err(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::CourseCreateFailed,
                                "Failed to create course",
                            ),
                        ));
                    }
                }
            }
        }
        Some(AccountRole::Teacher) => {
            if create_request.teacher_id.is_some_and(|id| id != uid) {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "You do not have permission to create a course for another teacher",
                )));
            }
            // 教师角色但教师档案缺失：配置错误，不在请求路径修复
            match storage.get_teacher_by_user_id(uid).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::TeacherRecordMissing,
                        "Teacher record is missing, contact administrator",
                    )));
                }
                Err(e) => {
                    error!("Failed to check teacher {}: {}", uid, e);
                    return Err(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::CourseCreateFailed,
                            "Failed to create course",
                        ),
                    ));
                }
            }
            create_request.teacher_id = Some(uid);
        }
        _ => {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only teachers and administrators can create courses",
            )));
        }
    }
    Ok(())
}
