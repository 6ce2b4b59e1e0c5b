use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{requests::ProvisionTeacherRequest, responses::TeacherWithAccount},
    users::requests::NewAccount,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::TeacherService;

/// 管理员开通教师账号。账号、教师资料、教师档案在存储层
/// 同一事务内建立，任一步失败则全部回滚。
pub async fn handle_provision_teacher(
    service: &TeacherService,
    provision_request: ProvisionTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 参数校验
    if let Err(msg) = validate_username(&provision_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&provision_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&provision_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }
    if provision_request.teacher_id.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "teacher_id is required",
        )));
    }

    // 2. 冲突检查：用户名、邮箱、教师工号
    match storage
        .get_account_by_username(&provision_request.username)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TeacherProvisionFailed,
                    format!("Provisioning failed: {e}"),
                )),
            );
        }
    }
    match storage.get_account_by_email(&provision_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TeacherProvisionFailed,
                    format!("Provisioning failed: {e}"),
                )),
            );
        }
    }
    match storage
        .get_teacher_by_teacher_id(&provision_request.teacher_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TeacherIdAlreadyExists,
                "Teacher ID already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TeacherProvisionFailed,
                    format!("Provisioning failed: {e}"),
                )),
            );
        }
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&provision_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TeacherProvisionFailed,
                    "Provisioning failed",
                )),
            );
        }
    };

    // 4. 事务内建立账号、资料与档案
    let account = NewAccount {
        username: provision_request.username,
        email: provision_request.email,
        password_hash,
        display_name: provision_request.display_name,
        is_staff: false,
    };

    match storage
        .provision_teacher(
            account,
            provision_request.teacher_id,
            provision_request.department,
            provision_request.bio,
        )
        .await
    {
        Ok((account, teacher)) => {
            tracing::info!("Teacher account {} provisioned", account.username);
            let response = TeacherWithAccount::from_parts(teacher, &account);
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Teacher provisioned")))
        }
        Err(e) => {
            tracing::error!("Teacher provisioning failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TeacherProvisionFailed,
                    format!("Provisioning failed: {e}"),
                )),
            )
        }
    }
}
