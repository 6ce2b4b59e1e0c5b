use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::RegisterRequest,
    users::requests::NewAccount,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

/// 学生自助注册。账号与学生资料由存储层在同一事务内建立。
pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 参数校验
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }

    // 2. 冲突检查
    match storage.get_account_by_username(&register_request.username).await {
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
                    ErrorCode::InternalServerError,
                    format!("Registration failed: {e}"),
                )),
            );
        }
    }
    match storage.get_account_by_email(&register_request.email).await {
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
                    ErrorCode::InternalServerError,
                    format!("Registration failed: {e}"),
                )),
            );
        }
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration failed",
                )),
            );
        }
    };

    // 4. 创建账号与学生资料
    let account = NewAccount {
        username: register_request.username,
        email: register_request.email,
        password_hash,
        display_name: register_request.display_name,
        is_staff: false,
    };

    match storage
        .register_student(account, register_request.student_id)
        .await
    {
        Ok(account) => {
            tracing::info!("User {} registered successfully", account.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success(account, "Registration successful")))
        }
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Registration failed: {e}"),
            )))
        }
    }
}
