use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    profiles::entities::Landing,
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 根据用户名或邮箱获取账号
    let account = match storage
        .get_account_by_username_or_email(&login_request.username)
        .await
    {
        Ok(Some(account)) => account,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Username or password is incorrect",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &account.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        )));
    }

    // 3. 资料缺失的账号不发任何令牌。请求路径不自愈，
    //    修复只能走离线审计工具。
    let profile = match storage.get_profile_by_user_id(account.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            tracing::warn!(
                "Login refused: account {} has no profile",
                account.username
            );
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AccountNotProvisioned,
                "Account is not provisioned, contact administrator",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 4. 更新最后登录时间
    let _ = storage.update_last_login(account.id).await;

    let landing = Landing::resolve(account.is_staff, Some(&profile));
    let role_claim = profile.role.to_string();

    // 5. 生成令牌对
    match JwtUtils::generate_token_pair(
        account.id,
        &role_claim,
        login_request.remember_me.then(|| {
            chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
        }),
    ) {
        Ok(token_pair) => {
            tracing::info!("User {} logged in successfully", account.username);

            let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
            let response = LoginResponse {
                account,
                profile,
                access_token: token_pair.access_token,
                landing,
            };

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::header;
    use actix_web::test::TestRequest;
    use sea_orm::{ActiveModelTrait, Set};

    use crate::models::users::requests::NewAccount;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::password::hash_password;

    async fn memory_service() -> (AuthService, Arc<SeaOrmStorage>) {
        let storage = Arc::new(
            SeaOrmStorage::new_with_url("sqlite::memory:", 1, 5)
                .await
                .expect("in-memory storage"),
        );
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let service = AuthService {
            storage: Some(dyn_storage),
        };
        (service, storage)
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    #[actix_web::test]
    async fn test_login_refuses_account_without_profile() {
        let (service, storage) = memory_service().await;

        // 直接插入账号行，不建资料，模拟开通中途失败留下的残账
        let now = chrono::Utc::now().timestamp();
        crate::entity::users::ActiveModel {
            username: Set("ghost".to_string()),
            email: Set("ghost@example.com".to_string()),
            password_hash: Set(hash_password("Passw0rd!").expect("hash")),
            display_name: Set(None),
            is_staff: Set(false),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .expect("insert bare account");

        let request = TestRequest::default().to_http_request();
        let response = handle_login(&service, login_request("ghost", "Passw0rd!"), &request)
            .await
            .expect("handler");

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
        assert!(
            response.headers().get(header::SET_COOKIE).is_none(),
            "no refresh cookie for an unprovisioned account"
        );
    }

    #[actix_web::test]
    async fn test_login_issues_tokens_for_provisioned_account() {
        let (service, storage) = memory_service().await;

        storage
            .register_student(
                NewAccount {
                    username: "stu_login".to_string(),
                    email: "stu_login@example.com".to_string(),
                    password_hash: hash_password("Passw0rd!").expect("hash"),
                    display_name: None,
                    is_staff: false,
                },
                None,
            )
            .await
            .expect("register");

        let request = TestRequest::default().to_http_request();
        let response = handle_login(&service, login_request("stu_login", "Passw0rd!"), &request)
            .await
            .expect("handler");

        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
    }
}
