/*!
 * JWT 认证中间件
 *
 * 验证 Authorization 头中的 access token，并把账号与资料
 * 装入请求扩展（CurrentUser），供后续处理程序与 RequireRole 使用。
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件验证 JWT 令牌
 * 3. 优先从缓存取 token 对应的 CurrentUser，未命中时回源数据库
 * 4. 令牌无效或缺失时返回 401
 *
 * 注意：资料缺失不在这里拦截，CurrentUser.profile 为 None，
 * 由 RequireRole 或处理程序按需拒绝。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::middlewares::create_error_response;
use crate::models::users::entities::{AccountRole, CurrentUser};
use crate::models::ErrorCode;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取并验证 JWT access token，装配 CurrentUser
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<CurrentUser, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone();

    // 优先从缓存取认证上下文
    match cache.get_raw(&format!("user:{token}")).await {
        CacheResult::Found(json) => match serde_json::from_str::<CurrentUser>(&json) {
            Ok(current) => return Ok(current),
            Err(_) => {
                cache.remove(&format!("user:{token}")).await;
                info!("Failed to deserialize user from cache for token: {}", token);
            }
        },
        _ => {
            info!("User not found in cache for token: {}", token);
        }
    };

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid user ID in JWT".to_string())?;

    let account = storage
        .get_account_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve account from storage".to_string())?
        .ok_or_else(|| "Account not found".to_string())?;

    let profile = storage
        .get_profile_by_user_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve profile from storage".to_string())?;

    let current = CurrentUser { account, profile };

    // 将认证上下文存入缓存
    let app_config = AppConfig::get();
    if let Ok(json) = serde_json::to_string(&current) {
        cache
            .insert_raw(format!("user:{token}"), json, app_config.cache.default_ttl)
            .await;
    }

    Ok(current)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(current) => {
                    debug!("JWT authentication successful for ID: {}", current.account.id);
                    req.extensions_mut().insert(current);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取认证上下文
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 应在应用了 RequireJWT 中间件的路由处理程序中使用
    pub fn extract_current_user(req: &actix_web::HttpRequest) -> Option<CurrentUser> {
        req.extensions().get::<CurrentUser>().cloned()
    }

    /// 从请求扩展中提取账号 ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions()
            .get::<CurrentUser>()
            .map(|current| current.account.id)
    }

    /// 从请求扩展中提取账号角色（资料缺失时为 None）
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<AccountRole> {
        req.extensions()
            .get::<CurrentUser>()
            .and_then(|current| current.profile.as_ref().map(|p| p.role.clone()))
    }
}
