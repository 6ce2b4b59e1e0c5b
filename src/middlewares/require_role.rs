/*!
 * 基于角色的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。授权判定集中在
 * Account::authorize：资料缺失直接拒绝，管理员角色
 * 额外要求账号带 staff 标记。
 *
 * ```rust,ignore
 * web::scope("/admin")
 *     .wrap(RequireRole::new(&AccountRole::Admin))
 *     .wrap(RequireJWT)
 * ```
 *
 * 或者任一角色即可：
 *
 * ```rust,ignore
 * .wrap(RequireRole::new_any(AccountRole::teacher_roles()))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{AccountRole, CurrentUser},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<AccountRole>,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(role: &AccountRole) -> Self {
        Self {
            required_roles: vec![role.clone()],
        }
    }

    /// 创建需要任一角色的中间件
    pub fn new_any(roles: &[&AccountRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| (*r).clone()).collect(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_roles: self.required_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_roles: Vec<AccountRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let required_roles = self.required_roles.clone();

        Box::pin(async move {
            let current = req.extensions().get::<CurrentUser>().cloned();

            match current {
                Some(current) => {
                    let has_permission = required_roles.iter().any(|role| {
                        current
                            .account
                            .authorize(current.profile.as_ref(), role)
                    });

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (role: {:?}). Required roles: {:?}",
                            current.account.id,
                            current.profile.as_ref().map(|p| &p.role),
                            required_roles
                        );
                        // 资料缺失与角色不符分开报告，便于前端引导修复
                        let (code, message) = if current.profile.is_none() {
                            (
                                ErrorCode::AccountNotProvisioned,
                                "Account has no profile, contact administrator",
                            )
                        } else {
                            (ErrorCode::Forbidden, "Access denied.")
                        };
                        Ok(req.into_response(
                            create_error_response(StatusCode::FORBIDDEN, code, message)
                                .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Role check failed: No user claims found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
