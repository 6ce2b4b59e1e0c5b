use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::AccountRole;
use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.stats(&req).await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/stats").route(
                    web::get()
                        .to(stats)
                        .wrap(middlewares::RequireRole::new_any(AccountRole::admin_roles())),
                ),
            ),
    );
}
