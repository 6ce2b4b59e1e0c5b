use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::teachers::requests::ProvisionTeacherRequest;
use crate::models::users::entities::AccountRole;
use crate::services::TeacherService;
use crate::utils::SafeUserIdI64;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

// HTTP处理程序
pub async fn provision_teacher(
    req: HttpRequest,
    provision_data: web::Json<ProvisionTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .provision(provision_data.into_inner(), &req)
        .await
}

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list(query.into_inner(), &req).await
}

pub async fn delete_teacher(req: HttpRequest, user_id: SafeUserIdI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete(user_id.0, &req).await
}

// 配置路由（整个 scope 仅限管理员）
pub fn configure_teachers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireRole::new_any(AccountRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::post().to(provision_teacher))
                    .route(web::get().to(list_teachers)),
            )
            .service(web::resource("/{user_id}").route(web::delete().to(delete_teacher))),
    );
}
