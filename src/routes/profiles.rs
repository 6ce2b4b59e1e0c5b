use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::services::ProfileService;

// 懒加载的全局 ProfileService 实例
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn get_profile(request: HttpRequest) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.get_profile(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE
        .update_profile(update_data.into_inner(), &req)
        .await
}

pub async fn upload_avatar(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.upload_avatar(&req, payload).await
}

// 配置路由
pub fn configure_profiles_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profile")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_profile))
            .route("", web::put().to(update_profile))
            .route("/avatar", web::post().to(upload_avatar)),
    );
}
