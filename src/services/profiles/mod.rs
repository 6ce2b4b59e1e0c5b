pub mod avatar;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, profiles::requests::UpdateProfileRequest,
};
use crate::storage::Storage;

pub struct ProfileService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfileService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取本人资料
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(current) = RequireJWT::extract_current_user(request) else {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        };

        match current.profile {
            Some(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "OK"))),
            None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AccountNotProvisioned,
                "Account has no profile, contact administrator",
            ))),
        }
    }

    // 更新本人资料
    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_profile(self, update_request, request).await
    }

    // 上传头像
    pub async fn upload_avatar(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        avatar::handle_upload_avatar(self, request, payload).await
    }
}
