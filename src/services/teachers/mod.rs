pub mod delete;
pub mod list;
pub mod provision;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{PaginationQuery, teachers::requests::ProvisionTeacherRequest};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // 开通教师账号（管理员）
    pub async fn provision(
        &self,
        provision_request: ProvisionTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        provision::handle_provision_teacher(self, provision_request, request).await
    }

    // 教师列表（管理员）
    pub async fn list(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_teachers(self, query, request).await
    }

    // 注销教师账号（管理员）
    pub async fn delete(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::handle_delete_teacher(self, user_id, request).await
    }
}
