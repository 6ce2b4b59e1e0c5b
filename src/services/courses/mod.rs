pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 课程列表（所有已登录角色可见）
    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_courses(self, query, request).await
    }

    // 课程详情
    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_course(self, course_id, request).await
    }

    // 创建课程（教师建自己的课程，管理员可指定任意教师）
    pub async fn create_course(
        &self,
        create_request: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_course(self, create_request, request).await
    }

    // 更新课程（管理员）
    pub async fn update_course(
        &self,
        course_id: i64,
        update_request: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_course(self, course_id, update_request, request).await
    }

    // 删除课程（管理员，级联删除选课与留言）
    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_course(self, course_id, request).await
    }
}
