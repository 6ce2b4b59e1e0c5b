pub mod edit;
pub mod list;
pub mod post;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{PaginationQuery, comments::requests::PostCommentRequest};
use crate::storage::Storage;

pub struct CommentService {
    storage: Option<Arc<dyn Storage>>,
}

impl CommentService {
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

    // 课程留言列表（所有已登录角色可见）
    pub async fn list_comments(
        &self,
        course_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_comments(self, course_id, query, request).await
    }

    // 发表留言（在读学生、任课教师或管理员）
    pub async fn post_comment(
        &self,
        course_id: i64,
        post_request: PostCommentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        post::handle_post_comment(self, course_id, post_request, request).await
    }

    // 编辑留言（仅限本人）
    pub async fn edit_comment(
        &self,
        course_id: i64,
        comment_id: i64,
        edit_request: PostCommentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        edit::handle_edit_comment(self, course_id, comment_id, edit_request, request).await
    }
}
