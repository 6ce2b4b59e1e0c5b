use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::comments::requests::PostCommentRequest;
use crate::services::CommentService;
use crate::utils::{SafeCommentIdI64, SafeCourseIdI64};

// 懒加载的全局 CommentService 实例
static COMMENT_SERVICE: Lazy<CommentService> = Lazy::new(CommentService::new_lazy);

// HTTP处理程序
pub async fn list_comments(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .list_comments(course_id.0, query.into_inner(), &req)
        .await
}

pub async fn post_comment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    comment_data: web::Json<PostCommentRequest>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .post_comment(course_id.0, comment_data.into_inner(), &req)
        .await
}

pub async fn edit_comment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    comment_id: SafeCommentIdI64,
    comment_data: web::Json<PostCommentRequest>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .edit_comment(course_id.0, comment_id.0, comment_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_comments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/comments")
            .wrap(middlewares::RequireJWT)
            .service(
                // 留言列表对所有已登录角色开放，发言权限在服务层判定
                web::resource("")
                    .route(web::get().to(list_comments))
                    .route(web::post().to(post_comment)),
            )
            .service(web::resource("/{comment_id}").route(web::put().to(edit_comment))),
    );
}
