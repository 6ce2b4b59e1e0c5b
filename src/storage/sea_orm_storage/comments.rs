//! 课程留言存储操作

use super::SeaOrmStorage;
use crate::entity::comments::{ActiveModel, Column, Entity as Comments};
use crate::entity::users::Entity as Users;
use crate::errors::{GradeSystemError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    comments::entities::{Comment, CommentWithAuthor},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 发表课程留言
    pub async fn post_comment_impl(
        &self,
        course_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            content: Set(content.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("发表留言失败: {e}")))?;

        Ok(result.into_comment())
    }

    /// 获取单条留言
    pub async fn get_comment_by_id_impl(&self, comment_id: i64) -> Result<Option<Comment>> {
        let result = Comments::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询留言失败: {e}")))?;

        Ok(result.map(|m| m.into_comment()))
    }

    /// 更新留言内容
    pub async fn update_comment_impl(
        &self,
        comment_id: i64,
        content: &str,
    ) -> Result<Option<Comment>> {
        let existing = Comments::find_by_id(comment_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询留言失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let result = ActiveModel {
            id: Set(comment_id),
            content: Set(content.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("更新留言失败: {e}")))?;

        Ok(Some(result.into_comment()))
    }

    /// 分页列出课程留言，新留言在前
    pub async fn list_comments_with_pagination_impl(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<CommentWithAuthor>> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let paginator = Comments::find()
            .find_also_related(Users)
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询留言总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询留言页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询留言列表失败: {e}")))?;

        let mut items = Vec::with_capacity(rows.len());
        for (comment, user) in rows {
            let user = user.ok_or_else(|| {
                GradeSystemError::data_integrity(format!("留言 {} 缺少对应账号", comment.id))
            })?;
            items.push(CommentWithAuthor {
                comment: comment.into_comment(),
                username: user.username,
                display_name: user.display_name,
            });
        }

        Ok(PaginatedResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
