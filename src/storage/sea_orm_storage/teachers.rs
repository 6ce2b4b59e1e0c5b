//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::profiles;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::entity::users::{self, Entity as Users};
use crate::errors::{GradeSystemError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo, PaginationQuery,
    teachers::{entities::Teacher, responses::TeacherWithAccount},
    users::{entities::Account, entities::AccountRole, requests::NewAccount},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 开通教师账号。账号、教师资料、教师档案三者要么全部建立，
    /// 要么全部回滚，不允许出现有角色无档案的中间状态。
    pub async fn provision_teacher_impl(
        &self,
        account: NewAccount,
        teacher_id: String,
        department: Option<String>,
        bio: Option<String>,
    ) -> Result<(Account, Teacher)> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            GradeSystemError::database_operation(format!("开启教师开通事务失败: {e}"))
        })?;

        let user = users::ActiveModel {
            username: Set(account.username),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            display_name: Set(account.display_name),
            is_staff: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("创建教师账号失败: {e}")))?;

        profiles::ActiveModel {
            user_id: Set(user.id),
            role: Set(AccountRole::Teacher.to_string()),
            teacher_id: Set(Some(teacher_id.clone())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("创建教师资料失败: {e}")))?;

        let teacher = ActiveModel {
            user_id: Set(user.id),
            teacher_id: Set(teacher_id),
            department: Set(department),
            bio: Set(bio),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("创建教师档案失败: {e}")))?;

        txn.commit().await.map_err(|e| {
            GradeSystemError::database_operation(format!("提交教师开通事务失败: {e}"))
        })?;

        Ok((user.into_account(), teacher.into_teacher()))
    }

    /// 获取账号的教师档案
    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过教师工号获取教师档案
    pub async fn get_teacher_by_teacher_id_impl(&self, teacher_id: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询教师档案失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 分页列出教师（附账号信息）
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<TeacherWithAccount>> {
        let page = query.page.max(1) as u64;
        let size = query.size.clamp(1, 100) as u64;

        let paginator = Teachers::find()
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询教师页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询教师列表失败: {e}")))?;

        let mut items = Vec::with_capacity(rows.len());
        for (teacher, user) in rows {
            let user = user.ok_or_else(|| {
                GradeSystemError::data_integrity(format!(
                    "教师档案 {} 缺少对应账号",
                    teacher.id
                ))
            })?;
            items.push(TeacherWithAccount::from_parts(
                teacher.into_teacher(),
                &user.into_account(),
            ));
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

    /// 注销教师账号。资料与档案随账号级联删除，
    /// 课程的任课教师由外键 SET NULL 置空。
    pub async fn delete_teacher_impl(&self, user_id: i64) -> Result<bool> {
        let result = Users::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("注销教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 为缺档的教师角色账号补建教师档案（离线修复用）
    pub async fn create_missing_teacher_record_impl(
        &self,
        user_id: i64,
        teacher_id: &str,
    ) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let teacher = ActiveModel {
            user_id: Set(user_id),
            teacher_id: Set(teacher_id.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("补建教师档案失败: {e}")))?;

        Ok(teacher.into_teacher())
    }

    /// 没有资料记录的账号（离线审计用）
    pub async fn find_accounts_without_profiles_impl(&self) -> Result<Vec<Account>> {
        let users = Users::find()
            .find_also_related(profiles::Entity)
            .all(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("审计账号失败: {e}")))?;

        Ok(users
            .into_iter()
            .filter(|(_, profile)| profile.is_none())
            .map(|(user, _)| user.into_account())
            .collect())
    }

    /// 教师角色但缺少教师档案的资料（离线审计用）
    pub async fn find_orphan_teacher_profiles_impl(
        &self,
    ) -> Result<Vec<crate::models::profiles::entities::Profile>> {
        let teacher_profiles = profiles::Entity::find()
            .filter(profiles::Column::Role.eq(AccountRole::Teacher.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("审计教师资料失败: {e}")))?;

        let mut orphans = Vec::new();
        for profile in teacher_profiles {
            let has_record = Teachers::find()
                .filter(Column::UserId.eq(profile.user_id))
                .one(&self.db)
                .await
                .map_err(|e| {
                    GradeSystemError::database_operation(format!("审计教师档案失败: {e}"))
                })?
                .is_some();
            if !has_record {
                orphans.push(profile.into_profile());
            }
        }

        Ok(orphans)
    }

    /// 教师档案存在但资料角色不是教师（离线审计用）
    pub async fn find_misclassified_teacher_records_impl(&self) -> Result<Vec<Teacher>> {
        let records = Teachers::find()
            .all(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("审计教师档案失败: {e}")))?;

        let mut misclassified = Vec::new();
        for record in records {
            let profile = profiles::Entity::find()
                .filter(profiles::Column::UserId.eq(record.user_id))
                .one(&self.db)
                .await
                .map_err(|e| {
                    GradeSystemError::database_operation(format!("审计教师资料失败: {e}"))
                })?;

            let role_is_teacher = profile
                .map(|p| p.role == AccountRole::Teacher.to_string())
                .unwrap_or(false);
            if !role_is_teacher {
                misclassified.push(record.into_teacher());
            }
        }

        Ok(misclassified)
    }
}
