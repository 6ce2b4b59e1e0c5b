//! 账号存储操作

use super::SeaOrmStorage;
use crate::entity::profiles;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{GradeSystemError, Result};
use crate::models::users::entities::{Account, AccountRole};
use crate::models::users::requests::NewAccount;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 通过 ID 获取账号
    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 通过用户名获取账号
    pub async fn get_account_by_username_impl(&self, username: &str) -> Result<Option<Account>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 通过邮箱获取账号
    pub async fn get_account_by_email_impl(&self, email: &str) -> Result<Option<Account>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 通过用户名或邮箱获取账号
    pub async fn get_account_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 更新账号最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            last_login: Set(Some(now)),
            ..Default::default()
        };

        match model.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(sea_orm::DbErr::RecordNotFound(_)) => Ok(false),
            Err(e) => Err(GradeSystemError::database_operation(format!(
                "更新最后登录时间失败: {e}"
            ))),
        }
    }

    /// 学生自助注册：账号与学生资料必须同时落库，
    /// 任何一步失败整体回滚，避免产生无资料账号。
    pub async fn register_student_impl(
        &self,
        account: NewAccount,
        student_id: Option<String>,
    ) -> Result<Account> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            GradeSystemError::database_operation(format!("开启注册事务失败: {e}"))
        })?;

        let user = ActiveModel {
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
        .map_err(|e| GradeSystemError::database_operation(format!("创建账号失败: {e}")))?;

        profiles::ActiveModel {
            user_id: Set(user.id),
            role: Set(AccountRole::Student.to_string()),
            student_id: Set(student_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("创建学生资料失败: {e}")))?;

        txn.commit().await.map_err(|e| {
            GradeSystemError::database_operation(format!("提交注册事务失败: {e}"))
        })?;

        Ok(user.into_account())
    }

    /// 初始化管理员账号（staff 标记 + 管理员资料，同一事务）
    pub async fn seed_admin_impl(&self, account: NewAccount) -> Result<Account> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            GradeSystemError::database_operation(format!("开启管理员初始化事务失败: {e}"))
        })?;

        let user = ActiveModel {
            username: Set(account.username),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            display_name: Set(account.display_name),
            is_staff: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("创建管理员账号失败: {e}")))?;

        profiles::ActiveModel {
            user_id: Set(user.id),
            role: Set(AccountRole::Admin.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("创建管理员资料失败: {e}")))?;

        txn.commit().await.map_err(|e| {
            GradeSystemError::database_operation(format!("提交管理员初始化事务失败: {e}"))
        })?;

        Ok(user.into_account())
    }
}
