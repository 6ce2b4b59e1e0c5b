//! 资料存储操作

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Column, Entity as Profiles};
use crate::entity::users;
use crate::errors::{GradeSystemError, Result};
use crate::models::profiles::{entities::Profile, requests::UpdateProfileRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 获取账号的资料
    pub async fn get_profile_by_user_id_impl(&self, user_id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 更新资料。display_name 属于账号表，bio/phone 属于资料表，
    /// 跨表写入放在同一事务。
    pub async fn update_profile_impl(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        let existing = Profiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询资料失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            GradeSystemError::database_operation(format!("开启资料更新事务失败: {e}"))
        })?;

        if let Some(display_name) = update.display_name {
            users::ActiveModel {
                id: Set(user_id),
                display_name: Set(Some(display_name)),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("更新显示名失败: {e}")))?;
        }

        let mut model = ActiveModel {
            id: Set(existing.id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(bio) = update.bio {
            model.bio = Set(Some(bio));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        let result = model
            .update(&txn)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("更新资料失败: {e}")))?;

        txn.commit().await.map_err(|e| {
            GradeSystemError::database_operation(format!("提交资料更新事务失败: {e}"))
        })?;

        Ok(Some(result.into_profile()))
    }

    /// 更新头像地址
    pub async fn update_avatar_url_impl(&self, user_id: i64, avatar_url: &str) -> Result<bool> {
        let existing = Profiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询资料失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        ActiveModel {
            id: Set(existing.id),
            avatar_url: Set(Some(avatar_url.to_string())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("更新头像失败: {e}")))?;

        Ok(true)
    }
}
