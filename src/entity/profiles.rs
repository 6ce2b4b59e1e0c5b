//! 用户资料（角色）实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub role: String,
    #[sea_orm(unique, nullable)]
    pub student_id: Option<String>,
    #[sea_orm(unique, nullable)]
    pub teacher_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_profile(self) -> crate::models::profiles::entities::Profile {
        use chrono::{DateTime, Utc};
        use crate::models::profiles::entities::Profile;
        use crate::models::users::entities::AccountRole;

        Profile {
            id: self.id,
            user_id: self.user_id,
            role: self.role.parse::<AccountRole>().unwrap_or(AccountRole::Student),
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            bio: self.bio,
            phone: self.phone,
            avatar_url: self.avatar_url,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
