use serde::{Deserialize, Serialize};

use crate::models::users::entities::AccountRole;

// 个人资料实体，与账号 1:1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub role: AccountRole,
    pub student_id: Option<String>,
    pub teacher_id: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 登录后的落地页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landing {
    StudentHome,
    TeacherHome,
    AdminHome,
    // 资料缺失或角色无法识别时的安全回退
    AccountRepair,
}

impl Landing {
    /// 由账号的 staff 标记与资料角色决定登录落地页。
    /// staff 管理员优先于资料角色；资料缺失一律进入修复页。
    pub fn resolve(is_staff: bool, profile: Option<&Profile>) -> Landing {
        let Some(profile) = profile else {
            return Landing::AccountRepair;
        };
        match profile.role {
            AccountRole::Admin if is_staff => Landing::AdminHome,
            AccountRole::Admin => Landing::AccountRepair,
            AccountRole::Teacher => Landing::TeacherHome,
            AccountRole::Student => Landing::StudentHome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: AccountRole) -> Profile {
        Profile {
            id: 1,
            user_id: 1,
            role,
            student_id: None,
            teacher_id: None,
            bio: None,
            phone: None,
            avatar_url: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_resolve_missing_profile_goes_to_repair() {
        assert_eq!(Landing::resolve(false, None), Landing::AccountRepair);
        assert_eq!(Landing::resolve(true, None), Landing::AccountRepair);
    }

    #[test]
    fn test_resolve_by_role() {
        let s = profile(AccountRole::Student);
        let t = profile(AccountRole::Teacher);
        assert_eq!(Landing::resolve(false, Some(&s)), Landing::StudentHome);
        assert_eq!(Landing::resolve(false, Some(&t)), Landing::TeacherHome);
    }

    #[test]
    fn test_resolve_admin_requires_staff() {
        let a = profile(AccountRole::Admin);
        assert_eq!(Landing::resolve(true, Some(&a)), Landing::AdminHome);
        assert_eq!(Landing::resolve(false, Some(&a)), Landing::AccountRepair);
    }
}
