use serde::{Deserialize, Serialize};

use crate::models::profiles::entities::Profile;

// 账号角色（存放于 profiles.role）
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Student, // 学生
    Teacher, // 教师
    Admin,   // 管理员
}

impl AccountRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static AccountRole] {
        &[&Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static AccountRole] {
        &[&Self::Teacher, &Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static AccountRole] {
        &[&Self::Student]
    }
    pub fn all_roles() -> &'static [&'static AccountRole] {
        &[&Self::Student, &Self::Teacher, &Self::Admin]
    }
}

impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AccountRole::STUDENT => Ok(AccountRole::Student),
            AccountRole::TEACHER => Ok(AccountRole::Teacher),
            AccountRole::ADMIN => Ok(AccountRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的账号角色: '{s}'. 支持的角色: student, teacher, admin"
            ))),
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Student => write!(f, "{}", AccountRole::STUDENT),
            AccountRole::Teacher => write!(f, "{}", AccountRole::TEACHER),
            AccountRole::Admin => write!(f, "{}", AccountRole::ADMIN),
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(AccountRole::Student),
            "teacher" => Ok(AccountRole::Teacher),
            "admin" => Ok(AccountRole::Admin),
            _ => Err(format!("Invalid account role: {s}")),
        }
    }
}

// 账号实体（认证身份）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub display_name: Option<String>,
    pub is_staff: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Account {
    /// 集中式授权检查：资料存在且角色匹配才放行；
    /// 管理员角色额外要求账号带 staff 标记。
    pub fn authorize(&self, profile: Option<&Profile>, required: &AccountRole) -> bool {
        let Some(profile) = profile else {
            return false;
        };
        if profile.role != *required {
            return false;
        }
        match required {
            AccountRole::Admin => self.is_staff,
            _ => true,
        }
    }
}

/// 当前请求的认证上下文：账号 + 可能缺失的资料。
/// 由 RequireJWT 中间件装入请求扩展。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub account: Account,
    pub profile: Option<Profile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profiles::entities::Profile;

    fn account(is_staff: bool) -> Account {
        Account {
            id: 1,
            username: "alice11".into(),
            email: "alice@example.com".into(),
            password_hash: String::new(),
            display_name: None,
            is_staff,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

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
    fn test_authorize_requires_profile() {
        let acc = account(true);
        assert!(!acc.authorize(None, &AccountRole::Student));
        assert!(!acc.authorize(None, &AccountRole::Admin));
    }

    #[test]
    fn test_authorize_role_mismatch() {
        let acc = account(false);
        let p = profile(AccountRole::Student);
        assert!(acc.authorize(Some(&p), &AccountRole::Student));
        assert!(!acc.authorize(Some(&p), &AccountRole::Teacher));
    }

    #[test]
    fn test_authorize_admin_needs_staff_flag() {
        let p = profile(AccountRole::Admin);
        assert!(!account(false).authorize(Some(&p), &AccountRole::Admin));
        assert!(account(true).authorize(Some(&p), &AccountRole::Admin));
    }

    #[test]
    fn test_role_round_trip() {
        for role in AccountRole::all_roles() {
            let parsed: AccountRole = role.to_string().parse().unwrap();
            assert_eq!(&&parsed, role);
        }
        assert!("principal".parse::<AccountRole>().is_err());
    }
}
