use serde::{Deserialize, Serialize};

use crate::models::teachers::entities::Teacher;
use crate::models::users::entities::Account;

// 教师档案 + 所属账号的组合视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherWithAccount {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl TeacherWithAccount {
    pub fn from_parts(teacher: Teacher, account: &Account) -> Self {
        Self {
            teacher,
            username: account.username.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
        }
    }
}
