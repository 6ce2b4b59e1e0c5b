use serde::{Deserialize, Serialize};

// 教师档案实体，与账号 1:1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub teacher_id: String,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
