use serde::{Deserialize, Serialize};

// 管理端系统统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_accounts: i64,
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_courses: i64,
    pub active_enrollments: i64,
    pub uptime_seconds: i64,
}
