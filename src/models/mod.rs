pub mod auth;
pub mod comments;
pub mod common;
pub mod courses;
pub mod enrollments;
pub mod profiles;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（注入 app_data，用于运行状态统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
