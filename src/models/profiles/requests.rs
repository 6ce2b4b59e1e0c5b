use serde::Deserialize;

// 更新个人资料请求（不含角色与学号/工号，这些由管理端维护）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
}
