use serde::Deserialize;

// 存储层创建账号的数据（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub is_staff: bool,
}

// 管理员更新账号请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAccountRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}
