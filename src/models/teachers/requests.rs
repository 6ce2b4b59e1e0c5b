use serde::Deserialize;

// 管理员开通教师账号请求：一次性提交账号与教师档案，
// 服务端在单个事务内创建账号、资料和教师记录。
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionTeacherRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub teacher_id: String,
    pub department: Option<String>,
    pub bio: Option<String>,
}
