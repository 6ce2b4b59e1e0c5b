use serde::{Deserialize, Serialize};

use crate::models::profiles::entities::{Landing, Profile};
use crate::models::users::entities::Account;

// 登录成功响应：账号信息 + 访问令牌 + 落地页面。
// refresh token 通过 HttpOnly Cookie 下发，不进响应体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub account: Account,
    pub profile: Profile,
    pub access_token: String,
    pub landing: Landing,
}

// 刷新令牌响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

// 令牌校验响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
}

// 当前登录身份响应（/me）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub account: Account,
    pub profile: Option<Profile>,
    pub landing: Landing,
}
