use serde::{Deserialize, Serialize};

use crate::models::profiles::entities::Profile;
use crate::models::users::entities::Account;

// 账号 + 资料的组合视图，用于 /me 与管理端列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountWithProfile {
    #[serde(flatten)]
    pub account: Account,
    pub profile: Option<Profile>,
}
