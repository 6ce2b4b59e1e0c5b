use serde::Deserialize;

// 发表留言请求
#[derive(Debug, Clone, Deserialize)]
pub struct PostCommentRequest {
    pub content: String,
}
