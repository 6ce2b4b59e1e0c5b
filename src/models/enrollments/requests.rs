use serde::Deserialize;

// 录入/更新成绩请求。未提供的字段保持原值。
#[derive(Debug, Clone, Deserialize)]
pub struct RecordScoresRequest {
    pub midterm_score: Option<f64>,
    pub final_score: Option<f64>,
}
