use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;

// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub course_code: String,
    pub course_name: String,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
    #[serde(default = "default_credits")]
    pub credits: i32,
    #[serde(default = "default_max_students")]
    pub max_students: i32,
    #[serde(default = "default_semester")]
    pub semester: String,
}

fn default_credits() -> i32 {
    3
}

fn default_max_students() -> i32 {
    50
}

fn default_semester() -> String {
    "2024-1".to_string()
}

// 更新课程请求（全部字段可选）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourseRequest {
    pub course_name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i64>,
    pub credits: Option<i32>,
    pub max_students: Option<i32>,
    pub semester: Option<String>,
}

// 课程列表查询：分页 + 可选的关键字 / 学期过滤
#[derive(Debug, Clone, Deserialize)]
pub struct CourseListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub semester: Option<String>,
}
