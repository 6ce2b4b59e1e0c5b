use serde::{Deserialize, Serialize};

use crate::models::enrollments::entities::Enrollment;

// 学生成绩单条目：选课记录 + 课程信息 + 计算出的总评
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    pub semester: String,
    pub total_score: Option<f64>,
}

impl TranscriptEntry {
    pub fn from_parts(
        enrollment: Enrollment,
        course_code: String,
        course_name: String,
        credits: i32,
        semester: String,
    ) -> Self {
        let total_score = enrollment.total_score();
        Self {
            enrollment,
            course_code,
            course_name,
            credits,
            semester,
            total_score,
        }
    }
}

// 成绩单汇总：条目列表 + 平均分（没有可计算总评时为 0）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub entries: Vec<TranscriptEntry>,
    pub average_score: f64,
}

// 课程名单条目：选课记录 + 学生信息，教师视角
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub username: String,
    pub display_name: Option<String>,
    pub student_id: Option<String>,
    pub total_score: Option<f64>,
}

impl RosterEntry {
    pub fn from_parts(
        enrollment: Enrollment,
        username: String,
        display_name: Option<String>,
        student_id: Option<String>,
    ) -> Self {
        let total_score = enrollment.total_score();
        Self {
            enrollment,
            username,
            display_name,
            student_id,
            total_score,
        }
    }
}
