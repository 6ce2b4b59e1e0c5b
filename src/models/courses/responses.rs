use serde::{Deserialize, Serialize};

use crate::models::courses::entities::Course;

// 课程详情视图：附带实时选课人数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub current_enrollment_count: i64,
    pub remaining_seats: i64,
    pub teacher_name: Option<String>,
}

impl CourseDetail {
    pub fn from_course(course: Course, active_enrollments: i64, teacher_name: Option<String>) -> Self {
        let remaining = course.remaining_seats(active_enrollments);
        Self {
            course,
            current_enrollment_count: active_enrollments,
            remaining_seats: remaining,
            teacher_name,
        }
    }
}
