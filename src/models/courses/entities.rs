use serde::{Deserialize, Serialize};

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub teacher_id: Option<i64>,
    pub credits: i32,
    pub description: Option<String>,
    pub max_students: i32,
    pub semester: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// 剩余名额（活跃选课数已知时）。容量满返回 0，不会为负。
    pub fn remaining_seats(&self, active_enrollments: i64) -> i64 {
        (self.max_students as i64 - active_enrollments).max(0)
    }

    pub fn is_full(&self, active_enrollments: i64) -> bool {
        active_enrollments >= self.max_students as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(max_students: i32) -> Course {
        Course {
            id: 1,
            course_code: "CS101".into(),
            course_name: "计算机导论".into(),
            teacher_id: None,
            credits: 3,
            description: None,
            max_students,
            semester: "2024-1".into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_remaining_seats_never_negative() {
        let c = course(2);
        assert_eq!(c.remaining_seats(0), 2);
        assert_eq!(c.remaining_seats(2), 0);
        assert_eq!(c.remaining_seats(5), 0);
    }

    #[test]
    fn test_is_full_at_capacity() {
        let c = course(2);
        assert!(!c.is_full(1));
        assert!(c.is_full(2));
        assert!(c.is_full(3));
    }
}
