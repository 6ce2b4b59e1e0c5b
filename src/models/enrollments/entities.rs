use serde::{Deserialize, Serialize};

// 选课记录实体。is_active=false 表示已退课（软删除），
// 成绩字段保留，重新选课时恢复。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub midterm_score: Option<f64>,
    pub final_score: Option<f64>,
    pub is_active: bool,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Enrollment {
    /// 总评成绩：期中与期末的算术平均，保留两位小数。
    /// 任一成绩缺失时返回 None。
    pub fn total_score(&self) -> Option<f64> {
        match (self.midterm_score, self.final_score) {
            (Some(midterm), Some(finals)) => Some(mean_to_two_decimals(&[midterm, finals])),
            _ => None,
        }
    }
}

/// 一组总评成绩的平均分，保留两位小数。
/// 没有任何可计算的总评时为 0。
pub fn average_total_score(totals: &[f64]) -> f64 {
    if totals.is_empty() {
        return 0.0;
    }
    mean_to_two_decimals(totals)
}

// 先换算成整数百分位再平均：83.325 这类乘积在二进制下
// 略低于中点，直接 (x*100).round() 会把它舍成 83.32。
fn mean_to_two_decimals(values: &[f64]) -> f64 {
    let hundredths: i64 = values.iter().map(|v| (v * 100.0).round() as i64).sum();
    (hundredths as f64 / values.len() as f64).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(midterm: Option<f64>, finals: Option<f64>) -> Enrollment {
        Enrollment {
            id: 1,
            user_id: 1,
            course_id: 1,
            midterm_score: midterm,
            final_score: finals,
            is_active: true,
            enrolled_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_total_score_mean_of_both() {
        assert_eq!(enrollment(Some(85.0), Some(92.0)).total_score(), Some(88.5));
        assert_eq!(enrollment(Some(0.0), Some(100.0)).total_score(), Some(50.0));
    }

    #[test]
    fn test_total_score_none_when_missing() {
        assert_eq!(enrollment(None, Some(92.0)).total_score(), None);
        assert_eq!(enrollment(Some(85.0), None).total_score(), None);
        assert_eq!(enrollment(None, None).total_score(), None);
    }

    #[test]
    fn test_total_score_rounds_to_two_decimals() {
        // (77.77 + 88.88) / 2 = 83.325 -> 83.33
        assert_eq!(
            enrollment(Some(77.77), Some(88.88)).total_score(),
            Some(83.33)
        );
        // (83.32 + 83.33) / 2 = 83.325 -> 83.33
        assert_eq!(
            enrollment(Some(83.32), Some(83.33)).total_score(),
            Some(83.33)
        );
    }

    #[test]
    fn test_average_total_score() {
        assert_eq!(average_total_score(&[]), 0.0);
        assert_eq!(average_total_score(&[88.5]), 88.5);
        assert_eq!(average_total_score(&[80.0, 90.0, 85.5]), 85.17);
        // 中点 80.005 按半数进位取 80.01
        assert_eq!(average_total_score(&[80.0, 80.01]), 80.01);
    }
}
