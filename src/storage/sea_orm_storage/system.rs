//! 系统统计存储操作

use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::profiles::{Column as ProfileColumn, Entity as Profiles};
use crate::entity::users::Entity as Users;
use crate::errors::{GradeSystemError, Result};
use crate::models::system::responses::SystemStats;
use crate::models::users::entities::AccountRole;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 管理端系统统计
    pub async fn get_system_stats_impl(&self) -> Result<SystemStats> {
        let total_accounts = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("统计账号失败: {e}")))?;

        let total_students = Profiles::find()
            .filter(ProfileColumn::Role.eq(AccountRole::Student.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("统计学生失败: {e}")))?;

        let total_teachers = Profiles::find()
            .filter(ProfileColumn::Role.eq(AccountRole::Teacher.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("统计教师失败: {e}")))?;

        let total_courses = Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("统计课程失败: {e}")))?;

        let active_enrollments = Enrollments::find()
            .filter(EnrollmentColumn::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("统计选课失败: {e}")))?;

        Ok(SystemStats {
            total_accounts: total_accounts as i64,
            total_students: total_students as i64,
            total_teachers: total_teachers as i64,
            total_courses: total_courses as i64,
            active_enrollments: active_enrollments as i64,
            uptime_seconds: 0,
        })
    }
}
