//! 选课与成绩存储操作

use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::profiles::{Column as ProfileColumn, Entity as Profiles};
use crate::entity::users::Entity as Users;
use crate::errors::{GradeSystemError, Result};
use crate::models::enrollments::{
    entities::{Enrollment, average_total_score},
    requests::RecordScoresRequest,
    responses::{RosterEntry, TranscriptEntry, TranscriptResponse},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 选课。容量检查、重复检查与写入在同一事务内完成；
    /// (user_id, course_id) 唯一索引兜底并发下的重复插入。
    ///
    /// - 已有活跃记录：幂等返回现有记录
    /// - 已有退课记录：恢复 is_active，历史成绩保留，容量重新检查
    /// - 容量已满：返回 CapacityExceeded
    pub async fn enroll_course_impl(&self, user_id: i64, course_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(|e| {
            GradeSystemError::database_operation(format!("开启选课事务失败: {e}"))
        })?;

        let course = Courses::find_by_id(course_id)
            .one(&txn)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| GradeSystemError::not_found(format!("课程 {course_id} 不存在")))?;

        let existing = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::CourseId.eq(course_id)),
            )
            .one(&txn)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        // 已在修读中，幂等返回
        if let Some(enrollment) = &existing
            && enrollment.is_active
        {
            let active = enrollment.clone();
            txn.commit().await.map_err(|e| {
                GradeSystemError::database_operation(format!("提交选课事务失败: {e}"))
            })?;
            return Ok(active.into_enrollment());
        }

        let active_count = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::IsActive.eq(true)),
            )
            .count(&txn)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("统计选课人数失败: {e}")))?;

        if active_count >= course.max_students as u64 {
            return Err(GradeSystemError::capacity_exceeded(format!(
                "课程 {} 已满员（{}/{}）",
                course.course_code, active_count, course.max_students
            )));
        }

        let result = match existing {
            // 退课后重新选课：恢复活跃状态，成绩保留
            Some(enrollment) => ActiveModel {
                id: Set(enrollment.id),
                is_active: Set(true),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("恢复选课记录失败: {e}")))?,
            None => ActiveModel {
                user_id: Set(user_id),
                course_id: Set(course_id),
                is_active: Set(true),
                enrolled_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("创建选课记录失败: {e}")))?,
        };

        txn.commit().await.map_err(|e| {
            GradeSystemError::database_operation(format!("提交选课事务失败: {e}"))
        })?;

        Ok(result.into_enrollment())
    }

    /// 退课：软删除。没有活跃选课记录时返回 false。
    pub async fn drop_course_impl(&self, user_id: i64, course_id: i64) -> Result<bool> {
        let existing = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::IsActive.eq(true)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        ActiveModel {
            id: Set(existing.id),
            is_active: Set(false),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| GradeSystemError::database_operation(format!("退课失败: {e}")))?;

        Ok(true)
    }

    /// 获取某学生在某课程的选课记录（含已退课的）
    pub async fn get_enrollment_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::CourseId.eq(course_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 录入成绩。未提供的字段保持原值；只对活跃选课记录生效。
    pub async fn record_scores_impl(
        &self,
        user_id: i64,
        course_id: i64,
        update: RecordScoresRequest,
    ) -> Result<Option<Enrollment>> {
        let existing = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::IsActive.eq(true)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(existing.id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(midterm) = update.midterm_score {
            model.midterm_score = Set(Some(midterm));
        }
        if let Some(finals) = update.final_score {
            model.final_score = Set(Some(finals));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("录入成绩失败: {e}")))?;

        Ok(Some(result.into_enrollment()))
    }

    /// 学生成绩单：活跃选课记录 + 课程信息 + 平均分。
    /// 平均分只统计期中期末齐全的课程。
    pub async fn get_transcript_impl(&self, user_id: i64) -> Result<TranscriptResponse> {
        let rows = Enrollments::find()
            .find_also_related(Courses)
            .filter(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::IsActive.eq(true)),
            )
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询成绩单失败: {e}")))?;

        let mut entries = Vec::with_capacity(rows.len());
        for (enrollment, course) in rows {
            let course = course.ok_or_else(|| {
                GradeSystemError::data_integrity(format!(
                    "选课记录 {} 缺少对应课程",
                    enrollment.id
                ))
            })?;
            entries.push(TranscriptEntry::from_parts(
                enrollment.into_enrollment(),
                course.course_code,
                course.course_name,
                course.credits,
                course.semester,
            ));
        }

        let totals: Vec<f64> = entries.iter().filter_map(|e| e.total_score).collect();
        let average_score = average_total_score(&totals);

        Ok(TranscriptResponse {
            entries,
            average_score,
        })
    }

    /// 课程名单：活跃选课记录 + 学生信息，教师视角
    pub async fn get_roster_impl(&self, course_id: i64) -> Result<Vec<RosterEntry>> {
        let rows = Enrollments::find()
            .find_also_related(Users)
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::IsActive.eq(true)),
            )
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程名单失败: {e}")))?;

        let mut entries = Vec::with_capacity(rows.len());
        for (enrollment, user) in rows {
            let user = user.ok_or_else(|| {
                GradeSystemError::data_integrity(format!(
                    "选课记录 {} 缺少对应账号",
                    enrollment.id
                ))
            })?;
            let student_id = Profiles::find()
                .filter(ProfileColumn::UserId.eq(user.id))
                .one(&self.db)
                .await
                .map_err(|e| {
                    GradeSystemError::database_operation(format!("查询学生资料失败: {e}"))
                })?
                .and_then(|p| p.student_id);

            entries.push(RosterEntry::from_parts(
                enrollment.into_enrollment(),
                user.username,
                user.display_name,
                student_id,
            ));
        }

        Ok(entries)
    }
}
