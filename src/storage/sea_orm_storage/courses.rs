//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::users::Entity as Users;
use crate::errors::{GradeSystemError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseDetail,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_code: Set(req.course_code),
            course_name: Set(req.course_name),
            teacher_id: Set(req.teacher_id),
            credits: Set(req.credits),
            description: Set(req.description),
            max_students: Set(req.max_students),
            semester: Set(req.semester),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过课程编码获取课程
    pub async fn get_course_by_code_impl(&self, course_code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::CourseCode.eq(course_code))
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程，附实时选课人数与任课教师姓名
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<CourseDetail>> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Courses::find();

        // 搜索条件：课程编码、课程名或任课教师姓名的子串匹配
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select
                .join(
                    JoinType::LeftJoin,
                    crate::entity::courses::Relation::Teacher.def(),
                )
                .filter(
                    Condition::any()
                        .add(Column::CourseCode.contains(&escaped))
                        .add(Column::CourseName.contains(&escaped))
                        .add(crate::entity::users::Column::DisplayName.contains(&escaped))
                        .add(crate::entity::users::Column::Username.contains(&escaped)),
                );
        }

        // 学期筛选
        if let Some(ref semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        let mut items = Vec::with_capacity(courses.len());
        for model in courses {
            let course = model.into_course();
            let active = self.count_active_enrollments_impl(course.id).await?;
            let teacher_name = self.lookup_teacher_display_name(course.teacher_id).await?;
            items.push(CourseDetail::from_course(course, active, teacher_name));
        }

        Ok(PaginatedResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询课程失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(course_name) = update.course_name {
            model.course_name = Set(course_name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(max_students) = update.max_students {
            model.max_students = Set(max_students);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(result.into_course()))
    }

    /// 删除课程（选课记录与留言级联删除）
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计课程的活跃选课数
    pub async fn count_active_enrollments_impl(&self, course_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::CourseId.eq(course_id))
                    .add(EnrollmentColumn::IsActive.eq(true)),
            )
            .count(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("统计选课人数失败: {e}")))?;

        Ok(count as i64)
    }

    /// 查询任课教师的显示名（无任课教师时为 None）。
    /// courses.teacher_id 存的是教师的账号 ID。
    async fn lookup_teacher_display_name(
        &self,
        teacher_id: Option<i64>,
    ) -> Result<Option<String>> {
        let Some(teacher_user_id) = teacher_id else {
            return Ok(None);
        };

        let user = Users::find_by_id(teacher_user_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("查询任课教师失败: {e}")))?;

        Ok(user.map(|u| u.display_name.unwrap_or(u.username)))
    }
}
