use std::sync::Arc;

use crate::models::{
    PaginatedResponse, PaginationQuery,
    comments::entities::{Comment, CommentWithAuthor},
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseDetail,
    },
    enrollments::{
        entities::Enrollment,
        requests::RecordScoresRequest,
        responses::{RosterEntry, TranscriptResponse},
    },
    profiles::{entities::Profile, requests::UpdateProfileRequest},
    system::responses::SystemStats,
    teachers::{entities::Teacher, responses::TeacherWithAccount},
    users::{entities::Account, requests::NewAccount},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 通过 ID 获取账号
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>>;
    // 通过用户名获取账号
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>>;
    // 通过邮箱获取账号
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    // 通过用户名或邮箱获取账号（登录入口）
    async fn get_account_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>>;
    // 更新账号最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 学生自助注册：同一事务内创建账号与学生资料
    async fn register_student(
        &self,
        account: NewAccount,
        student_id: Option<String>,
    ) -> Result<Account>;
    // 初始化管理员：同一事务内创建 staff 账号与管理员资料
    async fn seed_admin(&self, account: NewAccount) -> Result<Account>;

    /// 资料管理方法
    // 获取账号的资料（1:1，可能缺失）
    async fn get_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>>;
    // 更新资料（display_name 落在账号表，其余在资料表，同一事务）
    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>>;
    // 更新头像地址
    async fn update_avatar_url(&self, user_id: i64, avatar_url: &str) -> Result<bool>;

    /// 教师管理方法
    // 管理员开通教师：同一事务内创建账号、教师资料与教师档案
    async fn provision_teacher(
        &self,
        account: NewAccount,
        teacher_id: String,
        department: Option<String>,
        bio: Option<String>,
    ) -> Result<(Account, Teacher)>;
    // 获取账号对应的教师档案
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    // 通过教师工号获取教师档案（开通时的唯一性检查）
    async fn get_teacher_by_teacher_id(&self, teacher_id: &str) -> Result<Option<Teacher>>;
    // 分页列出教师
    async fn list_teachers_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<TeacherWithAccount>>;
    // 注销教师账号（级联删除资料与档案，课程的任课教师置空）
    async fn delete_teacher(&self, user_id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过 ID 获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程编码获取课程
    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>>;
    // 分页列出课程（附实时选课人数）
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<CourseDetail>>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程（级联删除选课记录与留言）
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 统计课程的活跃选课数
    async fn count_active_enrollments(&self, course_id: i64) -> Result<i64>;

    /// 选课与成绩方法
    // 选课：容量检查与写入在同一事务内，重复选课幂等返回现有记录
    async fn enroll_course(&self, user_id: i64, course_id: i64) -> Result<Enrollment>;
    // 退课：软删除，成绩保留
    async fn drop_course(&self, user_id: i64, course_id: i64) -> Result<bool>;
    // 获取某学生在某课程的选课记录
    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>>;
    // 录入成绩（仅活跃选课记录）
    async fn record_scores(
        &self,
        user_id: i64,
        course_id: i64,
        update: RecordScoresRequest,
    ) -> Result<Option<Enrollment>>;
    // 学生成绩单：活跃选课 + 课程信息 + 平均分
    async fn get_transcript(&self, user_id: i64) -> Result<TranscriptResponse>;
    // 课程名单：活跃选课 + 学生信息
    async fn get_roster(&self, course_id: i64) -> Result<Vec<RosterEntry>>;

    /// 留言方法
    // 发表课程留言
    async fn post_comment(&self, course_id: i64, user_id: i64, content: &str) -> Result<Comment>;
    // 获取单条留言
    async fn get_comment_by_id(&self, comment_id: i64) -> Result<Option<Comment>>;
    // 更新留言内容（编辑本人留言，归属校验在服务层）
    async fn update_comment(&self, comment_id: i64, content: &str) -> Result<Option<Comment>>;
    // 分页列出课程留言
    async fn list_comments_with_pagination(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<CommentWithAuthor>>;

    /// 系统统计
    async fn get_system_stats(&self) -> Result<SystemStats>;

    /// 离线审计方法
    // 没有资料记录的账号
    async fn find_accounts_without_profiles(&self) -> Result<Vec<Account>>;
    // 教师角色但缺少教师档案的资料
    async fn find_orphan_teacher_profiles(&self) -> Result<Vec<Profile>>;
    // 教师档案存在但资料角色不是教师
    async fn find_misclassified_teacher_records(&self) -> Result<Vec<Teacher>>;
    // 为缺档教师补建档案
    async fn create_missing_teacher_record(
        &self,
        user_id: i64,
        teacher_id: &str,
    ) -> Result<Teacher>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
