//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod comments;
mod courses;
mod enrollments;
mod profiles;
mod system;
mod teachers;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{GradeSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按应用配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 按指定 URL 创建存储实例（测试与离线工具入口）
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradeSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradeSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库必须固定单连接，否则每个连接各是一个独立数据库
        let max_connections = if url.contains(":memory:") { 1 } else { pool_size };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| GradeSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GradeSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradeSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.get_account_by_id_impl(id).await
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.get_account_by_username_impl(username).await
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.get_account_by_email_impl(email).await
    }

    async fn get_account_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>> {
        self.get_account_by_username_or_email_impl(identifier).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn register_student(
        &self,
        account: NewAccount,
        student_id: Option<String>,
    ) -> Result<Account> {
        self.register_student_impl(account, student_id).await
    }

    async fn seed_admin(&self, account: NewAccount) -> Result<Account> {
        self.seed_admin_impl(account).await
    }

    // 资料模块
    async fn get_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>> {
        self.get_profile_by_user_id_impl(user_id).await
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        self.update_profile_impl(user_id, update).await
    }

    async fn update_avatar_url(&self, user_id: i64, avatar_url: &str) -> Result<bool> {
        self.update_avatar_url_impl(user_id, avatar_url).await
    }

    // 教师模块
    async fn provision_teacher(
        &self,
        account: NewAccount,
        teacher_id: String,
        department: Option<String>,
        bio: Option<String>,
    ) -> Result<(Account, Teacher)> {
        self.provision_teacher_impl(account, teacher_id, department, bio)
            .await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn get_teacher_by_teacher_id(&self, teacher_id: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_teacher_id_impl(teacher_id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<TeacherWithAccount>> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn delete_teacher(&self, user_id: i64) -> Result<bool> {
        self.delete_teacher_impl(user_id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(course_code).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<CourseDetail>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn count_active_enrollments(&self, course_id: i64) -> Result<i64> {
        self.count_active_enrollments_impl(course_id).await
    }

    // 选课与成绩模块
    async fn enroll_course(&self, user_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enroll_course_impl(user_id, course_id).await
    }

    async fn drop_course(&self, user_id: i64, course_id: i64) -> Result<bool> {
        self.drop_course_impl(user_id, course_id).await
    }

    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(user_id, course_id).await
    }

    async fn record_scores(
        &self,
        user_id: i64,
        course_id: i64,
        update: RecordScoresRequest,
    ) -> Result<Option<Enrollment>> {
        self.record_scores_impl(user_id, course_id, update).await
    }

    async fn get_transcript(&self, user_id: i64) -> Result<TranscriptResponse> {
        self.get_transcript_impl(user_id).await
    }

    async fn get_roster(&self, course_id: i64) -> Result<Vec<RosterEntry>> {
        self.get_roster_impl(course_id).await
    }

    // 留言模块
    async fn post_comment(&self, course_id: i64, user_id: i64, content: &str) -> Result<Comment> {
        self.post_comment_impl(course_id, user_id, content).await
    }

    async fn get_comment_by_id(&self, comment_id: i64) -> Result<Option<Comment>> {
        self.get_comment_by_id_impl(comment_id).await
    }

    async fn update_comment(&self, comment_id: i64, content: &str) -> Result<Option<Comment>> {
        self.update_comment_impl(comment_id, content).await
    }

    async fn list_comments_with_pagination(
        &self,
        course_id: i64,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<CommentWithAuthor>> {
        self.list_comments_with_pagination_impl(course_id, query)
            .await
    }

    // 系统统计
    async fn get_system_stats(&self) -> Result<SystemStats> {
        self.get_system_stats_impl().await
    }

    // 离线审计
    async fn find_accounts_without_profiles(&self) -> Result<Vec<Account>> {
        self.find_accounts_without_profiles_impl().await
    }

    async fn find_orphan_teacher_profiles(&self) -> Result<Vec<Profile>> {
        self.find_orphan_teacher_profiles_impl().await
    }

    async fn find_misclassified_teacher_records(&self) -> Result<Vec<Teacher>> {
        self.find_misclassified_teacher_records_impl().await
    }

    async fn create_missing_teacher_record(
        &self,
        user_id: i64,
        teacher_id: &str,
    ) -> Result<Teacher> {
        self.create_missing_teacher_record_impl(user_id, teacher_id)
            .await
    }
}
