//! 业务服务层
//!
//! 每个服务持有懒加载的存储句柄，HTTP 处理程序通过
//! 路由模块的全局 Lazy 实例调用。

pub mod auth;
pub mod comments;
pub mod courses;
pub mod enrollments;
pub mod profiles;
pub mod system;
pub mod teachers;

pub use auth::AuthService;
pub use comments::CommentService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use profiles::ProfileService;
pub use system::SystemService;
pub use teachers::TeacherService;
