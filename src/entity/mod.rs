//! SeaORM 数据库实体定义

pub mod comments;
pub mod courses;
pub mod enrollments;
pub mod prelude;
pub mod profiles;
pub mod teachers;
pub mod users;
