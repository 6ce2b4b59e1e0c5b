pub mod auth;

pub mod profiles;

pub mod teachers;

pub mod courses;

pub mod enrollments;

pub mod comments;

pub mod system;

pub use auth::configure_auth_routes;
pub use comments::configure_comments_routes;
pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use profiles::configure_profiles_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teachers_routes;
