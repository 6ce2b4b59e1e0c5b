pub use super::comments::Entity as Comments;
pub use super::courses::Entity as Courses;
pub use super::enrollments::Entity as Enrollments;
pub use super::profiles::Entity as Profiles;
pub use super::teachers::Entity as Teachers;
pub use super::users::Entity as Users;
