pub mod drop;
pub mod enroll;
pub mod roster;
pub mod scores;
pub mod transcript;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, enrollments::requests::RecordScoresRequest,
    users::entities::AccountRole,
};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生本人选课
    pub async fn enroll(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enroll::handle_enroll(self, course_id, request).await
    }

    // 学生本人退课（软删除，成绩保留）
    pub async fn drop(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        drop::handle_drop(self, course_id, request).await
    }

    // 学生本人成绩单
    pub async fn transcript(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        transcript::handle_transcript(self, request).await
    }

    // 课程名单（任课教师或管理员）
    pub async fn roster(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        roster::handle_roster(self, course_id, request).await
    }

    // 录入成绩（任课教师或管理员）
    pub async fn record_scores(
        &self,
        course_id: i64,
        student_user_id: i64,
        scores_request: RecordScoresRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        scores::handle_record_scores(self, course_id, student_user_id, scores_request, request)
            .await
    }

    /// 校验请求者对课程的管理权限：任课教师本人或管理员。
    /// 返回 Err(响应) 时调用方直接原样返回。
    pub(crate) async fn check_course_ownership(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> Result<(), HttpResponse> {
        let storage = self.get_storage(request);

        let Some(current) = RequireJWT::extract_current_user(request) else {
            return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        };

        // 管理员直接放行
        if current
            .account
            .authorize(current.profile.as_ref(), &AccountRole::Admin)
        {
            return Ok(());
        }

        let course = match storage.get_course_by_id(course_id).await {
            Ok(Some(course)) => course,
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => {
                tracing::error!("Failed to get course {}: {}", course_id, e);
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Failed to get course",
                    )),
                );
            }
        };

        if course.teacher_id != Some(current.account.id) {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only the course teacher can manage this course",
            )));
        }

        Ok(())
    }
}
