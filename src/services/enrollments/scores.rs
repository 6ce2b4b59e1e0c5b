use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, enrollments::requests::RecordScoresRequest};
use crate::utils::validate::validate_score;

use super::EnrollmentService;

/// 录入期中/期末成绩。两个分数都可选，提供的必须在 [0,100]
/// 且最多两位小数。只对活跃选课记录生效。
pub async fn handle_record_scores(
    service: &EnrollmentService,
    course_id: i64,
    student_user_id: i64,
    scores_request: RecordScoresRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for score in [scores_request.midterm_score, scores_request.final_score]
        .into_iter()
        .flatten()
    {
        if let Err(msg) = validate_score(score) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ScoreOutOfRange,
                msg,
            )));
        }
    }

    if let Err(response) = service.check_course_ownership(course_id, request).await {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    match storage
        .record_scores(student_user_id, course_id, scores_request)
        .await
    {
        Ok(Some(enrollment)) => {
            tracing::info!(
                "Scores recorded for user {} in course {}",
                student_user_id,
                course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "Scores recorded")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "No active enrollment for this student and course",
        ))),
        Err(e) => {
            tracing::error!(
                "Failed to record scores for user {} in course {}: {}",
                student_user_id,
                course_id,
                e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to record scores",
                )),
            )
        }
    }
}
