use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::RecordScoresRequest;
use crate::models::users::entities::AccountRole;
use crate::services::EnrollmentService;
use crate::utils::{SafeCourseIdI64, SafeUserIdI64};

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// HTTP处理程序
pub async fn enroll(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.enroll(course_id.0, &req).await
}

pub async fn drop_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.drop(course_id.0, &req).await
}

pub async fn roster(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.roster(course_id.0, &req).await
}

pub async fn record_scores(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    user_id: SafeUserIdI64,
    scores_data: web::Json<RecordScoresRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .record_scores(course_id.0, user_id.0, scores_data.into_inner(), &req)
        .await
}

pub async fn transcript(req: HttpRequest) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.transcript(&req).await
}

// 配置路由
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}")
            .wrap(middlewares::RequireJWT)
            .service(
                // 选课与退课均为学生本人操作
                web::resource("/enroll").route(
                    web::post()
                        .to(enroll)
                        .wrap(middlewares::RequireRole::new(&AccountRole::Student)),
                ),
            )
            .service(
                web::resource("/drop").route(
                    web::post()
                        .to(drop_course)
                        .wrap(middlewares::RequireRole::new(&AccountRole::Student)),
                ),
            )
            .service(
                // 任课教师或管理员，归属校验在服务层
                web::resource("/roster").route(
                    web::get()
                        .to(roster)
                        .wrap(middlewares::RequireRole::new_any(AccountRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/students/{user_id}/scores").route(
                    web::put()
                        .to(record_scores)
                        .wrap(middlewares::RequireRole::new_any(AccountRole::teacher_roles())),
                ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/transcript")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(transcript)
                        .wrap(middlewares::RequireRole::new(&AccountRole::Student)),
                ),
            ),
    );
}
