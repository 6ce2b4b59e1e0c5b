use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, AppStartTime, ErrorCode};

use super::SystemService;

/// 系统运行统计：账号、课程、选课计数与运行时长
pub async fn handle_stats(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_system_stats().await {
        Ok(mut stats) => {
            if let Some(start) = request.app_data::<actix_web::web::Data<AppStartTime>>() {
                stats.uptime_seconds =
                    (chrono::Utc::now() - start.start_datetime).num_seconds().max(0);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "OK")))
        }
        Err(e) => {
            tracing::error!("Failed to collect system stats: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to collect system stats",
                )),
            )
        }
    }
}
