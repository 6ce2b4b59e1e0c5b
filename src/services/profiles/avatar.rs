use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use super::ProfileService;
use crate::config::AppConfig;
use crate::errors::GradeSystemError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::avatar::resize_avatar;
use crate::utils::validate_magic_bytes;

/// 上传头像。整张图片先读入内存（受 max_size 限制），
/// 缩放到上限尺寸后统一存成 PNG。
pub async fn handle_upload_avatar(
    service: &ProfileService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let avatar_dir = &config.upload.avatar_dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 确保头像目录存在
    if !Path::new(avatar_dir).exists()
        && let Err(e) = fs::create_dir_all(avatar_dir)
    {
        tracing::error!("{}", GradeSystemError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建头像目录失败",
            )),
        );
    }

    let mut file_data: Vec<u8> = Vec::new();
    let mut file_uploaded = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "avatar" {
            if file_uploaded {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Only one avatar can be uploaded at a time",
                )));
            }
            file_uploaded = true;

            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 提取扩展名并校验
            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();

            if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                )));
            }

            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "文件内容与扩展名不匹配",
                        )));
                    }
                }

                if file_data.len() + data.len() > max_size {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    )));
                }
                file_data.extend_from_slice(&data);
            }
        }
    }

    if !file_uploaded || file_data.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "No avatar found in upload payload",
        )));
    }

    // 缩放到上限尺寸（保持纵横比），统一 PNG 输出
    let resized = match resize_avatar(&file_data) {
        Ok(data) => data,
        Err(e) => {
            tracing::info!("Avatar decode failed for user {}: {}", user_id, e);
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "头像图片解码失败",
            )));
        }
    };

    let stored_name = format!("{}-{}.png", chrono::Utc::now().timestamp(), Uuid::new_v4());
    let file_path = format!("{avatar_dir}/{stored_name}");
    if let Err(e) = fs::write(&file_path, &resized) {
        tracing::error!("{}", GradeSystemError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "头像写入失败",
            )),
        );
    }

    let storage = service.get_storage(request);
    match storage.update_avatar_url(user_id, &file_path).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            serde_json::json!({ "avatar_url": file_path }),
            "Avatar uploaded successfully",
        ))),
        Ok(false) => {
            let _ = fs::remove_file(&file_path);
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AccountNotProvisioned,
                "Account has no profile, contact administrator",
            )))
        }
        Err(e) => {
            let _ = fs::remove_file(&file_path);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    format!("Failed to update avatar: {e}"),
                )),
            )
        }
    }
}
