use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(
        actix_web::error::ErrorBadRequest(message),
        response,
    )
    .into()
}

// 路径参数的安全 i64 提取器：拒绝非数字与非正数的 ID，
// 让参数错误统一成 400 JSON 响应而不是落进处理程序。
macro_rules! declare_safe_id {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let result = match req.match_info().get($param) {
                    Some(raw) => match raw.parse::<i64>() {
                        Ok(id) if id > 0 => Ok($name(id)),
                        Ok(_) => Err(bad_request(format!(
                            "Invalid {}: must be positive",
                            $param
                        ))),
                        Err(_) => Err(bad_request(format!(
                            "Invalid {}: '{raw}' is not an integer",
                            $param
                        ))),
                    },
                    None => Err(bad_request(format!(
                        "Missing path parameter: {}",
                        $param
                    ))),
                };
                ready(result)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.0
            }
        }
    };
}

declare_safe_id!(SafeUserIdI64, "user_id");
declare_safe_id!(SafeCourseIdI64, "course_id");
declare_safe_id!(SafeEnrollmentIdI64, "enrollment_id");
declare_safe_id!(SafeCommentIdI64, "comment_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id_accepts_positive() {
        let req = TestRequest::default()
            .param("course_id", "42")
            .to_http_request();
        let id = SafeCourseIdI64::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_safe_id_rejects_garbage() {
        for raw in ["abc", "0", "-3"] {
            let req = TestRequest::default()
                .param("course_id", raw)
                .to_http_request();
            assert!(
                SafeCourseIdI64::from_request(&req, &mut Payload::None)
                    .await
                    .is_err()
            );
        }
    }
}
