//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 세션 관리자, 저장소 어댑터, 자격 증명 서비스, HTTP 계층이 공유하는
//! 통합 에러 타입입니다. `thiserror`와 `actix_web::ResponseError`를 사용하여
//! 타입 안전하고 일관된 에러 처리를 제공합니다.
//!
//! ## 전파 정책
//!
//! - 사용자가 대응할 수 있는 실패(잘못된 비밀번호)는 호출자에게 그대로 전파됩니다.
//! - 리프레시 실패는 세션 관리자 내부에서 로그아웃으로 수렴하며 전파되지 않습니다.
//! - 저장소 실패는 로그만 남기고 사용자 흐름을 막지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn login(manager: &AuthManager, email: &str, password: &str) -> Result<(), AppError> {
//!     if email.is_empty() {
//!         return Err(AppError::ValidationError("Email is required".to_string()));
//!     }
//!     manager.login(email, password).await
//! }
//! ```

use actix_web::http::header;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 자격 증명 거부, 저장소 장애, 속도 제한 등 세션 서비스에서 발생할 수 있는
/// 모든 종류의 에러를 포괄합니다. HTTP 응답으로 자동 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    ///
    /// 자격 증명 서비스가 이메일/비밀번호를 거부했거나 세션이 없는 경우입니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 요청 처리 중 로그아웃으로 세션 세대가 바뀐 경우 (409 Conflict)
    #[error("Session superseded: {0}")]
    SessionSuperseded(String),

    /// 속도 제한 초과 (429 Too Many Requests)
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited {
        /// 현재 윈도우가 초기화될 때까지 남은 초
        retry_after_secs: i64,
    },

    /// 키/값 저장소 에러 (500 Internal Server Error)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 직렬화/역직렬화 에러 (500 Internal Server Error)
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    ///
    /// 자격 증명 서비스 네트워크 오류와 타임아웃이 여기에 해당합니다.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 설정 에러 (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::SerializationError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::StorageError(format!("redis: {}", e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::StorageError(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::SessionSuperseded(_) => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    /// 속도 제한 에러에는 `Retry-After` 헤더가 추가됩니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let mut builder = actix_web::HttpResponse::build(self.status_code());

        if let AppError::RateLimited { retry_after_secs } = self {
            builder.insert_header((header::RETRY_AFTER, (*retry_after_secs).max(0).to_string()));
        }

        builder.json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
