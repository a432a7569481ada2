//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 실패를 하나의 응답 형식으로 렌더링합니다.
//!
//! ```json
//! { "success": false, "error": { "code": "A003", "message": "토큰이 만료되었습니다" } }
//! ```
//!
//! 내부 오류(데이터베이스, Redis)는 상세 원인을 로그로만 남기고
//! 클라이언트에게는 `SERVER_001` 코드와 일반 메시지만 보여줍니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::{AppError, AuthError};
//!
//! async fn reissue(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
//!     let row = self.refresh_tokens.find_by_token(refresh_token).await?
//!         .ok_or(AuthError::RefreshTokenNotFound)?;
//!     // ...
//! }
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use thiserror::Error;

use super::AuthError;
use crate::domain::dto::ApiResponse;

/// 에러 응답의 `Content-Type`
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// 애플리케이션 전역 에러 타입
///
/// 요청 처리 중 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 인증/인가 에러 (상태 코드는 [`AuthError::status`]를 따름)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문에 들어갈 `(code, message)`
    pub fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Auth(auth) => (auth.code(), auth.message()),
            AppError::ValidationError(_) => ("VAL_001", "필수 필드가 누락되었습니다".to_string()),
            AppError::NotFound(what) => ("NOT_FOUND", format!("{}을(를) 찾을 수 없습니다", what)),
            _ => ("SERVER_001", "서버 내부 오류가 발생했습니다".to_string()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(auth) => auth.status(),
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 공통 에러 봉투로 변환합니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        let (code, message) = self.code_and_message();
        HttpResponse::build(status)
            .content_type(JSON_UTF8)
            .json(ApiResponse::<()>::failure(code, message))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// Apple 로그인 키 설정 오류
///
/// 요청 단위로 복구할 수 없는 설정 오류입니다. 기동 시점에 반환되며 `main`은 즉시 종료합니다.
#[derive(Error, Debug)]
pub enum AppleConfigurationError {
    #[error("Apple 설정 누락: {0}")]
    Missing(&'static str),

    #[error("Apple private key 디코딩 실패: {0}")]
    InvalidKeyEncoding(String),

    #[error("Apple private key 파싱 실패: {0}")]
    InvalidKey(String),
}
