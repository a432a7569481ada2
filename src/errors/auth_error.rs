//! 인증 에러 분류 체계
//!
//! 인증/인가 과정에서 클라이언트에게 보여지는 모든 실패는 이 열거형 중 하나로 표현됩니다.
//! 각 변형은 고정된 `(HTTP 상태, 에러 코드, 메시지)` 세 값을 가지며,
//! 클라이언트는 메시지가 아닌 코드(`A001`...)로 분기해야 합니다.
//!
//! | 변형 | 상태 | 코드 |
//! |------|------|------|
//! | `Unauthorized` | 401 | A001 |
//! | `Forbidden` | 403 | A002 |
//! | `TokenExpired` | 401 | A003 |
//! | `InvalidToken` | 401 | A004 |
//! | `SocialLoginFailed` | 401 | A005 |
//! | `UnsupportedSocialType` | 400 | A006 |
//! | `OAuthAccessDenied` | 401 | A007 |
//! | `OAuthInvalidToken` | 401 | A008 |
//! | `OAuthInvalidResponse` | 401 | A009 |
//! | `RefreshTokenNotFound` | 401 | A010 |
//! | `RefreshTokenExpired` | 401 | A011 |
//! | `UserDeleted` | 401 | A012 |
//! | `InvalidAuthCode` | 401 | A013 |
//!
//! `AuthError`는 `Copy`이므로 요청 단위 인증 결과([`AuthContext`](crate::domain::models::auth::AuthContext))에
//! 그대로 담아 미들웨어 체인 아래로 전달할 수 있습니다.

use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("로그인이 필요합니다")]
    Unauthorized,

    #[error("권한이 없습니다")]
    Forbidden,

    #[error("토큰이 만료되었습니다")]
    TokenExpired,

    #[error("유효하지 않은 토큰입니다")]
    InvalidToken,

    #[error("소셜 로그인에 실패했습니다")]
    SocialLoginFailed,

    #[error("지원하지 않는 소셜 로그인입니다")]
    UnsupportedSocialType,

    #[error("로그인을 취소했습니다")]
    OAuthAccessDenied,

    #[error("OAuth 토큰이 유효하지 않습니다")]
    OAuthInvalidToken,

    #[error("OAuth 응답을 처리할 수 없습니다")]
    OAuthInvalidResponse,

    #[error("리프레시 토큰을 찾을 수 없습니다")]
    RefreshTokenNotFound,

    #[error("리프레시 토큰이 만료되었습니다")]
    RefreshTokenExpired,

    #[error("탈퇴한 사용자입니다")]
    UserDeleted,

    #[error("유효하지 않은 인증 코드입니다")]
    InvalidAuthCode,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::UnsupportedSocialType => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Unauthorized => "A001",
            AuthError::Forbidden => "A002",
            AuthError::TokenExpired => "A003",
            AuthError::InvalidToken => "A004",
            AuthError::SocialLoginFailed => "A005",
            AuthError::UnsupportedSocialType => "A006",
            AuthError::OAuthAccessDenied => "A007",
            AuthError::OAuthInvalidToken => "A008",
            AuthError::OAuthInvalidResponse => "A009",
            AuthError::RefreshTokenNotFound => "A010",
            AuthError::RefreshTokenExpired => "A011",
            AuthError::UserDeleted => "A012",
            AuthError::InvalidAuthCode => "A013",
        }
    }

    /// 사용자에게 보여줄 메시지 (`Display`와 동일)
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// 프로바이더가 콜백으로 돌려준 `error` 파라미터를 에러로 변환합니다.
    ///
    /// 알 수 없는 값은 모두 `SocialLoginFailed`로 처리합니다.
    pub fn from_oauth_error_param(error: &str) -> Self {
        match error {
            "access_denied" => AuthError::OAuthAccessDenied,
            "invalid_token" => AuthError::OAuthInvalidToken,
            "invalid_response" => AuthError::OAuthInvalidResponse,
            _ => AuthError::SocialLoginFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::UnsupportedSocialType.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::RefreshTokenExpired.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_codes_and_messages() {
        assert_eq!(AuthError::Unauthorized.code(), "A001");
        assert_eq!(AuthError::Unauthorized.message(), "로그인이 필요합니다");
        assert_eq!(AuthError::TokenExpired.code(), "A003");
        assert_eq!(AuthError::TokenExpired.message(), "토큰이 만료되었습니다");
        assert_eq!(AuthError::RefreshTokenNotFound.code(), "A010");
        assert_eq!(AuthError::InvalidAuthCode.code(), "A013");
    }

    #[test]
    fn test_oauth_error_param_mapping() {
        assert_eq!(
            AuthError::from_oauth_error_param("access_denied"),
            AuthError::OAuthAccessDenied
        );
        assert_eq!(
            AuthError::from_oauth_error_param("invalid_token"),
            AuthError::OAuthInvalidToken
        );
        assert_eq!(
            AuthError::from_oauth_error_param("invalid_response"),
            AuthError::OAuthInvalidResponse
        );
        assert_eq!(
            AuthError::from_oauth_error_param("server_error"),
            AuthError::SocialLoginFailed
        );
    }
}
