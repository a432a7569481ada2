//! 인증 실패 응답
//!
//! 인증이 필요한 곳에 주체 없이 도달한 요청에만 사용됩니다.
//! 필터가 남긴 에러가 있으면 그 에러로, 없으면 `A001 로그인이 필요합니다`로 응답합니다.

use actix_web::error::InternalError;
use actix_web::{Error, HttpResponse};

use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::AuthContext;
use crate::errors::{AuthError, JSON_UTF8};

pub struct AuthenticationFailureResponder;

impl AuthenticationFailureResponder {
    /// 응답할 에러를 고릅니다.
    pub fn resolve(context: &AuthContext) -> AuthError {
        context.auth_error.unwrap_or(AuthError::Unauthorized)
    }

    pub fn respond(context: &AuthContext) -> HttpResponse {
        Self::render(Self::resolve(context))
    }

    /// `{success:false, error:{code, message}}` 봉투와 에러별 상태 코드
    pub fn render(error: AuthError) -> HttpResponse {
        HttpResponse::build(error.status())
            .content_type(JSON_UTF8)
            .json(ApiResponse::<()>::failure(error.code(), error.message()))
    }

    /// 추출자에서 쓰는 거부 에러
    pub fn reject(context: &AuthContext) -> Error {
        let error = Self::resolve(context);
        InternalError::from_response(error, Self::render(error)).into()
    }
}
