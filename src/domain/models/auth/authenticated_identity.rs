//! 요청 단위 인증 결과와 핸들러용 추출자
//!
//! 인증 필터는 모든 요청에 [`AuthContext`]를 하나씩 남깁니다.
//! 핸들러는 토큰을 직접 다루지 않고 [`CurrentIdentity`] 추출자로 현재 사용자 ID만 받습니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! pub async fn me(current: CurrentIdentity) -> Result<HttpResponse, AppError> {
//!     let identity_id = current.identity_id();
//!     // ...
//! }
//! ```

use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;
use crate::middlewares::AuthenticationFailureResponder;

/// 검증된 토큰에서 추출된 사용자 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedIdentity {
    pub identity_id: i64,
    /// `ROLE_ADMIN`, `ROLE_OWNER`, `ROLE_NORMAL`
    pub role: String,
}

impl AuthenticatedIdentity {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}

/// 인증 필터가 요청마다 남기는 결과
///
/// `principal`과 `auth_error`는 동시에 `Some`일 수 없습니다.
/// 둘 다 `None`이면 Authorization 헤더가 없던 익명 요청입니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthContext {
    pub principal: Option<AuthenticatedIdentity>,
    pub auth_error: Option<AuthError>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: AuthenticatedIdentity) -> Self {
        Self {
            principal: Some(principal),
            auth_error: None,
        }
    }

    pub fn failed(error: AuthError) -> Self {
        Self {
            principal: None,
            auth_error: Some(error),
        }
    }

    /// 요청 확장 영역에서 인증 결과를 읽습니다. 필터를 거치지 않은 요청은 익명으로 봅니다.
    pub fn of(req: &HttpRequest) -> Self {
        req.extensions().get::<AuthContext>().cloned().unwrap_or_default()
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(AuthContext::of(req)))
    }
}

/// 인증이 필요한 핸들러용 추출자
///
/// 주체가 없으면 [`AuthenticationFailureResponder`]가 필터에 남겨진 에러
/// (없으면 `A001 로그인이 필요합니다`)로 응답합니다.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub AuthenticatedIdentity);

impl CurrentIdentity {
    pub fn identity_id(&self) -> i64 {
        self.0.identity_id
    }
}

impl FromRequest for CurrentIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = AuthContext::of(req);
        match context.principal {
            Some(principal) => ready(Ok(CurrentIdentity(principal))),
            None => ready(Err(AuthenticationFailureResponder::reject(&context))),
        }
    }
}
