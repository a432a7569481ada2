//! 스코프 단위 인가 미들웨어
//!
//! 인증 필터가 남긴 [`AuthContext`]를 읽어 접근을 결정합니다.
//!
//! ```rust,ignore
//! web::scope("/api/admin")
//!     .wrap(RequireAuth::role("ROLE_ADMIN"))
//!     .route("/ping", web::get().to(admin_ping))
//! ```

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use log::warn;

use super::failure_responder::AuthenticationFailureResponder;
use crate::domain::models::auth::{AccessRule, AuthContext};
use crate::errors::AuthError;

pub struct RequireAuth {
    rule: AccessRule,
}

impl RequireAuth {
    pub fn new(rule: AccessRule) -> Self {
        Self { rule }
    }

    /// 인증만 요구
    pub fn authenticated() -> Self {
        Self::new(AccessRule::Authenticated)
    }

    /// 특정 역할 요구
    pub fn role(role: &str) -> Self {
        Self::new(AccessRule::Role(role.to_string()))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthService {
            service: Rc::new(service),
            rule: self.rule.clone(),
        }))
    }
}

pub struct RequireAuthService<S> {
    service: Rc<S>,
    rule: AccessRule,
}

impl<S, B> Service<ServiceRequest> for RequireAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let context = req.extensions().get::<AuthContext>().cloned().unwrap_or_default();

        let denied = match &context.principal {
            None => Some(AuthenticationFailureResponder::respond(&context)),
            Some(principal) if !self.rule.is_satisfied(principal) => {
                warn!(
                    "권한 부족: user_id={}, role={}, 필요 조건={:?}",
                    principal.identity_id, principal.role, self.rule
                );
                Some(AuthenticationFailureResponder::render(AuthError::Forbidden))
            }
            Some(_) => None,
        };

        Box::pin(async move {
            if let Some(response) = denied {
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
