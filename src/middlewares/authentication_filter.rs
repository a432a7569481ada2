//! 인증 필터
//!
//! 모든 요청에서 Bearer 토큰을 검증하고 결과를 [`AuthContext`]로 요청 확장 영역에 남깁니다.
//! 필터는 응답을 직접 만들지 않습니다. 인증 실패도 기록만 하고 다음 서비스로 넘기며,
//! 실제 401/403 응답은 인가 경계([`RequireAuth`](super::RequireAuth), `CurrentIdentity`)가 결정합니다.
//!
//! | 입력 | 결과 |
//! |------|------|
//! | Authorization 헤더 없음 / `Bearer ` 아님 | 익명 |
//! | 유효한 토큰 | 주체 (`identity_id`, `ROLE_<userType>`) |
//! | 만료된 토큰 | 익명 + `TokenExpired` |
//! | 서명 불일치, 형식 오류 | 익명 |

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage};
use log::debug;

use crate::domain::models::auth::{AuthContext, AuthenticatedIdentity};
use crate::services::auth::TokenProvider;

/// 애플리케이션 전역 인증 필터
pub struct AuthenticationFilter {
    token_provider: Arc<TokenProvider>,
}

impl AuthenticationFilter {
    pub fn new(token_provider: Arc<TokenProvider>) -> Self {
        Self { token_provider }
    }

    /// `Authorization` 헤더 값으로 요청의 인증 결과를 계산합니다.
    pub fn authenticate(token_provider: &TokenProvider, auth_header: Option<&str>) -> AuthContext {
        let Some(token) = auth_header.and_then(TokenProvider::extract_bearer_token) else {
            return AuthContext::anonymous();
        };

        match token_provider.validate(Some(token)) {
            Ok(true) => {
                let principal = token_provider.identity_id(token).and_then(|identity_id| {
                    let user_type = token_provider.user_type(token)?;
                    Ok(AuthenticatedIdentity {
                        identity_id,
                        role: user_type.role(),
                    })
                });

                match principal {
                    Ok(principal) => AuthContext::authenticated(principal),
                    Err(e) => AuthContext::failed(e),
                }
            }
            Ok(false) => {
                debug!("유효하지 않은 토큰, 익명으로 진행");
                AuthContext::anonymous()
            }
            Err(e) => {
                debug!("토큰 검증 실패 기록: {}", e.code());
                AuthContext::failed(e)
            }
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthenticationFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthenticationFilterService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationFilterService {
            service: Rc::new(service),
            token_provider: self.token_provider.clone(),
        }))
    }
}

pub struct AuthenticationFilterService<S> {
    service: Rc<S>,
    token_provider: Arc<TokenProvider>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationFilterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let context = AuthenticationFilter::authenticate(&self.token_provider, auth_header);
        req.extensions_mut().insert(context);

        self.service.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderType;
    use crate::domain::entities::users::{Identity, NewIdentity, UserType};
    use crate::errors::AuthError;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use chrono::Duration;

    fn identity(id: i64, user_type: UserType) -> Identity {
        let mut identity = Identity::create(id, NewIdentity {
            provider_type: ProviderType::Google,
            provider_subject_id: format!("g-{}", id),
            nickname: "하얀구름#0007".to_string(),
            email: None,
            profile_image_url: None,
        });
        identity.user_type = user_type;
        identity
    }

    fn provider() -> TokenProvider {
        TokenProvider::new("filter-secret", Duration::hours(1), Duration::days(1))
    }

    #[test]
    fn test_no_header_is_anonymous() {
        assert_eq!(AuthenticationFilter::authenticate(&provider(), None), AuthContext::anonymous());
        assert_eq!(
            AuthenticationFilter::authenticate(&provider(), Some("Basic dXNlcjpwdw==")),
            AuthContext::anonymous()
        );
    }

    #[test]
    fn test_valid_token_establishes_principal() {
        let provider = provider();
        let token = provider.issue_access(&identity(77, UserType::Admin)).unwrap();

        let context = AuthenticationFilter::authenticate(&provider, Some(&format!("Bearer {}", token)));

        assert_eq!(
            context.principal,
            Some(AuthenticatedIdentity {
                identity_id: 77,
                role: "ROLE_ADMIN".to_string()
            })
        );
        assert!(context.auth_error.is_none());
    }

    #[test]
    fn test_expired_token_records_error() {
        let expired = TokenProvider::new("filter-secret", Duration::seconds(-10), Duration::seconds(-10));
        let token = expired.issue_access(&identity(1, UserType::Normal)).unwrap();

        let context = AuthenticationFilter::authenticate(&provider(), Some(&format!("Bearer {}", token)));

        assert!(context.principal.is_none());
        assert_eq!(context.auth_error, Some(AuthError::TokenExpired));
    }

    #[test]
    fn test_garbage_token_is_anonymous() {
        let context = AuthenticationFilter::authenticate(&provider(), Some("Bearer not-a-token"));
        assert_eq!(context, AuthContext::anonymous());
    }

    #[actix_web::test]
    async fn test_filter_never_short_circuits() {
        let app = actix_test::init_service(
            App::new()
                .wrap(AuthenticationFilter::new(Arc::new(provider())))
                .route(
                    "/whoami",
                    web::get().to(|context: AuthContext| async move {
                        HttpResponse::Ok().body(match (context.principal, context.auth_error) {
                            (Some(p), _) => format!("principal:{}", p.identity_id),
                            (None, Some(e)) => format!("error:{}", e.code()),
                            (None, None) => "anonymous".to_string(),
                        })
                    }),
                ),
        )
        .await;

        let expired = TokenProvider::new("filter-secret", Duration::seconds(-10), Duration::seconds(-10))
            .issue_access(&identity(5, UserType::Normal))
            .unwrap();
        let valid = provider().issue_access(&identity(9, UserType::Normal)).unwrap();

        let cases = [
            (None, "anonymous".to_string()),
            (Some(format!("Bearer {}", expired)), "error:A003".to_string()),
            (Some(format!("Bearer {}", valid)), "principal:9".to_string()),
        ];

        for (header, expected) in cases {
            let mut req = actix_test::TestRequest::get().uri("/whoami");
            if let Some(header) = header {
                req = req.insert_header((AUTHORIZATION, header));
            }
            let resp = actix_test::call_service(&app, req.to_request()).await;
            assert!(resp.status().is_success());

            let body = actix_test::read_body(resp).await;
            assert_eq!(body, expected.as_bytes());
        }
    }
}
