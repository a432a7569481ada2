//! # 웹 로그인 (인가 코드 흐름)
//!
//! 브라우저 기반 로그인을 처리합니다. 토큰은 URL에 싣지 않고 일회용 코드로만 전달합니다.
//!
//! ```text
//! 1. GET /oauth2/authorize/{provider}?redirect_uri=...
//!      └─ 인가 요청 생성 → state로 저장(180초) → 302 프로바이더 인가 화면
//!
//! 2. GET|POST /api/auth/callback/{provider}?code=...&state=...
//!      ├─ state로 저장된 요청 꺼내기 (1회용)
//!      ├─ 인가 코드 → 프로바이더 토큰 교환
//!      ├─ 사용자 정보 (Apple: ID 토큰 검증, 그 외: 리소스 엔드포인트)
//!      ├─ 사용자 확정 + 세션 토큰 발급
//!      └─ 302 {redirect_uri}?code=<일회용 코드>   (실패 시 ?error=<A0xx>)
//!
//! 3. POST /api/auth/token { code } → 토큰 쌍 (30초 내 1회)
//! ```

use std::sync::Arc;

use log::{error, info, warn};
use serde_json::Value;

use super::auth_service::AuthService;
use super::registration::IdentityRegistrationService;
use crate::caching::{AuthorizationRequestRepository, OAuthCodeCache, StoredAuthorizationRequest};
use crate::config::{OAuthRedirectConfig, ProviderType};
use crate::domain::dto::{OAuthCallbackParams, TokenExchangeResponse};
use crate::domain::models::oauth::{CODE_VERIFIER, ID_TOKEN_PARAMETER, OAuth2AccessTokenResponse, REFRESH_TOKEN_PARAMETER};
use crate::errors::{AppError, AppResult, AuthError};
use crate::repositories::IdentityStore;
use crate::services::oauth::{
    AppleIdTokenVerifier, AuthorizationRequestResolver, OAuth2ResourceClient, ProviderUserInfo, TokenExchangeClient,
    UserInfoFactory,
};

/// 로그인 후 돌아갈 프론트엔드 주소 규칙
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    pub default_redirect_uri: String,
    pub allowed_redirect_uris: Vec<String>,
}

impl RedirectPolicy {
    pub fn from_config() -> Self {
        Self {
            default_redirect_uri: OAuthRedirectConfig::default_redirect_uri(),
            allowed_redirect_uris: OAuthRedirectConfig::allowed_redirect_uris(),
        }
    }

    /// 허용 목록에 있는 주소만 그대로 쓰고, 나머지는 기본 주소로 바꿉니다.
    pub fn select(&self, requested: Option<&str>) -> String {
        match requested.map(str::trim).filter(|uri| !uri.is_empty()) {
            Some(uri) if self.allowed_redirect_uris.iter().any(|allowed| allowed == uri) => uri.to_string(),
            Some(uri) => {
                warn!("허용되지 않은 redirect_uri, 기본값 사용: {}", uri);
                self.default_redirect_uri.clone()
            }
            None => self.default_redirect_uri.clone(),
        }
    }
}

pub struct OAuthLoginService {
    resolver: AuthorizationRequestResolver,
    requests: AuthorizationRequestRepository,
    exchange: TokenExchangeClient,
    resource_client: OAuth2ResourceClient,
    apple_id_token: Option<AppleIdTokenVerifier>,
    registration: IdentityRegistrationService,
    identities: Arc<dyn IdentityStore>,
    auth_service: Arc<AuthService>,
    code_cache: OAuthCodeCache,
    redirect_policy: RedirectPolicy,
}

impl OAuthLoginService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        resolver: AuthorizationRequestResolver,
        requests: AuthorizationRequestRepository,
        exchange: TokenExchangeClient,
        resource_client: OAuth2ResourceClient,
        apple_id_token: Option<AppleIdTokenVerifier>,
        registration: IdentityRegistrationService,
        identities: Arc<dyn IdentityStore>,
        auth_service: Arc<AuthService>,
        code_cache: OAuthCodeCache,
        redirect_policy: RedirectPolicy,
    ) -> Self {
        Self {
            resolver,
            requests,
            exchange,
            resource_client,
            apple_id_token,
            registration,
            identities,
            auth_service,
            code_cache,
            redirect_policy,
        }
    }

    /// 인가 요청을 만들어 저장하고, 사용자를 보낼 프로바이더 URL을 반환합니다.
    pub async fn authorize(&self, provider: ProviderType, redirect_uri: Option<&str>) -> AppResult<String> {
        let request = self.resolver.resolve(provider)?;
        let location = request.authorization_request_uri();

        self.requests
            .save(&StoredAuthorizationRequest {
                request,
                redirect_uri: self.redirect_policy.select(redirect_uri),
            })
            .await?;

        Ok(location)
    }

    /// 프로바이더 콜백을 처리하고 프론트엔드로 보낼 주소를 반환합니다.
    ///
    /// 실패해도 에러를 돌려주지 않고 `?error=<코드>`가 붙은 주소를 반환합니다.
    pub async fn callback(&self, provider: ProviderType, params: OAuthCallbackParams) -> String {
        let stored = match params.state.as_deref() {
            Some(state) => self.requests.remove(state).await.unwrap_or_else(|e| {
                error!("인가 요청 조회 실패: {}", e);
                None
            }),
            None => None,
        };

        let redirect_uri = stored
            .as_ref()
            .map(|s| s.redirect_uri.clone())
            .unwrap_or_else(|| self.redirect_policy.default_redirect_uri.clone());

        match self.complete(provider, stored, params).await {
            Ok(code) => with_query(&redirect_uri, "code", &code),
            Err(e) => {
                let (code, message) = e.code_and_message();
                warn!("{} 웹 로그인 실패: {} {}", provider, code, message);
                with_query(&redirect_uri, "error", code)
            }
        }
    }

    async fn complete(
        &self,
        provider: ProviderType,
        stored: Option<StoredAuthorizationRequest>,
        params: OAuthCallbackParams,
    ) -> AppResult<String> {
        if let Some(oauth_error) = params.error.as_deref() {
            warn!(
                "{} 인가 거부: error={}, description={}",
                provider,
                oauth_error,
                params.error_description.as_deref().unwrap_or_default()
            );
            return Err(AuthError::from_oauth_error_param(oauth_error).into());
        }

        let stored = stored.ok_or_else(|| {
            warn!("{} 콜백의 state에 해당하는 인가 요청이 없습니다", provider);
            AuthError::OAuthInvalidResponse
        })?;
        if stored.request.registration_id() != provider.registration_id() {
            return Err(AuthError::OAuthInvalidResponse.into());
        }
        let code = params
            .code
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::OAuthInvalidResponse)?;

        let registration = self
            .resolver
            .registration(provider)
            .ok_or(AuthError::UnsupportedSocialType)?;

        let token_response = self
            .exchange
            .exchange(registration, code, stored.request.attribute(CODE_VERIFIER))
            .await?;

        let user_info = self
            .user_info(provider, &token_response, params.user.as_deref())
            .await?;
        let (identity, is_new_user) = self.registration.resolve(user_info.as_ref()).await?;

        if let Some(revoke_token) = revoke_token(provider, &token_response) {
            self.identities
                .update_social_revoke_token(identity.id, revoke_token)
                .await?;
        }

        let pair = self.auth_service.issue_tokens(&identity).await?;
        info!("🔐 웹 로그인 성공: user_id={}, provider={}, new={}", identity.id, provider, is_new_user);

        self.code_cache
            .store_tokens(&TokenExchangeResponse {
                access_token: pair.access_token,
                refresh_token: pair.refresh_token,
                is_new_user,
            })
            .await
    }

    async fn user_info(
        &self,
        provider: ProviderType,
        token_response: &OAuth2AccessTokenResponse,
        apple_user: Option<&str>,
    ) -> AppResult<Box<dyn ProviderUserInfo>> {
        if provider != ProviderType::Apple {
            return Ok(self
                .resource_client
                .fetch_user_info(provider, &token_response.access_token)
                .await?);
        }

        let verifier = self
            .apple_id_token
            .as_ref()
            .ok_or_else(|| AppError::InternalError("Apple 로그인이 설정되지 않았습니다".to_string()))?;
        let id_token = token_response
            .additional_parameter(ID_TOKEN_PARAMETER)
            .ok_or(AuthError::OAuthInvalidResponse)?;

        let mut claims = verifier.verify(id_token).await?;

        // 이름은 최초 동의 때 form 본문 `user`로만 옴
        if let Some(user) = apple_user.and_then(|raw| serde_json::from_str::<Value>(raw).ok()) {
            claims.insert("user".to_string(), user);
        }

        Ok(UserInfoFactory::of(ProviderType::Apple, claims))
    }
}

/// 탈퇴 시 연결 해제에 쓸 프로바이더 자격 증명
fn revoke_token(provider: ProviderType, token_response: &OAuth2AccessTokenResponse) -> Option<&str> {
    match provider {
        ProviderType::Apple => token_response.additional_parameter(REFRESH_TOKEN_PARAMETER),
        ProviderType::Google => Some(token_response.access_token.as_str()),
        _ => None,
    }
}

fn with_query(uri: &str, name: &str, value: &str) -> String {
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", uri, separator, name, urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryEphemeralStore;
    use crate::config::ClientRegistration;
    use crate::repositories::{MemoryIdentityStore, MemoryRefreshTokenStore};
    use crate::services::auth::TokenProvider;
    use chrono::Duration;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FRONTEND: &str = "http://localhost:3000/login/callback";

    struct Fixture {
        service: OAuthLoginService,
        auth_service: Arc<AuthService>,
        identities: Arc<MemoryIdentityStore>,
    }

    fn fixture(server: &MockServer) -> Fixture {
        let ephemeral = Arc::new(MemoryEphemeralStore::new());
        let identities = Arc::new(MemoryIdentityStore::new());
        let refresh_tokens = Arc::new(MemoryRefreshTokenStore::new());
        let token_provider = Arc::new(TokenProvider::new("secret", Duration::hours(1), Duration::days(14)));
        let code_cache = OAuthCodeCache::new(ephemeral.clone());
        let resource_client = OAuth2ResourceClient::new(reqwest::Client::new())
            .with_endpoint(ProviderType::Kakao, format!("{}/v2/user/me", server.uri()));
        let registration = IdentityRegistrationService::new(identities.clone(), "https://cdn/default.png");

        let auth_service = Arc::new(AuthService::new(
            identities.clone(),
            refresh_tokens,
            token_provider,
            resource_client.clone(),
            registration.clone(),
            code_cache.clone(),
        ));

        let kakao = ClientRegistration {
            provider: ProviderType::Kakao,
            client_id: "kakao-client".to_string(),
            client_secret: Some("kakao-secret".to_string()),
            authorization_uri: "https://kauth.kakao.com/oauth/authorize".to_string(),
            token_uri: format!("{}/oauth/token", server.uri()),
            redirect_uri: "http://localhost:8080/api/auth/callback/kakao".to_string(),
            scopes: vec!["profile_nickname".to_string()],
        };

        let service = OAuthLoginService::new(
            AuthorizationRequestResolver::new(vec![kakao]),
            AuthorizationRequestRepository::new(ephemeral),
            TokenExchangeClient::new(reqwest::Client::new(), None),
            resource_client,
            None,
            registration,
            identities.clone(),
            auth_service.clone(),
            code_cache,
            RedirectPolicy {
                default_redirect_uri: FRONTEND.to_string(),
                allowed_redirect_uris: vec![FRONTEND.to_string(), "http://localhost:5173/cb?from=web".to_string()],
            },
        );

        Fixture { service, auth_service, identities }
    }

    fn state_of(location: &str) -> String {
        location
            .split(['?', '&'])
            .find_map(|pair| pair.strip_prefix("state="))
            .map(|s| urlencoding::decode(s).unwrap().into_owned())
            .unwrap()
    }

    fn query_value(location: &str, name: &str) -> Option<String> {
        let prefix = format!("{}=", name);
        location
            .split(['?', '&'])
            .find_map(|pair| pair.strip_prefix(prefix.as_str()).map(String::from))
    }

    async fn mount_kakao(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("code=auth-code"))
            .and(body_string_contains("code_verifier="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "kakao-at" })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/user/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "kakao_account": { "profile": { "nickname": "x" } }
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_redirect_policy() {
        let policy = RedirectPolicy {
            default_redirect_uri: FRONTEND.to_string(),
            allowed_redirect_uris: vec!["http://app.example.com/cb".to_string()],
        };

        assert_eq!(policy.select(Some("http://app.example.com/cb")), "http://app.example.com/cb");
        assert_eq!(policy.select(Some("http://evil.example.com/cb")), FRONTEND);
        assert_eq!(policy.select(None), FRONTEND);
    }

    #[tokio::test]
    async fn test_authorize_returns_provider_url_with_pkce() {
        let server = MockServer::start().await;
        let f = fixture(&server);

        let location = f.service.authorize(ProviderType::Kakao, None).await.unwrap();

        assert!(location.starts_with("https://kauth.kakao.com/oauth/authorize?"));
        assert!(location.contains("code_challenge_method=S256"));
        assert!(location.contains("client_id=kakao-client"));
        assert!(!location.contains("code_verifier"));
    }

    #[tokio::test]
    async fn test_authorize_unregistered_provider() {
        let server = MockServer::start().await;
        let f = fixture(&server);

        let result = f.service.authorize(ProviderType::Naver, None).await;
        assert!(matches!(result, Err(AppError::Auth(AuthError::UnsupportedSocialType))));
    }

    #[tokio::test]
    async fn test_callback_issues_single_use_code() {
        let server = MockServer::start().await;
        mount_kakao(&server).await;
        let f = fixture(&server);

        let location = f.service.authorize(ProviderType::Kakao, Some("http://localhost:5173/cb?from=web")).await.unwrap();
        let redirect = f
            .service
            .callback(ProviderType::Kakao, OAuthCallbackParams {
                code: Some("auth-code".to_string()),
                state: Some(state_of(&location)),
                ..Default::default()
            })
            .await;

        assert!(redirect.starts_with("http://localhost:5173/cb?from=web&code="));
        let code = query_value(&redirect, "code").unwrap();

        let tokens = f.auth_service.exchange_code(&code).await.unwrap();
        assert!(tokens.is_new_user);
        assert!(f.identities.find_by_provider(ProviderType::Kakao, "42").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_callback_with_unknown_state_redirects_with_error() {
        let server = MockServer::start().await;
        let f = fixture(&server);

        let redirect = f
            .service
            .callback(ProviderType::Kakao, OAuthCallbackParams {
                code: Some("auth-code".to_string()),
                state: Some("forged".to_string()),
                ..Default::default()
            })
            .await;

        assert_eq!(redirect, format!("{}?error={}", FRONTEND, AuthError::OAuthInvalidResponse.code()));
    }

    #[tokio::test]
    async fn test_callback_state_is_single_use() {
        let server = MockServer::start().await;
        mount_kakao(&server).await;
        let f = fixture(&server);

        let location = f.service.authorize(ProviderType::Kakao, None).await.unwrap();
        let params = || OAuthCallbackParams {
            code: Some("auth-code".to_string()),
            state: Some(state_of(&location)),
            ..Default::default()
        };

        let first = f.service.callback(ProviderType::Kakao, params()).await;
        let second = f.service.callback(ProviderType::Kakao, params()).await;

        assert!(query_value(&first, "code").is_some());
        assert_eq!(query_value(&second, "error").as_deref(), Some(AuthError::OAuthInvalidResponse.code()));
    }

    #[tokio::test]
    async fn test_callback_access_denied() {
        let server = MockServer::start().await;
        let f = fixture(&server);
        let location = f.service.authorize(ProviderType::Kakao, None).await.unwrap();

        let redirect = f
            .service
            .callback(ProviderType::Kakao, OAuthCallbackParams {
                state: Some(state_of(&location)),
                error: Some("access_denied".to_string()),
                ..Default::default()
            })
            .await;

        assert_eq!(
            query_value(&redirect, "error").as_deref(),
            Some(AuthError::OAuthAccessDenied.code())
        );
    }

    #[test]
    fn test_with_query_separator() {
        assert_eq!(with_query("http://a/cb", "code", "x"), "http://a/cb?code=x");
        assert_eq!(with_query("http://a/cb?k=v", "code", "x"), "http://a/cb?k=v&code=x");
    }
}
