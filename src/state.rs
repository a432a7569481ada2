//! 애플리케이션 상태
//!
//! 모든 서비스를 한 번만 조립해 `web::Data<AppState>`로 핸들러와 미들웨어에 공유합니다.
//! 서비스는 불변이므로 워커 간 공유에 잠금이 필요 없습니다.

use std::sync::Arc;

use crate::caching::{AuthorizationRequestRepository, EphemeralStore, MemoryEphemeralStore, OAuthCodeCache};
use crate::config::{Environment, UserConfig};
use crate::repositories::{IdentityStore, MemoryIdentityStore, MemoryRefreshTokenStore, RefreshTokenStore};
use crate::services::auth::{AuthService, IdentityRegistrationService, OAuthLoginService, RedirectPolicy, TokenProvider};
use crate::services::oauth::{
    AppleCredentialSynthesizer, AppleIdTokenVerifier, AuthorizationRequestResolver, OAuth2ResourceClient,
    SocialUnlinkService, TokenExchangeClient,
};
use crate::services::users::UserService;

/// 저장소 묶음
#[derive(Clone)]
pub struct Stores {
    pub identities: Arc<dyn IdentityStore>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub ephemeral: Arc<dyn EphemeralStore>,
}

impl Stores {
    /// 프로세스 메모리 저장소 (로컬 실행, 테스트)
    pub fn memory() -> Self {
        Self {
            identities: Arc::new(MemoryIdentityStore::new()),
            refresh_tokens: Arc::new(MemoryRefreshTokenStore::new()),
            ephemeral: Arc::new(MemoryEphemeralStore::new()),
        }
    }
}

/// 소셜 프로바이더 클라이언트 묶음
pub struct Providers {
    pub resource_client: OAuth2ResourceClient,
    pub resolver: AuthorizationRequestResolver,
    pub exchange: TokenExchangeClient,
    pub apple_id_token: Option<AppleIdTokenVerifier>,
    pub unlink: SocialUnlinkService,
    pub redirect_policy: RedirectPolicy,
}

impl Providers {
    /// 환경 변수 설정으로 만듭니다. Apple 생성기가 없으면 Apple 웹 로그인과 연결 해제는 비활성입니다.
    pub fn from_config(apple: Option<Arc<AppleCredentialSynthesizer>>) -> Self {
        Self {
            resource_client: OAuth2ResourceClient::from_config(),
            resolver: AuthorizationRequestResolver::from_config(),
            exchange: TokenExchangeClient::from_config(apple.clone()),
            apple_id_token: apple
                .as_ref()
                .map(|synthesizer| AppleIdTokenVerifier::from_config(synthesizer.client_id())),
            unlink: SocialUnlinkService::from_config(apple),
            redirect_policy: RedirectPolicy::from_config(),
        }
    }
}

/// 핸들러가 공유하는 상태
#[derive(Clone)]
pub struct AppState {
    pub token_provider: Arc<TokenProvider>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub oauth_login_service: Arc<OAuthLoginService>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(stores: Stores, providers: Providers, token_provider: Arc<TokenProvider>, environment: Environment) -> Self {
        let Stores { identities, refresh_tokens, ephemeral } = stores;
        let Providers { resource_client, resolver, exchange, apple_id_token, unlink, redirect_policy } = providers;

        let code_cache = OAuthCodeCache::new(ephemeral.clone());
        let registration =
            IdentityRegistrationService::new(identities.clone(), UserConfig::default_profile_image_url());

        let auth_service = Arc::new(AuthService::new(
            identities.clone(),
            refresh_tokens.clone(),
            token_provider.clone(),
            resource_client.clone(),
            registration.clone(),
            code_cache.clone(),
        ));

        let user_service = Arc::new(UserService::new(identities.clone(), refresh_tokens, unlink));

        let oauth_login_service = Arc::new(OAuthLoginService::new(
            resolver,
            AuthorizationRequestRepository::new(ephemeral),
            exchange,
            resource_client,
            apple_id_token,
            registration,
            identities,
            auth_service.clone(),
            code_cache,
            redirect_policy,
        ));

        Self {
            token_provider,
            auth_service,
            user_service,
            oauth_login_service,
            environment,
        }
    }
}
