//! # 인증 서비스
//!
//! 세션 토큰의 생명주기를 담당합니다.
//!
//! ```text
//! login(provider, providerAccessToken)
//!   ├─ OAuth2ResourceClient ── 프로바이더 사용자 정보
//!   ├─ IdentityRegistrationService ── 사용자 확정 (신규 가입 포함)
//!   └─ issue_tokens ── TokenProvider + RefreshTokenStore.save (upsert)
//!
//! reissue(refreshToken)
//!   ├─ RefreshTokenStore.find_by_token ── 없으면 A010
//!   ├─ 만료 ── 행 삭제 후 A011
//!   └─ 새 토큰 쌍 발급, 행 교체
//!
//! logout(userId) ── RefreshTokenStore.delete_by_identity
//! ```

use std::sync::Arc;

use log::{info, warn};

use super::registration::IdentityRegistrationService;
use super::token_provider::TokenProvider;
use crate::caching::OAuthCodeCache;
use crate::config::ProviderType;
use crate::domain::dto::{DevTokenResponse, TokenExchangeResponse, TokenResponse};
use crate::domain::entities::users::Identity;
use crate::domain::models::token::TokenPair;
use crate::errors::{AppError, AppResult, AuthError};
use crate::repositories::{IdentityStore, RefreshTokenStore};
use crate::services::oauth::OAuth2ResourceClient;

const TEST_ACCESS_TOKEN: &str = "test-access-token-for-swagger";
const TEST_REFRESH_TOKEN: &str = "test-refresh-token-for-swagger";

pub struct AuthService {
    identities: Arc<dyn IdentityStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    token_provider: Arc<TokenProvider>,
    resource_client: OAuth2ResourceClient,
    registration: IdentityRegistrationService,
    code_cache: OAuthCodeCache,
}

impl AuthService {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        token_provider: Arc<TokenProvider>,
        resource_client: OAuth2ResourceClient,
        registration: IdentityRegistrationService,
        code_cache: OAuthCodeCache,
    ) -> Self {
        Self {
            identities,
            refresh_tokens,
            token_provider,
            resource_client,
            registration,
            code_cache,
        }
    }

    /// 프로바이더 액세스 토큰으로 로그인합니다.
    ///
    /// # 인자
    ///
    /// * `provider` - 소셜 프로바이더 (Apple은 이 경로를 지원하지 않음)
    /// * `provider_access_token` - 클라이언트 앱이 프로바이더 SDK로 받은 액세스 토큰
    ///
    /// # 에러
    ///
    /// * `UnsupportedSocialType` - 사용자 정보 엔드포인트가 없는 프로바이더
    /// * `SocialLoginFailed` - 프로바이더 호출 실패 또는 사용자 식별자 없음
    /// * `UserDeleted` - 탈퇴한 사용자
    pub async fn login(&self, provider: ProviderType, provider_access_token: &str) -> AppResult<TokenResponse> {
        let user_info = self
            .resource_client
            .fetch_user_info(provider, provider_access_token)
            .await?;

        let (identity, is_new_user) = self.registration.resolve(user_info.as_ref()).await?;

        if provider == ProviderType::Google {
            self.identities
                .update_social_revoke_token(identity.id, provider_access_token)
                .await?;
        }

        let pair = self.issue_tokens(&identity).await?;
        info!("🔐 로그인 성공: user_id={}, provider={}, new={}", identity.id, provider, is_new_user);

        Ok(TokenResponse::of(pair.access_token, pair.refresh_token, &identity, is_new_user))
    }

    /// 토큰 쌍을 발급하고 리프레시 토큰 행을 교체합니다.
    pub async fn issue_tokens(&self, identity: &Identity) -> AppResult<TokenPair> {
        let pair = self.token_provider.issue_pair(identity)?;
        self.save_refresh_token(identity.id, &pair.refresh_token).await?;
        Ok(pair)
    }

    pub async fn save_refresh_token(&self, identity_id: i64, token: &str) -> AppResult<()> {
        self.refresh_tokens
            .save(identity_id, token, self.token_provider.refresh_expires_at())
            .await
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다.
    ///
    /// # 에러
    ///
    /// * `RefreshTokenNotFound` - 저장된 행이 없음 (이미 교체되었거나 로그아웃됨)
    /// * `RefreshTokenExpired` - 행 또는 토큰이 만료됨, 행은 삭제됨
    /// * `InvalidToken` - 서명 검증 실패
    /// * `UserDeleted` - 탈퇴한 사용자
    pub async fn reissue(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let row = self
            .refresh_tokens
            .find_by_token(refresh_token)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        let expired = match self.token_provider.validate(Some(refresh_token)) {
            Ok(true) => row.is_expired(),
            Ok(false) => return Err(AuthError::InvalidToken.into()),
            Err(AuthError::TokenExpired) => true,
            Err(e) => return Err(e.into()),
        };

        if expired {
            self.refresh_tokens.delete_by_identity(row.identity_id).await?;
            warn!("만료된 리프레시 토큰 사용: user_id={}", row.identity_id);
            return Err(AuthError::RefreshTokenExpired.into());
        }

        let identity = self
            .identities
            .find_by_id(row.identity_id)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        if identity.is_deleted {
            self.refresh_tokens.delete_by_identity(identity.id).await?;
            return Err(AuthError::UserDeleted.into());
        }

        let pair = self.issue_tokens(&identity).await?;
        Ok(TokenResponse::of(pair.access_token, pair.refresh_token, &identity, false))
    }

    pub async fn logout(&self, identity_id: i64) -> AppResult<()> {
        self.refresh_tokens.delete_by_identity(identity_id).await?;
        info!("👋 로그아웃: user_id={}", identity_id);
        Ok(())
    }

    /// 웹 로그인 후 전달된 일회용 코드를 토큰으로 바꿉니다.
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenExchangeResponse> {
        self.code_cache
            .consume(code)
            .await?
            .ok_or_else(|| AuthError::InvalidAuthCode.into())
    }

    /// 프론트엔드 연동 테스트용 코드 (개발 환경 전용)
    pub async fn issue_test_code(&self) -> AppResult<String> {
        self.code_cache
            .store_tokens(&TokenExchangeResponse {
                access_token: TEST_ACCESS_TOKEN.to_string(),
                refresh_token: TEST_REFRESH_TOKEN.to_string(),
                is_new_user: false,
            })
            .await
    }

    /// 기존 사용자에게 토큰을 바로 발급합니다. (개발 환경 전용)
    pub async fn issue_dev_tokens(&self, identity_id: i64) -> AppResult<DevTokenResponse> {
        let identity = self
            .identities
            .find_by_id(identity_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자 {}", identity_id)))?;

        let pair = self.issue_tokens(&identity).await?;
        Ok(DevTokenResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }
}
