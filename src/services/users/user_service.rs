//! # 사용자 서비스
//!
//! 인증된 사용자 본인에 대한 조회와 탈퇴를 처리합니다.
//!
//! ```text
//! withdraw(userId)
//!   ├─ SocialUnlinkService.unlink   (실패해도 계속)
//!   ├─ IdentityStore.soft_delete
//!   └─ RefreshTokenStore.delete_by_identity
//! ```
//!
//! 탈퇴한 사용자는 같은 소셜 계정으로 다시 로그인할 수 없습니다(`A012`).

use std::sync::Arc;

use log::info;

use crate::domain::dto::UserResponse;
use crate::domain::entities::users::Identity;
use crate::errors::{AppError, AppResult, AuthError};
use crate::repositories::{IdentityStore, RefreshTokenStore};
use crate::services::oauth::SocialUnlinkService;

pub struct UserService {
    identities: Arc<dyn IdentityStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    unlink: SocialUnlinkService,
}

impl UserService {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        unlink: SocialUnlinkService,
    ) -> Self {
        Self { identities, refresh_tokens, unlink }
    }

    /// 현재 사용자 정보 조회
    pub async fn get_me(&self, identity_id: i64) -> AppResult<UserResponse> {
        Ok(self.active_identity(identity_id).await?.into())
    }

    /// 회원 탈퇴
    ///
    /// 소셜 연결 해제는 최선 노력으로 시도하고, 결과와 무관하게
    /// 사용자를 소프트 삭제한 뒤 리프레시 토큰 행을 지웁니다.
    pub async fn withdraw(&self, identity_id: i64) -> AppResult<()> {
        let identity = self.active_identity(identity_id).await?;

        let unlinked = self.unlink.unlink(&identity).await;

        if !self.identities.soft_delete(identity.id).await? {
            return Err(AppError::NotFound(format!("사용자 {}", identity.id)));
        }
        self.refresh_tokens.delete_by_identity(identity.id).await?;

        info!(
            "🗑️ 회원 탈퇴: user_id={}, provider={}, unlinked={}",
            identity.id, identity.provider_type, unlinked
        );
        Ok(())
    }

    async fn active_identity(&self, identity_id: i64) -> AppResult<Identity> {
        let identity = self
            .identities
            .find_by_id(identity_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자 {}", identity_id)))?;

        if identity.is_deleted {
            return Err(AuthError::UserDeleted.into());
        }
        Ok(identity)
    }
}
