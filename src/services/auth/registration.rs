//! 소셜 로그인 사용자 등록
//!
//! 프로바이더 사용자 정보로 우리 시스템의 사용자를 찾거나 새로 만듭니다.
//! 액세스 토큰 로그인과 웹 로그인 콜백이 같은 규칙을 사용합니다.

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use rand::Rng;

use crate::config::UserConfig;
use crate::domain::entities::users::{Identity, NewIdentity};
use crate::errors::{AppError, AppResult, AuthError};
use crate::repositories::IdentityStore;
use crate::services::oauth::ProviderUserInfo;

const ADJECTIVES: [&str; 10] = ["빨간", "파란", "노란", "초록", "보라", "분홍", "하얀", "검은", "주황", "금색"];
const NOUNS: [&str; 10] = ["캡슐", "가챠", "뽑기", "별", "달", "구름", "토끼", "고양이", "강아지", "곰돌이"];
const MAX_NICKNAME_NUMBER: u32 = 10_000;
const MAX_NICKNAME_ATTEMPTS: usize = 10;

#[derive(Clone)]
pub struct IdentityRegistrationService {
    identities: Arc<dyn IdentityStore>,
    default_profile_image_url: String,
}

impl IdentityRegistrationService {
    pub fn new(identities: Arc<dyn IdentityStore>, default_profile_image_url: impl Into<String>) -> Self {
        Self {
            identities,
            default_profile_image_url: default_profile_image_url.into(),
        }
    }

    pub fn from_config(identities: Arc<dyn IdentityStore>) -> Self {
        Self::new(identities, UserConfig::default_profile_image_url())
    }

    /// 프로바이더 사용자 정보로 사용자를 확정합니다.
    ///
    /// # 반환값
    ///
    /// `(사용자, 신규 가입 여부)`
    ///
    /// # 에러
    ///
    /// * `SocialLoginFailed` - 프로바이더가 사용자 식별자를 주지 않음
    /// * `UserDeleted` - 탈퇴한 사용자
    pub async fn resolve(&self, user_info: &dyn ProviderUserInfo) -> AppResult<(Identity, bool)> {
        let provider = user_info.provider();
        let subject = user_info
            .id()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                warn!("{} 사용자 식별자가 비어 있습니다", provider);
                AuthError::SocialLoginFailed
            })?;

        if let Some(existing) = self.identities.find_by_provider(provider, &subject).await? {
            if existing.is_deleted {
                warn!("탈퇴한 사용자 로그인 시도: user_id={}, provider={}", existing.id, provider);
                return Err(AuthError::UserDeleted.into());
            }

            let updated = self
                .identities
                .record_login(existing.id, user_info.email().as_deref())
                .await?
                .ok_or_else(|| AppError::NotFound(format!("사용자 {}", existing.id)))?;

            return Ok((updated, false));
        }

        let nickname = self.generate_unique_nickname().await?;
        let created = self
            .identities
            .create(NewIdentity {
                provider_type: provider,
                provider_subject_id: subject,
                nickname,
                email: user_info.email(),
                profile_image_url: Some(self.default_profile_image_url.clone()),
            })
            .await?;

        info!("🆕 신규 사용자 등록: user_id={}, provider={}", created.id, provider);
        Ok((created, true))
    }

    /// `형용사명사#번호` 형식 닉네임 (예: `빨간캡슐#1234`)
    async fn generate_unique_nickname(&self) -> AppResult<String> {
        for _ in 0..MAX_NICKNAME_ATTEMPTS {
            let nickname = random_nickname();
            if !self.identities.exists_by_nickname(&nickname).await? {
                return Ok(nickname);
            }
        }

        let fallback = format!("가챠유저#{}", Utc::now().timestamp_millis() % 1_000_000);
        warn!("닉네임 생성 {}회 실패, 대체 닉네임 사용: {}", MAX_NICKNAME_ATTEMPTS, fallback);
        Ok(fallback)
    }
}

fn random_nickname() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}{}#{}",
        ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())],
        NOUNS[rng.gen_range(0..NOUNS.len())],
        rng.gen_range(0..MAX_NICKNAME_NUMBER)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderType;
    use crate::repositories::MemoryIdentityStore;
    use crate::services::oauth::UserInfoFactory;
    use serde_json::json;

    fn service(store: Arc<MemoryIdentityStore>) -> IdentityRegistrationService {
        IdentityRegistrationService::new(store, "https://cdn.example.com/default.png")
    }

    fn kakao(id: i64, email: Option<&str>) -> Box<dyn ProviderUserInfo> {
        let mut account = json!({ "profile": { "nickname": "x" } });
        if let Some(email) = email {
            account["email"] = json!(email);
        }
        UserInfoFactory::of(
            ProviderType::Kakao,
            json!({ "id": id, "kakao_account": account }).as_object().cloned().unwrap(),
        )
    }

    #[actix_web::test]
    async fn test_first_login_creates_identity() {
        let store = Arc::new(MemoryIdentityStore::new());
        let (identity, is_new) = service(store.clone()).resolve(kakao(42, None).as_ref()).await.unwrap();

        assert!(is_new);
        assert_eq!(identity.provider_type, ProviderType::Kakao);
        assert_eq!(identity.provider_subject_id, "42");
        assert!(identity.nickname.contains('#'));
        assert_eq!(identity.profile_image_url.as_deref(), Some("https://cdn.example.com/default.png"));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_second_login_reuses_identity_and_updates_email() {
        let store = Arc::new(MemoryIdentityStore::new());
        let service = service(store.clone());

        let (first, _) = service.resolve(kakao(42, None).as_ref()).await.unwrap();
        let (second, is_new) = service
            .resolve(kakao(42, Some("k@example.com")).as_ref())
            .await
            .unwrap();

        assert!(!is_new);
        assert_eq!(first.id, second.id);
        assert_eq!(first.nickname, second.nickname);
        assert_eq!(second.email.as_deref(), Some("k@example.com"));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_deleted_identity_cannot_login() {
        let store = Arc::new(MemoryIdentityStore::new());
        let service = service(store.clone());

        let (identity, _) = service.resolve(kakao(42, None).as_ref()).await.unwrap();
        store.soft_delete(identity.id).await.unwrap();

        let result = service.resolve(kakao(42, None).as_ref()).await;
        assert!(matches!(result, Err(AppError::Auth(AuthError::UserDeleted))));
    }

    #[actix_web::test]
    async fn test_missing_subject_is_social_login_failed() {
        let store = Arc::new(MemoryIdentityStore::new());
        let info = UserInfoFactory::of(ProviderType::Google, json!({ "name": "no sub" }).as_object().cloned().unwrap());

        let result = service(store).resolve(info.as_ref()).await;
        assert!(matches!(result, Err(AppError::Auth(AuthError::SocialLoginFailed))));
    }

    #[test]
    fn test_random_nickname_format() {
        let nickname = random_nickname();
        let (prefix, number) = nickname.split_once('#').unwrap();

        assert!(ADJECTIVES.iter().any(|a| prefix.starts_with(a)));
        assert!(NOUNS.iter().any(|n| prefix.ends_with(n)));
        assert!(number.parse::<u32>().unwrap() < MAX_NICKNAME_NUMBER);
    }
}
