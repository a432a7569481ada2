use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::DateTime;

use super::IdentityStore;
use crate::config::ProviderType;
use crate::domain::entities::users::{Identity, NewIdentity};
use crate::errors::{AppError, AppResult};

/// 메모리 사용자 저장소
///
/// 하나의 잠금 안에서 조회와 삽입을 처리하므로 `(provider, subject)` 유일성이 그대로 지켜집니다.
#[derive(Default)]
pub struct MemoryIdentityStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: HashMap<i64, Identity>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::InternalError("메모리 저장소 잠금 실패".to_string()))
    }

    /// 테스트와 개발 데이터 준비용: 이미 만들어진 엔티티를 그대로 넣습니다.
    pub fn insert(&self, identity: Identity) -> AppResult<()> {
        let mut inner = self.lock()?;
        inner.next_id = inner.next_id.max(identity.id);
        inner.rows.insert(identity.id, identity);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|inner| inner.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn find(inner: &Inner, provider: ProviderType, subject: &str) -> Option<Identity> {
    inner
        .rows
        .values()
        .find(|i| i.provider_type == provider && i.provider_subject_id == subject)
        .cloned()
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_provider(
        &self,
        provider: ProviderType,
        provider_subject_id: &str,
    ) -> AppResult<Option<Identity>> {
        Ok(find(&*self.lock()?, provider, provider_subject_id))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Identity>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
        Ok(self.lock()?.rows.values().any(|i| i.nickname == nickname))
    }

    async fn create(&self, new: NewIdentity) -> AppResult<Identity> {
        let mut inner = self.lock()?;
        if let Some(existing) = find(&inner, new.provider_type, &new.provider_subject_id) {
            return Ok(existing);
        }

        inner.next_id += 1;
        let identity = Identity::create(inner.next_id, new);
        inner.rows.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn record_login(&self, id: i64, email: Option<&str>) -> AppResult<Option<Identity>> {
        let mut inner = self.lock()?;
        let Some(identity) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };

        let now = DateTime::now();
        identity.last_login_at = Some(now);
        identity.updated_at = now;
        if let Some(email) = email {
            identity.email = Some(email.to_string());
        }
        Ok(Some(identity.clone()))
    }

    async fn update_social_revoke_token(&self, id: i64, token: &str) -> AppResult<()> {
        if let Some(identity) = self.lock()?.rows.get_mut(&id) {
            identity.social_revoke_token = Some(token.to_string());
            identity.updated_at = DateTime::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        match self.lock()?.rows.get_mut(&id) {
            Some(identity) if !identity.is_deleted => {
                identity.is_deleted = true;
                identity.updated_at = DateTime::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_identity(subject: &str) -> NewIdentity {
        NewIdentity {
            provider_type: ProviderType::Google,
            provider_subject_id: subject.to_string(),
            nickname: format!("닉네임{}", subject),
            email: None,
            profile_image_url: None,
        }
    }

    #[actix_web::test]
    async fn test_create_is_idempotent_per_provider_subject() {
        let store = MemoryIdentityStore::new();

        let first = store.create(new_identity("sub-1")).await.unwrap();
        let again = store.create(new_identity("sub-1")).await.unwrap();
        let other = store.create(new_identity("sub-2")).await.unwrap();

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other.id);
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn test_record_login_updates_email() {
        let store = MemoryIdentityStore::new();
        let identity = store.create(new_identity("sub-1")).await.unwrap();

        let updated = store
            .record_login(identity.id, Some("new@example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("new@example.com"));

        let untouched = store.record_login(identity.id, None).await.unwrap().unwrap();
        assert_eq!(untouched.email.as_deref(), Some("new@example.com"));
    }

    #[actix_web::test]
    async fn test_soft_delete() {
        let store = MemoryIdentityStore::new();
        let identity = store.create(new_identity("sub-1")).await.unwrap();

        assert!(store.soft_delete(identity.id).await.unwrap());
        assert!(!store.soft_delete(identity.id).await.unwrap());
        assert!(store.find_by_id(identity.id).await.unwrap().unwrap().is_deleted);
    }
}
