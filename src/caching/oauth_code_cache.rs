use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use super::EphemeralStore;
use crate::domain::dto::TokenExchangeResponse;
use crate::errors::{AppError, AppResult};

const KEY_PREFIX: &str = "oauth2:code:";
const EXPIRE_SECONDS: u64 = 30;

/// 웹 로그인 결과를 일회용 코드로 맡겨두는 캐시
///
/// 토큰을 리다이렉트 URL에 직접 싣지 않고, 30초 동안 유효한 코드만 전달합니다.
/// 프론트엔드는 `POST /api/auth/token`으로 코드를 한 번만 교환할 수 있습니다.
#[derive(Clone)]
pub struct OAuthCodeCache {
    store: Arc<dyn EphemeralStore>,
}

impl OAuthCodeCache {
    pub fn new(store: Arc<dyn EphemeralStore>) -> Self {
        Self { store }
    }

    /// 토큰 쌍을 저장하고 일회용 코드를 반환합니다.
    pub async fn store_tokens(&self, tokens: &TokenExchangeResponse) -> AppResult<String> {
        let code = Uuid::new_v4().simple().to_string();
        let json = serde_json::to_string(tokens)
            .map_err(|e| AppError::InternalError(format!("토큰 직렬화 실패: {}", e)))?;

        self.store
            .put(&Self::key(&code), json, Duration::from_secs(EXPIRE_SECONDS))
            .await?;
        Ok(code)
    }

    /// 코드를 소비하고 토큰 쌍을 반환합니다. 없거나 만료되었거나 이미 쓴 코드면 `None`입니다.
    pub async fn consume(&self, code: &str) -> AppResult<Option<TokenExchangeResponse>> {
        if code.trim().is_empty() {
            return Ok(None);
        }

        let Some(json) = self.store.take(&Self::key(code)).await? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&json).ok())
    }

    fn key(code: &str) -> String {
        format!("{}{}", KEY_PREFIX, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::MemoryEphemeralStore;

    fn tokens() -> TokenExchangeResponse {
        TokenExchangeResponse {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            is_new_user: true,
        }
    }

    #[actix_web::test]
    async fn test_code_is_consumed_once() {
        let cache = OAuthCodeCache::new(Arc::new(MemoryEphemeralStore::new()));
        let code = cache.store_tokens(&tokens()).await.unwrap();

        assert_eq!(cache.consume(&code).await.unwrap(), Some(tokens()));
        assert_eq!(cache.consume(&code).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_unknown_code() {
        let cache = OAuthCodeCache::new(Arc::new(MemoryEphemeralStore::new()));

        assert_eq!(cache.consume("nope").await.unwrap(), None);
        assert_eq!(cache.consume("  ").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_codes_are_unique() {
        let cache = OAuthCodeCache::new(Arc::new(MemoryEphemeralStore::new()));
        let first = cache.store_tokens(&tokens()).await.unwrap();
        let second = cache.store_tokens(&tokens()).await.unwrap();

        assert_ne!(first, second);
    }
}
