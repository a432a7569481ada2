use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::EphemeralStore;
use crate::domain::models::oauth::OAuth2AuthorizationRequest;
use crate::errors::{AppError, AppResult};

const KEY_PREFIX: &str = "oauth2:auth_request:";
const EXPIRE_SECONDS: u64 = 180;

/// 콜백까지 보관하는 인가 요청과 로그인 후 돌아갈 프론트엔드 주소
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredAuthorizationRequest {
    pub request: OAuth2AuthorizationRequest,
    pub redirect_uri: String,
}

/// `state` 값으로 인가 요청을 저장하고 꺼내는 저장소
///
/// 서버가 여러 대여도 콜백이 어느 인스턴스로 들어오든 같은 요청을 찾을 수 있도록
/// 세션이나 쿠키 대신 공유 저장소를 사용합니다.
#[derive(Clone)]
pub struct AuthorizationRequestRepository {
    store: Arc<dyn EphemeralStore>,
}

impl AuthorizationRequestRepository {
    pub fn new(store: Arc<dyn EphemeralStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, stored: &StoredAuthorizationRequest) -> AppResult<()> {
        let state = stored.request.state();
        if state.is_empty() {
            return Err(AppError::InternalError("state가 없는 인가 요청".to_string()));
        }

        let json = serde_json::to_string(stored)
            .map_err(|e| AppError::InternalError(format!("인가 요청 직렬화 실패: {}", e)))?;
        self.store
            .put(&Self::key(state), json, Duration::from_secs(EXPIRE_SECONDS))
            .await
    }

    /// 콜백 시 호출되며, 저장된 요청을 꺼내면서 삭제합니다.
    pub async fn remove(&self, state: &str) -> AppResult<Option<StoredAuthorizationRequest>> {
        if state.is_empty() {
            return Ok(None);
        }

        match self.store.take(&Self::key(state)).await? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(stored) => Ok(Some(stored)),
                Err(e) => {
                    log::warn!("저장된 인가 요청 역직렬화 실패: {}", e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn key(state: &str) -> String {
        format!("{}{}", KEY_PREFIX, state)
    }
}
