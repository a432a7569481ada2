use serde::{Deserialize, Serialize};

use crate::config::ProviderType;
use crate::domain::entities::{Identity, UserType};

/// API 응답 래퍼
///
/// 성공: `{"success": true, "data": ...}`
/// 실패: `{"success": false, "error": {"code": "A001", "message": "..."}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }
}

impl ApiResponse<()> {
    /// 데이터 없는 성공 응답 (`{"success": true}`)
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }
}

/// 로그인/재발급 응답
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: LoginUserResponse,
}

/// 로그인 응답에 포함되는 사용자 요약
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserResponse {
    pub id: i64,
    pub nickname: String,
    pub email: Option<String>,
    pub social_type: ProviderType,
    pub user_type: UserType,
    pub is_new_user: bool,
}

impl TokenResponse {
    pub fn of(access_token: String, refresh_token: String, identity: &Identity, is_new_user: bool) -> Self {
        Self {
            access_token,
            refresh_token,
            user: LoginUserResponse {
                id: identity.id,
                nickname: identity.nickname.clone(),
                email: identity.email.clone(),
                social_type: identity.provider_type,
                user_type: identity.user_type,
                is_new_user,
            },
        }
    }
}

/// 일회용 코드 교환 응답
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub is_new_user: bool,
}

/// 개발용 토큰 발급 응답
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}
