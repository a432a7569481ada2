//! 세션 토큰 클레임 구조체 및 페어링 된 세트
//!
//! 액세스 토큰과 리프레시 토큰은 같은 비밀키(HS256)로 서명되지만 담는 클레임이 다릅니다.
//!
//! | 클레임 | 액세스 | 리프레시 |
//! |--------|--------|----------|
//! | `sub` (사용자 ID 문자열) | O | O |
//! | `nickname` | O | - |
//! | `socialType` | O | - |
//! | `userType` | O | - |
//! | `jti` | - | O |
//! | `iat`, `exp` | O | O |
use serde::{Deserialize, Serialize};

use crate::config::ProviderType;
use crate::domain::entities::UserType;

/// 액세스 토큰 클레임
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    pub nickname: String,
    #[serde(rename = "socialType")]
    pub social_type: ProviderType,
    #[serde(rename = "userType")]
    pub user_type: UserType,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

/// 리프레시 토큰 클레임
///
/// 같은 초에 발급된 두 토큰이 달라지도록 임의의 `jti`를 포함합니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 검증 시 읽는 공통 클레임
///
/// 액세스/리프레시 어느 쪽이든 디코딩할 수 있도록 토큰별 클레임은 선택 값입니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "userType", default)]
    pub user_type: Option<String>,
}

/// 발급된 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
