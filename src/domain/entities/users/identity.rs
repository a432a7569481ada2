//! Identity Entity Implementation
//!
//! 소셜 프로바이더 계정 하나에 대응하는 사용자 엔티티입니다.
//! `(provider_type, provider_subject_id)` 조합은 유일하며, 데이터베이스에서도 유니크 인덱스로 보장합니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::ProviderType;

/// 사용자 유형
///
/// 액세스 토큰의 `userType` 클레임으로 전달되며,
/// 인증 필터는 이를 `ROLE_<TYPE>` 역할로 변환합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Admin,
    Owner,
    #[default]
    Normal,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "ADMIN",
            UserType::Owner => "OWNER",
            UserType::Normal => "NORMAL",
        }
    }

    /// 토큰 클레임 값에서 사용자 유형을 읽습니다. 알 수 없는 값은 `Normal`입니다.
    pub fn from_claim(value: Option<&str>) -> Self {
        match value.map(|v| v.to_uppercase()).as_deref() {
            Some("ADMIN") => UserType::Admin,
            Some("OWNER") => UserType::Owner,
            _ => UserType::Normal,
        }
    }

    /// Spring Security 관례를 따른 역할 이름 (`ROLE_ADMIN`)
    pub fn role(&self) -> String {
        format!("ROLE_{}", self.as_str())
    }
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// 숫자 ID (`counters` 컬렉션에서 발급)
    #[serde(rename = "_id")]
    pub id: i64,
    pub provider_type: ProviderType,
    /// 프로바이더 측 사용자 식별자 (Kakao 회원번호, Google/Apple `sub`, Naver `id`)
    pub provider_subject_id: String,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
    /// 탈퇴 시 연결 해제에 쓰는 프로바이더 자격 증명 (Apple refresh token, Google access token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_revoke_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,
    /// 소프트 삭제 여부
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 아직 ID가 발급되지 않은 신규 사용자
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub provider_type: ProviderType,
    pub provider_subject_id: String,
    pub nickname: String,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
}

impl Identity {
    /// 발급된 ID로 신규 사용자 엔티티를 만듭니다. 최초 생성이 곧 최초 로그인입니다.
    pub fn create(id: i64, new: NewIdentity) -> Self {
        let now = DateTime::now();

        Self {
            id,
            provider_type: new.provider_type,
            provider_subject_id: new.provider_subject_id,
            nickname: new.nickname,
            email: new.email,
            profile_image_url: new.profile_image_url,
            user_type: UserType::Normal,
            social_revoke_token: None,
            last_login_at: Some(now),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn role(&self) -> String {
        self.user_type.role()
    }
}
