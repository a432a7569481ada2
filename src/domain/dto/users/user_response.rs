use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::config::ProviderType;
use crate::domain::entities::{Identity, UserType};

/// 현재 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub nickname: String,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
    pub social_type: ProviderType,
    pub user_type: UserType,
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        let Identity {
            id,
            provider_type,
            nickname,
            email,
            profile_image_url,
            user_type,
            last_login_at,
            created_at,
            ..
        } = identity;

        Self {
            id,
            nickname,
            email,
            profile_image_url,
            social_type: provider_type,
            user_type,
            last_login_at,
            created_at,
        }
    }
}
