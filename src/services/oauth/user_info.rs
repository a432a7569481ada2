//! # 프로바이더 사용자 정보 어댑터
//!
//! 각 프로바이더의 사용자 정보 응답은 모양이 제각각입니다.
//!
//! | 프로바이더 | ID | 닉네임 | 이메일 | 프로필 이미지 |
//! |-----------|----|--------|--------|---------------|
//! | Kakao | `id` | `kakao_account.profile.nickname` | `kakao_account.email` | `kakao_account.profile.profile_image_url` |
//! | Google | `sub` | `name` | `email` | `picture` |
//! | Naver | `response.id` | `response.nickname` | `response.email` | `response.profile_image` |
//! | Apple | `sub` | `user.name.lastName + firstName` | `email` | 없음 |
//!
//! 중간 객체가 없어도 실패하지 않고 `None`을 반환합니다.

use std::fmt::Debug;

use serde_json::{Map, Value};

use crate::config::ProviderType;
use crate::errors::AuthError;

/// 프로바이더가 돌려준 원시 속성 맵 (저장하지 않음)
pub type ProviderAttributes = Map<String, Value>;

/// 프로바이더와 무관한 사용자 정보 접근자
pub trait ProviderUserInfo: Send + Sync + Debug {
    fn provider(&self) -> ProviderType;

    /// 프로바이더 측 사용자 식별자
    fn id(&self) -> Option<String>;

    fn nickname(&self) -> Option<String>;

    fn email(&self) -> Option<String>;

    fn profile_image_url(&self) -> Option<String>;
}

/// 경로를 따라 내려가 문자열(또는 숫자)을 읽습니다.
fn text_at(attributes: &ProviderAttributes, path: &[&str]) -> Option<String> {
    let (last, parents) = path.split_last()?;
    let mut current = attributes;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }

    match current.get(*last)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct KakaoUserInfo {
    attributes: ProviderAttributes,
}

impl ProviderUserInfo for KakaoUserInfo {
    fn provider(&self) -> ProviderType {
        ProviderType::Kakao
    }

    fn id(&self) -> Option<String> {
        text_at(&self.attributes, &["id"])
    }

    fn nickname(&self) -> Option<String> {
        text_at(&self.attributes, &["kakao_account", "profile", "nickname"])
    }

    fn email(&self) -> Option<String> {
        text_at(&self.attributes, &["kakao_account", "email"])
    }

    fn profile_image_url(&self) -> Option<String> {
        text_at(&self.attributes, &["kakao_account", "profile", "profile_image_url"])
    }
}

#[derive(Debug, Clone)]
pub struct GoogleUserInfo {
    attributes: ProviderAttributes,
}

impl ProviderUserInfo for GoogleUserInfo {
    fn provider(&self) -> ProviderType {
        ProviderType::Google
    }

    fn id(&self) -> Option<String> {
        text_at(&self.attributes, &["sub"])
    }

    fn nickname(&self) -> Option<String> {
        text_at(&self.attributes, &["name"])
    }

    fn email(&self) -> Option<String> {
        text_at(&self.attributes, &["email"])
    }

    fn profile_image_url(&self) -> Option<String> {
        text_at(&self.attributes, &["picture"])
    }
}

#[derive(Debug, Clone)]
pub struct NaverUserInfo {
    attributes: ProviderAttributes,
}

impl ProviderUserInfo for NaverUserInfo {
    fn provider(&self) -> ProviderType {
        ProviderType::Naver
    }

    fn id(&self) -> Option<String> {
        text_at(&self.attributes, &["response", "id"])
    }

    fn nickname(&self) -> Option<String> {
        text_at(&self.attributes, &["response", "nickname"])
    }

    fn email(&self) -> Option<String> {
        text_at(&self.attributes, &["response", "email"])
    }

    fn profile_image_url(&self) -> Option<String> {
        text_at(&self.attributes, &["response", "profile_image"])
    }
}

/// Apple 사용자 정보
///
/// ID 토큰 클레임에 최초 동의 시에만 오는 `user` 폼 값을 합친 맵을 읽습니다.
#[derive(Debug, Clone)]
pub struct AppleUserInfo {
    attributes: ProviderAttributes,
}

impl ProviderUserInfo for AppleUserInfo {
    fn provider(&self) -> ProviderType {
        ProviderType::Apple
    }

    fn id(&self) -> Option<String> {
        text_at(&self.attributes, &["sub"])
    }

    /// 성 + 이름 (한국식 순서)
    fn nickname(&self) -> Option<String> {
        let last = text_at(&self.attributes, &["user", "name", "lastName"]).unwrap_or_default();
        let first = text_at(&self.attributes, &["user", "name", "firstName"]).unwrap_or_default();

        let full = format!("{}{}", last, first).trim().to_string();
        (!full.is_empty()).then_some(full)
    }

    fn email(&self) -> Option<String> {
        text_at(&self.attributes, &["email"])
    }

    fn profile_image_url(&self) -> Option<String> {
        None
    }
}

/// 프로바이더별 어댑터 팩토리
pub struct UserInfoFactory;

impl UserInfoFactory {
    pub fn of(provider: ProviderType, attributes: ProviderAttributes) -> Box<dyn ProviderUserInfo> {
        match provider {
            ProviderType::Kakao => Box::new(KakaoUserInfo { attributes }),
            ProviderType::Google => Box::new(GoogleUserInfo { attributes }),
            ProviderType::Naver => Box::new(NaverUserInfo { attributes }),
            ProviderType::Apple => Box::new(AppleUserInfo { attributes }),
        }
    }

    /// 등록 ID(`kakao`, `google` ...)로 어댑터를 고릅니다.
    pub fn of_registration(
        registration_id: &str,
        attributes: ProviderAttributes,
    ) -> Result<Box<dyn ProviderUserInfo>, AuthError> {
        let provider = ProviderType::from_str(registration_id)?;
        Ok(Self::of(provider, attributes))
    }
}
