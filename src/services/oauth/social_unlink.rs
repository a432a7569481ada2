//! 회원 탈퇴 시 소셜 계정 연결 해제
//!
//! 모든 호출은 최선 노력(best-effort)입니다. 실패는 `warn!`으로 남기고 탈퇴는 계속 진행됩니다.
//!
//! | 프로바이더 | 방식 |
//! |-----------|------|
//! | Google | 저장된 액세스 토큰 revoke |
//! | Apple | 저장된 refresh token revoke (client secret 필요) |
//! | Kakao | Admin 키로 회원번호 연결 끊기 |
//! | Naver | 미지원 (로그만 남김) |

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};

use super::apple_credential::AppleCredentialSynthesizer;
use crate::config::{HttpClientConfig, OAuthClientConfig, ProviderType};
use crate::domain::entities::users::Identity;

const GOOGLE_REVOKE_URI: &str = "https://oauth2.googleapis.com/revoke";
const APPLE_REVOKE_URI: &str = "https://appleid.apple.com/auth/revoke";
const KAKAO_UNLINK_URI: &str = "https://kapi.kakao.com/v1/user/unlink";

#[derive(Clone)]
pub struct SocialUnlinkService {
    http: reqwest::Client,
    apple: Option<Arc<AppleCredentialSynthesizer>>,
    kakao_admin_key: Option<String>,
    endpoints: HashMap<ProviderType, String>,
}

impl SocialUnlinkService {
    pub fn new(
        http: reqwest::Client,
        apple: Option<Arc<AppleCredentialSynthesizer>>,
        kakao_admin_key: Option<String>,
    ) -> Self {
        let endpoints = HashMap::from([
            (ProviderType::Google, GOOGLE_REVOKE_URI.to_string()),
            (ProviderType::Apple, APPLE_REVOKE_URI.to_string()),
            (ProviderType::Kakao, KAKAO_UNLINK_URI.to_string()),
        ]);

        Self { http, apple, kakao_admin_key, endpoints }
    }

    pub fn from_config(apple: Option<Arc<AppleCredentialSynthesizer>>) -> Self {
        Self::new(HttpClientConfig::build_client(), apple, OAuthClientConfig::kakao_admin_key())
    }

    pub fn with_endpoint(mut self, provider: ProviderType, url: impl Into<String>) -> Self {
        self.endpoints.insert(provider, url.into());
        self
    }

    /// 연결 해제를 시도합니다. 성공 여부를 반환하지만 호출자는 결과와 무관하게 탈퇴를 진행합니다.
    pub async fn unlink(&self, identity: &Identity) -> bool {
        let provider = identity.provider_type;
        let Some(endpoint) = self.endpoints.get(&provider) else {
            info!("{} 연결 해제는 지원하지 않습니다: user_id={}", provider, identity.id);
            return false;
        };

        let request = match provider {
            ProviderType::Google => {
                let Some(token) = identity.social_revoke_token.as_deref() else {
                    warn!("Google 연결 해제 생략, 저장된 토큰 없음: user_id={}", identity.id);
                    return false;
                };
                self.http.post(endpoint).form(&[("token", token)])
            }
            ProviderType::Apple => {
                let (Some(apple), Some(token)) = (&self.apple, identity.social_revoke_token.as_deref()) else {
                    warn!("Apple 연결 해제 생략, 설정 또는 토큰 없음: user_id={}", identity.id);
                    return false;
                };
                let client_secret = match apple.create_client_secret() {
                    Ok(secret) => secret,
                    Err(e) => {
                        warn!("Apple 연결 해제 실패: {}", e);
                        return false;
                    }
                };
                self.http.post(endpoint).form(&[
                    ("client_id", apple.client_id()),
                    ("client_secret", client_secret.as_str()),
                    ("token", token),
                    ("token_type_hint", "refresh_token"),
                ])
            }
            ProviderType::Kakao => {
                let Some(admin_key) = &self.kakao_admin_key else {
                    warn!("Kakao 연결 해제 생략, Admin 키 없음: user_id={}", identity.id);
                    return false;
                };
                self.http
                    .post(endpoint)
                    .header(reqwest::header::AUTHORIZATION, format!("KakaoAK {}", admin_key))
                    .form(&[
                        ("target_id_type", "user_id"),
                        ("target_id", identity.provider_subject_id.as_str()),
                    ])
            }
            ProviderType::Naver => {
                info!("Naver 연결 해제는 지원하지 않습니다: user_id={}", identity.id);
                return false;
            }
        };

        match request.send().await.and_then(|r| r.error_for_status()) {
            Ok(_) => {
                info!("{} 연결 해제 완료: user_id={}", provider, identity.id);
                true
            }
            Err(e) => {
                warn!("{} 연결 해제 실패: user_id={}, {}", provider, identity.id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::NewIdentity;
    use wiremock::matchers::{body_string_contains, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn identity(provider: ProviderType, revoke_token: Option<&str>) -> Identity {
        let mut identity = Identity::create(1, NewIdentity {
            provider_type: provider,
            provider_subject_id: "12345".to_string(),
            nickname: "테스트".to_string(),
            email: None,
            profile_image_url: None,
        });
        identity.social_revoke_token = revoke_token.map(String::from);
        identity
    }

    #[tokio::test]
    async fn test_kakao_unlink_uses_admin_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "KakaoAK admin-key"))
            .and(body_string_contains("target_id=12345"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let service = SocialUnlinkService::new(reqwest::Client::new(), None, Some("admin-key".to_string()))
            .with_endpoint(ProviderType::Kakao, server.uri());

        assert!(service.unlink(&identity(ProviderType::Kakao, None)).await);
    }

    #[tokio::test]
    async fn test_google_revoke_failure_is_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("token=google-at"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let service = SocialUnlinkService::new(reqwest::Client::new(), None, None)
            .with_endpoint(ProviderType::Google, server.uri());

        assert!(!service.unlink(&identity(ProviderType::Google, Some("google-at"))).await);
    }

    #[tokio::test]
    async fn test_skips_without_credentials() {
        let service = SocialUnlinkService::new(reqwest::Client::new(), None, None);

        assert!(!service.unlink(&identity(ProviderType::Google, None)).await);
        assert!(!service.unlink(&identity(ProviderType::Apple, Some("rt"))).await);
        assert!(!service.unlink(&identity(ProviderType::Kakao, None)).await);
        assert!(!service.unlink(&identity(ProviderType::Naver, None)).await);
    }
}
