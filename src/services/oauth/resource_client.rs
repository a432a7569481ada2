//! OAuth2 리소스 서버 클라이언트
//!
//! 클라이언트 앱이 넘겨준 프로바이더 액세스 토큰으로 사용자 정보 엔드포인트를 호출합니다.
//! 토큰은 아직 검증되지 않은 값이며, 프로바이더가 200과 JSON 객체를 돌려줄 때만 유효한 것으로 봅니다.

use std::collections::HashMap;

use log::{debug, error};
use serde_json::Value;

use super::user_info::{ProviderAttributes, ProviderUserInfo, UserInfoFactory};
use crate::config::{HttpClientConfig, ProviderType};
use crate::errors::AuthError;

#[derive(Clone)]
pub struct OAuth2ResourceClient {
    http: reqwest::Client,
    endpoints: HashMap<ProviderType, String>,
}

impl OAuth2ResourceClient {
    /// 프로바이더 기본 엔드포인트를 사용하는 클라이언트
    pub fn new(http: reqwest::Client) -> Self {
        let endpoints = ProviderType::ALL
            .iter()
            .filter_map(|p| p.user_info_endpoint().map(|url| (*p, url.to_string())))
            .collect();

        Self { http, endpoints }
    }

    pub fn from_config() -> Self {
        Self::new(HttpClientConfig::build_client())
    }

    /// 엔드포인트를 교체합니다. (스테이징 프로바이더, 테스트 목 서버)
    pub fn with_endpoint(mut self, provider: ProviderType, url: impl Into<String>) -> Self {
        self.endpoints.insert(provider, url.into());
        self
    }

    /// 원시 속성 맵을 조회합니다.
    ///
    /// # 에러
    ///
    /// * `UnsupportedSocialType` - 사용자 정보 엔드포인트가 없는 프로바이더 (Apple)
    /// * `SocialLoginFailed` - 전송 오류, 타임아웃, 2xx가 아닌 응답, 비어 있거나 객체가 아닌 본문
    pub async fn fetch_attributes(
        &self,
        provider: ProviderType,
        access_token: &str,
    ) -> Result<ProviderAttributes, AuthError> {
        let endpoint = self
            .endpoints
            .get(&provider)
            .ok_or(AuthError::UnsupportedSocialType)?;

        let response = self
            .http
            .get(endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                error!("{} 사용자 정보 요청 실패: {}", provider, e);
                AuthError::SocialLoginFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} 사용자 정보 조회 실패: status={}, body={}", provider, status, body);
            return Err(AuthError::SocialLoginFailed);
        }

        let body = response.json::<Value>().await.map_err(|e| {
            error!("{} 사용자 정보 파싱 실패: {}", provider, e);
            AuthError::SocialLoginFailed
        })?;

        match body {
            Value::Object(attributes) if !attributes.is_empty() => {
                debug!("{} 사용자 정보 조회 성공", provider);
                Ok(attributes)
            }
            _ => {
                error!("{} 사용자 정보 응답이 비어 있습니다", provider);
                Err(AuthError::SocialLoginFailed)
            }
        }
    }

    /// 속성 맵을 조회해 프로바이더 어댑터로 감쌉니다.
    pub async fn fetch_user_info(
        &self,
        provider: ProviderType,
        access_token: &str,
    ) -> Result<Box<dyn ProviderUserInfo>, AuthError> {
        let attributes = self.fetch_attributes(provider, access_token).await?;
        Ok(UserInfoFactory::of(provider, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> OAuth2ResourceClient {
        OAuth2ResourceClient::new(reqwest::Client::new())
            .with_endpoint(ProviderType::Kakao, format!("{}/v2/user/me", server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_user_info_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/user/me"))
            .and(header("authorization", "Bearer provider-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "kakao_account": { "profile": { "nickname": "x" } }
            })))
            .mount(&server)
            .await;

        let info = client_for(&server)
            .await
            .fetch_user_info(ProviderType::Kakao, "provider-token")
            .await
            .unwrap();

        assert_eq!(info.id().as_deref(), Some("42"));
        assert_eq!(info.nickname().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_social_login_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("{\"msg\":\"this access token does not exist\"}"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .await
            .fetch_attributes(ProviderType::Kakao, "bad")
            .await;

        assert_eq!(result.unwrap_err(), AuthError::SocialLoginFailed);
    }

    #[tokio::test]
    async fn test_empty_body_is_social_login_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .await
            .fetch_attributes(ProviderType::Kakao, "token")
            .await;

        assert_eq!(result.unwrap_err(), AuthError::SocialLoginFailed);
    }

    #[tokio::test]
    async fn test_timeout_is_social_login_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1 }))
                .set_delay(std::time::Duration::from_millis(500)))
            .mount(&server)
            .await;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(50))
            .build()
            .unwrap();
        let client = OAuth2ResourceClient::new(http)
            .with_endpoint(ProviderType::Kakao, server.uri());

        let result = client.fetch_attributes(ProviderType::Kakao, "token").await;
        assert_eq!(result.unwrap_err(), AuthError::SocialLoginFailed);
    }

    #[tokio::test]
    async fn test_apple_has_no_resource_endpoint() {
        let client = OAuth2ResourceClient::new(reqwest::Client::new());
        let result = client.fetch_attributes(ProviderType::Apple, "token").await;

        assert_eq!(result.unwrap_err(), AuthError::UnsupportedSocialType);
    }
}
