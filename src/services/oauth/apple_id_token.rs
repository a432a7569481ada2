//! Apple ID 토큰 검증
//!
//! Apple은 사용자 정보 엔드포인트가 없으므로 토큰 교환 응답의 `id_token` 클레임을 사용자 정보로 씁니다.
//! 서명은 Apple 공개키(JWKS, RS256)로 검증하고 `aud`, `iss`, `exp`를 확인합니다.

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use log::{error, warn};

use super::apple_credential::APPLE_AUDIENCE;
use super::user_info::ProviderAttributes;
use crate::config::HttpClientConfig;
use crate::errors::AuthError;

pub const APPLE_JWKS_URI: &str = "https://appleid.apple.com/auth/keys";

#[derive(Clone)]
pub struct AppleIdTokenVerifier {
    http: reqwest::Client,
    jwks_uri: String,
    client_id: String,
}

impl AppleIdTokenVerifier {
    pub fn new(http: reqwest::Client, client_id: impl Into<String>) -> Self {
        Self {
            http,
            jwks_uri: APPLE_JWKS_URI.to_string(),
            client_id: client_id.into(),
        }
    }

    pub fn from_config(client_id: impl Into<String>) -> Self {
        Self::new(HttpClientConfig::build_client(), client_id)
    }

    pub fn with_jwks_uri(mut self, jwks_uri: impl Into<String>) -> Self {
        self.jwks_uri = jwks_uri.into();
        self
    }

    /// ID 토큰을 검증하고 클레임 맵을 반환합니다.
    ///
    /// # 에러
    ///
    /// * `OAuthInvalidToken` - 형식 오류, 알 수 없는 `kid`, 서명/클레임 검증 실패
    /// * `SocialLoginFailed` - Apple 공개키 조회 실패
    pub async fn verify(&self, id_token: &str) -> Result<ProviderAttributes, AuthError> {
        let header = decode_header(id_token).map_err(|e| {
            warn!("Apple ID 토큰 헤더 파싱 실패: {}", e);
            AuthError::OAuthInvalidToken
        })?;
        let kid = header.kid.ok_or(AuthError::OAuthInvalidToken)?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks.find(&kid).ok_or_else(|| {
            warn!("Apple 공개키에서 kid를 찾을 수 없습니다: {}", kid);
            AuthError::OAuthInvalidToken
        })?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| {
            warn!("Apple 공개키 변환 실패: {}", e);
            AuthError::OAuthInvalidToken
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&[APPLE_AUDIENCE]);

        decode::<ProviderAttributes>(id_token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("Apple ID 토큰 검증 실패: {}", e);
                AuthError::OAuthInvalidToken
            })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .http
            .get(&self.jwks_uri)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Apple 공개키 조회 실패: {}", e);
                AuthError::SocialLoginFailed
            })?;

        response.json::<JwkSet>().await.map_err(|e| {
            error!("Apple 공개키 파싱 실패: {}", e);
            AuthError::SocialLoginFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn token_with_kid(kid: &str) -> String {
        let mut header = Header::default();
        header.kid = Some(kid.to_string());
        encode(&header, &json!({ "sub": "001" }), &EncodingKey::from_secret(b"s")).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_token_is_invalid() {
        let verifier = AppleIdTokenVerifier::new(reqwest::Client::new(), "com.example.web");
        assert_eq!(verifier.verify("not-a-jwt").await.unwrap_err(), AuthError::OAuthInvalidToken);
    }

    #[tokio::test]
    async fn test_unknown_kid_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "keys": [] })))
            .mount(&server)
            .await;

        let verifier = AppleIdTokenVerifier::new(reqwest::Client::new(), "com.example.web")
            .with_jwks_uri(server.uri());

        let result = verifier.verify(&token_with_kid("unknown")).await;
        assert_eq!(result.unwrap_err(), AuthError::OAuthInvalidToken);
    }

    #[tokio::test]
    async fn test_jwks_failure_is_social_login_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let verifier = AppleIdTokenVerifier::new(reqwest::Client::new(), "com.example.web")
            .with_jwks_uri(server.uri());

        let result = verifier.verify(&token_with_kid("k1")).await;
        assert_eq!(result.unwrap_err(), AuthError::SocialLoginFailed);
    }
}
