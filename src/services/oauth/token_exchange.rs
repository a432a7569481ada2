//! 인가 코드 → 토큰 교환 클라이언트
//!
//! 교환 요청은 이 파일 안에서 한 단계씩 조립됩니다.
//! Apple이면 보내기 직전에 client secret을 새로 서명해 넣고,
//! 응답의 `refresh_token`을 `additional_parameters`로 복사합니다.

use std::sync::Arc;

use log::{debug, error};
use serde_json::Value;

use super::apple_credential::AppleCredentialSynthesizer;
use crate::config::{ClientRegistration, HttpClientConfig, ProviderType};
use crate::domain::models::oauth::{CODE_VERIFIER, OAuth2AccessTokenResponse, REFRESH_TOKEN_PARAMETER};
use crate::errors::{AppError, AppResult, AuthError};

#[derive(Clone)]
pub struct TokenExchangeClient {
    http: reqwest::Client,
    apple: Option<Arc<AppleCredentialSynthesizer>>,
}

impl TokenExchangeClient {
    pub fn new(http: reqwest::Client, apple: Option<Arc<AppleCredentialSynthesizer>>) -> Self {
        Self { http, apple }
    }

    pub fn from_config(apple: Option<Arc<AppleCredentialSynthesizer>>) -> Self {
        Self::new(HttpClientConfig::build_client(), apple)
    }

    /// 인가 코드를 토큰으로 교환합니다.
    ///
    /// # 인자
    ///
    /// * `registration` - 프로바이더 클라이언트 등록 정보
    /// * `code` - 콜백으로 받은 인가 코드
    /// * `code_verifier` - 인가 요청 때 보관한 PKCE verifier (Apple은 항상 `None`)
    ///
    /// # 에러
    ///
    /// * `SocialLoginFailed` - 전송 오류, 타임아웃(본문 수신 중 포함), 알 수 없는 오류 응답
    /// * `OAuthAccessDenied` / `OAuthInvalidToken` / `OAuthInvalidResponse` - 프로바이더가 돌려준 `error` 값
    /// * `OAuthInvalidResponse` - 응답에 `access_token`이 없음
    pub async fn exchange(
        &self,
        registration: &ClientRegistration,
        code: &str,
        code_verifier: Option<&str>,
    ) -> AppResult<OAuth2AccessTokenResponse> {
        let provider = registration.provider;

        let mut form: Vec<(&str, String)> = vec![
            ("grant_type", "authorization_code".to_string()),
            ("code", code.to_string()),
            ("redirect_uri", registration.redirect_uri.clone()),
            ("client_id", registration.client_id.clone()),
        ];

        match provider {
            ProviderType::Apple => {
                let apple = self.apple.as_ref().ok_or_else(|| {
                    AppError::InternalError("Apple client secret 생성기가 설정되지 않았습니다".to_string())
                })?;
                form.push(("client_secret", apple.create_client_secret()?));
            }
            _ => {
                if let Some(secret) = &registration.client_secret {
                    form.push(("client_secret", secret.clone()));
                }
            }
        }

        if let Some(verifier) = code_verifier {
            form.push((CODE_VERIFIER, verifier.to_string()));
        }

        let response = self
            .http
            .post(&registration.token_uri)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("{} 토큰 교환 요청 실패: {}", provider, e);
                AuthError::SocialLoginFailed
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            error!("{} 토큰 응답 수신 실패: {}", provider, e);
            AuthError::SocialLoginFailed
        })?;
        let body = serde_json::from_slice::<Value>(&bytes).ok();

        if !status.is_success() {
            let oauth_error = body
                .as_ref()
                .and_then(|b| b.get("error"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            error!("{} 토큰 교환 실패: status={}, error={}", provider, status, oauth_error);
            return Err(AuthError::from_oauth_error_param(oauth_error).into());
        }

        let Some(Value::Object(body)) = body else {
            error!("{} 토큰 응답이 JSON 객체가 아닙니다", provider);
            return Err(AuthError::OAuthInvalidResponse.into());
        };

        let mut token_response = OAuth2AccessTokenResponse::from_json(body).ok_or_else(|| {
            error!("{} 토큰 응답에 access_token이 없습니다", provider);
            AuthError::OAuthInvalidResponse
        })?;

        if provider == ProviderType::Apple {
            if let Some(refresh_token) = token_response.refresh_token.clone() {
                token_response
                    .additional_parameters
                    .insert(REFRESH_TOKEN_PARAMETER.to_string(), Value::String(refresh_token));
            }
        }

        debug!("{} 토큰 교환 성공", provider);
        Ok(token_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::oauth::apple_credential::fixtures::test_config;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn registration(provider: ProviderType, token_uri: String, secret: Option<&str>) -> ClientRegistration {
        ClientRegistration {
            provider,
            client_id: "client-id".to_string(),
            client_secret: secret.map(String::from),
            authorization_uri: "https://example.com/authorize".to_string(),
            token_uri,
            redirect_uri: "http://localhost:8080/api/auth/callback/test".to_string(),
            scopes: vec![],
        }
    }

    fn apple_client() -> TokenExchangeClient {
        let synthesizer = AppleCredentialSynthesizer::new(&test_config()).unwrap();
        TokenExchangeClient::new(reqwest::Client::new(), Some(Arc::new(synthesizer)))
    }

    #[tokio::test]
    async fn test_apple_exchange_attaches_signed_secret_and_copies_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("client_secret=ey"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "apple-at",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "apple-rt",
                "id_token": "header.payload.signature"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let registration = registration(ProviderType::Apple, format!("{}/auth/token", server.uri()), None);
        let response = apple_client().exchange(&registration, "code-1", None).await.unwrap();

        assert_eq!(response.access_token, "apple-at");
        assert_eq!(response.additional_parameter(REFRESH_TOKEN_PARAMETER), Some("apple-rt"));
        assert_eq!(response.additional_parameter("id_token"), Some("header.payload.signature"));
    }

    #[tokio::test]
    async fn test_google_exchange_uses_static_secret_and_verifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("client_secret=static-secret"))
            .and(body_string_contains("code_verifier=verifier-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "google-at",
                "refresh_token": "google-rt"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TokenExchangeClient::new(reqwest::Client::new(), None);
        let registration = registration(ProviderType::Google, server.uri(), Some("static-secret"));
        let response = client.exchange(&registration, "code", Some("verifier-1")).await.unwrap();

        assert_eq!(response.refresh_token.as_deref(), Some("google-rt"));
        assert!(response.additional_parameter(REFRESH_TOKEN_PARAMETER).is_none());
    }

    #[tokio::test]
    async fn test_error_response_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
            .mount(&server)
            .await;

        let client = TokenExchangeClient::new(reqwest::Client::new(), None);
        let registration = registration(ProviderType::Kakao, server.uri(), None);
        let result = client.exchange(&registration, "code", None).await;

        assert!(matches!(result, Err(AppError::Auth(AuthError::SocialLoginFailed))));
    }

    #[tokio::test]
    async fn test_stalled_body_is_social_login_failed() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // 헤더와 본문 일부만 보내고 멈추는 서버
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"access_token\":")
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        });

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(300))
            .build()
            .unwrap();
        let client = TokenExchangeClient::new(http, None);
        let registration = registration(ProviderType::Kakao, format!("http://{}/oauth/token", addr), None);
        let result = client.exchange(&registration, "code", None).await;

        assert!(matches!(result, Err(AppError::Auth(AuthError::SocialLoginFailed))));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = TokenExchangeClient::new(reqwest::Client::new(), None);
        let registration = registration(ProviderType::Google, server.uri(), None);
        let result = client.exchange(&registration, "code", None).await;

        assert!(matches!(result, Err(AppError::Auth(AuthError::OAuthInvalidResponse))));
    }

    #[tokio::test]
    async fn test_missing_access_token_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })))
            .mount(&server)
            .await;

        let client = TokenExchangeClient::new(reqwest::Client::new(), None);
        let registration = registration(ProviderType::Naver, server.uri(), None);
        let result = client.exchange(&registration, "code", None).await;

        assert!(matches!(result, Err(AppError::Auth(AuthError::OAuthInvalidResponse))));
    }
}
