//! 인가 요청 생성과 프로바이더별 보정
//!
//! [`AuthorizationRequestResolver`]는 모든 프로바이더에 같은 규칙(state, PKCE S256)으로 요청을 만들고,
//! [`AppleAuthorizationRequestCustomizer`]가 Apple 요청만 Apple 규칙에 맞게 다시 만듭니다.

use std::collections::HashMap;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::{ClientRegistration, OAuthClientConfig, ProviderType};
use crate::domain::models::oauth::{
    CODE_CHALLENGE, CODE_CHALLENGE_METHOD, CODE_VERIFIER, OAuth2AuthorizationRequest, RESPONSE_MODE,
};
use crate::errors::AuthError;

const APPLE_AUTHORIZATION_HOST: &str = "appleid.apple.com";

pub struct AuthorizationRequestResolver {
    registrations: HashMap<ProviderType, ClientRegistration>,
}

impl AuthorizationRequestResolver {
    pub fn new(registrations: Vec<ClientRegistration>) -> Self {
        Self {
            registrations: registrations.into_iter().map(|r| (r.provider, r)).collect(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(OAuthClientConfig::registrations())
    }

    pub fn registration(&self, provider: ProviderType) -> Option<&ClientRegistration> {
        self.registrations.get(&provider)
    }

    /// 프로바이더 인가 요청을 만듭니다.
    ///
    /// 클라이언트 등록이 없는 프로바이더는 `UnsupportedSocialType`입니다.
    pub fn resolve(&self, provider: ProviderType) -> Result<OAuth2AuthorizationRequest, AuthError> {
        let registration = self
            .registration(provider)
            .ok_or(AuthError::UnsupportedSocialType)?;

        let code_verifier = generate_code_verifier();
        let code_challenge = code_challenge_s256(&code_verifier);

        let request = OAuth2AuthorizationRequest::builder()
            .authorization_uri(&registration.authorization_uri)
            .client_id(&registration.client_id)
            .redirect_uri(&registration.redirect_uri)
            .scopes(registration.scopes.clone())
            .state(Uuid::new_v4().to_string())
            .registration_id(provider.registration_id())
            .additional_parameter(CODE_CHALLENGE, code_challenge)
            .additional_parameter(CODE_CHALLENGE_METHOD, "S256")
            .attribute(CODE_VERIFIER, code_verifier)
            .build();

        Ok(AppleAuthorizationRequestCustomizer::customize(request))
    }
}

/// 32바이트 난수의 base64url 문자열 (43자)
fn generate_code_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn code_challenge_s256(code_verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()))
}

/// Apple 인가 요청 보정
///
/// - `name`/`email` 스코프를 요청하면 `response_mode=form_post`가 필수
/// - Apple은 PKCE를 지원하지 않으므로 `code_challenge`, `code_challenge_method`와
///   코드 교환 때 재전송될 `code_verifier`를 제거
///
/// Apple이 아닌 요청은 그대로 돌려줍니다.
pub struct AppleAuthorizationRequestCustomizer;

impl AppleAuthorizationRequestCustomizer {
    pub fn customize(request: OAuth2AuthorizationRequest) -> OAuth2AuthorizationRequest {
        if !request.authorization_uri().contains(APPLE_AUTHORIZATION_HOST) {
            return request;
        }

        let needs_form_post = request
            .scopes()
            .iter()
            .any(|scope| scope == "name" || scope == "email");

        OAuth2AuthorizationRequest::from(&request)
            .additional_parameters_with(|params| {
                params.remove(CODE_CHALLENGE);
                params.remove(CODE_CHALLENGE_METHOD);
                if needs_form_post {
                    params.insert(RESPONSE_MODE.to_string(), "form_post".to_string());
                }
            })
            .attributes_with(|attributes| {
                attributes.remove(CODE_VERIFIER);
            })
            .build()
    }
}
