//! OAuth 2.0 인가 요청 모델
//!
//! 프로바이더 인가 엔드포인트로 보내는 요청을 표현합니다.
//! 한 번 만들어진 요청은 변경할 수 없고, 수정이 필요하면 [`OAuth2AuthorizationRequest::from`]으로
//! 기존 값을 복사한 빌더에서 새 요청을 만듭니다.
//!
//! ```rust,ignore
//! let customized = OAuth2AuthorizationRequest::from(&request)
//!     .additional_parameters_with(|params| {
//!         params.remove("code_challenge");
//!     })
//!     .build();
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CODE_CHALLENGE: &str = "code_challenge";
pub const CODE_CHALLENGE_METHOD: &str = "code_challenge_method";
pub const CODE_VERIFIER: &str = "code_verifier";
pub const RESPONSE_MODE: &str = "response_mode";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2AuthorizationRequest {
    authorization_uri: String,
    client_id: String,
    redirect_uri: String,
    scopes: Vec<String>,
    state: String,
    registration_id: String,
    /// 인가 URL 쿼리에 추가되는 파라미터 (`code_challenge`, `response_mode` 등)
    additional_parameters: BTreeMap<String, String>,
    /// 서버 측에만 보관되는 값 (`code_verifier`), 코드 교환 시 재사용
    attributes: BTreeMap<String, String>,
}

impl OAuth2AuthorizationRequest {
    pub fn builder() -> OAuth2AuthorizationRequestBuilder {
        OAuth2AuthorizationRequestBuilder::default()
    }

    /// 기존 요청의 모든 값을 복사한 빌더
    pub fn from(request: &OAuth2AuthorizationRequest) -> OAuth2AuthorizationRequestBuilder {
        OAuth2AuthorizationRequestBuilder {
            authorization_uri: request.authorization_uri.clone(),
            client_id: request.client_id.clone(),
            redirect_uri: request.redirect_uri.clone(),
            scopes: request.scopes.clone(),
            state: request.state.clone(),
            registration_id: request.registration_id.clone(),
            additional_parameters: request.additional_parameters.clone(),
            attributes: request.attributes.clone(),
        }
    }

    pub fn authorization_uri(&self) -> &str {
        &self.authorization_uri
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn registration_id(&self) -> &str {
        &self.registration_id
    }

    pub fn additional_parameters(&self) -> &BTreeMap<String, String> {
        &self.additional_parameters
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// 사용자를 보낼 최종 인가 URL
    pub fn authorization_request_uri(&self) -> String {
        let mut query = vec![
            ("response_type".to_string(), "code".to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("redirect_uri".to_string(), self.redirect_uri.clone()),
            ("state".to_string(), self.state.clone()),
        ];
        if !self.scopes.is_empty() {
            query.push(("scope".to_string(), self.scopes.join(" ")));
        }
        query.extend(
            self.additional_parameters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        let encoded = query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if self.authorization_uri.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.authorization_uri, separator, encoded)
    }
}

#[derive(Debug, Default)]
pub struct OAuth2AuthorizationRequestBuilder {
    authorization_uri: String,
    client_id: String,
    redirect_uri: String,
    scopes: Vec<String>,
    state: String,
    registration_id: String,
    additional_parameters: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
}

impl OAuth2AuthorizationRequestBuilder {
    pub fn authorization_uri(mut self, uri: impl Into<String>) -> Self {
        self.authorization_uri = uri.into();
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }

    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn registration_id(mut self, registration_id: impl Into<String>) -> Self {
        self.registration_id = registration_id.into();
        self
    }

    pub fn additional_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.additional_parameters.insert(name.to_string(), value.into());
        self
    }

    pub fn additional_parameters_with<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        f(&mut self.additional_parameters);
        self
    }

    pub fn attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn attributes_with<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        f(&mut self.attributes);
        self
    }

    pub fn build(self) -> OAuth2AuthorizationRequest {
        OAuth2AuthorizationRequest {
            authorization_uri: self.authorization_uri,
            client_id: self.client_id,
            redirect_uri: self.redirect_uri,
            scopes: self.scopes,
            state: self.state,
            registration_id: self.registration_id,
            additional_parameters: self.additional_parameters,
            attributes: self.attributes,
        }
    }
}
