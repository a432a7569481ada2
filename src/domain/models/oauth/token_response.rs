//! 인가 코드 교환 응답 모델

use std::collections::HashMap;

use serde_json::Value;

pub const REFRESH_TOKEN_PARAMETER: &str = "refresh_token";
pub const ID_TOKEN_PARAMETER: &str = "id_token";

/// 프로바이더 토큰 엔드포인트 응답
///
/// 표준 필드 외의 값(`id_token` 등)은 모두 `additional_parameters`에 들어갑니다.
/// 이후 단계는 프로바이더를 구분하지 않고 `additional_parameters`를 읽습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuth2AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scopes: Vec<String>,
    pub additional_parameters: HashMap<String, Value>,
}

impl OAuth2AccessTokenResponse {
    /// 토큰 엔드포인트의 JSON 본문을 변환합니다. `access_token`이 없으면 `None`입니다.
    pub fn from_json(body: serde_json::Map<String, Value>) -> Option<Self> {
        let mut body = body;
        let access_token = match body.remove("access_token") {
            Some(Value::String(token)) if !token.is_empty() => token,
            _ => return None,
        };
        let token_type = match body.remove("token_type") {
            Some(Value::String(token_type)) => token_type,
            _ => "Bearer".to_string(),
        };
        let expires_in = body.remove("expires_in").and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        });
        let refresh_token = match body.remove(REFRESH_TOKEN_PARAMETER) {
            Some(Value::String(token)) => Some(token),
            _ => None,
        };
        let scopes = match body.remove("scope") {
            Some(Value::String(scope)) => scope.split_whitespace().map(String::from).collect(),
            _ => Vec::new(),
        };

        Some(Self {
            access_token,
            token_type,
            expires_in,
            refresh_token,
            scopes,
            additional_parameters: body.into_iter().collect(),
        })
    }

    pub fn additional_parameter(&self, name: &str) -> Option<&str> {
        self.additional_parameters.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_splits_standard_and_additional() {
        let body = json!({
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "rt",
            "id_token": "header.payload.signature"
        });

        let response = OAuth2AccessTokenResponse::from_json(body.as_object().unwrap().clone()).unwrap();

        assert_eq!(response.access_token, "at");
        assert_eq!(response.expires_in, Some(3600));
        assert_eq!(response.refresh_token.as_deref(), Some("rt"));
        assert_eq!(response.additional_parameter(ID_TOKEN_PARAMETER), Some("header.payload.signature"));
        assert!(response.additional_parameter(REFRESH_TOKEN_PARAMETER).is_none());
    }

    #[test]
    fn test_from_json_without_access_token() {
        let body = json!({ "error": "invalid_grant" });
        assert!(OAuth2AccessTokenResponse::from_json(body.as_object().unwrap().clone()).is_none());
    }
}
