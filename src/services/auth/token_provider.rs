//! 세션 토큰 발급/검증
//!
//! 액세스 토큰과 리프레시 토큰을 하나의 비밀키(HMAC-SHA256)로 서명합니다.
//! 상태를 갖지 않으므로 여러 요청에서 잠금 없이 공유해도 됩니다.
//!
//! ## 검증 규칙
//!
//! | 입력 | 결과 |
//! |------|------|
//! | 서명 정상, 만료 전 | `Ok(true)` |
//! | 서명 정상, 만료 | `Err(AuthError::TokenExpired)` |
//! | 없음, 빈 문자열, 형식 오류, 서명 불일치 | `Ok(false)` |
//!
//! 만료만 에러로 구분하는 이유는 호출자가 재발급 흐름으로 넘어가야 하기 때문입니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::debug;
use mongodb::bson::DateTime;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::domain::entities::users::{Identity, UserType};
use crate::domain::models::token::{AccessTokenClaims, RefreshTokenClaims, SessionClaims, TokenPair};
use crate::errors::{AppError, AppResult, AuthError};

const BEARER_PREFIX: &str = "Bearer ";

pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_validity: Duration,
    refresh_validity: Duration,
}

impl TokenProvider {
    pub fn new(secret: &str, access_validity: Duration, refresh_validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_validity,
            refresh_validity,
        }
    }

    pub fn from_config() -> Self {
        Self::new(
            &JwtConfig::secret(),
            JwtConfig::access_token_validity(),
            JwtConfig::refresh_token_validity(),
        )
    }

    /// 액세스 토큰 생성
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let access_token = token_provider.issue_access(&identity)?;
    /// ```
    pub fn issue_access(&self, identity: &Identity) -> AppResult<String> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: identity.id.to_string(),
            nickname: identity.nickname.clone(),
            social_type: identity.provider_type,
            user_type: identity.user_type,
            iat: now.timestamp(),
            exp: (now + self.access_validity).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 리프레시 토큰 생성 (주체만 담음)
    pub fn issue_refresh(&self, identity: &Identity) -> AppResult<String> {
        let now = Utc::now();
        let claims = RefreshTokenClaims {
            sub: identity.id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.refresh_validity).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("리프레시 토큰 생성 실패: {}", e)))
    }

    pub fn issue_pair(&self, identity: &Identity) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access(identity)?,
            refresh_token: self.issue_refresh(identity)?,
        })
    }

    /// 지금 발급하는 리프레시 토큰의 만료 시각 (저장소 행에 기록)
    pub fn refresh_expires_at(&self) -> DateTime {
        DateTime::from_millis((Utc::now() + self.refresh_validity).timestamp_millis())
    }

    /// 토큰의 서명과 만료를 검증합니다.
    ///
    /// 만료만 `Err(TokenExpired)`이고, 그 밖의 모든 무효 입력은 `Ok(false)`입니다.
    pub fn validate(&self, token: Option<&str>) -> Result<bool, AuthError> {
        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            return Ok(false);
        };

        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(_) => Ok(true),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::TokenExpired),
                _ => {
                    debug!("토큰 검증 실패: {:?}", e.kind());
                    Ok(false)
                }
            },
        }
    }

    /// 검증된 토큰의 주체를 숫자 ID로 읽습니다.
    pub fn identity_id(&self, token: &str) -> Result<i64, AuthError> {
        self.claims(token)?
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)
    }

    /// `userType` 클레임 (리프레시 토큰처럼 없으면 `Normal`)
    pub fn user_type(&self, token: &str) -> Result<UserType, AuthError> {
        let claims = self.claims(token)?;
        Ok(UserType::from_claim(claims.user_type.as_deref()))
    }

    fn claims(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    /// `Authorization` 헤더에서 토큰 부분을 꺼냅니다.
    ///
    /// 접두사는 대소문자를 구분하는 `"Bearer "`만 인정합니다.
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// assert_eq!(TokenProvider::extract_bearer_token("Bearer abc"), Some("abc"));
    /// assert_eq!(TokenProvider::extract_bearer_token("bearer abc"), None);
    /// ```
    pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
        auth_header
            .strip_prefix(BEARER_PREFIX)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderType;
    use crate::domain::entities::users::NewIdentity;

    fn provider() -> TokenProvider {
        TokenProvider::new("test-secret", Duration::hours(1), Duration::days(14))
    }

    fn identity(id: i64) -> Identity {
        Identity::create(id, NewIdentity {
            provider_type: ProviderType::Kakao,
            provider_subject_id: id.to_string(),
            nickname: "빨간캡슐#0001".to_string(),
            email: None,
            profile_image_url: None,
        })
    }

    #[test]
    fn test_fresh_access_token_is_valid() {
        let provider = provider();
        let token = provider.issue_access(&identity(1)).unwrap();

        assert_eq!(provider.validate(Some(&token)), Ok(true));
    }

    #[test]
    fn test_expired_token_raises_token_expired() {
        let provider = TokenProvider::new("test-secret", Duration::seconds(-10), Duration::seconds(-10));
        let identity = identity(1);

        let access = provider.issue_access(&identity).unwrap();
        let refresh = provider.issue_refresh(&identity).unwrap();

        assert_eq!(provider.validate(Some(&access)), Err(AuthError::TokenExpired));
        assert_eq!(provider.validate(Some(&refresh)), Err(AuthError::TokenExpired));
        assert_eq!(provider.identity_id(&access), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_invalid_input_returns_false() {
        let provider = provider();

        assert_eq!(provider.validate(Some("not-a-token")), Ok(false));
        assert_eq!(provider.validate(Some("")), Ok(false));
        assert_eq!(provider.validate(None), Ok(false));
    }

    #[test]
    fn test_foreign_signature_returns_false() {
        let other = TokenProvider::new("other-secret", Duration::hours(1), Duration::days(14));
        let token = other.issue_access(&identity(1)).unwrap();

        assert_eq!(provider().validate(Some(&token)), Ok(false));
    }

    #[test]
    fn test_expired_token_with_foreign_signature_returns_false() {
        let other = TokenProvider::new("other-secret", Duration::seconds(-10), Duration::seconds(-10));
        let token = other.issue_access(&identity(1)).unwrap();

        assert_eq!(provider().validate(Some(&token)), Ok(false));
    }

    #[test]
    fn test_identity_id_round_trip() {
        let provider = provider();
        for id in [1_i64, 42, 9_007_199_254_740_993] {
            let identity = identity(id);
            let access = provider.issue_access(&identity).unwrap();
            let refresh = provider.issue_refresh(&identity).unwrap();

            assert_eq!(provider.identity_id(&access), Ok(id));
            assert_eq!(provider.identity_id(&refresh), Ok(id));
        }
    }

    #[test]
    fn test_user_type_claim() {
        let provider = provider();
        let mut admin = identity(1);
        admin.user_type = UserType::Admin;

        let access = provider.issue_access(&admin).unwrap();
        let refresh = provider.issue_refresh(&admin).unwrap();

        assert_eq!(provider.user_type(&access), Ok(UserType::Admin));
        assert_eq!(provider.user_type(&refresh), Ok(UserType::Normal));
    }

    #[test]
    fn test_refresh_tokens_differ_within_same_second() {
        let provider = provider();
        let identity = identity(1);

        let first = provider.issue_refresh(&identity).unwrap();
        let second = provider.issue_refresh(&identity).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenProvider::extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(TokenProvider::extract_bearer_token("bearer abc"), None);
        assert_eq!(TokenProvider::extract_bearer_token("Basic abc"), None);
        assert_eq!(TokenProvider::extract_bearer_token("Bearer "), None);
    }
}
