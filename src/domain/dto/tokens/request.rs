//! 인증 요청관련 DTO
//!
//! 인증을 요청하는 클라이언트의 요청 정보를 매핑합니다.
//! JSON 필드는 camelCase(`accessToken`)입니다.
use serde::Deserialize;
use validator::Validate;

/// 소셜 액세스 토큰 로그인 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "accessToken은 필수입니다"))]
    pub access_token: String,
}

/// 토큰 재발급 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReissueRequest {
    #[validate(length(min = 1, message = "refreshToken은 필수입니다"))]
    pub refresh_token: String,
}

/// 일회용 코드 교환 요청
#[derive(Debug, Deserialize, Validate)]
pub struct TokenExchangeRequest {
    #[validate(length(min = 1, message = "code는 필수입니다"))]
    pub code: String,
}

/// 개발용 토큰 발급 쿼리
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevTokenQuery {
    pub user_id: i64,
}

/// 웹 로그인 시작 쿼리
#[derive(Debug, Deserialize)]
pub struct AuthorizeQuery {
    /// 로그인 완료 후 돌아갈 프론트엔드 주소 (허용 목록에 없으면 기본값 사용)
    pub redirect_uri: Option<String>,
}

/// 프로바이더 콜백 파라미터
///
/// Kakao/Google/Naver는 쿼리 스트링으로, Apple은 `form_post` 본문으로 전달합니다.
#[derive(Debug, Default, Deserialize)]
pub struct OAuthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    /// Apple이 최초 동의 때만 보내는 사용자 정보 JSON 문자열
    pub user: Option<String>,
}
