//! Authentication HTTP Handlers
//!
//! 세션 토큰 발급과 폐기를 담당하는 엔드포인트입니다. 모두 `/api/auth` 스코프에 등록됩니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/login/{provider}` | - | 프로바이더 액세스 토큰으로 로그인 |
//! | `POST` | `/reissue` | - | 리프레시 토큰으로 재발급 |
//! | `POST` | `/logout` | 필요 | 리프레시 토큰 삭제 |
//! | `POST` | `/token` | - | 웹 로그인 일회용 코드 교환 |
//! | `POST` | `/test-code` | 개발 환경 | 고정 테스트 토큰용 코드 발급 |
use actix_web::{HttpResponse, post, web};
use serde_json::json;
use validator::Validate;

use crate::config::ProviderType;
use crate::domain::dto::{ApiResponse, LoginRequest, ReissueRequest, TokenExchangeRequest};
use crate::domain::models::auth::CurrentIdentity;
use crate::errors::AppError;
use crate::state::AppState;

/// 소셜 액세스 토큰 로그인
///
/// # Endpoint
/// `POST /api/auth/login/{provider}`
#[post("/login/{provider}")]
pub async fn login(
    state: web::Data<AppState>,
    provider: web::Path<String>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let provider = ProviderType::from_str(&provider)?;
    let response = state.auth_service.login(provider, &payload.access_token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// 토큰 재발급
///
/// # Endpoint
/// `POST /api/auth/reissue`
#[post("/reissue")]
pub async fn reissue(
    state: web::Data<AppState>,
    payload: web::Json<ReissueRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = state.auth_service.reissue(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// 로그아웃
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    current: CurrentIdentity,
) -> Result<HttpResponse, AppError> {
    state.auth_service.logout(current.identity_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

/// 웹 로그인 일회용 코드 교환
///
/// # Endpoint
/// `POST /api/auth/token`
#[post("/token")]
pub async fn exchange_token(
    state: web::Data<AppState>,
    payload: web::Json<TokenExchangeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let tokens = state.auth_service.exchange_code(&payload.code).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tokens)))
}

/// 프론트엔드 연동 확인용 코드 발급 (개발/테스트 환경 전용)
///
/// # Endpoint
/// `POST /api/auth/test-code`
#[post("/test-code")]
pub async fn issue_test_code(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    if !state.environment.allows_dev_endpoints() {
        return Err(AppError::NotFound("test-code 엔드포인트".to_string()));
    }

    let code = state.auth_service.issue_test_code().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({ "code": code }))))
}
