//! OAuth 웹 로그인 핸들러
//!
//! 브라우저를 프로바이더로 보내고, 콜백을 받아 프론트엔드로 되돌려 보냅니다.
//! 두 엔드포인트 모두 JSON 대신 `302 Found`로 응답합니다.
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};

use crate::config::ProviderType;
use crate::domain::dto::{AuthorizeQuery, OAuthCallbackParams};
use crate::errors::AppError;
use crate::state::AppState;

/// 웹 로그인 시작
///
/// # Endpoint
/// `GET /oauth2/authorize/{provider}?redirect_uri=...`
#[get("/oauth2/authorize/{provider}")]
pub async fn authorize(
    state: web::Data<AppState>,
    provider: web::Path<String>,
    query: web::Query<AuthorizeQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = ProviderType::from_str(&provider)?;
    let location = state
        .oauth_login_service
        .authorize(provider, query.redirect_uri.as_deref())
        .await?;

    Ok(found(location))
}

/// 프로바이더 콜백 (쿼리 스트링)
///
/// # Endpoint
/// `GET /api/auth/callback/{provider}`
#[get("/callback/{provider}")]
pub async fn callback(
    state: web::Data<AppState>,
    provider: web::Path<String>,
    params: web::Query<OAuthCallbackParams>,
) -> Result<HttpResponse, AppError> {
    handle_callback(&state, &provider, params.into_inner()).await
}

/// 프로바이더 콜백 (Apple `form_post`)
///
/// # Endpoint
/// `POST /api/auth/callback/{provider}`
#[post("/callback/{provider}")]
pub async fn callback_form(
    state: web::Data<AppState>,
    provider: web::Path<String>,
    params: web::Form<OAuthCallbackParams>,
) -> Result<HttpResponse, AppError> {
    handle_callback(&state, &provider, params.into_inner()).await
}

async fn handle_callback(
    state: &AppState,
    provider: &str,
    params: OAuthCallbackParams,
) -> Result<HttpResponse, AppError> {
    let provider = ProviderType::from_str(provider)?;
    let location = state.oauth_login_service.callback(provider, params).await;
    Ok(found(location))
}

fn found(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}
