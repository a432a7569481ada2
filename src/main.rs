//! 연합 소셜 로그인 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 저장소 백엔드(MongoDB + Redis 또는 메모리)를 선택하고, Apple 키 설정을 기동 시점에 검증합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use federated_auth_service::caching::redis::RedisClient;
use federated_auth_service::config::{AppleOAuthConfig, Environment, ServerConfig, StorageBackend, StorageConfig};
use federated_auth_service::db::Database;
use federated_auth_service::middlewares::AuthenticationFilter;
use federated_auth_service::repositories::{MongoIdentityStore, MongoRefreshTokenStore};
use federated_auth_service::routes::configure_all_routes;
use federated_auth_service::services::auth::TokenProvider;
use federated_auth_service::services::oauth::AppleCredentialSynthesizer;
use federated_auth_service::state::{AppState, Providers, Stores};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 연합 인증 서비스 시작중...");

    let environment = Environment::current();
    info!("실행 환경: {:?}", environment);

    let stores = initialize_data_stores().await;
    let apple = initialize_apple();

    let token_provider = Arc::new(TokenProvider::from_config());
    let state = AppState::new(stores, Providers::from_config(apple), token_provider, environment);

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 인증 필터는 앱 전체에 적용되고, 인가 조건은 라우트 스코프별로 붙습니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let data = web::Data::new(state);

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .app_data(data.clone())
            .wrap(AuthenticationFilter::new(data.token_provider.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => println!(".env.prod 파일 로드 됨"),
            Err(e) => eprintln!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => println!(".env.dev 파일 로드 됨"),
            Err(e) => eprintln!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// RUST_LOG=federated_auth_service::middlewares=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 저장소를 초기화합니다
///
/// # Panics
///
/// * `mongo` 백엔드에서 MongoDB 또는 Redis 연결 실패 시
async fn initialize_data_stores() -> Stores {
    match StorageConfig::backend() {
        StorageBackend::Memory => {
            warn!("⚠️ 메모리 저장소 사용: 재시작 시 모든 데이터가 사라집니다");
            Stores::memory()
        }
        StorageBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::new()
                .await
                .expect("데이터베이스 연결 실패");
            let identities = MongoIdentityStore::new(&database)
                .await
                .expect("identities 컬렉션 초기화 실패");
            let refresh_tokens = MongoRefreshTokenStore::new(&database)
                .await
                .expect("refresh_tokens 컬렉션 초기화 실패");

            info!("✅ MongoDB 연결 성공");

            let redis_client = RedisClient::new()
                .await
                .expect("Redis 연결 실패");

            info!("✅ Redis 연결 성공");

            Stores {
                identities: Arc::new(identities),
                refresh_tokens: Arc::new(refresh_tokens),
                ephemeral: Arc::new(redis_client),
            }
        }
    }
}

/// Apple 로그인 키를 검증합니다
///
/// Apple 설정이 없으면 Apple 웹 로그인 없이 기동합니다.
/// 설정은 있는데 키를 읽을 수 없으면 첫 요청을 기다리지 않고 즉시 종료합니다.
fn initialize_apple() -> Option<Arc<AppleCredentialSynthesizer>> {
    let Some(config) = AppleOAuthConfig::from_env() else {
        info!("Apple 로그인 설정 없음, Apple 웹 로그인 비활성");
        return None;
    };

    match AppleCredentialSynthesizer::new(&config) {
        Ok(synthesizer) => {
            info!("🍎 Apple client secret 생성기 준비 완료");
            Some(Arc::new(synthesizer))
        }
        Err(e) => {
            error!("Apple 설정 오류: {}", e);
            std::process::exit(1);
        }
    }
}

/// CORS 설정을 구성합니다
///
/// 허용 Origin은 `CORS_ALLOWED_ORIGINS`에서 읽습니다.
fn configure_cors() -> Cors {
    ServerConfig::cors_allowed_origins()
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
