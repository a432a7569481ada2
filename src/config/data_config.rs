//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 저장소 백엔드 선택, 신규 사용자 기본값을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let env = Environment::current();
    /// match env {
    ///     Environment::Development => println!("개발 환경"),
    ///     Environment::Production => println!("프로덕션 환경"),
    ///     _ => {}
    /// }
    /// ```
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()))
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 개발용 엔드포인트(`/api/dev/token`, `/api/auth/test-code`)를 열어도 되는 환경인지 여부
    pub fn allows_dev_endpoints(&self) -> bool {
        matches!(self, Environment::Development | Environment::Test)
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다.
    ///
    /// # Returns
    ///
    /// 포트 번호. 기본값: 8080
    ///
    /// # Environment Variables
    ///
    /// - `PORT`: 커스텀 포트 설정
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다.
    ///
    /// # Returns
    ///
    /// 호스트 주소. 기본값: "0.0.0.0" (모든 인터페이스)
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: 커스텀 호스트 설정
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// CORS 허용 Origin 목록 (`CORS_ALLOWED_ORIGINS`, 쉼표 구분)
    pub fn cors_allowed_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

/// 저장소 백엔드 종류
///
/// `memory`는 MongoDB/Redis 없이 서버를 띄우는 로컬 개발 및 테스트용입니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageBackend {
    /// MongoDB(사용자, 리프레시 토큰) + Redis(OAuth 상태, 일회용 코드)
    Mongo,
    /// 프로세스 메모리 (재시작 시 소실)
    Memory,
}

/// 저장소 설정
pub struct StorageConfig;

impl StorageConfig {
    /// `STORAGE_BACKEND` 환경 변수로 백엔드를 선택합니다. 기본값은 `mongo`입니다.
    pub fn backend() -> StorageBackend {
        Self::backend_from_str(&env::var("STORAGE_BACKEND").unwrap_or_else(|_| "mongo".to_string()))
    }

    pub fn backend_from_str(s: &str) -> StorageBackend {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => StorageBackend::Memory,
            _ => StorageBackend::Mongo,
        }
    }
}

/// MongoDB / Redis 연결 정보 (`mongo` 백엔드에서만 사용)
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn mongodb_uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "federated_auth_dev".to_string())
    }

    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

/// 신규 사용자 생성 시 기본값
pub struct UserConfig;

impl UserConfig {
    /// 프로바이더가 프로필 이미지를 주지 않을 때도 신규 사용자에게는 이 이미지가 설정됩니다.
    pub fn default_profile_image_url() -> String {
        env::var("DEFAULT_PROFILE_IMAGE_URL")
            .unwrap_or_else(|_| "https://static.example.com/images/default-profile.png".to_string())
    }
}
