//! 서버, 속도 제한, 저장소, 자격 증명 서비스 설정 관리 모듈
//!
//! 모든 설정은 환경 변수에서 읽으며, 값이 없거나 파싱에 실패하면
//! 기본값을 사용하고 경고 로그를 남깁니다.

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use log::warn;

use crate::errors::{AppError, AppResult};

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며, 설정되지 않은 경우
    /// `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|name| Self::parse(&name))
            .unwrap_or(Environment::Production)
    }

    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`입니다.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 환경 변수를 파싱하고, 실패하면 기본값을 사용합니다.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            warn!("{} 파싱 실패: {}. 기본값 사용", key, e);
            default
        }),
        Err(_) => default,
    }
}

/// 쉼표로 구분된 IP 목록을 파싱합니다. 잘못된 항목은 경고 후 건너뜁니다.
fn parse_ip_list(raw: &str) -> Vec<IpAddr> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(e) => {
                warn!("TRUSTED_PROXIES 항목 무시: {} ({})", entry, e);
                None
            }
        })
        .collect()
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// 전달 헤더(`X-Forwarded-For`, `X-Real-IP`)를 신뢰할 프록시 주소
    pub trusted_proxies: Vec<IpAddr>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 2,
            trusted_proxies: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `HOST`, `PORT`, `SERVER_WORKERS`, `TRUSTED_PROXIES` 환경 변수에서 설정을 읽습니다.
    ///
    /// `TRUSTED_PROXIES`는 쉼표로 구분한 IP 목록이며 기본값은 비어 있습니다.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port),
            workers: env_or("SERVER_WORKERS", defaults.workers),
            trusted_proxies: env::var("TRUSTED_PROXIES")
                .map(|raw| parse_ip_list(&raw))
                .unwrap_or(defaults.trusted_proxies),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 속도 제한 윈도우 설정
///
/// 기본값은 15분당 100회입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    /// 윈도우당 허용 요청 수
    pub max_requests: u32,
    /// 윈도우 길이
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::milliseconds(15 * 60 * 1000),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self { max_requests, window }
    }

    /// API 전역 속도 제한 설정
    ///
    /// - `RATE_LIMIT_MAX_REQUESTS` (기본값: 100)
    /// - `RATE_LIMIT_WINDOW_MS` (기본값: 900000)
    pub fn api_from_env() -> Self {
        let defaults = Self::default();
        Self::from_env_keys("RATE_LIMIT_MAX_REQUESTS", "RATE_LIMIT_WINDOW_MS", defaults)
    }

    /// 로그인 시도 속도 제한 설정
    ///
    /// - `LOGIN_RATE_LIMIT_MAX_ATTEMPTS` (기본값: 5)
    /// - `LOGIN_RATE_LIMIT_WINDOW_MS` (기본값: 900000)
    pub fn login_from_env() -> Self {
        let defaults = Self::new(5, Duration::milliseconds(15 * 60 * 1000));
        Self::from_env_keys("LOGIN_RATE_LIMIT_MAX_ATTEMPTS", "LOGIN_RATE_LIMIT_WINDOW_MS", defaults)
    }

    fn from_env_keys(max_key: &str, window_key: &str, defaults: Self) -> Self {
        let max_requests = env_or(max_key, defaults.max_requests);
        let window_ms = env_or(window_key, defaults.window.num_milliseconds());

        let window = if window_ms > 0 {
            Duration::milliseconds(window_ms)
        } else {
            warn!("{}는 0보다 커야 합니다. 기본값 사용", window_key);
            defaults.window
        };

        Self { max_requests, window }
    }

    /// 오래된 윈도우 정리 주기 (`RATE_LIMIT_SWEEP_INTERVAL_SECS`, 기본값: 60초)
    pub fn sweep_interval() -> StdDuration {
        StdDuration::from_secs(env_or("RATE_LIMIT_SWEEP_INTERVAL_SECS", 60u64).max(1))
    }
}

/// 저장소 백엔드 종류
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// 프로세스 메모리 (재시작 시 소실)
    Memory,
    /// JSON 파일
    File,
    /// Redis
    Redis,
}

impl StoreBackend {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(AppError::ConfigError(format!("Unsupported store backend: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::File => "file",
            StoreBackend::Redis => "redis",
        }
    }

    /// 환경별 기본 백엔드. 프로덕션은 재시작 후에도 세션을 유지합니다.
    pub fn default_for_env(env: &Environment) -> Self {
        match env {
            Environment::Production => StoreBackend::File,
            _ => StoreBackend::Memory,
        }
    }
}

/// 세션 저장소 설정
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StoreBackend,
    pub file_path: PathBuf,
    pub redis_url: String,
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            file_path: PathBuf::from("./data/session_store.json"),
            redis_url: "redis://localhost:6379".to_string(),
            key_prefix: "quiz_session:".to_string(),
        }
    }
}

impl StorageConfig {
    /// `STORE_BACKEND`, `STORE_FILE_PATH`, `REDIS_URL`, `STORE_KEY_PREFIX`를 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 지원하지 않는 백엔드 이름
    pub fn from_env(environment: &Environment) -> AppResult<Self> {
        let defaults = Self::default();
        let backend = match env::var("STORE_BACKEND") {
            Ok(name) => StoreBackend::parse(&name)?,
            Err(_) => StoreBackend::default_for_env(environment),
        };

        Ok(Self {
            backend,
            file_path: env::var("STORE_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.file_path),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env::var("STORE_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        })
    }
}

/// 자격 증명 서비스 백엔드 종류
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialBackend {
    /// 메모리 내 데모 계정
    Mock,
    /// HTTP 인증 서버
    Http,
}

impl CredentialBackend {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(CredentialBackend::Mock),
            "http" => Ok(CredentialBackend::Http),
            other => Err(AppError::ConfigError(format!(
                "Unsupported credential backend: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialBackend::Mock => "mock",
            CredentialBackend::Http => "http",
        }
    }
}

/// 자격 증명 서비스 설정
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    pub backend: CredentialBackend,
    pub base_url: String,
    pub request_timeout: StdDuration,
    /// 모의 서비스가 발급하는 액세스 토큰 수명
    pub mock_token_ttl: Duration,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            backend: CredentialBackend::Mock,
            base_url: "http://127.0.0.1:9000/api/v1".to_string(),
            request_timeout: StdDuration::from_secs(10),
            mock_token_ttl: Duration::seconds(3600),
        }
    }
}

impl CredentialConfig {
    /// `CREDENTIAL_BACKEND`, `CREDENTIAL_SERVICE_URL`, `CREDENTIAL_TIMEOUT_SECS`,
    /// `MOCK_TOKEN_TTL_SECS`를 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 지원하지 않는 백엔드 이름
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let backend = match env::var("CREDENTIAL_BACKEND") {
            Ok(name) => CredentialBackend::parse(&name)?,
            Err(_) => defaults.backend,
        };

        Ok(Self {
            backend,
            base_url: env::var("CREDENTIAL_SERVICE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            request_timeout: StdDuration::from_secs(
                env_or("CREDENTIAL_TIMEOUT_SECS", defaults.request_timeout.as_secs()).max(1),
            ),
            mock_token_ttl: Duration::seconds(
                env_or("MOCK_TOKEN_TTL_SECS", defaults.mock_token_ttl.num_seconds()).max(1),
            ),
        })
    }
}

/// 전체 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api_rate_limit: RateLimitConfig,
    pub login_rate_limit: RateLimitConfig,
    pub storage: StorageConfig,
    pub credentials: CredentialConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            api_rate_limit: RateLimitConfig::default(),
            login_rate_limit: RateLimitConfig::new(5, Duration::milliseconds(15 * 60 * 1000)),
            storage: StorageConfig::default(),
            credentials: CredentialConfig::default(),
        }
    }
}

impl AppConfig {
    /// 환경 변수로부터 전체 설정을 구성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 백엔드 이름이 잘못된 경우
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::current();
        Ok(Self {
            server: ServerConfig::from_env(),
            api_rate_limit: RateLimitConfig::api_from_env(),
            login_rate_limit: RateLimitConfig::login_from_env(),
            storage: StorageConfig::from_env(&environment)?,
            credentials: CredentialConfig::from_env()?,
            environment,
        })
    }
}
