//! 퀴즈 세션 서비스 메인 애플리케이션
//!
//! 설정을 읽어 저장소와 자격 증명 백엔드를 구성하고, 저장된 세션을 복원한 뒤
//! actix-web HTTP 서버를 구동합니다.

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{debug, error, info};
use quiz_session_service::config::{AppConfig, RateLimitConfig};
use quiz_session_service::core::AppContext;
use quiz_session_service::middlewares::security_headers_middleware;
use quiz_session_service::routes::configure_all_routes;
use quiz_session_service::utils::display_terminal::{
    print_startup_summary, print_step_complete, print_step_start,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 퀴즈 세션 서비스 시작중...");

    let config = AppConfig::from_env().map_err(|e| {
        error!("설정 로드 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    print_step_start(1, "Building services");
    let context = AppContext::build(&config).await.map_err(|e| {
        error!("서비스 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    print_step_complete(1, "Services ready", config.storage.backend.as_str());

    // 상태를 읽는 요청을 받기 전에 세션 복원을 끝냅니다
    print_step_start(2, "Restoring persisted session");
    context.auth.check_auth_status().await;
    let state = context.auth.get_state();
    print_step_complete(2, "Session restored", &format!("{:?}", state.phase()));

    spawn_rate_limit_sweeper(context.clone());
    print_startup_summary(&config, &state);

    start_http_server(config, context).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, 보안 헤더 미들웨어를 포함합니다.
/// API 속도 제한은 라우트 설정에서 `/api/v1` 스코프에 적용됩니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(config: AppConfig, context: AppContext) -> std::io::Result<()> {
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Session status: http://{}/api/v1/auth/status", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(context.clone()))
            .wrap(security_headers_middleware())
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(|cfg| configure_all_routes(cfg, &context))
    })
    .bind(&bind_address)?
    .workers(config.server.workers.max(1))
    .run()
    .await
}

/// 오래된 속도 제한 윈도우를 주기적으로 정리합니다
///
/// `RATE_LIMIT_SWEEP_INTERVAL_SECS` 주기로 두 제한기 모두를 정리합니다.
fn spawn_rate_limit_sweeper(context: AppContext) {
    let period = RateLimitConfig::sweep_interval();
    info!("🧹 속도 제한 윈도우 정리 주기: {:?}", period);

    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(period);
        loop {
            interval.tick().await;
            let removed = context.sweep_rate_limits();
            if removed > 0 {
                debug!("속도 제한 윈도우 {}개 정리됨", removed);
            }
        }
    });
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 stderr로만 남깁니다
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => eprintln!("[{}] {} 파일 로드 됨", profile, file),
        Err(e) => eprintln!("[{}] 환경 파일 로드 실패, 환경 변수만 사용: {}", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=quiz_session_service::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// CORS 설정을 구성합니다
///
/// 로컬에서 실행되는 퀴즈 UI 개발 서버와 자체 서버 주소를 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ])
        .supports_credentials()
        .max_age(3600)
}
