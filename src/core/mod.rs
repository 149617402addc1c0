//! # Core Module
//!
//! 서비스 인스턴스의 생성과 공유를 담당합니다.
//!
//! ## 모듈 구성
//!
//! ### [`context`] - 애플리케이션 컨텍스트
//! - **AppContext**: 세션 관리자와 속도 제한기를 묶은 명시적 DI 컨테이너
//! - **구성 기반 생성**: 저장소/자격 증명 백엔드를 설정으로 선택
//! - **Thread-safe**: 모든 서비스는 `Arc`로 공유되며 내부에서 동기화
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! let context = AppContext::build(&config).await?;
//! context.auth.check_auth_status().await;
//!
//! HttpServer::new(move || {
//!     App::new().app_data(web::Data::new(context.clone()))
//! })
//! ```

pub mod context;

pub use context::AppContext;
