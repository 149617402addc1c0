//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`clock`] - 주입 가능한 시간 소스 (`SystemClock`, `ManualClock`)
//! - [`string_utils`] - 식별자 정규화, 이메일 마스킹, 필수 값 검증
//! - [`request_utils`] - 클라이언트 IP 추출
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{mask_email, normalize_identifier};
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let key = normalize_identifier(" User@Quiz.local ");
//! log::info!("login attempt - {}", mask_email(&key));
//!
//! print_boxed_title("Session Restored");
//! ```

pub mod clock;
pub mod display_terminal;
pub mod request_utils;
pub mod string_utils;
