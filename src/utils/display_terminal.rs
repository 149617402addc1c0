//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 시작 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 시작 요약을 시각적으로 표현합니다.

use crate::config::AppConfig;
use crate::domain::models::AuthState;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// 텍스트는 자동으로 중앙 정렬됩니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║               QUIZ SESSION SERVICE               ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(50);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Restoring persisted session
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
///
/// ```text
/// ✓ Step 1: Session restored (signed_in)
/// ```
pub fn print_step_complete(step: u8, description: &str, detail: &str) {
    println!("✓ Step {}: {} ({})", step, description, detail);
}

/// 서브 항목을 들여쓰기된 트리 형태로 출력합니다
///
/// ```text
///    ├─ Store: file
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 서버 시작 요약을 출력합니다
///
/// 바인딩 주소, 백엔드 선택, 속도 제한 설정과 복원된 세션 단계를 보여줍니다.
pub fn print_startup_summary(config: &AppConfig, state: &AuthState) {
    println!();
    print_boxed_title("🚀 QUIZ SESSION SERVICE");
    print_sub_task("Environment", &format!("{:?}", config.environment));
    print_sub_task("Listen", &format!("http://{}", config.server.bind_address()));
    print_sub_task("Store", config.storage.backend.as_str());
    print_sub_task("Credentials", config.credentials.backend.as_str());
    print_sub_task(
        "API rate limit",
        &format!(
            "{} req / {}s",
            config.api_rate_limit.max_requests,
            config.api_rate_limit.window.num_seconds()
        ),
    );
    print_sub_task(
        "Login rate limit",
        &format!(
            "{} attempts / {}s",
            config.login_rate_limit.max_requests,
            config.login_rate_limit.window.num_seconds()
        ),
    );

    let session = match &state.user {
        Some(user) if state.is_authenticated => format!("signed in as {} ({})", user.id, user.role),
        _ => "signed out".to_string(),
    };
    print_sub_task("Session", &session);
    println!();
}
