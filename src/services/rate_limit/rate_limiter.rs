//! 식별자별 윈도우 속도 제한기
//!
//! 식별자(클라이언트 IP, 이메일 등)마다 `{count, reset_time}` 윈도우를 유지하며,
//! 윈도우는 다음 요청 시점에 지연 초기화됩니다. 백그라운드 초기화는 없고
//! 오래된 윈도우 정리는 [`RateLimiter::sweep_expired`]를 주기적으로 호출합니다.
//!
//! # 정책
//!
//! - 새 식별자의 첫 요청은 항상 윈도우를 열며 1회로 계산됩니다.
//! - 윈도우당 정확히 `max_requests`회가 허용되고 그다음 요청은 거부됩니다.
//! - 거부된 요청은 카운트를 더 올리지 않습니다 (초과 상태로 고정).
//! - `now > reset_time`일 때만 윈도우가 초기화됩니다. `reset_time`과 같은
//!   시각의 요청은 이전 윈도우에 계산됩니다.
//!
//! # 예제
//!
//! ```rust,ignore
//! let limiter = RateLimiter::new(RateLimitConfig::default(), Arc::new(SystemClock));
//!
//! if !limiter.is_allowed("203.0.113.7") {
//!     return Err(AppError::RateLimited { retry_after_secs: limiter.retry_after_secs("203.0.113.7") });
//! }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use serde::Serialize;

use crate::config::RateLimitConfig;
use crate::utils::clock::Clock;

/// 식별자 하나의 윈도우 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateWindow {
    /// 현재 윈도우에서 허용된 요청 수
    pub count: u32,
    /// 윈도우 초기화 시각
    pub reset_time: DateTime<Utc>,
}

/// 속도 제한기
///
/// 모든 윈도우는 하나의 뮤텍스 아래에서 갱신되므로 같은 식별자에 대한
/// 동시 요청도 카운트 유실 없이 직렬화됩니다.
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, RateWindow>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn windows(&self) -> MutexGuard<'_, HashMap<String, RateWindow>> {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 윈도우당 허용 요청 수
    pub fn limit(&self) -> u32 {
        self.config.max_requests
    }

    /// 윈도우 길이
    pub fn window(&self) -> Duration {
        self.config.window
    }

    /// 요청을 허용할지 결정하고 윈도우를 갱신합니다.
    ///
    /// # Returns
    ///
    /// * `true` - 요청 허용 (카운트 증가)
    /// * `false` - 한도 초과 (카운트 고정)
    pub fn is_allowed(&self, identifier: &str) -> bool {
        let now = self.clock.now();
        let max_requests = self.config.max_requests;
        let mut windows = self.windows();

        match windows.get_mut(identifier) {
            Some(window) if now <= window.reset_time => {
                if window.count >= max_requests {
                    debug!(
                        "요청 거부: {} ({}/{}), 초기화 {}",
                        identifier, window.count, max_requests, window.reset_time
                    );
                    return false;
                }
                window.count += 1;
                true
            }
            _ => {
                windows.insert(
                    identifier.to_string(),
                    RateWindow {
                        count: 1,
                        reset_time: now + self.config.window,
                    },
                );
                if max_requests == 0 {
                    warn!("max_requests가 0이므로 모든 요청을 거부합니다: {}", identifier);
                }
                1 <= max_requests
            }
        }
    }

    /// 현재 윈도우에서 남은 요청 수. 기록이 없으면 `max_requests`입니다.
    pub fn get_remaining_requests(&self, identifier: &str) -> u32 {
        self.windows()
            .get(identifier)
            .map(|window| self.config.max_requests.saturating_sub(window.count))
            .unwrap_or(self.config.max_requests)
    }

    /// 윈도우 초기화 시각. 기록이 없으면 `now + window`입니다.
    pub fn get_reset_time(&self, identifier: &str) -> DateTime<Utc> {
        self.windows()
            .get(identifier)
            .map(|window| window.reset_time)
            .unwrap_or_else(|| self.clock.now() + self.config.window)
    }

    /// 윈도우 초기화까지 남은 초 (`Retry-After` 용, 최소 0)
    pub fn retry_after_secs(&self, identifier: &str) -> i64 {
        let remaining = self.get_reset_time(identifier) - self.clock.now();
        let secs = remaining.num_seconds();
        if remaining > Duration::seconds(secs) {
            (secs + 1).max(0)
        } else {
            secs.max(0)
        }
    }

    /// 식별자의 윈도우 스냅샷
    pub fn window_for(&self, identifier: &str) -> Option<RateWindow> {
        self.windows().get(identifier).copied()
    }

    /// 추적 중인 식별자 수
    pub fn tracked_identifiers(&self) -> usize {
        self.windows().len()
    }

    /// `reset_time`이 윈도우 하나 이상 지난 항목을 제거합니다.
    ///
    /// # Returns
    ///
    /// 제거된 항목 수
    pub fn sweep_expired(&self) -> usize {
        let cutoff = self.clock.now() - self.config.window;
        let mut windows = self.windows();
        let before = windows.len();
        windows.retain(|_, window| window.reset_time >= cutoff);
        let removed = before - windows.len();

        if removed > 0 {
            debug!("만료된 속도 제한 윈도우 {}개 정리", removed);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::ManualClock;

    fn limiter(max_requests: u32) -> (RateLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let config = RateLimitConfig::new(max_requests, Duration::milliseconds(15 * 60 * 1000));
        (RateLimiter::new(config, clock.clone()), clock)
    }

    #[test]
    fn test_exactly_max_requests_are_allowed() {
        let (limiter, _) = limiter(100);

        for i in 0..100 {
            assert!(limiter.is_allowed("client"), "request {} should pass", i + 1);
        }
        assert!(!limiter.is_allowed("client"));
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let (limiter, clock) = limiter(100);

        for _ in 0..101 {
            limiter.is_allowed("client");
        }
        assert!(!limiter.is_allowed("client"));

        clock.advance(limiter.window() + Duration::milliseconds(1));
        assert!(limiter.is_allowed("client"));
        assert_eq!(limiter.get_remaining_requests("client"), 99);
    }

    #[test]
    fn test_request_at_reset_time_counts_against_old_window() {
        let (limiter, clock) = limiter(2);

        assert!(limiter.is_allowed("client"));
        assert!(limiter.is_allowed("client"));

        clock.advance(limiter.window());
        assert!(!limiter.is_allowed("client"));

        clock.advance(Duration::milliseconds(1));
        assert!(limiter.is_allowed("client"));
    }

    #[test]
    fn test_remaining_decreases_by_one_and_floors_at_zero() {
        let (limiter, _) = limiter(3);

        assert_eq!(limiter.get_remaining_requests("client"), 3);
        for expected in [2, 1, 0] {
            assert!(limiter.is_allowed("client"));
            assert_eq!(limiter.get_remaining_requests("client"), expected);
        }

        assert!(!limiter.is_allowed("client"));
        assert_eq!(limiter.get_remaining_requests("client"), 0);
    }

    #[test]
    fn test_refused_requests_freeze_counter() {
        let (limiter, _) = limiter(2);

        for _ in 0..10 {
            limiter.is_allowed("client");
        }
        assert_eq!(limiter.window_for("client").unwrap().count, 2);
    }

    #[test]
    fn test_identifiers_are_independent() {
        let (limiter, _) = limiter(1);

        assert!(limiter.is_allowed("a"));
        assert!(!limiter.is_allowed("a"));
        assert!(limiter.is_allowed("b"));
    }

    #[test]
    fn test_reset_time_for_unknown_identifier() {
        let (limiter, clock) = limiter(5);
        assert_eq!(limiter.get_reset_time("nobody"), clock.now() + limiter.window());
        assert_eq!(limiter.tracked_identifiers(), 0);
    }

    #[test]
    fn test_reset_time_is_fixed_at_window_open() {
        let (limiter, clock) = limiter(5);
        let opened_at = clock.now();

        limiter.is_allowed("client");
        clock.advance(Duration::minutes(3));
        limiter.is_allowed("client");

        assert_eq!(limiter.get_reset_time("client"), opened_at + limiter.window());
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let (limiter, clock) = limiter(1);

        limiter.is_allowed("client");
        clock.advance(limiter.window() - Duration::milliseconds(1500));
        assert_eq!(limiter.retry_after_secs("client"), 2);
    }

    #[test]
    fn test_zero_limit_refuses_everything() {
        let (limiter, _) = limiter(0);
        assert!(!limiter.is_allowed("client"));
        assert_eq!(limiter.get_remaining_requests("client"), 0);
    }

    #[test]
    fn test_sweep_removes_only_stale_windows() {
        let (limiter, clock) = limiter(5);

        limiter.is_allowed("old");
        clock.advance(limiter.window() * 2 + Duration::milliseconds(1));
        limiter.is_allowed("fresh");

        assert_eq!(limiter.sweep_expired(), 1);
        assert!(limiter.window_for("old").is_none());
        assert!(limiter.window_for("fresh").is_some());
    }

    #[test]
    fn test_concurrent_requests_do_not_lose_updates() {
        let (limiter, _) = limiter(1000);
        let limiter = Arc::new(limiter);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        limiter.is_allowed("shared");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(limiter.window_for("shared").unwrap().count, 800);
    }
}
