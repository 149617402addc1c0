//! 시간 소스 추상화
//!
//! 속도 제한 윈도우와 토큰 만료 판정은 모두 절대 벽시계 시간을 기준으로 합니다.
//! 테스트에서 시간을 임의로 진행시킬 수 있도록 [`Clock`] trait을 통해 주입합니다.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// 현재 시각을 제공하는 시간 소스
pub trait Clock: Send + Sync {
    /// 현재 UTC 시각을 반환합니다.
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계를 그대로 사용하는 기본 구현
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 조작하는 시계
///
/// 테스트와 시뮬레이션에서 윈도우 경계나 토큰 만료를 재현할 때 사용합니다.
///
/// ```rust,ignore
/// let clock = ManualClock::new(Utc::now());
/// clock.advance(Duration::minutes(15));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// 지정한 시각에서 멈춰 있는 시계를 생성합니다.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// 시계를 특정 시각으로 설정합니다.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// 시계를 주어진 만큼 앞으로 진행시킵니다.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
