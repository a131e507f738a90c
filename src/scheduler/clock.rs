// region:    --- Imports
use chrono::{DateTime, Duration, Utc};
use tokio::time::Instant;

// endregion: --- Imports

// region:    --- Clock

/// 현재 시각 제공자
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// tokio 런타임 시간 기반 시계
/// 기준 시각에 tokio `Instant` 경과 시간을 더한다.
/// 일시정지된 테스트 런타임에서는 `tokio::time::advance` / `sleep` 으로만 흐른다.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeClock {
    anchor: DateTime<Utc>,
    started: Instant,
}

impl RuntimeClock {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            started: Instant::now(),
        }
    }
}

impl Default for RuntimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RuntimeClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = Duration::from_std(self.started.elapsed()).unwrap_or(Duration::zero());
        self.anchor + elapsed
    }
}

// endregion: --- Clock
