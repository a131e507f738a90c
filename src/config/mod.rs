// region:    --- Imports
use crate::error::AuctionError;
use std::time::Duration;
use tracing::warn;

// endregion: --- Imports

// region:    --- Constants
pub const AUCTION_DURATION_KEY: &str = "AUCTION_DURATION";
pub const AUCTION_INTERVAL_KEY: &str = "AUCTION_INTERVAL";

pub const DEFAULT_AUCTION_DURATION: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(60);

// endregion: --- Constants

// region:    --- Expiry Settings

/// 경매 만료 설정
/// 스케줄러 시작 시 한 번만 해석
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirySettings {
    /// Open 경매가 종료 대상이 되는 나이
    pub expiration: Duration,
    /// 스윕 주기
    pub poll_interval: Duration,
}

impl Default for ExpirySettings {
    fn default() -> Self {
        Self {
            expiration: DEFAULT_AUCTION_DURATION,
            poll_interval: DEFAULT_AUCTION_INTERVAL,
        }
    }
}

impl ExpirySettings {
    /// 환경 변수에서 설정 해석
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// 임의의 키 조회 함수로 설정 해석
    /// 값이 없으면 기본값, 잘못된 값이면 경고 후 기본값
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            expiration: resolve_duration(
                AUCTION_DURATION_KEY,
                lookup(AUCTION_DURATION_KEY),
                DEFAULT_AUCTION_DURATION,
            ),
            poll_interval: resolve_duration(
                AUCTION_INTERVAL_KEY,
                lookup(AUCTION_INTERVAL_KEY),
                DEFAULT_AUCTION_INTERVAL,
            ),
        }
    }
}

fn resolve_duration(key: &'static str, value: Option<String>, default: Duration) -> Duration {
    match value {
        None => default,
        Some(value) if value.trim().is_empty() => default,
        Some(value) => match parse_duration(key, &value) {
            Ok(duration) => duration,
            Err(e) => {
                warn!(
                    "{:<12} --> {}, 기본값 {} 사용",
                    "Config",
                    e,
                    humantime::format_duration(default)
                );
                default
            }
        },
    }
}

/// 기간 문자열 파싱 (`90s`, `1m`, `5min`, `1h 30m`)
/// 0 은 타이머 주기로 쓸 수 없으므로 거부
pub fn parse_duration(key: &'static str, value: &str) -> Result<Duration, AuctionError> {
    let duration =
        humantime::parse_duration(value.trim()).map_err(|e| AuctionError::ConfigParseFailed {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })?;
    if duration.is_zero() {
        return Err(AuctionError::ConfigParseFailed {
            key,
            value: value.to_string(),
            reason: "duration must be greater than zero".to_string(),
        });
    }
    Ok(duration)
}

// endregion: --- Expiry Settings
