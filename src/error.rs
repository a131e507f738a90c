// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Errors

/// 레코드 저장소 오류
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("auction with id {0} already exists")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    InvalidDiscriminant(#[from] InvalidDiscriminant),
}

/// 저장된 정수 값이 알려진 enum 값과 매칭되지 않음
#[derive(Debug, Error)]
#[error("unknown {kind} value: {value}")]
pub struct InvalidDiscriminant {
    pub kind: &'static str,
    pub value: i16,
}

/// 경매 저장소 / 스케줄러 오류
#[derive(Debug, Error)]
pub enum AuctionError {
    #[error("failed to insert auction: {0}")]
    StorageWriteFailed(#[source] StoreError),

    #[error("failed to close expired auctions: {0}")]
    StorageUpdateFailed(#[source] StoreError),

    #[error("failed to read auctions: {0}")]
    StorageReadFailed(#[source] StoreError),

    #[error("invalid duration for {key}: {value:?} ({reason})")]
    ConfigParseFailed {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid auction: {0}")]
    InvalidAuction(String),
}

/// 스케줄러 생명주기 오류
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("expiration scheduler was already started")]
    AlreadyStarted,

    #[error("repository already has an expiration scheduler")]
    AlreadyAttached,
}

// endregion: --- Errors
