//! 경매 저장소
//! 생성 경로와 만료 스윕이 같은 레코드 저장소를 공유하므로
//! 모든 쓰기는 인스턴스가 소유한 하나의 락으로 직렬화한다.
// region:    --- Imports
use crate::auction::{Auction, AuctionFilter, AuctionStatus};
use crate::database::RecordStore;
use crate::error::AuctionError;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

// endregion: --- Imports

// region:    --- Auction Repository
pub struct AuctionRepository<S> {
    store: S,
    /// 쓰기 직렬화 락 (insert / 일괄 업데이트)
    write_lock: Mutex<()>,
    /// 만료 스케줄러 연결 여부 (저장소당 하나)
    scheduler_attached: AtomicBool,
}

impl<S: RecordStore> AuctionRepository<S> {
    /// 경매 저장소 생성
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
            scheduler_attached: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 경매 생성 (Open 상태만 허용)
    pub async fn create_auction(&self, auction: &Auction) -> Result<(), AuctionError> {
        if auction.status != AuctionStatus::Open {
            return Err(AuctionError::InvalidAuction(format!(
                "auction {} must be created with status Open",
                auction.id
            )));
        }

        let result = {
            let _guard = self.write_lock.lock().await;
            self.store.insert(auction).await
        };

        result.map_err(|e| {
            error!(
                "{:<12} --> 경매 생성 실패 id: {}, {:?}",
                "Repository", auction.id, e
            );
            AuctionError::StorageWriteFailed(e)
        })?;

        debug!("{:<12} --> 경매 생성 id: {}", "Repository", auction.id);
        Ok(())
    }

    /// 스케줄러 연결 선점, 이미 연결되어 있으면 false
    /// 중지 후에도 해제하지 않는다.
    pub(crate) fn attach_scheduler(&self) -> bool {
        self.scheduler_attached
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// 만료 경매 종료 (스윕)
    /// `timestamp < now - expiration` 인 Open 경매를 Closed 로 변경하고 변경 건수를 반환
    pub async fn close_expired_auctions(
        &self,
        now: DateTime<Utc>,
        expiration: Duration,
    ) -> Result<u64, AuctionError> {
        let cutoff = expiration_cutoff(now, expiration);

        let result = {
            let _guard = self.write_lock.lock().await;
            self.store.close_expired(cutoff).await
        };
        let closed = result.map_err(AuctionError::StorageUpdateFailed)?;

        if closed > 0 {
            info!(
                "{:<12} --> 만료 경매 {}건 종료 (cutoff: {})",
                "Repository", closed, cutoff
            );
        } else {
            debug!(
                "{:<12} --> 종료할 만료 경매 없음 (cutoff: {})",
                "Repository", cutoff
            );
        }
        Ok(closed)
    }

    /// 경매 조회
    pub async fn find_auction_by_id(&self, id: &str) -> Result<Option<Auction>, AuctionError> {
        self.store
            .find_one(id)
            .await
            .map_err(AuctionError::StorageReadFailed)
    }

    /// 경매 목록 조회
    pub async fn find_auctions(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, AuctionError> {
        self.store
            .find(filter)
            .await
            .map_err(AuctionError::StorageReadFailed)
    }
}

/// 만료 기준 시각 (epoch 초)
pub fn expiration_cutoff(now: DateTime<Utc>, expiration: Duration) -> i64 {
    let expiration = i64::try_from(expiration.as_secs()).unwrap_or(i64::MAX);
    now.timestamp().saturating_sub(expiration)
}
// endregion: --- Auction Repository
