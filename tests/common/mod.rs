#![allow(dead_code)]

use async_trait::async_trait;
use auction_expiry::auction::{Auction, AuctionFilter, AuctionStatus, ProductCondition};
use auction_expiry::database::{MemoryRecordStore, RecordStore};
use auction_expiry::error::StoreError;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// 테스트용 Open 경매
pub fn open_auction(id: &str, created_at: DateTime<Utc>) -> Auction {
    Auction {
        id: id.to_string(),
        product_name: "Test Product Name".to_string(),
        category: "Test Category".to_string(),
        description: "This is a test product description".to_string(),
        condition: ProductCondition::New,
        status: AuctionStatus::Open,
        timestamp: created_at.timestamp(),
    }
}

fn unreachable_store() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

/// 실패를 주입할 수 있는 저장소
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryRecordStore,
    fail_inserts: AtomicBool,
    failing_updates: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// 다음 `count` 번의 일괄 업데이트를 실패시킴
    pub fn fail_next_updates(&self, count: usize) {
        self.failing_updates.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(unreachable_store());
        }
        self.inner.insert(auction).await
    }

    async fn close_expired(&self, cutoff: i64) -> Result<u64, StoreError> {
        let failed = self
            .failing_updates
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(unreachable_store());
        }
        self.inner.close_expired(cutoff).await
    }

    async fn find_one(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        self.inner.find_one(id).await
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError> {
        self.inner.find(filter).await
    }
}

/// 동시에 진행 중인 쓰기 수를 기록하는 저장소
pub struct CountingStore {
    inner: MemoryRecordStore,
    write_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    sweeps: AtomicUsize,
}

impl CountingStore {
    pub fn new(write_delay: Duration) -> Self {
        Self {
            inner: MemoryRecordStore::new(),
            write_delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            sweeps: AtomicUsize::new(0),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn sweeps(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }

    async fn write<T>(&self, op: impl std::future::Future<Output = T>) -> T {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(self.write_delay).await;
        let result = op.await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        self.write(self.inner.insert(auction)).await
    }

    async fn close_expired(&self, cutoff: i64) -> Result<u64, StoreError> {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        self.write(self.inner.close_expired(cutoff)).await
    }

    async fn find_one(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        self.inner.find_one(id).await
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError> {
        self.inner.find(filter).await
    }
}
