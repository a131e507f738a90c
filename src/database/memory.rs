// region:    --- Imports
use super::RecordStore;
use crate::auction::{Auction, AuctionFilter, AuctionStatus};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

// endregion: --- Imports

// region:    --- Memory Record Store

/// 메모리 경매 저장소 (테스트 / 임베디드용)
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, Auction>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&auction.id) {
            return Err(StoreError::Duplicate(auction.id.clone()));
        }
        records.insert(auction.id.clone(), auction.clone());
        Ok(())
    }

    async fn close_expired(&self, cutoff: i64) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let mut modified = 0;
        for auction in records.values_mut() {
            if auction.status == AuctionStatus::Open && auction.timestamp < cutoff {
                auction.status = AuctionStatus::Closed;
                modified += 1;
            }
        }
        Ok(modified)
    }

    async fn find_one(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError> {
        let records = self.records.read().await;
        let mut auctions: Vec<Auction> = records
            .values()
            .filter(|auction| filter.matches(auction))
            .cloned()
            .collect();
        auctions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(auctions)
    }
}

// endregion: --- Memory Record Store
