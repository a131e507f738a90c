// region:    --- Imports
use crate::auction::{Auction, AuctionFilter};
use crate::error::StoreError;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Modules
mod memory;
mod postgres;
pub mod queries;

pub use memory::MemoryRecordStore;
pub use postgres::PostgresRecordStore;

// endregion: --- Modules

// region:    --- Record Store Trait

/// 경매 레코드 저장소
/// insert / 조건 조회 / 일괄 조건부 업데이트만 노출
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// 키 중복 시 `StoreError::Duplicate`
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError>;

    /// status = Open AND timestamp < cutoff 인 레코드를 Closed 로 변경, 변경 건수 반환
    async fn close_expired(&self, cutoff: i64) -> Result<u64, StoreError>;

    async fn find_one(&self, id: &str) -> Result<Option<Auction>, StoreError>;

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        (**self).insert(auction).await
    }

    async fn close_expired(&self, cutoff: i64) -> Result<u64, StoreError> {
        (**self).close_expired(cutoff).await
    }

    async fn find_one(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        (**self).find_one(id).await
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError> {
        (**self).find(filter).await
    }
}

// endregion: --- Record Store Trait

// region:    --- Database Manager
pub struct DatabaseManager {
    pub pool: Arc<PgPool>,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    /// DATABASE_URL 필수, DATABASE_MAX_CONNECTIONS 기본 5
    pub async fn new() -> Result<Self, sqlx::Error> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(5);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&database_url)
            .await?;
        info!(
            "{:<12} --> 커넥션 풀 생성 (max_connections: {})",
            "Database", max_connections
        );
        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// 데이터베이스 풀 가져오기
    pub fn get_pool(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    /// 경매 레코드 저장소 생성
    pub fn record_store(&self) -> PostgresRecordStore {
        PostgresRecordStore::new(self.get_pool())
    }

    /// 데이터베이스 초기화
    pub async fn initialize_database(&self) -> Result<(), sqlx::Error> {
        // 01-create-schema.sql 실행
        let create_schema_sql = include_str!("../../sql/01-create-schema.sql");
        self.execute_multi_query(create_schema_sql).await?;

        Ok(())
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(&self, sql: &str) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = strip_comments(query);
            if !query.is_empty() {
                sqlx::query(&query).execute(&*self.pool).await?;
            }
        }
        Ok(())
    }
}

/// `--` 주석 라인 제거
fn strip_comments(sql: &str) -> String {
    sql.lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
// endregion: --- Database Manager
