// region:    --- Imports
use super::{queries, RecordStore};
use crate::auction::{Auction, AuctionFilter, AuctionStatus};
use crate::error::{InvalidDiscriminant, StoreError};
use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

// endregion: --- Imports

// region:    --- Row Model

/// auctions 테이블 행
#[derive(Debug, FromRow)]
struct AuctionRow {
    id: String,
    product_name: String,
    category: String,
    description: String,
    condition: i16,
    status: i16,
    timestamp: i64,
}

impl TryFrom<AuctionRow> for Auction {
    type Error = InvalidDiscriminant;

    fn try_from(row: AuctionRow) -> Result<Self, Self::Error> {
        Ok(Auction {
            id: row.id,
            product_name: row.product_name,
            category: row.category,
            description: row.description,
            condition: row.condition.try_into()?,
            status: row.status.try_into()?,
            timestamp: row.timestamp,
        })
    }
}

// endregion: --- Row Model

// region:    --- Postgres Record Store

/// PostgreSQL 경매 저장소
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: Arc<PgPool>,
}

impl PostgresRecordStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn insert(&self, auction: &Auction) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_AUCTION)
            .bind(&auction.id)
            .bind(&auction.product_name)
            .bind(&auction.category)
            .bind(&auction.description)
            .bind(i16::from(auction.condition))
            .bind(i16::from(auction.status))
            .bind(auction.timestamp)
            .execute(&*self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    StoreError::Duplicate(auction.id.clone())
                }
                other => StoreError::Database(other),
            })?;
        Ok(())
    }

    async fn close_expired(&self, cutoff: i64) -> Result<u64, StoreError> {
        let result = sqlx::query(queries::CLOSE_EXPIRED_AUCTIONS)
            .bind(i16::from(AuctionStatus::Closed))
            .bind(i16::from(AuctionStatus::Open))
            .bind(cutoff)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_one(&self, id: &str) -> Result<Option<Auction>, StoreError> {
        let row = sqlx::query_as::<_, AuctionRow>(queries::GET_AUCTION)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(Auction::try_from).transpose()?)
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<Auction>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(queries::SELECT_AUCTIONS);
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(i16::from(status));
        }
        if let Some(category) = &filter.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(product_name) = &filter.product_name {
            builder
                .push(" AND product_name ILIKE ")
                .push_bind(format!("%{}%", escape_like(product_name)));
        }
        builder.push(r#" ORDER BY "timestamp" DESC"#);

        let rows = builder
            .build_query_as::<AuctionRow>()
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter()
            .map(|row| Auction::try_from(row).map_err(StoreError::from))
            .collect()
    }
}

/// LIKE 패턴 특수문자 이스케이프
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// endregion: --- Postgres Record Store
