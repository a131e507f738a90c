// region:    --- Imports
use crate::error::{AuctionError, InvalidDiscriminant};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Enums

/// 상품 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum ProductCondition {
    New = 1,
    Used = 2,
    Refurbished = 3,
}

impl From<ProductCondition> for i16 {
    fn from(condition: ProductCondition) -> Self {
        condition as i16
    }
}

impl TryFrom<i16> for ProductCondition {
    type Error = InvalidDiscriminant;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::New),
            2 => Ok(Self::Used),
            3 => Ok(Self::Refurbished),
            _ => Err(InvalidDiscriminant {
                kind: "condition",
                value,
            }),
        }
    }
}

/// 경매 상태
/// Open -> Closed 단방향 전이만 허용 (만료 스윕만 변경)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum AuctionStatus {
    Open = 0,
    Closed = 1,
}

impl From<AuctionStatus> for i16 {
    fn from(status: AuctionStatus) -> Self {
        status as i16
    }
}

impl TryFrom<i16> for AuctionStatus {
    type Error = InvalidDiscriminant;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            _ => Err(InvalidDiscriminant {
                kind: "status",
                value,
            }),
        }
    }
}

// endregion: --- Enums

// region:    --- Auction Model

/// 경매 레코드
/// `timestamp` 는 생성 시각 (epoch 초)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    pub timestamp: i64,
}

impl Auction {
    /// 새 경매 생성 (Open 상태, 현재 시각)
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
    ) -> Result<Self, AuctionError> {
        let auction = Self {
            id: Uuid::new_v4().to_string(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Open,
            timestamp: Utc::now().timestamp(),
        };
        auction.validate()?;
        Ok(auction)
    }

    /// 필드 길이 검증
    pub fn validate(&self) -> Result<(), AuctionError> {
        if self.product_name.chars().count() <= 1 {
            return Err(AuctionError::InvalidAuction(
                "product_name must be longer than 1 character".to_string(),
            ));
        }
        if self.category.chars().count() <= 2 {
            return Err(AuctionError::InvalidAuction(
                "category must be longer than 2 characters".to_string(),
            ));
        }
        if self.description.chars().count() <= 10 {
            return Err(AuctionError::InvalidAuction(
                "description must be longer than 10 characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.status == AuctionStatus::Open
    }
}

// endregion: --- Auction Model

// region:    --- Auction Filter

/// 경매 조회 조건 (모든 조건은 AND)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuctionFilter {
    pub status: Option<AuctionStatus>,
    pub category: Option<String>,
    /// 대소문자 무시 부분 일치
    pub product_name: Option<String>,
}

impl AuctionFilter {
    pub fn with_status(mut self, status: AuctionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    /// 메모리 저장소용 매칭
    pub fn matches(&self, auction: &Auction) -> bool {
        if let Some(status) = self.status {
            if auction.status != status {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &auction.category != category {
                return false;
            }
        }
        if let Some(product_name) = &self.product_name {
            let needle = product_name.to_lowercase();
            if !auction.product_name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }
}

// endregion: --- Auction Filter
