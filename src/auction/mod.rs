pub mod model;

pub use model::{Auction, AuctionFilter, AuctionStatus, ProductCondition};
