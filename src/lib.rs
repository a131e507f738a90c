pub mod auction;
pub mod config;
pub mod database;
pub mod error;
pub mod repository;
pub mod scheduler;
