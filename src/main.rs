// region:    --- Imports
use auction_expiry::config::ExpirySettings;
use auction_expiry::database::DatabaseManager;
use auction_expiry::repository::AuctionRepository;
use auction_expiry::scheduler::{ExpirationScheduler, SystemClock};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = match DatabaseManager::new().await {
        Ok(db_manager) => db_manager,
        Err(e) => {
            error!("{:<12} --> 데이터베이스 연결 실패: {:?}", "Main", e);
            return Err(e.into());
        }
    };

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 경매 저장소 및 만료 스케줄러
    let repository = Arc::new(AuctionRepository::new(db_manager.record_store()));
    let shutdown = CancellationToken::new();
    let mut scheduler = ExpirationScheduler::spawn(
        Arc::clone(&repository),
        Arc::new(SystemClock),
        ExpirySettings::from_env(),
        &shutdown,
    )?;

    // 종료 시그널 대기
    tokio::signal::ctrl_c().await?;
    info!("{:<12} --> 종료 시그널 수신", "Main");
    shutdown.cancel();
    scheduler.stop().await;

    Ok(())
}
// endregion: --- Main
