//! 경매 만료 스케줄러
//! 저장소 인스턴스마다 하나의 백그라운드 태스크가 주기적으로 만료 스윕을 실행한다.
//! 만료 후 최대 한 주기(poll interval)까지 종료가 지연될 수 있다.
// region:    --- Imports
use crate::config::ExpirySettings;
use crate::database::RecordStore;
use crate::error::SchedulerError;
use crate::repository::AuctionRepository;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod clock;

pub use clock::{Clock, RuntimeClock, SystemClock};

// endregion: --- Imports

// region:    --- Scheduler State

/// 스케줄러 생명주기 (Created -> Running -> Stopped, 재시작 불가)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Created,
    Running,
    Stopped,
}

// endregion: --- Scheduler State

// region:    --- Expiration Scheduler
/// 경매 만료 스케줄러
pub struct ExpirationScheduler<S> {
    repository: Arc<AuctionRepository<S>>,
    clock: Arc<dyn Clock>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    settings: Option<ExpirySettings>,
    state: SchedulerState,
}

impl<S: RecordStore> ExpirationScheduler<S> {
    /// 경매 만료 스케줄러 생성
    pub fn new(repository: Arc<AuctionRepository<S>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            cancel: CancellationToken::new(),
            handle: None,
            settings: None,
            state: SchedulerState::Created,
        }
    }

    /// 생성과 동시에 시작
    pub fn spawn(
        repository: Arc<AuctionRepository<S>>,
        clock: Arc<dyn Clock>,
        settings: ExpirySettings,
        parent: &CancellationToken,
    ) -> Result<Self, SchedulerError> {
        let mut scheduler = Self::new(repository, clock);
        scheduler.start(settings, parent)?;
        Ok(scheduler)
    }

    /// 경매 만료 스케줄러 시작
    /// 첫 스윕은 한 주기 뒤에 실행된다.
    /// 저장소에 이미 다른 스케줄러가 연결되어 있으면 `AlreadyAttached`
    pub fn start(
        &mut self,
        settings: ExpirySettings,
        parent: &CancellationToken,
    ) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Created {
            return Err(SchedulerError::AlreadyStarted);
        }
        if !self.repository.attach_scheduler() {
            return Err(SchedulerError::AlreadyAttached);
        }
        self.launch(settings, parent);
        Ok(())
    }

    /// 환경 변수 설정으로 시작
    pub fn start_from_env(&mut self, parent: &CancellationToken) -> Result<(), SchedulerError> {
        self.start(ExpirySettings::from_env(), parent)
    }

    fn launch(&mut self, settings: ExpirySettings, parent: &CancellationToken) {
        self.cancel = parent.child_token();
        let repository = Arc::clone(&self.repository);
        let clock = Arc::clone(&self.clock);
        let cancel = self.cancel.clone();

        info!(
            "{:<12} --> 스케줄러 시작 (expiration: {}, interval: {})",
            "Scheduler",
            humantime::format_duration(settings.expiration),
            humantime::format_duration(settings.poll_interval)
        );
        self.handle = Some(tokio::spawn(Self::run(
            repository, clock, settings, cancel,
        )));
        self.settings = Some(settings);
        self.state = SchedulerState::Running;
    }

    /// 경매 만료 스케줄러 중지
    /// 진행 중인 스윕은 끝까지 실행된 뒤 종료된다.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("{:<12} --> 스케줄러 태스크 종료 오류: {:?}", "Scheduler", e);
            }
        }
        self.state = SchedulerState::Stopped;
    }

    pub fn state(&self) -> SchedulerState {
        match (&self.state, &self.handle) {
            (SchedulerState::Running, Some(handle)) if handle.is_finished() => {
                SchedulerState::Stopped
            }
            (state, _) => *state,
        }
    }

    /// 시작 시 해석된 설정
    pub fn settings(&self) -> Option<ExpirySettings> {
        self.settings
    }

    /// 스케줄러 루프
    async fn run(
        repository: Arc<AuctionRepository<S>>,
        clock: Arc<dyn Clock>,
        settings: ExpirySettings,
        cancel: CancellationToken,
    ) {
        let mut ticker = interval_at(
            Instant::now() + settings.poll_interval,
            settings.poll_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    Self::sweep(&repository, clock.as_ref(), settings.expiration).await;
                }
            }
        }

        info!("{:<12} --> 스케줄러 중지", "Scheduler");
    }

    /// 만료 스윕 (오류는 로그만 남기고 다음 주기에 재시도)
    async fn sweep(repository: &AuctionRepository<S>, clock: &dyn Clock, expiration: Duration) {
        if let Err(e) = repository
            .close_expired_auctions(clock.now(), expiration)
            .await
        {
            error!(
                "{:<12} --> 만료 경매 종료 중 오류 발생: {:?}",
                "Scheduler", e
            );
        }
    }
}

impl<S> Drop for ExpirationScheduler<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
// endregion: --- Expiration Scheduler
