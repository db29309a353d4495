//! Click-to-earn. The backend owns the daily limit and the cooldown; the
//! tracker here only mirrors what it last reported so a countdown can be shown.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::{RequestHandler, Service, ServiceError};
use crate::models::earnings::{ClickStats, EarningsHistory, EarningsSummary, TimeRange};
use crate::repositories::api::{ApiError, DEFAULT_COOLDOWN_SECS};
use crate::repositories::earnings::EarningsRepository;

pub const STREAK_WARNING_CLICKS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running(u64),
    /// Reached zero on this tick; stats should be re-fetched right away.
    Expired,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CooldownTracker {
    remaining: u64,
    consecutive_clicks: u32,
}

impl CooldownTracker {
    pub fn sync(&mut self, stats: &ClickStats, now: DateTime<Utc>) {
        self.remaining = match stats.cooldown_until {
            Some(until) if stats.is_cooldown_active && until > now => {
                let millis = (until - now).num_milliseconds().max(0) as u64;
                millis.div_ceil(1000)
            }
            _ => 0,
        };

        if stats.consecutive_clicks > 0 {
            self.consecutive_clicks = stats.consecutive_clicks;
        }
    }

    /// A server rejection always wins over whatever the local timer says.
    pub fn reject(&mut self, remaining_secs: u64) {
        self.remaining = if remaining_secs == 0 {
            DEFAULT_COOLDOWN_SECS
        } else {
            remaining_secs
        };
    }

    pub fn record_clicks(&mut self, consecutive_clicks: u32) {
        if consecutive_clicks > 0 {
            self.consecutive_clicks = consecutive_clicks;
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self.remaining {
            0 => TickOutcome::Idle,
            1 => {
                self.remaining = 0;
                TickOutcome::Expired
            }
            _ => {
                self.remaining -= 1;
                TickOutcome::Running(self.remaining)
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub fn minutes(&self) -> u64 {
        self.remaining.div_ceil(60)
    }

    pub fn consecutive_clicks(&self) -> u32 {
        self.consecutive_clicks
    }

    /// `m:ss`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    pub fn show_streak_warning(&self) -> bool {
        self.consecutive_clicks >= STREAK_WARNING_CLICKS && !self.is_active()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClickOutcome {
    pub amount: f64,
    pub message: Option<String>,
    pub cooldown_warning: Option<String>,
    pub consecutive_clicks: u32,
}

pub enum EarningsRequest {
    Click {
        user_id: String,
        response: oneshot::Sender<Result<ClickOutcome, ServiceError>>,
    },
    Stats {
        user_id: String,
        response: oneshot::Sender<Result<ClickStats, ServiceError>>,
    },
    Summary {
        user_id: String,
        range: TimeRange,
        response: oneshot::Sender<Result<EarningsSummary, ServiceError>>,
    },
    History {
        user_id: String,
        range: TimeRange,
        limit: usize,
        response: oneshot::Sender<Result<EarningsHistory, ServiceError>>,
    },
    Cooldown {
        response: oneshot::Sender<CooldownTracker>,
    },
}

/// Holds the click slot; released on drop so a cancelled click cannot wedge it.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        (!flag.swap(true, Ordering::SeqCst)).then_some(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct EarningsRequestHandler {
    repository: EarningsRepository,
    tracker: Arc<Mutex<CooldownTracker>>,
    in_flight: Arc<AtomicBool>,
}

impl EarningsRequestHandler {
    pub fn new(repository: EarningsRepository) -> Self {
        Self {
            repository,
            tracker: Arc::new(Mutex::new(CooldownTracker::default())),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    fn tracker(&self) -> MutexGuard<'_, CooldownTracker> {
        self.tracker.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn cooldown(&self) -> CooldownTracker {
        self.tracker().clone()
    }

    pub async fn stats(&self, user_id: &str) -> Result<ClickStats, ServiceError> {
        let stats = self
            .repository
            .click_stats(user_id)
            .await
            .inspect_err(|e| log::error!("Error loading click stats: {}", e))?;

        self.tracker().sync(&stats, Utc::now());
        Ok(stats)
    }

    async fn click(&self, user_id: &str) -> Result<ClickOutcome, ServiceError> {
        {
            let tracker = self.tracker();
            if tracker.is_active() {
                return Err(ServiceError::CoolingDown(tracker.display()));
            }
        }
        let Some(guard) = InFlight::acquire(&self.in_flight) else {
            return Err(ServiceError::Busy);
        };

        let result = self.repository.click(user_id).await;
        drop(guard);

        let result = match result {
            Ok(result) => result,
            Err(ApiError::Cooldown {
                remaining_secs,
                message,
            }) => {
                log::warn!("Click refused by server, cooling down for {}s", remaining_secs);
                self.tracker().reject(remaining_secs);
                return Err(ApiError::Cooldown {
                    remaining_secs,
                    message,
                }
                .into());
            }
            Err(e) => {
                log::error!("Error clicking to earn: {}", e);
                return Err(e.into());
            }
        };

        let reward = result.reward;
        self.tracker()
            .record_clicks(reward.consecutive_clicks.unwrap_or_default());
        if let Err(e) = self.stats(user_id).await {
            log::warn!("Could not refresh click stats after a click: {}", e);
        }

        Ok(ClickOutcome {
            amount: reward.earning_amount,
            message: result.message,
            cooldown_warning: reward.cooldown_warning,
            consecutive_clicks: self.tracker().consecutive_clicks(),
        })
    }

    /// Drives the local countdown once per second. Stats are re-fetched every
    /// `sync_every` while cooling down and as soon as the countdown expires.
    pub fn start_cooldown_sync(&self, user_id: String, sync_every: Duration) -> JoinHandle<()> {
        let handler = self.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            interval.tick().await;
            let mut since_sync = Duration::ZERO;

            loop {
                interval.tick().await;

                let outcome = handler.tracker().tick();
                let resync = match outcome {
                    TickOutcome::Idle => {
                        since_sync = Duration::ZERO;
                        false
                    }
                    TickOutcome::Expired => true,
                    TickOutcome::Running(_) => {
                        since_sync += Duration::from_secs(1);
                        since_sync >= sync_every
                    }
                };

                if resync {
                    since_sync = Duration::ZERO;
                    if let Err(e) = handler.stats(&user_id).await {
                        log::error!("Cooldown sync failed: {}", e);
                    }
                }
            }
        })
    }
}

#[async_trait]
impl RequestHandler<EarningsRequest> for EarningsRequestHandler {
    async fn handle_request(&self, request: EarningsRequest) {
        match request {
            EarningsRequest::Click { user_id, response } => {
                let outcome = self.click(&user_id).await;
                let _ = response.send(outcome);
            }
            EarningsRequest::Stats { user_id, response } => {
                let stats = self.stats(&user_id).await;
                let _ = response.send(stats);
            }
            EarningsRequest::Summary {
                user_id,
                range,
                response,
            } => {
                let summary = self
                    .repository
                    .summary(&user_id, range)
                    .await
                    .map_err(ServiceError::from);
                let _ = response.send(summary);
            }
            EarningsRequest::History {
                user_id,
                range,
                limit,
                response,
            } => {
                let history = self
                    .repository
                    .history(&user_id, range, limit)
                    .await
                    .map_err(ServiceError::from);
                let _ = response.send(history);
            }
            EarningsRequest::Cooldown { response } => {
                let _ = response.send(self.cooldown());
            }
        }
    }
}

pub struct EarningsService;

impl EarningsService {
    pub fn new() -> Self {
        EarningsService {}
    }
}

impl Default for EarningsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Service<EarningsRequest, EarningsRequestHandler> for EarningsService {}

/// Sending side of the earnings service.
#[derive(Clone)]
pub struct EarningsClient {
    channel: mpsc::Sender<EarningsRequest>,
}

macro_rules! ask {
    ($self:expr, $variant:ident { $($field:ident),* }) => {{
        let (tx, rx) = oneshot::channel();
        $self
            .channel
            .send(EarningsRequest::$variant { $($field,)* response: tx })
            .await
            .map_err(|e| ServiceError::Communication("Earnings".to_string(), e.to_string()))?;
        rx.await
            .map_err(|e| ServiceError::Communication("Earnings".to_string(), e.to_string()))
    }};
}

impl EarningsClient {
    /// Spawns the service loop and returns a client for it.
    pub fn spawn(handler: EarningsRequestHandler) -> Self {
        let (channel, mut receiver) = mpsc::channel(64);
        let mut service = EarningsService::new();

        tokio::spawn(async move {
            service.run(handler, &mut receiver).await;
        });

        Self { channel }
    }

    pub async fn click(&self, user_id: String) -> Result<ClickOutcome, ServiceError> {
        ask!(self, Click { user_id })?
    }

    pub async fn stats(&self, user_id: String) -> Result<ClickStats, ServiceError> {
        ask!(self, Stats { user_id })?
    }

    pub async fn summary(
        &self,
        user_id: String,
        range: TimeRange,
    ) -> Result<EarningsSummary, ServiceError> {
        ask!(self, Summary { user_id, range })?
    }

    pub async fn history(
        &self,
        user_id: String,
        range: TimeRange,
        limit: usize,
    ) -> Result<EarningsHistory, ServiceError> {
        ask!(self, History { user_id, range, limit })?
    }

    pub async fn cooldown(&self) -> Result<CooldownTracker, ServiceError> {
        ask!(self, Cooldown {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn stats(active: bool, until: Option<DateTime<Utc>>, consecutive: u32) -> ClickStats {
        ClickStats {
            is_cooldown_active: active,
            cooldown_until: until,
            consecutive_clicks: consecutive,
            ..ClickStats::default()
        }
    }

    #[test]
    fn sync_rounds_remaining_up() {
        let now = Utc::now();
        let mut tracker = CooldownTracker::default();

        tracker.sync(&stats(true, Some(now + ChronoDuration::milliseconds(90_200)), 2), now);

        assert_eq!(tracker.remaining_secs(), 91);
        assert_eq!(tracker.minutes(), 2);
        assert_eq!(tracker.display(), "1:31");
        assert_eq!(tracker.consecutive_clicks(), 2);
    }

    #[test]
    fn past_or_inactive_cooldowns_clear_the_timer() {
        let now = Utc::now();
        let mut tracker = CooldownTracker::default();
        tracker.reject(30);

        tracker.sync(&stats(true, Some(now - ChronoDuration::seconds(5)), 0), now);
        assert!(!tracker.is_active());

        tracker.reject(30);
        tracker.sync(&stats(false, Some(now + ChronoDuration::seconds(60)), 0), now);
        assert!(!tracker.is_active());
    }

    #[test]
    fn ticks_down_to_expiry() {
        let mut tracker = CooldownTracker::default();
        assert_eq!(tracker.tick(), TickOutcome::Idle);

        tracker.reject(3);
        assert_eq!(tracker.tick(), TickOutcome::Running(2));
        assert_eq!(tracker.tick(), TickOutcome::Running(1));
        assert_eq!(tracker.tick(), TickOutcome::Expired);
        assert_eq!(tracker.tick(), TickOutcome::Idle);
        assert_eq!(tracker.display(), "0:00");
    }

    #[test]
    fn rejection_overrides_local_timer() {
        let mut tracker = CooldownTracker::default();
        tracker.reject(5);
        tracker.reject(240);
        assert_eq!(tracker.remaining_secs(), 240);

        tracker.reject(0);
        assert_eq!(tracker.remaining_secs(), DEFAULT_COOLDOWN_SECS);
    }

    #[test]
    fn streak_warning_hides_during_cooldown() {
        let mut tracker = CooldownTracker::default();
        tracker.record_clicks(4);
        assert!(tracker.show_streak_warning());

        tracker.reject(10);
        assert!(!tracker.show_streak_warning());

        tracker.record_clicks(0);
        assert_eq!(tracker.consecutive_clicks(), 4);
    }

    #[test]
    fn click_slot_is_released_on_drop() {
        let flag = AtomicBool::new(false);

        let guard = InFlight::acquire(&flag).unwrap();
        assert!(InFlight::acquire(&flag).is_none());
        drop(guard);
        assert!(InFlight::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn cancelled_click_does_not_wedge_the_handler() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let api = crate::repositories::api::ApiClient::new(&format!("http://{}/api", addr), 30).unwrap();
        let handler = EarningsRequestHandler::new(EarningsRepository::new(api));

        let pending = tokio::time::timeout(Duration::from_millis(200), handler.click("9876543210")).await;
        assert!(pending.is_err());
        assert!(!handler.in_flight.load(Ordering::SeqCst));
        silent.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn sync_task_counts_down_once_per_second() {
        let api = crate::repositories::api::ApiClient::new("http://127.0.0.1:9/api", 1).unwrap();
        let handler = EarningsRequestHandler::new(EarningsRepository::new(api));
        handler.tracker().reject(3);

        let sync = handler.start_cooldown_sync("9876543210".to_string(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(handler.cooldown().remaining_secs(), 2);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!handler.cooldown().is_active());
        sync.abort();
    }
}
