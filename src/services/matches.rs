use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::Rng;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

use super::ServiceError;
use crate::models::matches::{Match, MatchList};
use crate::repositories::cricket::CricketRepository;

pub const HOME_PREVIEW: usize = 3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchSnapshot {
    pub matches: MatchList,
    pub notice: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Live and upcoming matches, refreshed in the background. The last good
/// snapshot is kept when a refresh fails.
#[derive(Clone)]
pub struct MatchFeed {
    repository: CricketRepository,
    cache: Arc<RwLock<MatchSnapshot>>,
    details: Arc<DashMap<String, Value>>,
    updates: watch::Sender<MatchSnapshot>,
}

impl MatchFeed {
    pub fn new(repository: CricketRepository) -> Self {
        let (updates, _) = watch::channel(MatchSnapshot::default());

        Self {
            repository,
            cache: Arc::new(RwLock::new(MatchSnapshot::default())),
            details: Arc::new(DashMap::new()),
            updates,
        }
    }

    pub async fn refresh(&self) -> Result<MatchSnapshot, ServiceError> {
        let fetch = self.repository.matches().await?;
        if let Some(notice) = &fetch.notice {
            log::warn!("Match feed notice: {}", notice);
        }

        let snapshot = MatchSnapshot {
            matches: fetch.matches,
            notice: fetch.notice,
            fetched_at: Some(Utc::now()),
        };

        *self.cache.write().await = snapshot.clone();
        self.updates.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    pub fn start_refresh_task(&self, every: Duration, jitter_ms: u64) -> JoinHandle<()> {
        let feed = self.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            loop {
                interval.tick().await;
                if jitter_ms > 0 {
                    let delay = rand::thread_rng().gen_range(0..=jitter_ms);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }

                match feed.refresh().await {
                    Ok(snapshot) => log::debug!(
                        "Fetched matches: {} live, {} upcoming",
                        snapshot.matches.live.len(),
                        snapshot.matches.upcoming.len()
                    ),
                    Err(e) => log::error!("Error refreshing matches: {}", e),
                }
            }
        });

        log::info!("Match refresh task started");
        handle
    }

    pub async fn snapshot(&self) -> MatchSnapshot {
        self.cache.read().await.clone()
    }

    pub async fn home_preview(&self) -> MatchList {
        self.cache.read().await.matches.preview(HOME_PREVIEW)
    }

    pub fn subscribe(&self) -> watch::Receiver<MatchSnapshot> {
        self.updates.subscribe()
    }

    pub async fn details(&self, match_id: &str) -> Result<Value, ServiceError> {
        if let Some(details) = self.details.get(match_id) {
            return Ok(details.clone());
        }

        let details = self.repository.match_details(match_id).await?;
        self.details.insert(match_id.to_string(), details.clone());
        Ok(details)
    }

    pub async fn current(&self) -> Result<Vec<Match>, ServiceError> {
        Ok(self.repository.current_matches().await?)
    }

    pub async fn upcoming(&self) -> Result<Vec<Match>, ServiceError> {
        Ok(self.repository.upcoming_matches().await?)
    }

    pub async fn series(&self) -> Result<Vec<Value>, ServiceError> {
        Ok(self.repository.series().await?)
    }
}
