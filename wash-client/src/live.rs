//! Live wash-session monitor
//!
//! Polls the wash-session list every five seconds while the screen is open
//! and publishes snapshots over a `watch` channel. The elapsed-time labels
//! are recomputed by the consumer once per second from the last snapshot
//! (see `WashSession::elapsed_label`).
//!
//! Two guards keep the view consistent:
//! - a tick is skipped while the previous fetch is still unresolved
//! - responses issued before a filter change or a stop are discarded

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::models::{SessionStatus, WashSession};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::{AdminApi, WashSessionQuery};
use crate::http::HttpClient;
use crate::view::Generation;
use crate::ClientResult;

/// Refetch period of the live view
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// State published to the live view
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub sessions: Vec<WashSession>,
    /// Status filter the sessions were fetched with; `None` means all
    pub status: Option<SessionStatus>,
    pub error: Option<String>,
    pub loading: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    /// Sessions currently running or paused
    pub fn live(&self) -> impl Iterator<Item = &WashSession> {
        self.sessions.iter().filter(|s| s.status.is_live())
    }
}

/// Result of one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Updated(usize),
    Failed,
    /// Previous fetch still running
    Skipped,
    /// Superseded by a newer fetch
    Stale,
}

struct Inner<C> {
    http: C,
    status: Mutex<Option<SessionStatus>>,
    generation: Generation,
    in_flight: AtomicBool,
    tx: watch::Sender<SessionSnapshot>,
    cancel: CancellationToken,
}

/// Polling wash-session monitor, clones share one state
pub struct SessionMonitor<C> {
    inner: Arc<Inner<C>>,
    interval: Duration,
}

impl<C> Clone for SessionMonitor<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            interval: self.interval,
        }
    }
}

impl<C: HttpClient + 'static> SessionMonitor<C> {
    /// Monitor of `ACTIVE` sessions
    pub fn new(http: C) -> Self {
        let status = Some(SessionStatus::Active);
        let (tx, _rx) = watch::channel(SessionSnapshot {
            status,
            ..Default::default()
        });
        Self {
            inner: Arc::new(Inner {
                http,
                status: Mutex::new(status),
                generation: Generation::new(),
                in_flight: AtomicBool::new(false),
                tx,
                cancel: CancellationToken::new(),
            }),
            interval: POLL_INTERVAL,
        }
    }

    pub fn with_status(self, status: Option<SessionStatus>) -> Self {
        *self.inner.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
        self.inner.tx.send_modify(|s| s.status = status);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    pub fn status(&self) -> Option<SessionStatus> {
        *self.inner.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Token that stops [`run`](Self::run)
    pub fn cancel_token(&self) -> CancellationToken {
        self.inner.cancel.clone()
    }

    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    /// Change the status filter and refetch; older responses are dropped
    pub async fn set_status(&self, status: Option<SessionStatus>) -> FetchOutcome {
        *self.inner.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
        self.inner.tx.send_modify(|s| {
            s.status = status;
            s.sessions.clear();
        });
        self.fetch(true).await
    }

    /// Scheduled fetch, skipped while another one is unresolved
    pub async fn tick(&self) -> FetchOutcome {
        self.fetch(false).await
    }

    /// Fetch now, superseding anything in flight
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch(true).await
    }

    /// Force-finish a session, then refetch immediately
    pub async fn stop(&self, session_id: &str) -> ClientResult<WashSession> {
        let stopped = AdminApi::new(&self.inner.http)
            .stop_wash_session(session_id)
            .await?;
        tracing::info!(session = %session_id, "Wash session stopped");
        self.refresh().await;
        Ok(stopped)
    }

    async fn fetch(&self, forced: bool) -> FetchOutcome {
        let inner = &self.inner;
        if inner.in_flight.swap(true, Ordering::SeqCst) && !forced {
            tracing::debug!("Previous session fetch unresolved, skipping tick");
            return FetchOutcome::Skipped;
        }

        let ticket = inner.generation.issue();
        let status = self.status();
        inner.tx.send_modify(|s| s.loading = true);

        let query = WashSessionQuery {
            status,
            kiosk_id: None,
        };
        let result = AdminApi::new(&inner.http).wash_sessions(&query).await;

        if !inner.generation.is_current(ticket) {
            tracing::debug!("Discarding stale session response");
            return FetchOutcome::Stale;
        }
        inner.in_flight.store(false, Ordering::SeqCst);
        if inner.cancel.is_cancelled() {
            return FetchOutcome::Stale;
        }

        match result {
            Ok(sessions) => {
                let count = sessions.len();
                inner.tx.send_modify(|s| {
                    s.sessions = sessions;
                    s.status = status;
                    s.error = None;
                    s.loading = false;
                    s.fetched_at = Some(Utc::now());
                });
                FetchOutcome::Updated(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wash session fetch failed");
                let message = e.user_message();
                inner.tx.send_modify(|s| {
                    s.error = Some(message);
                    s.loading = false;
                });
                FetchOutcome::Failed
            }
        }
    }

    /// Poll until cancelled; each tick fetches in its own task
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let cancel = self.cancel_token();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Session monitor stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let monitor = self.clone();
                    tokio::spawn(async move {
                        monitor.tick().await;
                    });
                }
            }
        }
    }

    /// Start polling in the background
    pub fn spawn(&self) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move { monitor.run().await })
    }
}
