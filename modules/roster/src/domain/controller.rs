//! Background owner of a [`RosterView`].
//!
//! One task owns the view. It ticks the refresh interval, issues fetches
//! without waiting for earlier ones, applies completions through the view's
//! request sequence check, and serves commands. Every state change is
//! published on a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

use crate::contract::model::{RosterAction, RosterDisplay, UserRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::RosterSource;
use crate::domain::view::RosterView;

/// Floor for the refresh timer; `tokio::time::interval` rejects zero.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

type FetchOutcome = (u64, Result<Vec<UserRecord>, DomainError>);

enum Command {
    Dispatch(RosterAction, oneshot::Sender<Result<(), DomainError>>),
    Refresh,
    Select(u64, oneshot::Sender<Result<UserRecord, DomainError>>),
}

/// Handle to a running roster view. Dropping it stops the refresh timer.
pub struct RosterHandle {
    commands: mpsc::Sender<Command>,
    display: watch::Receiver<RosterDisplay>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RosterHandle {
    /// Start the owner task. The first fetch is issued immediately.
    /// A zero interval is raised to one millisecond.
    pub fn spawn(
        source: Arc<dyn RosterSource>,
        view: RosterView,
        refresh_interval: Duration,
    ) -> Self {
        let (commands, rx) = mpsc::channel(32);
        let (display_tx, display) = watch::channel(view.display());
        let cancel = CancellationToken::new();

        let owner = Owner {
            source,
            view,
            refresh_interval: refresh_interval.max(MIN_REFRESH_INTERVAL),
            display: display_tx,
            next_seq: 0,
        };
        let task = tokio::spawn(
            owner
                .run(rx, cancel.clone())
                .instrument(tracing::info_span!("roster.view")),
        );

        Self {
            commands,
            display,
            cancel,
            task: Some(task),
        }
    }

    pub async fn dispatch(&self, action: RosterAction) -> Result<(), DomainError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Dispatch(action, tx)).await?;
        rx.await.map_err(|_| DomainError::Stopped)?
    }

    /// Issue an out-of-band fetch. Does not wait for it to complete.
    pub async fn refresh_now(&self) -> Result<(), DomainError> {
        self.send(Command::Refresh).await
    }

    /// Look a record up in the snapshot currently held by the view.
    pub async fn select(&self, id: u64) -> Result<UserRecord, DomainError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Select(id, tx)).await?;
        rx.await.map_err(|_| DomainError::Stopped)?
    }

    pub fn subscribe(&self) -> watch::Receiver<RosterDisplay> {
        self.display.clone()
    }

    pub fn current(&self) -> RosterDisplay {
        self.display.borrow().clone()
    }

    /// Stop the refresh timer and wait for the owner task to exit.
    /// In-flight fetches are detached, not aborted.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "roster view task ended abnormally");
            }
        }
    }

    async fn send(&self, command: Command) -> Result<(), DomainError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| DomainError::Stopped)
    }
}

impl Drop for RosterHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Owner {
    source: Arc<dyn RosterSource>,
    view: RosterView,
    refresh_interval: Duration,
    display: watch::Sender<RosterDisplay>,
    next_seq: u64,
}

impl Owner {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight: JoinSet<FetchOutcome> = JoinSet::new();

        info!(interval = ?self.refresh_interval, "roster view started");
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                Some(command) = commands.recv() => self.handle(command, &mut in_flight),
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                    Ok((seq, result)) => {
                        if let Err(e) = &result {
                            warn!(seq, error = %e, "roster refresh failed");
                        }
                        if self.view.apply_fetch(seq, result) {
                            self.publish();
                        }
                    }
                    Err(e) => warn!(error = %e, "roster fetch task failed"),
                },
                _ = ticker.tick() => self.issue_fetch(&mut in_flight),
            }
        }

        in_flight.detach_all();
        info!("roster view stopped");
    }

    fn handle(&mut self, command: Command, in_flight: &mut JoinSet<FetchOutcome>) {
        match command {
            Command::Dispatch(action, reply) => {
                debug!(?action, "roster action");
                let result = self.view.dispatch(action);
                if result.is_ok() {
                    self.publish();
                }
                let _ = reply.send(result);
            }
            Command::Refresh => self.issue_fetch(in_flight),
            Command::Select(id, reply) => {
                let _ = reply.send(self.view.select(id));
            }
        }
    }

    fn issue_fetch(&mut self, in_flight: &mut JoinSet<FetchOutcome>) {
        self.next_seq += 1;
        let seq = self.next_seq;
        let source = Arc::clone(&self.source);
        debug!(seq, "issuing roster fetch");
        in_flight.spawn(
            async move { (seq, source.fetch_users().await) }
                .instrument(tracing::debug_span!("roster.view.fetch", seq)),
        );
    }

    fn publish(&self) {
        self.display.send_replace(self.view.display());
    }
}
