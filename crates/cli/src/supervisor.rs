//! Watch supervisor lifecycle
//!
//! ```text
//! Idle ──start──> Running ──timer | shutdown | worker exit──> Draining ──join, stop, close──> Terminated
//!   │                                                            ^
//!   └──────────────────────── shutdown ─────────────────────────┘
//! ```
//!
//! The worker owns the session and the sink while it runs. Cleanup can only
//! start once the worker has handed them back, and it runs exactly once
//! whichever trigger ended the run.

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::worker::{self, WorkerExit};
use std::future::{self, Future};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use watchlog_core::{OwnerResolver, SystemOwnerResolver};
use watchlog_journal::LogSink;
use watchlog_watcher::WatchSession;

/// Supervisor lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Running,
    Draining,
    Terminated,
}

/// What moved the supervisor out of `Running`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured limit elapsed
    Timeout,
    /// Shutdown was requested (SIGINT, SIGTERM or the caller's token)
    Interrupted,
    /// The worker ended on its own
    WorkerExited,
}

/// Summary of a session that ended cleanly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub stop_reason: StopReason,
    pub entries_written: u64,
}

/// Runs one watch session from registration to cleanup
pub struct WatchSupervisor {
    config: SessionConfig,
    shutdown: CancellationToken,
    resolver: Arc<dyn OwnerResolver>,
    state: watch::Sender<SupervisorState>,
}

impl WatchSupervisor {
    /// Create a supervisor; cancelling `shutdown` ends the session from any state
    pub fn new(config: SessionConfig, shutdown: CancellationToken) -> Self {
        let (state, _) = watch::channel(SupervisorState::Idle);
        Self {
            config,
            shutdown,
            resolver: Arc::new(SystemOwnerResolver),
            state,
        }
    }

    /// Replace the owner lookup used for the USER column
    pub fn with_resolver(mut self, resolver: Arc<dyn OwnerResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Observe state transitions
    pub fn state(&self) -> watch::Receiver<SupervisorState> {
        self.state.subscribe()
    }

    /// Run the session to completion
    ///
    /// Fatal errors are returned only after cleanup has run.
    pub async fn run(self) -> Result<SessionReport, SessionError> {
        self.run_with(worker::drain).await
    }

    /// Run with `spawn_worker` producing the worker future
    async fn run_with<W, F>(self, spawn_worker: W) -> Result<SessionReport, SessionError>
    where
        W: FnOnce(WatchSession, LogSink, Arc<dyn OwnerResolver>, CancellationToken) -> F,
        F: Future<Output = WorkerExit> + Send + 'static,
    {
        if self.shutdown.is_cancelled() {
            info!("Shutdown requested before the session started");
            self.transition(SupervisorState::Draining);
            self.transition(SupervisorState::Terminated);
            return Ok(SessionReport {
                stop_reason: StopReason::Interrupted,
                entries_written: 0,
            });
        }

        let (session, sink) = match self.acquire() {
            Ok(acquired) => acquired,
            Err(e) => {
                self.transition(SupervisorState::Draining);
                self.transition(SupervisorState::Terminated);
                return Err(e);
            }
        };

        self.transition(SupervisorState::Running);

        let worker_cancel = CancellationToken::new();
        let mut worker = tokio::spawn(spawn_worker(
            session,
            sink,
            Arc::clone(&self.resolver),
            worker_cancel.clone(),
        ));

        let timer = expire(self.config.limit);
        tokio::pin!(timer);

        let (stop_reason, finished) = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => (StopReason::Interrupted, None),
            _ = &mut timer => (StopReason::Timeout, None),
            joined = &mut worker => (StopReason::WorkerExited, Some(joined)),
        };

        info!("Session ending: {:?}", stop_reason);
        self.transition(SupervisorState::Draining);

        let joined = match finished {
            Some(joined) => joined,
            None => {
                worker_cancel.cancel();
                worker.await
            }
        };

        let exit = match joined {
            Ok(exit) => exit,
            Err(e) => {
                // Unwinding dropped the session and sink, which released them.
                error!("Worker task failed: {}", e);
                self.transition(SupervisorState::Terminated);
                return Err(SessionError::WorkerPanicked);
            }
        };

        let outcome = release(exit, stop_reason);
        self.transition(SupervisorState::Terminated);
        outcome
    }

    /// Register the watch, then open the sink and write the header
    ///
    /// The watch goes first so an unwatchable path never touches the log file.
    fn acquire(&self) -> Result<(WatchSession, LogSink), SessionError> {
        let mut session =
            WatchSession::with_buffer_len(&self.config.tracked_path, self.config.buffer_len)?;

        let mut sink = match LogSink::open(&self.config.output_path) {
            Ok(sink) => sink,
            Err(e) => {
                stop_session(&mut session);
                return Err(e.into());
            }
        };

        if let Err(e) = sink.write_header(session.tracked_path()) {
            stop_session(&mut session);
            close_sink(&mut sink);
            return Err(e.into());
        }

        Ok((session, sink))
    }

    fn transition(&self, next: SupervisorState) {
        let previous = self.state.send_replace(next);
        info!("Supervisor {:?} -> {:?}", previous, next);
    }
}

/// Stop the watch, then close the sink
fn release(exit: WorkerExit, stop_reason: StopReason) -> Result<SessionReport, SessionError> {
    let WorkerExit {
        mut session,
        mut sink,
        result,
    } = exit;

    let stopped = session.stop();
    let closed = sink.close();

    result?;
    stopped?;
    closed?;

    Ok(SessionReport {
        stop_reason,
        entries_written: sink.entries_written(),
    })
}

/// Resolve after `limit`, or never
async fn expire(limit: Option<Duration>) {
    match limit {
        Some(limit) => tokio::time::sleep(limit).await,
        None => future::pending().await,
    }
}

fn stop_session(session: &mut WatchSession) {
    if let Err(e) = session.stop() {
        warn!("Failed to release watch: {}", e);
    }
}

fn close_sink(sink: &mut LogSink) {
    if let Err(e) = sink.close() {
        warn!("Failed to close log file: {}", e);
    }
}
