//! Event-consuming worker
//!
//! Owns the session and the sink while it runs and hands both back when it
//! exits, so nothing can release them underneath it.

use crate::error::SessionError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use watchlog_core::{LogEntry, OwnerResolver};
use watchlog_journal::LogSink;
use watchlog_watcher::{classify, WatchSession};

/// What the worker returns on exit
pub(crate) struct WorkerExit {
    pub session: WatchSession,
    pub sink: LogSink,
    pub result: Result<(), SessionError>,
}

/// Drain batches into the sink until cancelled or a fatal error occurs
pub(crate) async fn drain(
    mut session: WatchSession,
    mut sink: LogSink,
    resolver: Arc<dyn OwnerResolver>,
    cancel: CancellationToken,
) -> WorkerExit {
    let result = drain_loop(&mut session, &mut sink, resolver.as_ref(), &cancel).await;

    match &result {
        Ok(()) => debug!("Worker exited after cancellation"),
        Err(e) => error!("Worker stopped: {}", e),
    }

    WorkerExit {
        session,
        sink,
        result,
    }
}

async fn drain_loop(
    session: &mut WatchSession,
    sink: &mut LogSink,
    resolver: &dyn OwnerResolver,
    cancel: &CancellationToken,
) -> Result<(), SessionError> {
    loop {
        // Cancellation is checked first so no read starts once it is requested.
        let batch = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            batch = session.next_batch() => batch?,
        };

        for event in &batch {
            let category = classify(event.mask);
            let user = resolver.owner_or_placeholder(session.tracked_path());
            sink.write_entry(&LogEntry::now(category.as_str(), user))?;
        }
    }
}
