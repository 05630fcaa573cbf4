//! Location-change event source.
//!
//! Models the host environment's location: a current fragment plus a stream
//! of change notifications. Setting the fragment to its current value emits
//! nothing, the same way a browser does not fire `hashchange` for it.

use std::io::{self, BufRead};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use tokio::io::{AsyncBufReadExt, AsyncRead};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One notification that the location fragment changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    /// Sequence number, starting at 1 (0 is the initial fragment).
    pub seq: u64,
    pub fragment: String,
}

#[derive(Debug)]
struct LocationState {
    seq: u64,
    fragment: String,
}

/// Writable side of the location; cheap to clone.
#[derive(Debug, Clone)]
pub struct LocationHandle {
    state: Arc<Mutex<LocationState>>,
    tx: mpsc::UnboundedSender<LocationChange>,
}

/// Receiving side of the location: change notifications in order.
#[derive(Debug)]
pub struct LocationEvents {
    rx: mpsc::UnboundedReceiver<LocationChange>,
}

/// Create a location holding `initial`.
pub fn location(initial: impl Into<String>) -> (LocationHandle, LocationEvents) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = LocationHandle {
        state: Arc::new(Mutex::new(LocationState {
            seq: 0,
            fragment: initial.into(),
        })),
        tx,
    };
    (handle, LocationEvents { rx })
}

impl LocationHandle {
    pub fn current(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fragment
            .clone()
    }

    /// Change the fragment. Returns `true` when a notification was emitted.
    pub fn set(&self, fragment: impl Into<String>) -> bool {
        let fragment = fragment.into();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.fragment == fragment {
            return false;
        }

        state.seq += 1;
        state.fragment = fragment.clone();
        let change = LocationChange {
            seq: state.seq,
            fragment,
        };
        // Sent under the lock so notifications keep sequence order.
        self.tx.send(change).is_ok()
    }
}

impl LocationEvents {
    /// Next change, or `None` once every handle is dropped.
    pub async fn next(&mut self) -> Option<LocationChange> {
        self.rx.recv().await
    }
}

fn feed_line(handle: &LocationHandle, line: &str) {
    let fragment = line.trim();
    if fragment.is_empty() {
        return;
    }
    if !handle.set(fragment) {
        tracing::debug!(fragment, "Fragment unchanged, no notification");
    }
}

/// Feed each line of `reader` into `handle` as a new fragment.
///
/// Blank lines are skipped. The task ends at EOF, dropping its handle.
pub fn spawn_line_source<R>(reader: R, handle: LocationHandle) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => feed_line(&handle, &line),
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read location input");
                    break;
                }
            }
        }
        tracing::debug!("Location input closed");
    })
}

/// Like [`spawn_line_source`], but reads with blocking I/O on its own OS thread.
///
/// The thread is not part of the runtime, so a read that never returns does
/// not keep the runtime alive on exit. Dropping the returned handle detaches it.
pub fn spawn_thread_line_source<R>(reader: R, handle: LocationHandle) -> io::Result<thread::JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("location-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => feed_line(&handle, &line),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read location input");
                        break;
                    }
                }
            }
            tracing::debug!("Location input closed");
        })
}

/// [`spawn_thread_line_source`] over stdin.
pub fn spawn_stdin_source(handle: LocationHandle) -> io::Result<thread::JoinHandle<()>> {
    spawn_thread_line_source(io::BufReader::new(io::stdin()), handle)
}
