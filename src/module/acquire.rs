//! Acquisition of thermal grids and optical frames.
//!
//! A [`Poller`] runs a [`Source`] on its own thread at a fixed interval and
//! hands results to the render loop through a channel, so the render loop
//! never waits on the network. A [`Feed`] is what the render loop reads
//! from: either a push channel supplied by the caller or a poller.

pub mod http;

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

/// Why a fetch failed. Always recovered by the poller.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("undecodable frame: {0}")]
    Image(#[from] image::ImageError),
    #[error("{0}")]
    Other(String),
}

/// Something that can be fetched repeatedly.
pub trait Source: Send + 'static {
    type Item: Send + 'static;

    /// Name used in logs.
    fn name(&self) -> &str;

    fn fetch(&mut self) -> Result<Self::Item, AcquireError>;
}

/// Background fetch loop.
///
/// Fetches are serialised: the next one starts `interval` after the
/// previous result has been handled, whether it succeeded or not. A zero
/// interval fetches once. Dropping the poller cancels the pending wait and
/// returns without waiting for a fetch in flight; its late result is
/// discarded and the thread exits on its own.
pub struct Poller<T> {
    rx: Receiver<T>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Poller<T> {
    pub fn spawn<S: Source<Item = T>>(mut source: S, interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            log::debug!("{} poller started", source.name());
            loop {
                match source.fetch() {
                    Ok(item) => {
                        // Torn down while fetching.
                        if !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty)) {
                            break;
                        }
                        if tx.send(item).is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("{} fetch failed: {}", source.name(), e),
                }
                if interval.is_zero() {
                    break;
                }
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            }
            log::debug!("{} poller stopped", source.name());
        });
        Self {
            rx,
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Newest result since the last call, if any.
    pub fn latest(&self) -> Option<T> {
        self.rx.try_iter().last()
    }
}

impl<T> Poller<T> {
    /// Signal the loop to stop.
    ///
    /// Joins the thread only when it has already exited; a thread still
    /// blocked in a fetch is detached.
    pub fn shutdown(&mut self) {
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                if handle.join().is_err() {
                    log::error!("poller thread panicked");
                }
            } else {
                log::debug!("poller detached while fetching");
            }
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Where the render loop gets new values from.
pub enum Feed<T> {
    /// Values pushed by the caller, applied as soon as they arrive.
    Push(Receiver<T>),
    /// Values fetched by a poller.
    Poll(Poller<T>),
    /// Nothing ever arrives.
    Idle,
}

impl<T: Send + 'static> Feed<T> {
    /// A push channel wins over a pollable source; no poller is started then.
    pub fn select<S: Source<Item = T>>(
        push: Option<Receiver<T>>,
        source: Option<S>,
        interval: Duration,
    ) -> Self {
        match (push, source) {
            (Some(rx), _) => Feed::Push(rx),
            (None, Some(source)) => Feed::Poll(Poller::spawn(source, interval)),
            (None, None) => Feed::Idle,
        }
    }

    /// Newest value since the last call, if any.
    pub fn latest(&self) -> Option<T> {
        match self {
            Feed::Push(rx) => rx.try_iter().last(),
            Feed::Poll(poller) => poller.latest(),
            Feed::Idle => None,
        }
    }

    pub fn is_push(&self) -> bool {
        matches!(self, Feed::Push(_))
    }
}
