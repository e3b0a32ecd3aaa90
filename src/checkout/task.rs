//! A spawned task paired with a close signal.

use std::future::Future;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};

/// Owns one spawned task and the sender half of its close signal.
///
/// The task receives the close receiver and is expected to stop when it fires, either because
/// [`Cancellable::close`] was called or because the `Cancellable` was dropped. It still runs to
/// its own end, so its outcome can always be collected with [`Cancellable::join`].
#[derive(Debug)]
pub struct Cancellable<T> {
    close: Option<oneshot::Sender<()>>,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> Cancellable<T> {
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<()>) -> Fut,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (close, closed) = oneshot::channel();
        Self {
            close: Some(close),
            handle: tokio::spawn(f(closed)),
        }
    }

    /// Signals the task to stop. Calling it again does nothing.
    pub fn close(&mut self) {
        if let Some(close) = self.close.take() {
            let _ = close.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the task's result without closing it.
    pub async fn join(mut self) -> Result<T, JoinError> {
        (&mut self.handle).await
    }
}

impl<T> Drop for Cancellable<T> {
    fn drop(&mut self) {
        if let Some(close) = self.close.take() {
            let _ = close.send(());
        }
    }
}
