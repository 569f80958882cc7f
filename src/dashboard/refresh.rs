//! Periodic refresh loop with an abort-on-drop handle.
//!
//! The loop is a plain future built from `futures_timer::Delay`, so it runs on
//! whatever executor the host spawns it on (tokio natively,
//! `wasm_bindgen_futures::spawn_local` in the browser).

use futures_util::future::{AbortHandle, Abortable};
use std::future::Future;
use std::time::Duration;

/// Handle to a running refresh loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct RefreshTimer {
    handle: AbortHandle,
    period: Duration,
}

impl RefreshTimer {
    /// Build a loop that waits `period`, runs `tick`, and repeats.
    ///
    /// Returns the handle and the loop future; the caller spawns the future.
    /// The first tick fires one full period after the loop is first polled.
    pub fn start<T, Fut>(period: Duration, tick: T) -> (Self, impl Future<Output = ()>)
    where
        T: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let task = async move {
            if Abortable::new(run(period, tick), registration).await.is_err() {
                tracing::debug!("Refresh loop stopped");
            }
        };
        (Self { handle, period }, task)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run<T, Fut>(period: Duration, mut tick: T)
where
    T: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        futures_timer::Delay::new(period).await;
        tick().await;
    }
}
