//! Timer that ticks a session from a tokio task.
//!
//! The session lives behind a mutex: a tick, a placement or a reset each run
//! to completion under the lock, so readers never observe a half-computed
//! generation. Pausing stops future ticks; a tick already holding the lock
//! always finishes.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::debug;

/// Something that advances one generation per timer tick
pub trait Tickable {
    /// Run one step if the session is live. Returns whether a step ran.
    fn tick(&mut self) -> bool;

    /// Delay before the next tick, or None while nothing should tick
    fn tick_interval(&self) -> Option<Duration>;
}

pub struct SimulationDriver<S> {
    session: Arc<Mutex<S>>,
    reschedule: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl<S> SimulationDriver<S>
where
    S: Tickable + Send + 'static,
{
    /// Take ownership of `session` and start ticking it on the current tokio
    /// runtime. Must be called from within a runtime.
    pub fn spawn(session: S) -> Self {
        let session = Arc::new(Mutex::new(session));
        let reschedule = Arc::new(Notify::new());
        let task = tokio::spawn(run_ticks(session.clone(), reschedule.clone()));
        Self { session, reschedule, task: Some(task) }
    }

    /// Issue a command (start, pause, set speed, place, reset...). The timer
    /// restarts only when the command changed the tick interval, so a new
    /// speed or pause applies immediately while other input leaves the
    /// pending tick alone.
    pub fn command<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut session = lock(&self.session);
        let before = session.tick_interval();
        let result = f(&mut *session);
        let after = session.tick_interval();
        drop(session);

        if before != after {
            debug!(?before, ?after, "tick interval changed, rescheduling");
            self.reschedule.notify_one();
        }
        result
    }

    /// Read a consistent view of the session
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.session))
    }

    /// Stop ticking. Returns the session if no other handle still holds it.
    pub async fn shutdown(mut self) -> Option<S> {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        let session = Arc::clone(&self.session);
        drop(self);
        Arc::try_unwrap(session)
            .ok()
            .map(|m| m.into_inner().unwrap_or_else(|e| e.into_inner()))
    }
}

impl<S> Drop for SimulationDriver<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn lock<S>(session: &Mutex<S>) -> MutexGuard<'_, S> {
    // A panicking tick cannot leave a half-written grid visible (the swap is
    // the last step), so a poisoned lock is still safe to use.
    session.lock().unwrap_or_else(|e| e.into_inner())
}

async fn run_ticks<S: Tickable>(session: Arc<Mutex<S>>, reschedule: Arc<Notify>) {
    loop {
        let interval = lock(&session).tick_interval();
        match interval {
            Some(delay) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {
                        let stepped = lock(&session).tick();
                        if !stepped {
                            debug!("timer fired but session is not live");
                        }
                    }
                    _ = reschedule.notified() => {}
                }
            }
            None => reschedule.notified().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts ticks at a fixed interval while enabled
    struct Counter {
        enabled: bool,
        interval: Duration,
        ticks: u32,
    }

    impl Tickable for Counter {
        fn tick(&mut self) -> bool {
            if !self.enabled {
                return false;
            }
            self.ticks += 1;
            true
        }

        fn tick_interval(&self) -> Option<Duration> {
            self.enabled.then_some(self.interval)
        }
    }

    fn counter(enabled: bool) -> Counter {
        Counter { enabled, interval: Duration::from_millis(100), ticks: 0 }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_interval() {
        let driver = SimulationDriver::spawn(counter(true));
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(driver.read(|c| c.ticks), 3);

        let counter = driver.shutdown().await.unwrap();
        assert_eq!(counter.ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_never_ticks() {
        let driver = SimulationDriver::spawn(counter(false));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(driver.read(|c| c.ticks), 0);
        driver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_reschedule() {
        let driver = SimulationDriver::spawn(counter(false));
        tokio::time::sleep(Duration::from_millis(50)).await;

        driver.command(|c| c.enabled = true);
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(driver.read(|c| c.ticks), 2);

        driver.command(|c| c.enabled = false);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(driver.read(|c| c.ticks), 2, "paused sessions stop ticking");

        // A faster interval applies right away
        driver.command(|c| {
            c.enabled = true;
            c.interval = Duration::from_millis(10);
        });
        tokio::time::sleep(Duration::from_millis(105)).await;
        assert_eq!(driver.read(|c| c.ticks), 12);

        driver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrelated_commands_keep_pending_tick() {
        let driver = SimulationDriver::spawn(counter(true));
        tokio::time::sleep(Duration::from_millis(25)).await;

        // Input twice per interval that does not touch scheduling
        for _ in 0..20 {
            driver.command(|c| c.ticks);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(driver.read(|c| c.ticks), 10);

        driver.shutdown().await;
    }
}
