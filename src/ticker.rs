//! Background pause ticker
//!
//! A timed pause must end even when no frames arrive (camera idle, stream
//! quiet). [`PauseTicker`] runs a small thread that calls
//! [`DetectionSession::tick`] at a fixed period on a shared session. Dropping
//! the ticker stops and joins the thread.

use crate::session::DetectionSession;
use crate::types::Millis;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default ticker period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Source of the session's monotonic millisecond clock
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> Millis;
}

/// Wall time elapsed since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Clock set by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Millis) {
        self.now.fetch_add(by, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}

/// Clock following a stream of frame timestamps.
///
/// Reads as the latest observed timestamp plus the wall time since it was
/// observed, so a quiet stream still moves forward.
#[derive(Debug)]
pub struct StreamClock {
    anchor: Mutex<(Millis, Instant)>,
}

impl StreamClock {
    pub fn new(start: Millis) -> Self {
        Self {
            anchor: Mutex::new((start, Instant::now())),
        }
    }

    /// Re-anchor on a timestamp read from the stream
    pub fn observe(&self, timestamp: Millis) {
        let mut anchor = self.anchor.lock().unwrap_or_else(|e| e.into_inner());
        *anchor = (timestamp, Instant::now());
    }
}

impl Clock for StreamClock {
    fn now_ms(&self) -> Millis {
        let anchor = self.anchor.lock().unwrap_or_else(|e| e.into_inner());
        anchor.0.saturating_add(anchor.1.elapsed().as_millis() as Millis)
    }
}

/// Background thread re-checking the pause deadline of a shared session
#[derive(Debug)]
pub struct PauseTicker {
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl PauseTicker {
    /// Start ticking `session` every `period`, reading time from `clock`
    pub fn spawn(
        session: Arc<Mutex<DetectionSession>>,
        clock: Arc<dyn Clock>,
        period: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = channel::<()>();

        let join = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    let now = clock.now_ms();
                    match session.lock() {
                        Ok(mut guard) => {
                            guard.tick(now);
                        }
                        Err(_) => {
                            warn!("session lock poisoned, pause ticker stopping");
                            break;
                        }
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        debug!(period_ms = period.as_millis() as u64, "pause ticker started");

        Self {
            stop_tx: Some(stop_tx),
            join: Some(join),
        }
    }

    /// Stop the thread and wait for it to exit
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!("pause ticker thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.join.is_some()
    }
}

impl Drop for PauseTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        clock.advance(50);
        assert_eq!(clock.now_ms(), 150);
        clock.set(10);
        assert_eq!(clock.now_ms(), 10);
    }

    #[test]
    fn test_stream_clock_follows_timestamps() {
        let clock = StreamClock::new(0);
        clock.observe(10_000);
        let now = clock.now_ms();
        assert!(now >= 10_000);
        assert!(now < 20_000);
    }

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_ticker_resumes_idle_session() {
        let session = Arc::new(Mutex::new(
            DetectionSession::new(DetectionConfig::default(), 0).unwrap(),
        ));
        session.lock().unwrap().pause_for(5_000, 0);

        let clock = Arc::new(ManualClock::new(0));
        let mut ticker = PauseTicker::spawn(
            Arc::clone(&session),
            clock.clone(),
            Duration::from_millis(5),
        );

        clock.set(5_000);
        let deadline = Instant::now() + Duration::from_secs(5);
        while session.lock().unwrap().detection_state().pause.is_paused {
            assert!(Instant::now() < deadline, "ticker never resumed the session");
            thread::sleep(Duration::from_millis(5));
        }

        ticker.stop();
        assert!(!ticker.is_running());
        assert!(!session.lock().unwrap().snapshot().is_paused);
    }

    #[test]
    fn test_drop_joins_thread() {
        let session = Arc::new(Mutex::new(
            DetectionSession::new(DetectionConfig::default(), 0).unwrap(),
        ));
        let ticker = PauseTicker::spawn(
            Arc::clone(&session),
            Arc::new(MonotonicClock::new()),
            Duration::from_secs(60),
        );
        drop(ticker);
        // Only the test's handle remains once the thread has exited
        assert_eq!(Arc::strong_count(&session), 1);
    }
}
