//! Host-side advisor loop.
//!
//! The evaluator is pure; this module owns everything around it: the
//! repeating timer, profile reloads, the last-known-profile fallback, and
//! fan-out to the presentation sinks.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::domain::evaluator::evaluate_with;
use crate::domain::profile::Profile;
use crate::domain::verdict::AdviceCatalog;
use crate::ports::clock_port::ClockPort;
use crate::ports::presenter_port::PresenterPort;
use crate::ports::profile_port::ProfilePort;

/// Signals a running [`Ticker`] to stop after its current tick.
///
/// Dropping the handle also stops the ticker.
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.tx.send(());
    }
}

/// Fixed-period repeating timer. Fires immediately on start, then once per
/// period, until stopped or an optional tick budget runs out.
pub struct Ticker {
    period: Duration,
    rx: Receiver<()>,
}

impl Ticker {
    pub fn new(period: Duration) -> (Self, StopHandle) {
        let (tx, rx) = mpsc::channel();
        (Self { period, rx }, StopHandle { tx })
    }

    /// Runs `tick` with the zero-based tick number. Blocks the calling
    /// thread between ticks; the stop signal interrupts the wait.
    pub fn run<F: FnMut(u64)>(self, max_ticks: Option<u64>, mut tick: F) {
        let mut n: u64 = 0;
        loop {
            tick(n);
            n += 1;
            if let Some(max) = max_ticks {
                if n >= max {
                    return;
                }
            }
            match self.rx.recv_timeout(self.period) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
    }
}

/// Drives the evaluation loop: reload the profile, evaluate, present.
///
/// The profile is re-read through the port on every tick, so an external
/// fetch can replace it between ticks; each evaluation still sees one
/// immutable snapshot. A failed reload is never fatal: the loop logs a
/// warning and falls back to the last profile it loaded successfully, or
/// the default profile before any load has succeeded.
///
/// Returns the number of ticks that ran.
pub fn run_advisor(
    clock: &dyn ClockPort,
    profiles: &dyn ProfilePort,
    presenters: &[Box<dyn PresenterPort>],
    advice: &AdviceCatalog,
    ticker: Ticker,
    max_ticks: Option<u64>,
) -> u64 {
    let mut last_known: Option<Profile> = None;
    let mut ticks = 0;

    ticker.run(max_ticks, |n| {
        ticks = n + 1;
        let profile = match profiles.load() {
            Ok(Some(profile)) => {
                last_known = Some(profile.clone());
                profile
            }
            Ok(None) => Profile::default(),
            Err(e) => {
                tracing::warn!(error = %e, "profile reload failed, continuing on previous profile");
                last_known.clone().unwrap_or_default()
            }
        };

        let evaluation = evaluate_with(clock.now(), &profile, advice);
        tracing::debug!(tick = n, overall = ?evaluation.overall, "evaluation complete");

        for presenter in presenters {
            if let Err(e) = presenter.present(&evaluation) {
                tracing::warn!(error = %e, "presenter failed");
            }
        }
    });

    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[test]
    fn ticker_fires_immediately() {
        let (ticker, _stop) = Ticker::new(Duration::from_secs(3600));
        let mut fired = Vec::new();
        ticker.run(Some(1), |n| fired.push(n));
        assert_eq!(fired, vec![0]);
    }

    #[test]
    fn ticker_honors_tick_budget() {
        let (ticker, _stop) = Ticker::new(Duration::from_millis(1));
        let count = Arc::new(AtomicU64::new(0));
        let c = count.clone();
        ticker.run(Some(3), move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn stop_handle_interrupts_the_wait() {
        let (ticker, stop) = Ticker::new(Duration::from_secs(3600));
        let handle = std::thread::spawn(move || {
            let mut fired = 0;
            ticker.run(None, |_| fired += 1);
            fired
        });
        // Give the ticker time to enter its wait, then stop it.
        std::thread::sleep(Duration::from_millis(50));
        stop.stop();
        assert_eq!(handle.join().unwrap(), 1);
    }

    #[test]
    fn dropping_the_handle_stops_the_ticker() {
        let (ticker, stop) = Ticker::new(Duration::from_secs(3600));
        let handle = std::thread::spawn(move || {
            let mut fired = 0;
            ticker.run(None, |_| fired += 1);
            fired
        });
        std::thread::sleep(Duration::from_millis(50));
        drop(stop);
        assert_eq!(handle.join().unwrap(), 1);
    }
}
