//! Simulated slow network for the demo and integration tests.
//!
//! Mimics an unreliable image CDN: every request takes a random delay in a
//! configured range and fails with a configured probability. Completions
//! are delivered by polling, so the event loop stays single-threaded and
//! tests can drive time explicitly.

pub mod rng;

pub use rng::SeededRng;

use crate::model::{ItemIndex, RequestToken};
use std::time::{Duration, Instant};

/// Progress is capped below 1.0 until the request actually completes,
/// matching how chunked transfers look.
const PROGRESS_CAP: f64 = 0.95;

/// One finished simulated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimCompletion {
    /// Item the request was issued for.
    pub index: ItemIndex,
    /// Token of the request.
    pub token: RequestToken,
    /// Whether the simulated transfer failed.
    pub failed: bool,
}

#[derive(Debug, Clone)]
struct InFlight {
    index: ItemIndex,
    token: RequestToken,
    started: Instant,
    due: Instant,
    fails: bool,
}

/// Fake resource loader with randomized latency and failures.
///
/// Deterministic per seed: the nth request always draws the same delay and
/// failure verdict. Each request completes at most once; whether anyone
/// still cares is the manager's problem (stale completions are discarded
/// on its side).
#[derive(Debug, Clone)]
pub struct SimulatedLoader {
    rng: SeededRng,
    delay_min: Duration,
    delay_max: Duration,
    fail_rate: f64,
    in_flight: Vec<InFlight>,
}

impl SimulatedLoader {
    /// Create a loader. `fail_rate` is clamped into `[0, 1]`; an inverted
    /// delay range collapses to `delay_min`.
    pub fn new(seed: u64, delay_min: Duration, delay_max: Duration, fail_rate: f64) -> Self {
        Self {
            rng: SeededRng::new(seed),
            delay_min,
            delay_max,
            fail_rate: fail_rate.clamp(0.0, 1.0),
            in_flight: Vec::new(),
        }
    }

    /// Start a request at `now`. Its delay and failure verdict are drawn
    /// immediately; it completes when `poll` is called at or after the due
    /// time.
    pub fn begin(&mut self, index: ItemIndex, token: RequestToken, now: Instant) {
        let delay_ms = self.rng.next_range(
            self.delay_min.as_millis() as u64,
            self.delay_max.as_millis() as u64,
        );
        let delay = Duration::from_millis(delay_ms);
        self.in_flight.push(InFlight {
            index,
            token,
            started: now,
            due: now + delay,
            fails: self.rng.chance(self.fail_rate),
        });
    }

    /// Drain and return every request due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<SimCompletion> {
        let mut done = Vec::new();
        self.in_flight.retain(|request| {
            if request.due <= now {
                done.push(SimCompletion {
                    index: request.index,
                    token: request.token,
                    failed: request.fails,
                });
                false
            } else {
                true
            }
        });
        done
    }

    /// Fraction complete for every in-flight request, capped below 1.0.
    pub fn progress(&self, now: Instant) -> Vec<(ItemIndex, RequestToken, f64)> {
        self.in_flight
            .iter()
            .map(|request| {
                let total = request.due.saturating_duration_since(request.started);
                let elapsed = now.saturating_duration_since(request.started);
                let fraction = if total.is_zero() {
                    PROGRESS_CAP
                } else {
                    (elapsed.as_secs_f64() / total.as_secs_f64()).min(PROGRESS_CAP)
                };
                (request.index, request.token, fraction)
            })
            .collect()
    }

    /// Number of requests still in flight.
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }
}

/// Due-time queue delivering the manager's scheduled retries.
#[derive(Debug, Clone, Default)]
pub struct RetryTimers {
    timers: Vec<(Instant, ItemIndex, RequestToken)>,
}

impl RetryTimers {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for `(index, token)` to be delivered at `due`.
    pub fn schedule(&mut self, index: ItemIndex, token: RequestToken, due: Instant) {
        self.timers.push((due, index, token));
    }

    /// Drain and return every timer due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<(ItemIndex, RequestToken)> {
        let mut due = Vec::new();
        self.timers.retain(|(when, index, token)| {
            if *when <= now {
                due.push((*index, *token));
                false
            } else {
                true
            }
        });
        due
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> SimulatedLoader {
        SimulatedLoader::new(
            42,
            Duration::from_millis(100),
            Duration::from_millis(200),
            0.0,
        )
    }

    #[test]
    fn request_completes_only_after_its_delay() {
        let mut sim = loader();
        let start = Instant::now();
        sim.begin(ItemIndex::new(3), RequestToken::new(1), start);

        assert!(sim.poll(start).is_empty());
        assert!(sim.poll(start + Duration::from_millis(50)).is_empty());

        let done = sim.poll(start + Duration::from_millis(200));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].index, ItemIndex::new(3));
        assert_eq!(done[0].token, RequestToken::new(1));
        assert!(!done[0].failed);
        assert_eq!(sim.in_flight_len(), 0);
    }

    #[test]
    fn request_completes_at_most_once() {
        let mut sim = loader();
        let start = Instant::now();
        sim.begin(ItemIndex::new(0), RequestToken::new(1), start);
        let late = start + Duration::from_secs(1);
        assert_eq!(sim.poll(late).len(), 1);
        assert!(sim.poll(late).is_empty());
    }

    #[test]
    fn fail_rate_one_fails_everything() {
        let mut sim = SimulatedLoader::new(
            7,
            Duration::from_millis(10),
            Duration::from_millis(20),
            1.0,
        );
        let start = Instant::now();
        for raw in 0..10 {
            sim.begin(ItemIndex::new(raw), RequestToken::new(raw as u64), start);
        }
        let done = sim.poll(start + Duration::from_secs(1));
        assert_eq!(done.len(), 10);
        assert!(done.iter().all(|completion| completion.failed));
    }

    #[test]
    fn progress_grows_and_stays_capped() {
        let mut sim = loader();
        let start = Instant::now();
        sim.begin(ItemIndex::new(0), RequestToken::new(1), start);

        let early = sim.progress(start + Duration::from_millis(10))[0].2;
        let later = sim.progress(start + Duration::from_millis(90))[0].2;
        assert!(early < later);
        let way_past = sim.progress(start + Duration::from_secs(10))[0].2;
        assert!(way_past <= 0.95);
    }

    #[test]
    fn deterministic_per_seed() {
        let start = Instant::now();
        let mut a = SimulatedLoader::new(
            5,
            Duration::from_millis(100),
            Duration::from_millis(900),
            0.5,
        );
        let mut b = a.clone();
        for raw in 0..20 {
            a.begin(ItemIndex::new(raw), RequestToken::new(raw as u64), start);
            b.begin(ItemIndex::new(raw), RequestToken::new(raw as u64), start);
        }
        let late = start + Duration::from_secs(2);
        assert_eq!(a.poll(late), b.poll(late));
    }

    #[test]
    fn retry_timers_fire_in_due_time() {
        let mut timers = RetryTimers::new();
        let start = Instant::now();
        timers.schedule(
            ItemIndex::new(7),
            RequestToken::new(9),
            start + Duration::from_millis(500),
        );
        assert!(timers.poll(start).is_empty());
        assert_eq!(
            timers.poll(start + Duration::from_millis(500)),
            vec![(ItemIndex::new(7), RequestToken::new(9))]
        );
        assert!(timers.is_empty());
    }
}
