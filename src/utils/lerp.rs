//! LerpNumber - animate a number from `start` to `end` over time.
//!
//! Polled like a timer: the owner calls `tick()` from its update loop (or
//! `run_to_end()` to block). Each tick pushes the eased value to the request's
//! `update` callback. When time runs out the exact `end` value is pushed and
//! `on_complete` runs; a cancelled lerp runs `on_cancel` on its next tick.
//!
//! # Usage
//! ```ignore
//! let mut lerp = LerpNumber::new();
//! let done = lerp.lerp(LerpRequest::new(0.0, 100.0, |v| println!("{v}")));
//!
//! // In update loop:
//! lerp.tick();
//!
//! // Anywhere else:
//! if let Ok(outcome) = done.try_recv() { ... }
//! ```
//!
//! Starting a new lerp while one is running cancels the running one first
//! (its `on_cancel` runs and its receiver gets `Cancelled`).

use std::fmt;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};

use super::ease::{EaseFn, ease_by_name, quint_in_out};
use crate::config::Settings;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How a lerp ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LerpOutcome {
    Completed,
    Cancelled,
}

/// One animation: range, callbacks and optional overrides of the
/// `LerpNumber` defaults.
pub struct LerpRequest {
    pub start: f64,
    pub end: f64,
    update: Box<dyn FnMut(f64) + Send>,
    duration: Option<Duration>,
    ease: Option<EaseFn>,
    on_complete: Option<Box<dyn FnOnce() + Send>>,
    on_cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl fmt::Debug for LerpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LerpRequest")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl LerpRequest {
    pub fn new<F>(start: f64, end: f64, update: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        Self {
            start,
            end,
            update: Box::new(update),
            duration: None,
            ease: None,
            on_complete: None,
            on_cancel: None,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn ease(mut self, ease: EaseFn) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn on_complete<F: FnOnce() + Send + 'static>(mut self, f: F) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_cancel<F: FnOnce() + Send + 'static>(mut self, f: F) -> Self {
        self.on_cancel = Some(Box::new(f));
        self
    }
}

struct Active {
    request: LerpRequest,
    duration: Duration,
    ease: EaseFn,
    started: Instant,
    done: Sender<LerpOutcome>,
}

impl Active {
    fn finish(mut self, outcome: LerpOutcome) {
        match outcome {
            LerpOutcome::Completed => {
                (self.request.update)(self.request.end);
                if let Some(f) = self.request.on_complete.take() {
                    f();
                }
            }
            LerpOutcome::Cancelled => {
                if let Some(f) = self.request.on_cancel.take() {
                    f();
                }
            }
        }
        // Receiver may be gone; the callbacks already ran.
        let _ = self.done.send(outcome);
    }
}

pub struct LerpNumber {
    pub default_duration: Duration,
    pub default_ease: EaseFn,
    poll_interval: Duration,
    active: Option<Active>,
    cancel_requested: bool,
}

impl Default for LerpNumber {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION,
            default_ease: quint_in_out,
            poll_interval: DEFAULT_POLL_INTERVAL,
            active: None,
            cancel_requested: false,
        }
    }
}

impl fmt::Debug for LerpNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LerpNumber")
            .field("default_duration", &self.default_duration)
            .field("poll_interval", &self.poll_interval)
            .field("is_lerping", &self.is_lerping())
            .finish()
    }
}

impl LerpNumber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults taken from settings. An unknown ease name falls back to
    /// `quint_in_out` with a warning.
    pub fn from_settings(settings: &Settings) -> Self {
        let default_ease = ease_by_name(&settings.lerp_ease).unwrap_or_else(|| {
            log::warn!("Unknown ease '{}', using quint_in_out", settings.lerp_ease);
            quint_in_out
        });
        Self {
            default_duration: Duration::from_millis(settings.lerp_duration_ms),
            default_ease,
            poll_interval: Duration::from_millis(settings.lerp_poll_interval_ms),
            ..Self::default()
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn is_lerping(&self) -> bool {
        self.active.is_some()
    }

    /// Request cancellation; takes effect on the next tick.
    pub fn cancel(&mut self) {
        if !self.is_lerping() {
            return;
        }
        log::trace!("LerpNumber: cancel requested");
        self.cancel_requested = true;
    }

    /// Start animating. `update(start)` is called before this returns.
    pub fn lerp(&mut self, request: LerpRequest) -> Receiver<LerpOutcome> {
        if let Some(previous) = self.active.take() {
            log::trace!("LerpNumber: replacing running lerp");
            previous.finish(LerpOutcome::Cancelled);
        }
        self.cancel_requested = false;

        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut active = Active {
            duration: request.duration.unwrap_or(self.default_duration),
            ease: request.ease.unwrap_or(self.default_ease),
            started: Instant::now(),
            done: tx,
            request,
        };
        (active.request.update)(active.request.start);
        log::trace!(
            "LerpNumber: {} -> {} over {}ms",
            active.request.start,
            active.request.end,
            active.duration.as_millis()
        );
        self.active = Some(active);
        rx
    }

    pub fn tick(&mut self) -> Option<LerpOutcome> {
        self.tick_at(Instant::now())
    }

    /// Advance as if the current time were `now`. Returns the outcome when
    /// the lerp finished on this tick.
    pub fn tick_at(&mut self, now: Instant) -> Option<LerpOutcome> {
        if self.cancel_requested {
            self.cancel_requested = false;
            let active = self.active.take()?;
            active.finish(LerpOutcome::Cancelled);
            return Some(LerpOutcome::Cancelled);
        }

        let active = self.active.as_mut()?;
        let progress = if active.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(active.started);
            (elapsed.as_secs_f64() / active.duration.as_secs_f64()).min(1.0)
        };
        let (start, end) = (active.request.start, active.request.end);
        (active.request.update)(start + (end - start) * (active.ease)(progress));

        if progress < 1.0 {
            return None;
        }
        let active = self.active.take()?;
        active.finish(LerpOutcome::Completed);
        Some(LerpOutcome::Completed)
    }

    /// Block, ticking every poll interval, until the running lerp ends.
    /// `None` if nothing was running.
    pub fn run_to_end(&mut self) -> Option<LerpOutcome> {
        loop {
            if !self.is_lerping() {
                return None;
            }
            if let Some(outcome) = self.tick() {
                return Some(outcome);
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ease::ease_linear;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<f64>>>, impl FnMut(f64) + Send + 'static) {
        let values = Arc::new(Mutex::new(Vec::new()));
        let v = Arc::clone(&values);
        (values, move |x| v.lock().unwrap().push(x))
    }

    #[test]
    fn test_defaults() {
        let lerp = LerpNumber::new();
        assert_eq!(lerp.default_duration, Duration::from_millis(1000));
        assert_eq!(lerp.poll_interval(), Duration::from_millis(10));
        assert_eq!((lerp.default_ease)(0.25), quint_in_out(0.25));
        assert!(!lerp.is_lerping());
    }

    #[test]
    fn test_update_called_with_start_immediately() {
        let (values, update) = recorder();
        let mut lerp = LerpNumber::new();
        let _done = lerp.lerp(LerpRequest::new(2.0, 8.0, update));
        assert_eq!(*values.lock().unwrap(), vec![2.0]);
        assert!(lerp.is_lerping());
    }

    #[test]
    fn test_progress_and_completion() {
        let (values, update) = recorder();
        let completed = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&completed);

        let mut lerp = LerpNumber::new();
        let before = Instant::now();
        let done = lerp.lerp(
            LerpRequest::new(0.0, 10.0, update)
                .duration(Duration::from_millis(100))
                .ease(ease_linear)
                .on_complete(move || {
                    c.fetch_add(1, Ordering::SeqCst);
                }),
        );

        // a time before the lerp began counts as no progress
        assert_eq!(lerp.tick_at(before), None);
        assert_eq!(lerp.tick_at(Instant::now() + Duration::from_millis(200)), Some(LerpOutcome::Completed));

        let values = values.lock().unwrap();
        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.last(), Some(&10.0));
        assert_eq!(completed.load(Ordering::SeqCst), 1);
        assert_eq!(done.try_recv(), Ok(LerpOutcome::Completed));
        assert!(!lerp.is_lerping());
    }

    #[test]
    fn test_cancel_takes_effect_next_tick() {
        let cancelled = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&cancelled);
        let (values, update) = recorder();

        let mut lerp = LerpNumber::new();
        let done = lerp.lerp(LerpRequest::new(0.0, 1.0, update).on_cancel(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        lerp.cancel();
        assert!(lerp.is_lerping());
        assert_eq!(cancelled.load(Ordering::SeqCst), 0);

        assert_eq!(lerp.tick(), Some(LerpOutcome::Cancelled));
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
        assert_eq!(done.try_recv(), Ok(LerpOutcome::Cancelled));
        assert!(!lerp.is_lerping());
        // only the initial start value
        assert_eq!(values.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut lerp = LerpNumber::new();
        lerp.cancel();
        assert_eq!(lerp.tick(), None);

        let (_values, update) = recorder();
        let before = Instant::now();
        let _done = lerp.lerp(LerpRequest::new(0.0, 1.0, update));
        assert_eq!(lerp.tick_at(before), None);
        assert!(lerp.is_lerping());
    }

    #[test]
    fn test_new_lerp_replaces_running_one() {
        let first_cancelled = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&first_cancelled);
        let (_v1, update1) = recorder();
        let (v2, update2) = recorder();

        let mut lerp = LerpNumber::new();
        let first = lerp.lerp(LerpRequest::new(0.0, 1.0, update1).on_cancel(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        let second = lerp.lerp(LerpRequest::new(5.0, 6.0, update2).duration(Duration::ZERO));

        assert_eq!(first_cancelled.load(Ordering::SeqCst), 1);
        assert_eq!(first.try_recv(), Ok(LerpOutcome::Cancelled));
        assert!(lerp.is_lerping());

        assert_eq!(lerp.tick(), Some(LerpOutcome::Completed));
        assert_eq!(second.try_recv(), Ok(LerpOutcome::Completed));
        assert_eq!(v2.lock().unwrap().last(), Some(&6.0));
    }

    #[test]
    fn test_run_to_end_blocks_until_done() {
        let (values, update) = recorder();
        let mut lerp = LerpNumber::new();
        let _done = lerp.lerp(LerpRequest::new(1.0, 3.0, update).duration(Duration::from_millis(30)));

        assert_eq!(lerp.run_to_end(), Some(LerpOutcome::Completed));
        assert_eq!(values.lock().unwrap().last(), Some(&3.0));
        assert_eq!(lerp.run_to_end(), None);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            lerp_duration_ms: 250,
            lerp_poll_interval_ms: 5,
            lerp_ease: "linear".to_string(),
            ..Settings::default()
        };
        let lerp = LerpNumber::from_settings(&settings);
        assert_eq!(lerp.default_duration, Duration::from_millis(250));
        assert_eq!(lerp.poll_interval(), Duration::from_millis(5));
        assert_eq!((lerp.default_ease)(0.3), 0.3);

        let fallback = LerpNumber::from_settings(&Settings {
            lerp_ease: "wobble".to_string(),
            ..Settings::default()
        });
        assert_eq!((fallback.default_ease)(0.3), quint_in_out(0.3));
    }
}
