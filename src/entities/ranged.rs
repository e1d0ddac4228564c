//! RangedNumber - memoized number clamped into `[min, max]`.

use std::sync::{Arc, RwLock};

/// Construction parameters; `initial_value` is clamped too.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RangedNumberProps {
    pub min: f64,
    pub max: f64,
    pub initial_value: f64,
}

pub struct RangedNumber {
    min: f64,
    max: f64,
    value: RwLock<f64>,
    on_change: Arc<dyn Fn() + Send + Sync>,
}

impl RangedNumber {
    pub fn new<F>(props: RangedNumberProps, on_change: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut ranged = Self {
            min: props.min,
            max: props.max,
            value: RwLock::new(0.0),
            on_change: Arc::new(on_change),
        };
        let initial = ranged.clamp(props.initial_value);
        *ranged.value.get_mut().unwrap_or_else(|e| e.into_inner()) = initial;
        ranged
    }

    pub fn min_value(&self) -> f64 {
        self.min
    }

    pub fn max_value(&self) -> f64 {
        self.max
    }

    pub fn get(&self) -> f64 {
        *self.value.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Clamp, then fire the callback iff the stored value changes.
    pub fn set(&self, value: f64) -> bool {
        let clamped = self.clamp(value);
        {
            let mut current = self.value.write().unwrap_or_else(|e| e.into_inner());
            if *current == clamped {
                return false;
            }
            *current = clamped;
        }
        (self.on_change)();
        true
    }

    pub fn set_quietly(&self, value: f64) {
        let clamped = self.clamp(value);
        *self.value.write().unwrap_or_else(|e| e.into_inner()) = clamped;
    }

    // max is checked first, so an inverted range resolves to max
    fn clamp(&self, value: f64) -> f64 {
        if value > self.max {
            self.max
        } else if value < self.min {
            self.min
        } else {
            value
        }
    }
}

impl std::fmt::Debug for RangedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangedNumber")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ranged(initial: f64) -> (RangedNumber, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let r = RangedNumber::new(
            RangedNumberProps {
                min: 0.0,
                max: 10.0,
                initial_value: initial,
            },
            move || {
                c.fetch_add(1, Ordering::SeqCst);
            },
        );
        (r, count)
    }

    #[test]
    fn test_initial_value_is_clamped() {
        assert_eq!(ranged(50.0).0.get(), 10.0);
        assert_eq!(ranged(-5.0).0.get(), 0.0);
        assert_eq!(ranged(3.0).0.get(), 3.0);
    }

    #[test]
    fn test_set_clamps_before_compare() {
        let (r, count) = ranged(10.0);
        // 20 clamps to 10, which is unchanged
        assert!(!r.set(20.0));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        assert!(r.set(-1.0));
        assert_eq!(r.get(), 0.0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_quiet_set_clamps() {
        let (r, count) = ranged(5.0);
        r.set_quietly(100.0);
        assert_eq!(r.get(), 10.0);
        r.set_quietly(-100.0);
        assert_eq!(r.get(), 0.0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bounds_exposed() {
        let (r, _) = ranged(5.0);
        assert_eq!(r.min_value(), 0.0);
        assert_eq!(r.max_value(), 10.0);
    }
}
