//! Memoized values - holders that call back only on actual change.
//!
//! `set` compares the new value with the stored one (per-type `PartialEq`:
//! exact for numbers, strings and value objects; degrees for `Angle`) and fires
//! the change callback once when they differ. `set_quietly` never fires.
//!
//! The stored value sits behind a lock so setters take `&self`; the lock is
//! released before the callback runs.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::values::{Angle, Color, Quaternion, Vector2, Vector3};

type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

pub struct Memoized<T> {
    value: RwLock<T>,
    on_change: ChangeCallback,
}

pub type MemoizedBoolean = Memoized<bool>;
pub type MemoizedNumber = Memoized<f64>;
pub type MemoizedString = Memoized<String>;
pub type MemoizedAngle = Memoized<Angle>;
pub type MemoizedColor = Memoized<Color>;
pub type MemoizedVector2 = Memoized<Vector2>;
pub type MemoizedVector3 = Memoized<Vector3>;
pub type MemoizedQuaternion = Memoized<Quaternion>;

impl<T: Clone + PartialEq> Memoized<T> {
    pub fn new<F>(initial: T, on_change: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            value: RwLock::new(initial),
            on_change: Arc::new(on_change),
        }
    }

    pub fn get(&self) -> T {
        self.value.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Store `value`; fires the callback iff it differs. Returns whether it fired.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.value.write().unwrap_or_else(|e| e.into_inner());
            if *current == value {
                return false;
            }
            *current = value;
        }
        (self.on_change)();
        true
    }

    pub fn set_quietly(&self, value: T) {
        *self.value.write().unwrap_or_else(|e| e.into_inner()) = value;
    }

    /// Read-modify-write under one lock; fires like `set`.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let changed = {
            let mut current = self.value.write().unwrap_or_else(|e| e.into_inner());
            let next = f(&current);
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        };
        if changed {
            (self.on_change)();
        }
        changed
    }
}

impl<T: fmt::Debug> fmt::Debug for Memoized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Memoized")
            .field(&*self.value.read().unwrap_or_else(|e| e.into_inner()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counted<T: Clone + PartialEq>(initial: T) -> (Memoized<T>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let m = Memoized::new(initial, move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (m, count)
    }

    #[test]
    fn test_boolean() {
        let (m, count) = counted(false);
        assert!(!m.set(false));
        assert!(m.set(true));
        assert!(m.get());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_string_quiet_set() {
        let (m, count): (MemoizedString, _) = counted(String::new());
        m.set_quietly("quiet".to_string());
        assert_eq!(m.get(), "quiet");
        assert_eq!(count.load(Ordering::SeqCst), 0);

        m.set("quiet".to_string());
        assert_eq!(count.load(Ordering::SeqCst), 0);
        m.set("loud".to_string());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_number() {
        let (m, count): (MemoizedNumber, _) = counted(1.5);
        m.set(1.5);
        m.set(2.5);
        m.set(2.5);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_angle_compares_degrees() {
        let (m, count): (MemoizedAngle, _) = counted(Angle::from_degrees(90.0));
        m.set(Angle::from_degrees(90.0));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        m.set(Angle::from_degrees(45.0));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_vectors_and_quaternion() {
        let (v2, c2): (MemoizedVector2, _) = counted(Vector2::zero());
        v2.set(Vector2::new(0.0, 0.0));
        v2.set(Vector2::new(1.0, 0.0));
        assert_eq!(c2.load(Ordering::SeqCst), 1);

        let (v3, c3): (MemoizedVector3, _) = counted(Vector3::one());
        v3.set(Vector3::new(1.0, 1.0, 1.0));
        v3.set(Vector3::up(2.0));
        assert_eq!(c3.load(Ordering::SeqCst), 1);

        let (q, cq): (MemoizedQuaternion, _) = counted(Quaternion::identity());
        q.set(Quaternion::new(0.0, 0.0, 0.0, 1.0));
        q.set(Quaternion::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(cq.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_color() {
        let (m, count): (MemoizedColor, _) = counted(Color::WHITE);
        m.set(Color::rgb(1.0, 1.0, 1.0));
        m.set(Color::BLACK);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(m.get(), Color::BLACK);
    }

    #[test]
    fn test_update() {
        let (m, count) = counted(1_i32);
        assert!(!m.update(|v| *v));
        assert!(m.update(|v| v + 1));
        assert_eq!(m.get(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
