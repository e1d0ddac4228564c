//! Entities module - change-tracking value holders used inside components
//!
//! Memoized values fire a change callback only when their value actually
//! changes; entities pass `EntityCore::notifier()` as that callback.

pub mod memoized;
pub mod ranged;

pub use memoized::{
    Memoized, MemoizedAngle, MemoizedBoolean, MemoizedColor, MemoizedNumber, MemoizedQuaternion,
    MemoizedString, MemoizedVector2, MemoizedVector3,
};
pub use ranged::{RangedNumber, RangedNumberProps};
