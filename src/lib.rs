//! appobjects - component-based app object model with observable entities,
//! presentation managers and geometry value objects.
//!
//! Re-exports all modules for use by binary targets.

// Object model (app objects, components, repo, observers, PMs)
pub mod core;

// Domain setup and the example feature built on it
pub mod domain;
pub mod example_feature;

// Values and helpers
pub mod entities;
pub mod utils;
pub mod values;

// App modules
pub mod cli;
pub mod config;

// Re-export commonly used types from core
pub use self::core::{
    AppObject, AppObjectRepo, Component, ComponentCore, ComponentKind, ComponentType, Entity,
    EntityCore, LogLevel, ObservableEntity, ObserverId, ObserverList, PmCore, PresentationManager,
};
pub use domain::{DomainFactory, DomainFactoryRepo};

// Re-export entities and values
pub use entities::{Memoized, RangedNumber};
pub use values::{Angle, Color, Matrix, Quaternion, Vector2, Vector3};
