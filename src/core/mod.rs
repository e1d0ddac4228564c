//! Core object model - app objects, components, repo, observers
//!
//! Independent of any feature code; features build entities, use cases and
//! presentation managers on top of these types.

pub mod adapters;
pub mod app_object;
pub mod component;
pub mod entity;
pub mod entity_repo;
pub mod log_sink;
pub mod observer;
pub mod pm;
pub mod repo;

// Re-exports for convenience
pub use adapters::{PmAdapter, SingletonPmAdapter};
pub use app_object::AppObject;
pub use component::{
    Component, ComponentCore, ComponentKind, ComponentType, downcast_component, same_component,
};
pub use entity::{Entity, EntityCore};
pub use entity_repo::EntityRepo;
pub use log_sink::{FacadeSink, LogLevel, LogRecord, LogSink, MemorySink};
pub use observer::{ObservableEntity, ObserverId, ObserverList, Subscription};
pub use pm::{PmCore, PresentationManager, ViewCallback};
pub use repo::{AppObjectRepo, WeakRepo, get_singleton_component, print_app_object_details};
