//! Example feature - a small vertical slice through the object model.
//!
//! Flow for one user action:
//! ```text
//! controller -> use case -> entity (memoized change) -> PM -> view model -> view
//! ```
//!
//! - Singleton slice: `SingletonEntityExample` (flag), `ToggleExampleBooleanUc`,
//!   `ExampleSingletonPm` (`ExampleVm`), `ExampleSingletonPmAdapter`,
//!   controller `toggle_example_boolean`
//! - Per-object slice: `ExampleEntity` (string) collected by `ExampleRepo`,
//!   `EditExampleStringUc`, `ExamplePm` (`String`), `ExamplePmAdapter`,
//!   controller `set_example_text`

pub mod adapters;
pub mod controllers;
pub mod entities;
pub mod factory;
pub mod pms;
pub mod ucs;


pub use adapters::{ExamplePmAdapter, ExampleSingletonPmAdapter};
pub use controllers::{set_example_text, toggle_example_boolean};
pub use entities::{ExampleEntity, ExampleRepo, SingletonEntityExample};
pub use factory::{EXAMPLE_FEATURE_ID, ExampleFeatureFactory, setup_example_feature};
pub use pms::{DEFAULT_EXAMPLE_VM, ExamplePm, ExampleSingletonPm, ExampleVm};
pub use ucs::{EditExampleStringUc, ToggleExampleBooleanUc};
