//! Example feature wiring.
//!
//! Two ways in:
//! - `ExampleFeatureFactory`: a `DomainFactory`, built up by
//!   `DomainFactoryRepo::setup_domain` together with every other feature
//! - `setup_example_feature`: builds the singleton triad directly, for tests
//!   and small tools without a factory repo

use std::sync::Arc;

use crate::core::{AppObject, AppObjectRepo, Component, ComponentCore, Entity, EntityCore};
use crate::domain::{DOMAIN_FACTORY_TYPE, DomainFactory, attach_domain_factory};

use super::entities::{ExampleRepo, SingletonEntityExample};
use super::pms::ExampleSingletonPm;
use super::ucs::ToggleExampleBooleanUc;

/// App object hosting the example feature's singletons.
pub const EXAMPLE_FEATURE_ID: &str = "ExampleFeature";

pub struct ExampleFeatureFactory {
    entity: EntityCore,
}

impl Component for ExampleFeatureFactory {
    fn core(&self) -> &ComponentCore {
        self.entity.component()
    }

    fn dispose(&self) {
        self.entity.dispose();
    }
}

impl Entity for ExampleFeatureFactory {
    fn entity(&self) -> &EntityCore {
        &self.entity
    }
}

impl DomainFactory for ExampleFeatureFactory {
    fn factory_name(&self) -> &str {
        "ExampleFeatureFactory"
    }

    fn setup_entities(&self) {
        let Some(ao) = self.app_object() else {
            return;
        };
        SingletonEntityExample::attach(&ao);
        ExampleRepo::attach(&ao);
    }

    fn setup_ucs(&self) {
        if let Some(ao) = self.app_object() {
            ToggleExampleBooleanUc::attach(&ao);
        }
    }

    fn setup_pms(&self) {
        if let Some(ao) = self.app_object() {
            ExampleSingletonPm::attach(&ao);
        }
    }

    fn final_setup(&self) {}
}

impl ExampleFeatureFactory {
    /// Attach to the `ExampleFeature` app object and register with the
    /// repo's `DomainFactoryRepo`.
    pub fn attach(repo: &AppObjectRepo) -> Arc<Self> {
        let ao = repo.get_or_create(EXAMPLE_FEATURE_ID);
        let factory = Arc::new(Self {
            entity: EntityCore::new(&ao, DOMAIN_FACTORY_TYPE),
        });
        attach_domain_factory(&ao, Arc::clone(&factory));
        factory
    }

    fn app_object(&self) -> Option<Arc<AppObject>> {
        let ao = self.core().app_object();
        if ao.is_none() {
            self.core().warn("App object dropped before setup");
        }
        ao
    }
}

/// Build the singleton entity, PM and toggle use case on the
/// `ExampleFeature` app object, in that order.
pub fn setup_example_feature(repo: &AppObjectRepo) -> Arc<SingletonEntityExample> {
    let ao = repo.get_or_create(EXAMPLE_FEATURE_ID);
    let entity = SingletonEntityExample::attach(&ao);
    ExampleSingletonPm::attach(&ao);
    ToggleExampleBooleanUc::attach(&ao);
    entity
}
