//! DomainFactoryRepo - singleton registry running the phased domain setup.

use std::sync::Arc;

use crate::core::{
    AppObject, AppObjectRepo, Component, ComponentCore, ComponentType, Entity, EntityCore,
    EntityRepo, get_singleton_component,
};

use super::domain_factory::DomainFactory;

pub struct DomainFactoryRepo {
    entity: EntityCore,
    factories: EntityRepo<dyn DomainFactory>,
}

impl ComponentType for DomainFactoryRepo {
    const TYPE: &'static str = "DomainFactoryRepo";
}

impl Component for DomainFactoryRepo {
    fn core(&self) -> &ComponentCore {
        self.entity.component()
    }

    fn dispose(&self) {
        self.entity.dispose();
    }
}

impl Entity for DomainFactoryRepo {
    fn entity(&self) -> &EntityCore {
        &self.entity
    }
}

impl DomainFactoryRepo {
    /// Create and attach to `app_object`. Found later through implicit
    /// singleton discovery, so keep one per repo.
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let entity = EntityCore::new(app_object, Self::TYPE);
        let factories = EntityRepo::new(entity.change_observable());
        let repo = Arc::new(Self { entity, factories });
        app_object.add_component(Arc::clone(&repo));
        repo
    }

    pub fn get(repo: &AppObjectRepo) -> Option<Arc<Self>> {
        get_singleton_component::<Self>(repo)
    }

    pub fn add(&self, factory: Arc<dyn DomainFactory>) {
        log::debug!(
            "Registering domain factory {} on {}",
            factory.factory_name(),
            factory.core().app_object_id()
        );
        self.factories.add(factory);
    }

    pub fn get_all(&self) -> Vec<Arc<dyn DomainFactory>> {
        self.factories.get_all()
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DomainFactory>> {
        self.factories
            .get_all()
            .into_iter()
            .find(|factory| factory.factory_name() == name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Run each phase on every factory, in registration order, before
    /// starting the next phase.
    pub fn setup_domain(&self) {
        let all = self.factories.get_all();
        log::info!("Setting up domain ({} factories)", all.len());

        log::debug!("Phase 1: entities");
        for factory in &all {
            factory.setup_entities();
        }
        log::debug!("Phase 2: use cases");
        for factory in &all {
            factory.setup_ucs();
        }
        log::debug!("Phase 3: presentation managers");
        for factory in &all {
            factory.setup_pms();
        }
        log::debug!("Phase 4: final setup");
        for factory in &all {
            factory.final_setup();
        }
    }
}
