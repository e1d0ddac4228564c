//! DomainFactory - phased builder for one feature's components.
//!
//! A feature ships a factory that creates its entities, use cases and PMs.
//! Factories never build everything in one go: `DomainFactoryRepo::setup_domain`
//! drives every registered factory through four phases, finishing a phase for
//! all factories before the next one starts. A PM created in `setup_pms` can
//! therefore rely on the entities and use cases of every other feature.
//!
//! Factories are entities of type `"DomainFactory"` (one per app object) and
//! register with the repo's `DomainFactoryRepo` as soon as they are attached.
//!
//! # Usage
//! ```ignore
//! struct AudioFactory { entity: EntityCore }
//!
//! impl DomainFactory for AudioFactory {
//!     fn factory_name(&self) -> &str { "AudioFactory" }
//!     fn setup_entities(&self) { /* make entities on self.app_object() */ }
//!     fn setup_ucs(&self) {}
//!     fn setup_pms(&self) {}
//!     fn final_setup(&self) {}
//! }
//!
//! let factory = Arc::new(AudioFactory { entity: EntityCore::new(&ao, DOMAIN_FACTORY_TYPE) });
//! attach_domain_factory(&ao, factory);
//! ```

use std::sync::Arc;

use crate::core::{AppObject, Entity, LogLevel};

use super::domain_factory_repo::DomainFactoryRepo;

/// Component type shared by every factory.
pub const DOMAIN_FACTORY_TYPE: &str = "DomainFactory";

pub trait DomainFactory: Entity {
    /// Name used by `DomainFactoryRepo::get_by_name`.
    fn factory_name(&self) -> &str;

    /// Phase 1: data models and entity repos.
    fn setup_entities(&self);

    /// Phase 2: use cases operating on entities.
    fn setup_ucs(&self);

    /// Phase 3: presentation managers.
    fn setup_pms(&self);

    /// Phase 4: anything that needs all other components in place.
    fn final_setup(&self);
}

/// Attach `factory` to `app_object` and register it with the repo's
/// `DomainFactoryRepo`. Returns false if no `DomainFactoryRepo` exists yet;
/// the factory stays attached either way.
pub fn attach_domain_factory<F: DomainFactory>(app_object: &Arc<AppObject>, factory: Arc<F>) -> bool {
    app_object.add_component(Arc::clone(&factory));
    register_domain_factory(factory)
}

/// Register an already attached factory.
pub fn register_domain_factory(factory: Arc<dyn DomainFactory>) -> bool {
    let Some(factories) = factory
        .core()
        .get_singleton::<DomainFactoryRepo>(LogLevel::Warning)
    else {
        return false;
    };
    factories.add(factory);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        AppObjectRepo, Component, ComponentCore, ComponentKind, EntityCore, MemorySink,
    };

    struct NamedFactory {
        entity: EntityCore,
        name: String,
    }

    impl Component for NamedFactory {
        fn core(&self) -> &ComponentCore {
            self.entity.component()
        }

        fn dispose(&self) {
            self.entity.dispose();
        }
    }

    impl Entity for NamedFactory {
        fn entity(&self) -> &EntityCore {
            &self.entity
        }
    }

    impl DomainFactory for NamedFactory {
        fn factory_name(&self) -> &str {
            &self.name
        }
        fn setup_entities(&self) {}
        fn setup_ucs(&self) {}
        fn setup_pms(&self) {}
        fn final_setup(&self) {}
    }

    fn named(ao: &Arc<AppObject>, name: &str) -> Arc<NamedFactory> {
        Arc::new(NamedFactory {
            entity: EntityCore::new(ao, DOMAIN_FACTORY_TYPE),
            name: name.to_string(),
        })
    }

    #[test]
    fn test_factory_is_entity_of_domain_factory_type() {
        let repo = AppObjectRepo::new();
        repo.set_log_sink(MemorySink::new());
        let ao = repo.get_or_create("factory");
        let factory = named(&ao, "Named");
        attach_domain_factory(&ao, Arc::clone(&factory));

        assert_eq!(factory.type_name(), "DomainFactory");
        assert_eq!(factory.kind(), ComponentKind::Entity);
        assert!(ao.has_component(DOMAIN_FACTORY_TYPE));
    }

    #[test]
    fn test_registers_with_factory_repo() {
        let repo = AppObjectRepo::new();
        repo.set_log_sink(MemorySink::new());
        let factories = DomainFactoryRepo::attach(&repo.get_or_create("factories"));

        let ao = repo.get_or_create("factory");
        assert!(attach_domain_factory(&ao, named(&ao, "Named")));
        assert_eq!(factories.len(), 1);
        assert!(factories.get_by_name("Named").is_some());
    }

    #[test]
    fn test_without_factory_repo_stays_attached() {
        let repo = AppObjectRepo::new();
        let sink = MemorySink::new();
        repo.set_log_sink(sink.clone());

        let ao = repo.get_or_create("factory");
        assert!(!attach_domain_factory(&ao, named(&ao, "Orphan")));
        assert!(ao.has_component(DOMAIN_FACTORY_TYPE));
        assert!(sink.contains(LogLevel::Warning, "DomainFactoryRepo"));
    }
}
