//! Example presentation managers.
//!
//! Both PMs watch one entity and push a fresh view model on every change:
//! - `ExamplePm`: sibling `ExampleEntity`, view model is its string
//! - `ExampleSingletonPm`: the `SingletonEntityExample`, view model is `ExampleVm`
//!
//! The change observer holds the PM weakly and is removed again on dispose.

use std::sync::{Arc, Mutex, Weak};

use crate::core::{
    AppObject, AppObjectRepo, Component, ComponentCore, ComponentType, Entity, ObserverId, PmCore,
    PresentationManager, get_singleton_component,
};

use super::entities::{ExampleEntity, SingletonEntityExample};

/// Change observer a PM registered on an entity.
#[derive(Default)]
struct EntityWatch {
    slot: Mutex<Option<(Weak<dyn Entity>, ObserverId)>>,
}

impl EntityWatch {
    fn watch<E, F>(&self, entity: &Arc<E>, on_change: F)
    where
        E: Entity,
        F: Fn() + Send + Sync + 'static,
    {
        let id = entity.entity().add_change_observer(on_change);
        let weak = Arc::downgrade(entity);
        let weak: Weak<dyn Entity> = weak;
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some((weak, id));
    }

    fn release(&self) {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some((entity, id)) = slot
            && let Some(entity) = entity.upgrade()
        {
            entity.remove_change_observer(id);
        }
    }
}

// ========== ExamplePm ==========

pub struct ExamplePm {
    pm: PmCore<String>,
    watch: EntityWatch,
}

impl ComponentType for ExamplePm {
    const TYPE: &'static str = "ExamplePMType";
}

impl Component for ExamplePm {
    fn core(&self) -> &ComponentCore {
        self.pm.component()
    }

    fn dispose(&self) {
        self.watch.release();
        self.pm.dispose();
    }
}

impl PresentationManager for ExamplePm {
    type Vm = String;

    fn pm(&self) -> &PmCore<String> {
        &self.pm
    }

    fn vms_are_equal(&self, a: &String, b: &String) -> bool {
        a == b
    }
}

impl ExamplePm {
    /// Attach to `app_object`, start watching its `ExampleEntity` and
    /// publish the current string.
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let pm = Arc::new(Self {
            pm: PmCore::new(app_object, Self::TYPE),
            watch: EntityWatch::default(),
        });
        app_object.add_component(Arc::clone(&pm));

        if let Some(entity) = pm.example_entity() {
            let weak = Arc::downgrade(&pm);
            pm.watch.watch(&entity, move || {
                if let Some(pm) = weak.upgrade() {
                    pm.on_entity_change();
                }
            });
        }
        pm.on_entity_change();
        pm
    }

    pub fn get_by_id(id: &str, repo: &AppObjectRepo) -> Option<Arc<Self>> {
        repo.get_app_object_component::<Self>(id)
    }

    fn example_entity(&self) -> Option<Arc<ExampleEntity>> {
        self.pm.component().get_cached_local_component::<ExampleEntity>()
    }

    fn on_entity_change(&self) {
        if let Some(entity) = self.example_entity() {
            self.do_update_view(entity.a_string_property());
        }
    }
}

// ========== ExampleSingletonPm ==========

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExampleVm {
    pub a_bool_property: bool,
}

/// What a view shows before the PM has published anything.
pub const DEFAULT_EXAMPLE_VM: ExampleVm = ExampleVm {
    a_bool_property: true,
};

impl Default for ExampleVm {
    fn default() -> Self {
        DEFAULT_EXAMPLE_VM
    }
}

pub struct ExampleSingletonPm {
    pm: PmCore<ExampleVm>,
    watch: EntityWatch,
}

impl ComponentType for ExampleSingletonPm {
    const TYPE: &'static str = "ExampleSingletonPMType";
}

impl Component for ExampleSingletonPm {
    fn core(&self) -> &ComponentCore {
        self.pm.component()
    }

    fn dispose(&self) {
        self.watch.release();
        self.pm.dispose();
    }
}

impl PresentationManager for ExampleSingletonPm {
    type Vm = ExampleVm;

    fn pm(&self) -> &PmCore<ExampleVm> {
        &self.pm
    }

    fn vms_are_equal(&self, a: &ExampleVm, b: &ExampleVm) -> bool {
        a.a_bool_property == b.a_bool_property
    }
}

impl ExampleSingletonPm {
    /// Attach to `app_object`, watch the singleton entity, publish its
    /// current state and register as the repo's singleton.
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let pm = Arc::new(Self {
            pm: PmCore::new(app_object, Self::TYPE),
            watch: EntityWatch::default(),
        });
        app_object.add_component(Arc::clone(&pm));

        if let Some(entity) = pm.example_entity() {
            let weak = Arc::downgrade(&pm);
            pm.watch.watch(&entity, move || {
                if let Some(pm) = weak.upgrade() {
                    pm.on_entity_change();
                }
            });
        }
        pm.on_entity_change();

        if let Some(repo) = app_object.repo() {
            repo.register_singleton(Arc::clone(&pm));
        }
        pm
    }

    pub fn get(repo: &AppObjectRepo) -> Option<Arc<Self>> {
        get_singleton_component::<Self>(repo)
    }

    fn example_entity(&self) -> Option<Arc<SingletonEntityExample>> {
        self.pm.component().get_cached_singleton::<SingletonEntityExample>()
    }

    fn on_entity_change(&self) {
        if let Some(entity) = self.example_entity() {
            self.do_update_view(ExampleVm {
                a_bool_property: entity.a_bool_property(),
            });
        }
    }
}
