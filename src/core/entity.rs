//! Entities - components that hold observable state.
//!
//! `EntityCore` wraps the `ComponentCore` and adds two observer lists:
//! - change: fired by the entity's memoized properties; forwarded to the
//!   owning app object's `notify` from construction until dispose
//! - dispose: fired once when the entity is disposed
//!
//! Entity types embed an `EntityCore`, implement `Component` by delegating to
//! it and override `dispose` with `EntityCore::dispose`.

use std::fmt;
use std::sync::{Arc, Mutex};

use super::app_object::AppObject;
use super::component::{Component, ComponentCore, ComponentKind};
use super::observer::{ObservableEntity, ObserverId, Subscription};

pub struct EntityCore {
    component: ComponentCore,
    on_change: ObservableEntity,
    on_dispose: ObservableEntity,
    forward: Mutex<Option<ObserverId>>,
}

impl fmt::Debug for EntityCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCore")
            .field("component", &self.component)
            .field("change_observers", &self.on_change.observer_count())
            .finish()
    }
}

impl EntityCore {
    pub fn new(app_object: &Arc<AppObject>, type_name: &'static str) -> Self {
        let on_change = ObservableEntity::new();
        let weak_ao = Arc::downgrade(app_object);
        let forward = on_change.add_observer(move || {
            if let Some(ao) = weak_ao.upgrade() {
                ao.notify();
            }
        });
        Self {
            component: ComponentCore::new(app_object, type_name, ComponentKind::Entity),
            on_change,
            on_dispose: ObservableEntity::new(),
            forward: Mutex::new(Some(forward)),
        }
    }

    pub fn component(&self) -> &ComponentCore {
        &self.component
    }

    pub fn add_change_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_change.add_observer(observer)
    }

    pub fn subscribe_changes<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_change.subscribe(observer)
    }

    pub fn remove_change_observer(&self, id: ObserverId) -> bool {
        self.on_change.remove_observer(id)
    }

    pub fn notify_on_change(&self) {
        self.on_change.notify();
    }

    /// Shared handle to the change list (e.g. for an `EntityRepo` owner).
    pub fn change_observable(&self) -> ObservableEntity {
        self.on_change.clone()
    }

    /// Change callback for memoized properties.
    pub fn notifier(&self) -> impl Fn() + Send + Sync + 'static {
        self.on_change.notifier()
    }

    pub fn add_on_dispose_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_dispose.add_observer(observer)
    }

    pub fn remove_on_dispose_observer(&self, id: ObserverId) -> bool {
        self.on_dispose.remove_observer(id)
    }

    /// Stop forwarding to the app object, fire dispose observers, drop all
    /// observers and detach the component.
    pub fn dispose(&self) {
        let forward = self.forward.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(id) = forward {
            self.on_change.remove_observer(id);
        }
        self.on_dispose.notify();
        self.on_change.clear();
        self.on_dispose.clear();
        self.component.detach();
    }
}

/// A component carrying observable state.
pub trait Entity: Component {
    fn entity(&self) -> &EntityCore;

    fn add_change_observer(&self, observer: Box<dyn Fn() + Send + Sync>) -> ObserverId {
        self.entity().add_change_observer(observer)
    }

    fn remove_change_observer(&self, id: ObserverId) -> bool {
        self.entity().remove_change_observer(id)
    }

    fn notify_on_change(&self) {
        self.entity().notify_on_change();
    }
}
