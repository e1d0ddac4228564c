//! AppObject - named container of components, at most one per type key.
//!
//! An app object is created through its repo (`AppObject::new` registers it,
//! `AppObjectRepo::get_or_create` reuses an existing one). Adding or removing a
//! component notifies the app object's observers; the repo forwards those
//! notifications to its own observers.
//!
//! Locks are never held while components are disposed or observers notified,
//! so callbacks are free to call back into the app object.

use std::fmt;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use super::component::{Component, ComponentType, downcast_component, same_component};
use super::observer::{ObservableEntity, ObserverId};
use super::repo::{AppObjectRepo, WeakRepo};

pub struct AppObject {
    id: String,
    repo: WeakRepo,
    components: RwLock<IndexMap<&'static str, Arc<dyn Component>>>,
    observable: ObservableEntity,
}

impl fmt::Debug for AppObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppObject")
            .field("id", &self.id)
            .field("components", &self.component_types())
            .finish()
    }
}

impl AppObject {
    /// Create an app object and register it with `repo`.
    ///
    /// An existing app object with the same id is replaced in the repo.
    pub fn new(id: impl Into<String>, repo: &AppObjectRepo) -> Arc<Self> {
        let ao = Arc::new(Self {
            id: id.into(),
            repo: repo.downgrade(),
            components: RwLock::new(IndexMap::new()),
            observable: ObservableEntity::new(),
        });
        repo.add(Arc::clone(&ao));
        ao
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn repo(&self) -> Option<AppObjectRepo> {
        self.repo.upgrade()
    }

    pub(crate) fn weak_repo(&self) -> WeakRepo {
        self.repo.clone()
    }

    // ========== Components ==========

    pub fn has_component(&self, type_name: &str) -> bool {
        self.components
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(type_name)
    }

    pub fn has<T: ComponentType>(&self) -> bool {
        self.has_component(T::TYPE)
    }

    /// Attach `component`, disposing any component already stored under its type.
    pub fn add_component<C: Component>(&self, component: Arc<C>) {
        self.add_component_dyn(component);
    }

    pub fn add_component_dyn(&self, component: Arc<dyn Component>) {
        let type_name = component.type_name();
        let existing = self.get_component_by_type(type_name);

        if let Some(existing) = existing {
            if same_component(existing.as_ref(), component.as_ref()) {
                log::debug!("AppObject {}: component {} already attached", self.id, type_name);
                return;
            }
            self.submit_warning(&format!(
                "Component {} is being replaced on {}",
                type_name, self.id
            ));
            existing.dispose();
        }

        self.components
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(type_name, component);
        log::trace!("AppObject {}: attached {}", self.id, type_name);
        self.notify();
    }

    /// Typed lookup. `None` if absent or stored under the key with another type.
    pub fn get_component<T: Component + ComponentType>(&self) -> Option<Arc<T>> {
        self.get_component_by_type(T::TYPE)
            .and_then(downcast_component::<T>)
    }

    /// Type-erased lookup by key.
    pub fn get_component_by_type(&self, type_name: &str) -> Option<Arc<dyn Component>> {
        self.components
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(type_name)
            .cloned()
    }

    /// Remove without disposing. No-op if nothing is stored under `type_name`.
    pub fn remove_component(&self, type_name: &str) {
        let removed = self
            .components
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .shift_remove(type_name);
        if removed.is_some() {
            log::trace!("AppObject {}: removed {}", self.id, type_name);
            self.notify();
        }
    }

    /// Components in attach order.
    pub fn all_components(&self) -> Vec<Arc<dyn Component>> {
        self.components
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn component_types(&self) -> Vec<&'static str> {
        self.components
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect()
    }

    /// Dispose every component, then leave the repo if this object is still
    /// the one registered under its id. Safe to call twice.
    pub fn dispose(&self) {
        let components: Vec<Arc<dyn Component>> = {
            let mut map = self.components.write().unwrap_or_else(|e| e.into_inner());
            map.drain(..).map(|(_, c)| c).collect()
        };
        log::debug!("AppObject {}: disposing {} component(s)", self.id, components.len());
        for component in components {
            component.dispose();
        }
        if let Some(repo) = self.repo()
            && repo
                .get(&self.id)
                .is_some_and(|registered| std::ptr::eq(registered.as_ref(), self))
        {
            repo.remove(&self.id);
        }
    }

    // ========== Observers ==========

    pub fn add_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.observable.add_observer(observer)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observable.remove_observer(id)
    }

    pub fn notify(&self) {
        self.observable.notify();
    }

    pub fn observable(&self) -> &ObservableEntity {
        &self.observable
    }

    fn submit_warning(&self, message: &str) {
        match self.repo() {
            Some(repo) => repo.submit_warning("AppObject", message),
            None => log::warn!("[AppObject]: {}", message),
        }
    }
}
