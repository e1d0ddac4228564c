//! AppObjectRepo - registry of app objects and singleton components.
//!
//! **Why**: components never reach for globals. Everything a component can
//! find (siblings, singletons, the log sink) is reachable from the repo handle
//! it was created under, so tests build a fresh repo per case.
//!
//! `AppObjectRepo` is a cheap `Clone` handle (`Arc` inside). App objects and
//! components hold a `WeakRepo` back-reference; the repo owns them.
//!
//! Both maps are insertion ordered (`IndexMap`), which makes implicit singleton
//! discovery deterministic: with several candidates the first registered app
//! object wins.

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use indexmap::IndexMap;

use super::app_object::AppObject;
use super::component::{Component, ComponentType, downcast_component};
use super::log_sink::{FacadeSink, LogLevel, LogSink};
use super::observer::{ObservableEntity, ObserverId, ObserverList};

/// Registered app object plus the id of the repo's forwarding observer on it.
struct Entry {
    app_object: Arc<AppObject>,
    forward: ObserverId,
}

struct RepoInner {
    app_objects: RwLock<IndexMap<String, Entry>>,
    singletons: RwLock<IndexMap<&'static str, Arc<dyn Component>>>,
    observable: ObservableEntity,
    on_added: ObserverList<Arc<AppObject>>,
    on_removed: ObserverList<Arc<AppObject>>,
    sink: RwLock<Arc<dyn LogSink>>,
}

/// Shared handle to an app object registry.
#[derive(Clone)]
pub struct AppObjectRepo {
    inner: Arc<RepoInner>,
}

/// Non-owning repo handle held by app objects and components.
#[derive(Clone, Default)]
pub struct WeakRepo {
    inner: Weak<RepoInner>,
}

impl WeakRepo {
    pub fn upgrade(&self) -> Option<AppObjectRepo> {
        self.inner.upgrade().map(|inner| AppObjectRepo { inner })
    }
}

impl fmt::Debug for WeakRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakRepo")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl Default for AppObjectRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppObjectRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppObjectRepo")
            .field("app_objects", &self.ids())
            .field("singletons", &self.singleton_types())
            .finish()
    }
}

impl AppObjectRepo {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RepoInner {
                app_objects: RwLock::new(IndexMap::new()),
                singletons: RwLock::new(IndexMap::new()),
                observable: ObservableEntity::new(),
                on_added: ObserverList::new(),
                on_removed: ObserverList::new(),
                sink: RwLock::new(Arc::new(FacadeSink)),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakRepo {
        WeakRepo {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &AppObjectRepo) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ========== App objects ==========

    pub fn has(&self, id: &str) -> bool {
        self.inner
            .app_objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }

    /// Register `app_object`, replacing any entry with the same id.
    pub fn add(&self, app_object: Arc<AppObject>) {
        let weak = self.downgrade();
        let forward = app_object.add_observer(move || {
            if let Some(repo) = weak.upgrade() {
                repo.notify();
            }
        });

        let previous = self
            .inner
            .app_objects
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                app_object.id().to_string(),
                Entry {
                    app_object: Arc::clone(&app_object),
                    forward,
                },
            );
        if let Some(previous) = previous {
            previous.app_object.remove_observer(previous.forward);
            log::debug!("AppObjectRepo: replaced app object {}", app_object.id());
        } else {
            log::trace!("AppObjectRepo: added app object {}", app_object.id());
        }

        self.notify();
        self.inner.on_added.notify(&app_object);
    }

    /// Unregister by id. Does not dispose the app object.
    pub fn remove(&self, id: &str) {
        let removed = self
            .inner
            .app_objects
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .shift_remove(id);
        let Some(entry) = removed else {
            return;
        };
        entry.app_object.remove_observer(entry.forward);
        log::trace!("AppObjectRepo: removed app object {}", id);

        self.notify();
        self.inner.on_removed.notify(&entry.app_object);
    }

    pub fn get(&self, id: &str) -> Option<Arc<AppObject>> {
        self.inner
            .app_objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .map(|entry| Arc::clone(&entry.app_object))
    }

    pub fn get_or_create(&self, id: &str) -> Arc<AppObject> {
        match self.get(id) {
            Some(existing) => existing,
            None => AppObject::new(id, self),
        }
    }

    /// All app objects in registration order.
    pub fn get_all(&self) -> Vec<Arc<AppObject>> {
        self.inner
            .app_objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(|entry| Arc::clone(&entry.app_object))
            .collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.inner
            .app_objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .app_objects
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_all_app_objects_with_component(&self, type_name: &str) -> Vec<Arc<AppObject>> {
        self.get_all()
            .into_iter()
            .filter(|ao| ao.has_component(type_name))
            .collect()
    }

    /// Every component stored under `type_name`, type-erased.
    pub fn get_all_components_by_type(&self, type_name: &str) -> Vec<Arc<dyn Component>> {
        self.get_all()
            .iter()
            .filter_map(|ao| ao.get_component_by_type(type_name))
            .collect()
    }

    /// Every component of type `T`, in app object registration order.
    pub fn get_all_components<T: Component + ComponentType>(&self) -> Vec<Arc<T>> {
        self.get_all()
            .iter()
            .filter_map(|ao| ao.get_component::<T>())
            .collect()
    }

    pub fn get_app_object_component<T: Component + ComponentType>(&self, id: &str) -> Option<Arc<T>> {
        self.get(id)?.get_component::<T>()
    }

    // ========== Singletons ==========

    /// Register `component` as the canonical instance of its type.
    pub fn register_singleton<C: Component>(&self, component: Arc<C>) {
        self.register_singleton_dyn(component);
    }

    pub fn register_singleton_dyn(&self, component: Arc<dyn Component>) {
        let type_name = component.type_name();
        let replaced = self
            .inner
            .singletons
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(type_name, component);
        if replaced.is_some() {
            self.submit_warning(
                "AppObjectRepo",
                &format!("Singleton for type {} already exists. Replacing", type_name),
            );
        }
    }

    /// Explicit registry first, then a scan of all app objects.
    ///
    /// A scan with exactly one hit promotes it into the registry. Several hits
    /// warn and return the first; none warns and returns `None`.
    pub fn get_singleton<T: Component + ComponentType>(&self) -> Option<Arc<T>> {
        self.get_singleton_by_type(T::TYPE)
            .and_then(downcast_component::<T>)
    }

    pub fn get_singleton_by_type(&self, type_name: &'static str) -> Option<Arc<dyn Component>> {
        let registered = self
            .inner
            .singletons
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(type_name)
            .cloned();
        if registered.is_some() {
            return registered;
        }

        let mut candidates = self.get_all_components_by_type(type_name);
        match candidates.len() {
            0 => {
                self.submit_warning(
                    "AppObjectRepo",
                    &format!("Unable to find a singleton for {}", type_name),
                );
                None
            }
            1 => {
                let only = candidates.remove(0);
                self.inner
                    .singletons
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .insert(type_name, Arc::clone(&only));
                Some(only)
            }
            _ => {
                self.submit_warning(
                    "AppObjectRepo",
                    &format!(
                        "Multiple {} found. There should only be one if it truly a singleton. Using the first one",
                        type_name
                    ),
                );
                Some(candidates.remove(0))
            }
        }
    }

    pub fn singleton_types(&self) -> Vec<&'static str> {
        self.inner
            .singletons
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .copied()
            .collect()
    }

    // ========== Observers ==========

    pub fn add_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.observable.add_observer(observer)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.inner.observable.remove_observer(id)
    }

    pub fn notify(&self) {
        self.inner.observable.notify();
    }

    pub fn add_app_object_added_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&Arc<AppObject>) + Send + Sync + 'static,
    {
        self.inner.on_added.add(observer)
    }

    pub fn remove_app_object_added_observer(&self, id: ObserverId) -> bool {
        self.inner.on_added.remove(id)
    }

    pub fn add_app_object_removed_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&Arc<AppObject>) + Send + Sync + 'static,
    {
        self.inner.on_removed.add(observer)
    }

    pub fn remove_app_object_removed_observer(&self, id: ObserverId) -> bool {
        self.inner.on_removed.remove(id)
    }

    // ========== Logging ==========

    /// Route all `submit_*` calls to `sink` (e.g. a `MemorySink` in tests).
    pub fn set_log_sink(&self, sink: impl LogSink + 'static) {
        *self.inner.sink.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(sink);
    }

    pub fn log_sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.inner.sink.read().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn submit(&self, level: LogLevel, sender: &str, message: &str) {
        self.log_sink().submit(level, sender, message);
    }

    pub fn submit_log(&self, sender: &str, message: &str) {
        self.submit(LogLevel::Log, sender, message);
    }

    pub fn submit_warning(&self, sender: &str, message: &str) {
        self.submit(LogLevel::Warning, sender, message);
    }

    pub fn submit_error(&self, sender: &str, message: &str) {
        self.submit(LogLevel::Error, sender, message);
    }

    /// Logs only; never aborts.
    pub fn submit_fatal(&self, sender: &str, message: &str) {
        self.submit(LogLevel::Fatal, sender, message);
    }
}

/// Free-function form of `AppObjectRepo::get_singleton`.
pub fn get_singleton_component<T: Component + ComponentType>(repo: &AppObjectRepo) -> Option<Arc<T>> {
    repo.get_singleton::<T>()
}

/// Log an app object's id and component types at info level.
pub fn print_app_object_details(id: &str, repo: &AppObjectRepo) {
    let Some(ao) = repo.get(id) else {
        repo.submit_warning("printAppObjectDetails", "Unable to find App Object by ID");
        return;
    };
    log::info!("[printAppObjectDetails] Start App Object Details ---");
    log::info!("id: {}", ao.id());
    for component in ao.all_components() {
        log::info!("Has Component: {} ({})", component.type_name(), component.kind());
    }
    log::info!("[printAppObjectDetails] End App Object Details ---");
}
