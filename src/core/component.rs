//! App object components - the unit of behaviour attached to an `AppObject`.
//!
//! Every component embeds a `ComponentCore` that knows:
//! - its type key (`&'static str`, one component per key per app object)
//! - its coarse kind (entity, PM, use case, controller, view)
//! - its owning app object and repo (both held weakly, the repo owns them)
//! - a cache of sibling/singleton lookups
//!
//! Concrete types implement `Component` (plus `ComponentType` for typed
//! lookups) and are attached with `AppObject::add_component`.
//!
//! # Usage
//! ```ignore
//! struct Toggle { core: ComponentCore }
//!
//! impl ComponentType for Toggle { const TYPE: &'static str = "ToggleUC"; }
//!
//! impl Component for Toggle {
//!     fn core(&self) -> &ComponentCore { &self.core }
//! }
//!
//! let uc = Arc::new(Toggle { core: ComponentCore::new(&ao, Toggle::TYPE, ComponentKind::Uc) });
//! ao.add_component(Arc::clone(&uc));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use super::app_object::AppObject;
use super::log_sink::LogLevel;
use super::repo::{AppObjectRepo, WeakRepo};

/// Coarse classification of a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    Entity,
    Pm,
    Uc,
    Controller,
    View,
    #[default]
    Unknown,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Entity => "Entity",
            ComponentKind::Pm => "Presentation Manager",
            ComponentKind::Uc => "Use Case",
            ComponentKind::Controller => "Controller",
            ComponentKind::View => "View",
            ComponentKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Static type key of a concrete component type.
pub trait ComponentType {
    const TYPE: &'static str;
}

/// Upcast to `Arc<dyn Any>` so `Arc<dyn Component>` can be downcast.
pub trait AsAnyArc: Any + Send + Sync {
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

// Blanket impl for all qualifying types
impl<T: Any + Send + Sync> AsAnyArc for T {
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Behaviour unit attached to exactly one app object.
pub trait Component: AsAnyArc {
    fn core(&self) -> &ComponentCore;

    fn type_name(&self) -> &'static str {
        self.core().type_name()
    }

    fn kind(&self) -> ComponentKind {
        self.core().kind()
    }

    /// Detach from the owning app object if still registered there.
    ///
    /// Types with extra state (entities, PMs) override this and finish by
    /// calling `ComponentCore::detach`.
    fn dispose(&self) {
        self.core().detach();
    }
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type", &self.type_name())
            .field("kind", &self.kind())
            .field("app_object", &self.core().app_object_id())
            .finish()
    }
}

/// Downcast a type-erased component to its concrete type.
pub fn downcast_component<T: Component>(component: Arc<dyn Component>) -> Option<Arc<T>> {
    component.as_any_arc().downcast::<T>().ok()
}

/// True if both handles point at the same component instance.
pub fn same_component(a: &dyn Component, b: &dyn Component) -> bool {
    std::ptr::eq(a.core(), b.core())
}

/// State shared by every component.
pub struct ComponentCore {
    type_name: &'static str,
    kind: ComponentKind,
    app_object_id: String,
    app_object: Weak<AppObject>,
    repo: WeakRepo,
    cache: Mutex<HashMap<&'static str, Weak<dyn Any + Send + Sync>>>,
}

impl fmt::Debug for ComponentCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentCore")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("app_object_id", &self.app_object_id)
            .finish()
    }
}

impl ComponentCore {
    pub fn new(app_object: &Arc<AppObject>, type_name: &'static str, kind: ComponentKind) -> Self {
        Self {
            type_name,
            kind,
            app_object_id: app_object.id().to_string(),
            app_object: Arc::downgrade(app_object),
            repo: app_object.weak_repo(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn app_object_id(&self) -> &str {
        &self.app_object_id
    }

    /// Owning app object; `None` once it has been dropped.
    pub fn app_object(&self) -> Option<Arc<AppObject>> {
        self.app_object.upgrade()
    }

    pub fn repo(&self) -> Option<AppObjectRepo> {
        self.repo.upgrade()
    }

    /// Sender tag used for repo-routed logging: `"<app object id>/<type>"`.
    pub fn sender(&self) -> String {
        format!("{}/{}", self.app_object_id, self.type_name)
    }

    // ========== Lookups ==========

    /// Singleton lookup cached after the first hit. Warns on miss.
    pub fn get_cached_singleton<T: Component + ComponentType>(&self) -> Option<Arc<T>> {
        if let Some(hit) = self.cached::<T>() {
            return Some(hit);
        }
        let found = self.repo().and_then(|repo| repo.get_singleton::<T>());
        match found {
            Some(component) => {
                self.remember(&component);
                Some(component)
            }
            None => {
                self.warn(&format!("Unable to get cached singleton type {}", T::TYPE));
                None
            }
        }
    }

    /// Sibling lookup on the same app object, cached after the first hit.
    pub fn get_cached_local_component<T: Component + ComponentType>(&self) -> Option<Arc<T>> {
        if let Some(hit) = self.cached::<T>() {
            return Some(hit);
        }
        let found = self.app_object().and_then(|ao| ao.get_component::<T>());
        match found {
            Some(component) => {
                self.remember(&component);
                Some(component)
            }
            None => {
                self.warn(&format!("Unable to get local component of type {}", T::TYPE));
                None
            }
        }
    }

    /// Uncached singleton lookup; a miss is reported at `level`.
    pub fn get_singleton<T: Component + ComponentType>(&self, level: LogLevel) -> Option<Arc<T>> {
        let found = self.repo().and_then(|repo| repo.get_singleton::<T>());
        if found.is_none() {
            let msg = format!("Unable to get singleton type {}", T::TYPE);
            match level {
                LogLevel::Log => self.log(&msg),
                LogLevel::Error | LogLevel::Fatal => self.error(&msg),
                LogLevel::Warning => self.warn(&msg),
            }
        }
        found
    }

    fn cached<T: Component + ComponentType>(&self) -> Option<Arc<T>> {
        let weak = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(T::TYPE)
            .cloned()?;
        weak.upgrade()?.downcast::<T>().ok()
    }

    fn remember<T: Component + ComponentType>(&self, component: &Arc<T>) {
        let weak = Arc::downgrade(component);
        let weak: Weak<dyn Any + Send + Sync> = weak;
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(T::TYPE, weak);
    }

    // ========== Lifecycle ==========

    /// Remove the component owning this core from its app object, but only
    /// if it is still the registered instance for its type.
    pub fn detach(&self) {
        let Some(ao) = self.app_object() else {
            return;
        };
        let registered = ao.get_component_by_type(self.type_name);
        if let Some(registered) = registered
            && std::ptr::eq(registered.core(), self)
        {
            ao.remove_component(self.type_name);
        }
    }

    // ========== Logging passthrough ==========

    pub fn log(&self, message: &str) {
        self.submit(LogLevel::Log, message);
    }

    pub fn warn(&self, message: &str) {
        self.submit(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.submit(LogLevel::Error, message);
    }

    fn submit(&self, level: LogLevel, message: &str) {
        let sender = self.sender();
        match self.repo() {
            Some(repo) => repo.submit(level, &sender, message),
            None => log::warn!("[{}]: {} (repo dropped)", sender, message),
        }
    }
}
