//! Presentation managers - turn entity state into view models for views.
//!
//! A PM keeps the last view model it emitted. `do_update_view` drops updates
//! that `vms_are_equal` considers unchanged, so views only hear about real
//! changes. A view added after the first update is immediately replayed the
//! last view model.

use std::fmt;
use std::sync::{Arc, RwLock};

use super::app_object::AppObject;
use super::component::{Component, ComponentCore, ComponentKind};
use super::observer::{ObserverId, ObserverList};

/// View callback receiving each new view model.
pub type ViewCallback<Vm> = Arc<dyn Fn(&Vm) + Send + Sync>;

pub struct PmCore<Vm> {
    component: ComponentCore,
    last_vm: RwLock<Option<Vm>>,
    views: ObserverList<Vm>,
}

impl<Vm: fmt::Debug> fmt::Debug for PmCore<Vm> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PmCore")
            .field("component", &self.component)
            .field("last_vm", &*self.last_vm.read().unwrap_or_else(|e| e.into_inner()))
            .field("views", &self.views.len())
            .finish()
    }
}

impl<Vm: Clone + Send + Sync + 'static> PmCore<Vm> {
    pub fn new(app_object: &Arc<AppObject>, type_name: &'static str) -> Self {
        Self {
            component: ComponentCore::new(app_object, type_name, ComponentKind::Pm),
            last_vm: RwLock::new(None),
            views: ObserverList::new(),
        }
    }

    pub fn component(&self) -> &ComponentCore {
        &self.component
    }

    pub fn last_vm(&self) -> Option<Vm> {
        self.last_vm.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Register a view; it is called right away with the last view model, if any.
    pub fn add_view(&self, view: ViewCallback<Vm>) -> ObserverId {
        let id = self.views.add_arc(Arc::clone(&view));
        if let Some(vm) = self.last_vm() {
            view(&vm);
        }
        id
    }

    pub fn remove_view(&self, id: ObserverId) -> bool {
        self.views.remove(id)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Store and broadcast `vm` unless `equal(last, vm)`. Returns whether views were notified.
    pub fn update_view(&self, vm: Vm, equal: impl Fn(&Vm, &Vm) -> bool) -> bool {
        // compare outside the lock; `equal` may read last_vm()
        if let Some(previous) = self.last_vm()
            && equal(&previous, &vm)
        {
            return false;
        }
        *self.last_vm.write().unwrap_or_else(|e| e.into_inner()) = Some(vm.clone());
        self.views.notify(&vm);
        true
    }

    /// Drop every view, then detach from the app object.
    pub fn dispose(&self) {
        self.views.clear();
        self.component.detach();
    }
}

/// A component that emits view models of type `Vm`.
pub trait PresentationManager: Component {
    type Vm: Clone + Send + Sync + 'static;

    fn pm(&self) -> &PmCore<Self::Vm>;

    fn vms_are_equal(&self, a: &Self::Vm, b: &Self::Vm) -> bool;

    fn last_vm(&self) -> Option<Self::Vm> {
        self.pm().last_vm()
    }

    fn add_view(&self, view: ViewCallback<Self::Vm>) -> ObserverId {
        self.pm().add_view(view)
    }

    fn remove_view(&self, id: ObserverId) -> bool {
        self.pm().remove_view(id)
    }

    fn do_update_view(&self, vm: Self::Vm) -> bool {
        self.pm().update_view(vm, |a, b| self.vms_are_equal(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::ComponentType;
    use crate::core::log_sink::MemorySink;
    use crate::core::repo::AppObjectRepo;
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    struct Vm {
        label: String,
        revision: u32,
    }

    struct LabelPm {
        pm: PmCore<Vm>,
    }

    impl ComponentType for LabelPm {
        const TYPE: &'static str = "LabelPm";
    }

    impl Component for LabelPm {
        fn core(&self) -> &ComponentCore {
            self.pm.component()
        }

        fn dispose(&self) {
            self.pm.dispose();
        }
    }

    impl PresentationManager for LabelPm {
        type Vm = Vm;

        fn pm(&self) -> &PmCore<Vm> {
            &self.pm
        }

        // revision is bookkeeping only
        fn vms_are_equal(&self, a: &Vm, b: &Vm) -> bool {
            a.label == b.label
        }
    }

    fn attach() -> (AppObjectRepo, Arc<LabelPm>) {
        let repo = AppObjectRepo::new();
        repo.set_log_sink(MemorySink::new());
        let ao = repo.get_or_create("pm-host");
        let pm = Arc::new(LabelPm {
            pm: PmCore::new(&ao, LabelPm::TYPE),
        });
        ao.add_component(Arc::clone(&pm));
        (repo, pm)
    }

    fn vm(label: &str, revision: u32) -> Vm {
        Vm {
            label: label.to_string(),
            revision,
        }
    }

    fn recorder() -> (ViewCallback<Vm>, Arc<Mutex<Vec<Vm>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        let cb: ViewCallback<Vm> = Arc::new(move |vm: &Vm| s.lock().unwrap().push(vm.clone()));
        (cb, seen)
    }

    #[test]
    fn test_kind_is_pm() {
        let (_repo, pm) = attach();
        assert_eq!(pm.kind(), ComponentKind::Pm);
        assert!(pm.last_vm().is_none());
    }

    #[test]
    fn test_no_replay_without_last_vm() {
        let (_repo, pm) = attach();
        let (cb, seen) = recorder();
        pm.add_view(cb);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_add_view_replays_last_vm() {
        let (_repo, pm) = attach();
        pm.do_update_view(vm("a", 1));

        let (cb, seen) = recorder();
        pm.add_view(cb);
        assert_eq!(*seen.lock().unwrap(), vec![vm("a", 1)]);
    }

    #[test]
    fn test_equal_vms_are_suppressed() {
        let (_repo, pm) = attach();
        let (cb, seen) = recorder();
        pm.add_view(cb);

        assert!(pm.do_update_view(vm("a", 1)));
        assert!(!pm.do_update_view(vm("a", 2)));
        assert!(pm.do_update_view(vm("b", 3)));

        assert_eq!(*seen.lock().unwrap(), vec![vm("a", 1), vm("b", 3)]);
        // suppressed update does not replace the stored vm
        assert_eq!(pm.last_vm(), Some(vm("b", 3)));
    }

    #[test]
    fn test_equality_check_may_read_last_vm() {
        let (_repo, pm) = attach();
        let reader = Arc::clone(&pm);
        let equal = move |a: &Vm, b: &Vm| reader.last_vm().as_ref() == Some(a) && a.label == b.label;

        assert!(pm.pm().update_view(vm("a", 1), &equal));
        assert!(!pm.pm().update_view(vm("a", 2), &equal));
        assert_eq!(pm.last_vm(), Some(vm("a", 1)));
    }

    #[test]
    fn test_remove_view() {
        let (_repo, pm) = attach();
        let (cb, seen) = recorder();
        let id = pm.add_view(cb);
        assert!(pm.remove_view(id));

        pm.do_update_view(vm("x", 0));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dispose_clears_views_and_detaches() {
        let (repo, pm) = attach();
        let (cb, seen) = recorder();
        pm.add_view(cb);

        pm.dispose();
        assert_eq!(pm.pm().view_count(), 0);
        assert!(repo.get_app_object_component::<LabelPm>("pm-host").is_none());

        pm.do_update_view(vm("late", 0));
        assert!(seen.lock().unwrap().is_empty());
    }
}
