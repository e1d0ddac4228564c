//! View binding seams between UI code and presentation managers.
//!
//! A UI layer knows only an adapter: it shows `default_vm()` until the PM
//! pushes a view model, subscribes with a callback and later unsubscribes with
//! the id it got back. `PmAdapter` targets a PM on a specific app object,
//! `SingletonPmAdapter` the repo-wide singleton PM.

use super::observer::ObserverId;
use super::pm::ViewCallback;
use super::repo::AppObjectRepo;

pub trait PmAdapter<Vm> {
    fn default_vm(&self) -> Vm;

    /// Attach `set_vm` to the PM on app object `id`. `None` if nothing was attached.
    fn subscribe(&self, id: &str, repo: &AppObjectRepo, set_vm: ViewCallback<Vm>) -> Option<ObserverId>;

    fn unsubscribe(&self, id: &str, repo: &AppObjectRepo, subscription: ObserverId);
}

pub trait SingletonPmAdapter<Vm> {
    fn default_vm(&self) -> Vm;

    fn subscribe(&self, repo: &AppObjectRepo, set_vm: ViewCallback<Vm>) -> Option<ObserverId>;

    fn unsubscribe(&self, repo: &AppObjectRepo, subscription: ObserverId);
}
