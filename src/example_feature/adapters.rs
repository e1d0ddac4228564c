//! View adapters for the example PMs.

use crate::core::{
    AppObjectRepo, ObserverId, PmAdapter, PresentationManager, SingletonPmAdapter, ViewCallback,
};

use super::pms::{DEFAULT_EXAMPLE_VM, ExamplePm, ExampleSingletonPm, ExampleVm};

/// Binds a view to the `ExamplePm` on a given app object.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExamplePmAdapter;

impl PmAdapter<String> for ExamplePmAdapter {
    fn default_vm(&self) -> String {
        String::new()
    }

    fn subscribe(&self, id: &str, repo: &AppObjectRepo, set_vm: ViewCallback<String>) -> Option<ObserverId> {
        // Views mount before they know their id
        if id.is_empty() {
            return None;
        }
        let Some(pm) = ExamplePm::get_by_id(id, repo) else {
            repo.submit_warning("ExamplePmAdapter", "Unable to find ExamplePM");
            return None;
        };
        Some(pm.add_view(set_vm))
    }

    fn unsubscribe(&self, id: &str, repo: &AppObjectRepo, subscription: ObserverId) {
        if let Some(pm) = ExamplePm::get_by_id(id, repo) {
            pm.remove_view(subscription);
        }
    }
}

/// Binds a view to the repo's `ExampleSingletonPm`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExampleSingletonPmAdapter;

impl SingletonPmAdapter<ExampleVm> for ExampleSingletonPmAdapter {
    fn default_vm(&self) -> ExampleVm {
        DEFAULT_EXAMPLE_VM
    }

    fn subscribe(&self, repo: &AppObjectRepo, set_vm: ViewCallback<ExampleVm>) -> Option<ObserverId> {
        let Some(pm) = ExampleSingletonPm::get(repo) else {
            repo.submit_error("ExampleSingletonPmAdapter", "Unable to find ExampleSingletonPM");
            return None;
        };
        Some(pm.add_view(set_vm))
    }

    fn unsubscribe(&self, repo: &AppObjectRepo, subscription: ObserverId) {
        if let Some(pm) = ExampleSingletonPm::get(repo) {
            pm.remove_view(subscription);
        }
    }
}
