//! Example use cases.

use std::sync::Arc;

use crate::core::{
    AppObject, AppObjectRepo, Component, ComponentCore, ComponentKind, ComponentType,
    get_singleton_component,
};

use super::entities::{ExampleEntity, SingletonEntityExample};

// ========== ToggleExampleBooleanUc ==========

pub struct ToggleExampleBooleanUc {
    core: ComponentCore,
}

impl ComponentType for ToggleExampleBooleanUc {
    const TYPE: &'static str = "ToggleExampleBooleanUCType";
}

impl Component for ToggleExampleBooleanUc {
    fn core(&self) -> &ComponentCore {
        &self.core
    }
}

impl ToggleExampleBooleanUc {
    /// Attach to `app_object` and register as the repo's singleton.
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let uc = Arc::new(Self {
            core: ComponentCore::new(app_object, Self::TYPE, ComponentKind::Uc),
        });
        app_object.add_component(Arc::clone(&uc));
        if let Some(repo) = app_object.repo() {
            repo.register_singleton(Arc::clone(&uc));
        }
        uc
    }

    pub fn get(repo: &AppObjectRepo) -> Option<Arc<Self>> {
        get_singleton_component::<Self>(repo)
    }

    pub fn toggle_example_boolean(&self) {
        let Some(entity) = self.core.get_cached_singleton::<SingletonEntityExample>() else {
            self.core.warn("Unable to find SingletonEntityExample");
            return;
        };
        entity.toggle();
    }
}

// ========== EditExampleStringUc ==========

pub struct EditExampleStringUc {
    core: ComponentCore,
}

impl ComponentType for EditExampleStringUc {
    const TYPE: &'static str = "EditExampleStringUCType";
}

impl Component for EditExampleStringUc {
    fn core(&self) -> &ComponentCore {
        &self.core
    }
}

impl EditExampleStringUc {
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let uc = Arc::new(Self {
            core: ComponentCore::new(app_object, Self::TYPE, ComponentKind::Uc),
        });
        app_object.add_component(Arc::clone(&uc));
        uc
    }

    pub fn get(app_object: &AppObject) -> Option<Arc<Self>> {
        app_object.get_component::<Self>()
    }

    pub fn get_by_id(id: &str, repo: &AppObjectRepo) -> Option<Arc<Self>> {
        repo.get_app_object_component::<Self>(id)
    }

    /// Write `text` into the sibling `ExampleEntity`.
    pub fn edit_example_string(&self, text: &str) {
        let Some(entity) = self.core.get_cached_local_component::<ExampleEntity>() else {
            self.core.warn("Unable to find ExampleEntity");
            return;
        };
        entity.set_a_string_property(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, MemorySink};

    fn setup() -> (AppObjectRepo, MemorySink) {
        let repo = AppObjectRepo::new();
        let sink = MemorySink::new();
        repo.set_log_sink(sink.clone());
        (repo, sink)
    }

    #[test]
    fn test_toggle_flips_singleton() {
        let (repo, _sink) = setup();
        let ao = repo.get_or_create("feature");
        let entity = SingletonEntityExample::attach(&ao);
        let uc = ToggleExampleBooleanUc::attach(&ao);

        uc.toggle_example_boolean();
        assert!(entity.a_bool_property());
        uc.toggle_example_boolean();
        assert!(!entity.a_bool_property());
    }

    #[test]
    fn test_toggle_is_singleton() {
        let (repo, _sink) = setup();
        let uc = ToggleExampleBooleanUc::attach(&repo.get_or_create("feature"));
        assert_eq!(uc.kind(), ComponentKind::Uc);
        assert!(Arc::ptr_eq(&ToggleExampleBooleanUc::get(&repo).unwrap(), &uc));
    }

    #[test]
    fn test_toggle_without_entity_warns() {
        let (repo, sink) = setup();
        let uc = ToggleExampleBooleanUc::attach(&repo.get_or_create("feature"));

        uc.toggle_example_boolean();
        assert!(sink.contains(LogLevel::Warning, "Unable to find SingletonEntityExample"));
    }

    #[test]
    fn test_edit_writes_sibling_entity() {
        let (repo, _sink) = setup();
        let ao = repo.get_or_create("item");
        let entity = ExampleEntity::attach(&ao);
        EditExampleStringUc::attach(&ao);

        let uc = EditExampleStringUc::get_by_id("item", &repo).unwrap();
        uc.edit_example_string("new text");
        assert_eq!(entity.a_string_property(), "new text");
    }

    #[test]
    fn test_edit_without_entity_warns() {
        let (repo, sink) = setup();
        let ao = repo.get_or_create("item");
        let uc = EditExampleStringUc::attach(&ao);

        uc.edit_example_string("ignored");
        assert!(sink.contains(LogLevel::Warning, "Unable to find ExampleEntity"));
    }
}
