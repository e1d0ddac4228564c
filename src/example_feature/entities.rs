//! Example entities: a repo-wide singleton holding a flag, and per-object
//! entities holding a string, collected by `ExampleRepo`.

use std::sync::Arc;

use crate::core::{
    AppObject, AppObjectRepo, Component, ComponentCore, ComponentType, Entity, EntityCore,
    EntityRepo, get_singleton_component,
};
use crate::entities::{MemoizedBoolean, MemoizedString};

// ========== SingletonEntityExample ==========

pub struct SingletonEntityExample {
    entity: EntityCore,
    a_bool_property: MemoizedBoolean,
}

impl ComponentType for SingletonEntityExample {
    const TYPE: &'static str = "SingletonEntityExampleType";
}

impl Component for SingletonEntityExample {
    fn core(&self) -> &ComponentCore {
        self.entity.component()
    }

    fn dispose(&self) {
        self.entity.dispose();
    }
}

impl Entity for SingletonEntityExample {
    fn entity(&self) -> &EntityCore {
        &self.entity
    }
}

impl SingletonEntityExample {
    /// Attach to `app_object` and register as the repo's singleton.
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let entity = EntityCore::new(app_object, Self::TYPE);
        let a_bool_property = MemoizedBoolean::new(false, entity.notifier());
        let singleton = Arc::new(Self {
            entity,
            a_bool_property,
        });
        app_object.add_component(Arc::clone(&singleton));
        if let Some(repo) = app_object.repo() {
            repo.register_singleton(Arc::clone(&singleton));
        }
        singleton
    }

    pub fn get(repo: &AppObjectRepo) -> Option<Arc<Self>> {
        get_singleton_component::<Self>(repo)
    }

    pub fn a_bool_property(&self) -> bool {
        self.a_bool_property.get()
    }

    pub fn set_a_bool_property(&self, value: bool) {
        self.a_bool_property.set(value);
    }

    /// Flip the flag in one step; always notifies.
    pub fn toggle(&self) {
        self.a_bool_property.update(|current| !current);
    }
}

// ========== ExampleEntity ==========

pub struct ExampleEntity {
    entity: EntityCore,
    a_string_property: MemoizedString,
}

impl ComponentType for ExampleEntity {
    const TYPE: &'static str = "ExampleEntityType";
}

impl Component for ExampleEntity {
    fn core(&self) -> &ComponentCore {
        self.entity.component()
    }

    fn dispose(&self) {
        self.entity.dispose();
    }
}

impl Entity for ExampleEntity {
    fn entity(&self) -> &EntityCore {
        &self.entity
    }
}

impl ExampleEntity {
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let entity = EntityCore::new(app_object, Self::TYPE);
        let a_string_property = MemoizedString::new(String::new(), entity.notifier());
        let example = Arc::new(Self {
            entity,
            a_string_property,
        });
        app_object.add_component(Arc::clone(&example));
        example
    }

    pub fn get(app_object: &AppObject) -> Option<Arc<Self>> {
        app_object.get_component::<Self>()
    }

    pub fn get_by_id(id: &str, repo: &AppObjectRepo) -> Option<Arc<Self>> {
        repo.get_app_object_component::<Self>(id)
    }

    /// Existing entity on `app_object`, else a freshly attached one.
    pub fn add_if_missing(app_object: &Arc<AppObject>) -> Arc<Self> {
        Self::get(app_object).unwrap_or_else(|| Self::attach(app_object))
    }

    pub fn a_string_property(&self) -> String {
        self.a_string_property.get()
    }

    pub fn set_a_string_property(&self, value: &str) {
        self.a_string_property.set(value.to_string());
    }
}

// ========== ExampleRepo ==========

/// `ExampleEntity` collection. Each entity lives on its own app object.
pub struct ExampleRepo {
    entity: EntityCore,
    examples: EntityRepo<ExampleEntity>,
}

impl ComponentType for ExampleRepo {
    const TYPE: &'static str = "ExampleRepoType";
}

impl Component for ExampleRepo {
    fn core(&self) -> &ComponentCore {
        self.entity.component()
    }

    fn dispose(&self) {
        self.entity.dispose();
    }
}

impl Entity for ExampleRepo {
    fn entity(&self) -> &EntityCore {
        &self.entity
    }
}

impl ExampleRepo {
    pub fn attach(app_object: &Arc<AppObject>) -> Arc<Self> {
        let entity = EntityCore::new(app_object, Self::TYPE);
        let examples = EntityRepo::new(entity.change_observable());
        let repo = Arc::new(Self { entity, examples });
        app_object.add_component(Arc::clone(&repo));
        repo
    }

    pub fn get(app_object: &AppObject) -> Option<Arc<Self>> {
        app_object.get_component::<Self>()
    }

    pub fn get_by_id(id: &str, repo: &AppObjectRepo) -> Option<Arc<Self>> {
        repo.get_app_object_component::<Self>(id)
    }

    pub fn add_if_missing(app_object: &Arc<AppObject>) -> Arc<Self> {
        Self::get(app_object).unwrap_or_else(|| Self::attach(app_object))
    }

    /// Members, keyed by their app object id.
    pub fn examples(&self) -> &EntityRepo<ExampleEntity> {
        &self.examples
    }

    /// Create an entity on app object `id` (a new uuid when `None`) and add it.
    /// `None` only if the owning repo has been dropped.
    pub fn create_example_entity(&self, id: Option<&str>) -> Option<Arc<ExampleEntity>> {
        let id = match id {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };
        let repo = self.core().repo()?;
        let example = ExampleEntity::attach(&repo.get_or_create(&id));
        self.examples.add(Arc::clone(&example));
        Some(example)
    }

    /// Dispose the entity's app object and forget it. Unknown ids are ignored.
    pub fn delete_example_entity(&self, id: &str) {
        let Some(example) = self.examples.get_for_app_object(id) else {
            return;
        };
        if let Some(app_object) = example.core().app_object() {
            app_object.dispose();
        }
        self.examples.remove_for_app_object(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemorySink;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() -> AppObjectRepo {
        let repo = AppObjectRepo::new();
        repo.set_log_sink(MemorySink::new());
        repo
    }

    fn counter(entity: &dyn Entity) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        entity.add_change_observer(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        count
    }

    #[test]
    fn test_example_entity_string_property() {
        let repo = setup();
        let ao = repo.get_or_create("test-app-object-id");
        let example = ExampleEntity::attach(&ao);
        assert_eq!(example.a_string_property(), "");

        let changes = counter(example.as_ref());
        example.set_a_string_property("test string value");
        example.set_a_string_property("test string value");
        assert_eq!(example.a_string_property(), "test string value");
        assert_eq!(changes.load(Ordering::SeqCst), 1);

        example.set_a_string_property("new value");
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_example_entity_lookups() {
        let repo = setup();
        let ao = repo.get_or_create("test-app-object-id");
        let example = ExampleEntity::attach(&ao);

        assert!(Arc::ptr_eq(&ExampleEntity::get(&ao).unwrap(), &example));
        assert!(Arc::ptr_eq(
            &ExampleEntity::get_by_id("test-app-object-id", &repo).unwrap(),
            &example
        ));
        assert!(ExampleEntity::get_by_id("missing", &repo).is_none());
    }

    #[test]
    fn test_example_entity_add_if_missing() {
        let repo = setup();
        let ao = repo.get_or_create("new-id");
        assert!(ExampleEntity::get(&ao).is_none());

        let created = ExampleEntity::add_if_missing(&ao);
        let again = ExampleEntity::add_if_missing(&ao);
        assert!(Arc::ptr_eq(&created, &again));
    }

    #[test]
    fn test_singleton_registers_itself() {
        let repo = setup();
        let singleton = SingletonEntityExample::attach(&repo.get_or_create("feature"));

        assert!(repo.singleton_types().contains(&SingletonEntityExample::TYPE));
        assert!(Arc::ptr_eq(&SingletonEntityExample::get(&repo).unwrap(), &singleton));
        assert!(!singleton.a_bool_property());
    }

    #[test]
    fn test_singleton_toggle_notifies_each_time() {
        let repo = setup();
        let singleton = SingletonEntityExample::attach(&repo.get_or_create("feature"));
        let changes = counter(singleton.as_ref());

        singleton.toggle();
        assert!(singleton.a_bool_property());
        singleton.toggle();
        assert!(!singleton.a_bool_property());
        assert_eq!(changes.load(Ordering::SeqCst), 2);

        singleton.set_a_bool_property(false);
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_repo_create_with_id() {
        let repo = setup();
        let examples = ExampleRepo::attach(&repo.get_or_create("examples"));

        let created = examples.create_example_entity(Some("item")).unwrap();
        assert_eq!(created.core().app_object_id(), "item");
        assert!(repo.has("item"));
        assert!(examples.examples().has_for_app_object("item"));
    }

    #[test]
    fn test_repo_create_generates_unique_ids() {
        let repo = setup();
        let examples = ExampleRepo::attach(&repo.get_or_create("examples"));

        let a = examples.create_example_entity(None).unwrap();
        let b = examples.create_example_entity(None).unwrap();
        assert_ne!(a.core().app_object_id(), b.core().app_object_id());
        assert_eq!(examples.examples().len(), 2);
    }

    #[test]
    fn test_repo_delete_disposes_app_object() {
        let repo = setup();
        let examples = ExampleRepo::attach(&repo.get_or_create("examples"));
        let created = examples.create_example_entity(Some("item")).unwrap();
        let ao = created.core().app_object().unwrap();

        examples.delete_example_entity("item");
        assert!(!repo.has("item"));
        assert!(!ao.has::<ExampleEntity>());
        assert!(examples.examples().is_empty());

        // Unknown id is a no-op
        examples.delete_example_entity("item");
    }

    #[test]
    fn test_repo_forwards_member_changes() {
        let repo = setup();
        let examples = ExampleRepo::attach(&repo.get_or_create("examples"));
        let created = examples.create_example_entity(Some("item")).unwrap();
        let changes = counter(examples.as_ref());

        created.set_a_string_property("edited");
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }
}
