//! EntityRepo - entities of one kind keyed by their app object id.
//!
//! Embedded in an owning entity (e.g. `DomainFactoryRepo`). Members' change
//! notifications are forwarded to the owner's change list, and the owner is
//! notified whenever a member is added or removed.

use std::fmt;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use super::entity::Entity;
use super::observer::{ObservableEntity, ObserverId, ObserverList};

struct Slot<T: ?Sized> {
    entity: Arc<T>,
    forward: ObserverId,
}

pub struct EntityRepo<T: ?Sized + Entity> {
    owner: ObservableEntity,
    entries: RwLock<IndexMap<String, Slot<T>>>,
    on_added: ObserverList<Arc<T>>,
    on_removed: ObserverList<Arc<T>>,
}

impl<T: ?Sized + Entity> fmt::Debug for EntityRepo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        f.debug_struct("EntityRepo").field("ids", &ids).finish()
    }
}

impl<T: ?Sized + Entity> EntityRepo<T> {
    /// `owner` is the change list of the entity embedding this repo.
    pub fn new(owner: ObservableEntity) -> Self {
        Self {
            owner,
            entries: RwLock::new(IndexMap::new()),
            on_added: ObserverList::new(),
            on_removed: ObserverList::new(),
        }
    }

    /// Insert under the entity's app object id, replacing any previous entry.
    pub fn add(&self, entity: Arc<T>) {
        let id = entity.core().app_object_id().to_string();
        let owner = self.owner.clone();
        let forward = entity.entity().add_change_observer(move || owner.notify());

        let previous = self
            .entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                id,
                Slot {
                    entity: Arc::clone(&entity),
                    forward,
                },
            );
        if let Some(previous) = previous {
            previous.entity.entity().remove_change_observer(previous.forward);
        }

        self.owner.notify();
        self.on_added.notify(&entity);
    }

    pub fn remove_for_app_object(&self, id: &str) {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .shift_remove(id);
        let Some(slot) = removed else {
            return;
        };
        slot.entity.entity().remove_change_observer(slot.forward);

        self.owner.notify();
        self.on_removed.notify(&slot.entity);
    }

    pub fn get_for_app_object(&self, id: &str) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .map(|slot| Arc::clone(&slot.entity))
    }

    pub fn has_for_app_object(&self, id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }

    /// Members in insertion order.
    pub fn get_all(&self) -> Vec<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(|slot| Arc::clone(&slot.entity))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_entity_added_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.on_added.add(observer)
    }

    pub fn remove_entity_added_observer(&self, id: ObserverId) -> bool {
        self.on_added.remove(id)
    }

    pub fn add_entity_removed_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        self.on_removed.add(observer)
    }

    pub fn remove_entity_removed_observer(&self, id: ObserverId) -> bool {
        self.on_removed.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app_object::AppObject;
    use crate::core::component::{Component, ComponentCore, ComponentType};
    use crate::core::entity::EntityCore;
    use crate::core::log_sink::MemorySink;
    use crate::core::repo::AppObjectRepo;
    use crate::entities::MemoizedString;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Note {
        entity: EntityCore,
        text: MemoizedString,
    }

    impl ComponentType for Note {
        const TYPE: &'static str = "Note";
    }

    impl Component for Note {
        fn core(&self) -> &ComponentCore {
            self.entity.component()
        }

        fn dispose(&self) {
            self.entity.dispose();
        }
    }

    impl Entity for Note {
        fn entity(&self) -> &EntityCore {
            &self.entity
        }
    }

    fn note(ao: &Arc<AppObject>) -> Arc<Note> {
        let entity = EntityCore::new(ao, Note::TYPE);
        let text = MemoizedString::new(String::new(), entity.notifier());
        let n = Arc::new(Note { entity, text });
        ao.add_component(Arc::clone(&n));
        n
    }

    fn setup() -> (AppObjectRepo, ObservableEntity, Arc<AtomicUsize>, EntityRepo<Note>) {
        let repo = AppObjectRepo::new();
        repo.set_log_sink(MemorySink::new());
        let owner = ObservableEntity::new();
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        owner.add_observer(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let notes = EntityRepo::new(owner.clone());
        (repo, owner, count, notes)
    }

    #[test]
    fn test_add_get_remove() {
        let (repo, _owner, owner_count, notes) = setup();
        let a = note(&repo.get_or_create("a"));

        notes.add(Arc::clone(&a));
        assert!(notes.has_for_app_object("a"));
        assert!(Arc::ptr_eq(&notes.get_for_app_object("a").unwrap(), &a));
        assert_eq!(owner_count.load(Ordering::SeqCst), 1);

        notes.remove_for_app_object("a");
        notes.remove_for_app_object("a");
        assert!(notes.is_empty());
        assert_eq!(owner_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_member_changes_reach_owner() {
        let (repo, _owner, owner_count, notes) = setup();
        let a = note(&repo.get_or_create("a"));
        notes.add(Arc::clone(&a));

        a.text.set("hello".to_string());
        assert_eq!(owner_count.load(Ordering::SeqCst), 2);

        notes.remove_for_app_object("a");
        a.text.set("bye".to_string());
        assert_eq!(owner_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_replace_moves_forwarding() {
        let (repo, _owner, owner_count, notes) = setup();
        let ao = repo.get_or_create("a");
        let first = note(&ao);
        notes.add(Arc::clone(&first));
        let second = note(&ao);
        notes.add(Arc::clone(&second));
        assert_eq!(notes.len(), 1);
        let before = owner_count.load(Ordering::SeqCst);

        first.text.set("stale".to_string());
        assert_eq!(owner_count.load(Ordering::SeqCst), before);
        second.text.set("fresh".to_string());
        assert_eq!(owner_count.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_added_removed_observers() {
        let (repo, _owner, _count, notes) = setup();
        let events = Arc::new(Mutex::new(Vec::new()));
        let e = Arc::clone(&events);
        notes.add_entity_added_observer(move |n| e.lock().unwrap().push(format!("+{}", n.core().app_object_id())));
        let e = Arc::clone(&events);
        notes.add_entity_removed_observer(move |n| e.lock().unwrap().push(format!("-{}", n.core().app_object_id())));

        notes.add(note(&repo.get_or_create("x")));
        notes.add(note(&repo.get_or_create("y")));
        notes.remove_for_app_object("x");

        assert_eq!(*events.lock().unwrap(), vec!["+x", "+y", "-x"]);
        let ids: Vec<String> = notes
            .get_all()
            .iter()
            .map(|n| n.core().app_object_id().to_string())
            .collect();
        assert_eq!(ids, vec!["y"]);
    }
}
