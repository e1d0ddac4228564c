//! Controllers - entry points a UI calls in response to user input.

use crate::core::AppObjectRepo;

use super::ucs::{EditExampleStringUc, ToggleExampleBooleanUc};

pub fn toggle_example_boolean(repo: &AppObjectRepo) {
    let Some(uc) = ToggleExampleBooleanUc::get(repo) else {
        repo.submit_warning("toggle_example_boolean", "Unable to find ToggleExampleBooleanUC");
        return;
    };
    uc.toggle_example_boolean();
}

pub fn set_example_text(text: &str, id: &str, repo: &AppObjectRepo) {
    let Some(uc) = EditExampleStringUc::get_by_id(id, repo) else {
        repo.submit_warning("set_example_text", "Unable to find EditExampleStringUC");
        return;
    };
    uc.edit_example_string(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, MemorySink};
    use crate::example_feature::entities::{ExampleEntity, SingletonEntityExample};

    fn setup() -> (AppObjectRepo, MemorySink) {
        let repo = AppObjectRepo::new();
        let sink = MemorySink::new();
        repo.set_log_sink(sink.clone());
        (repo, sink)
    }

    #[test]
    fn test_toggle_calls_uc() {
        let (repo, _sink) = setup();
        let ao = repo.get_or_create("feature");
        let entity = SingletonEntityExample::attach(&ao);
        ToggleExampleBooleanUc::attach(&ao);

        toggle_example_boolean(&repo);
        assert!(entity.a_bool_property());
    }

    #[test]
    fn test_toggle_without_uc_warns() {
        let (repo, sink) = setup();
        toggle_example_boolean(&repo);
        assert!(sink.contains(LogLevel::Warning, "Unable to find ToggleExampleBooleanUC"));
    }

    #[test]
    fn test_set_text_calls_uc() {
        let (repo, _sink) = setup();
        let ao = repo.get_or_create("item");
        let entity = ExampleEntity::attach(&ao);
        EditExampleStringUc::attach(&ao);

        set_example_text("typed", "item", &repo);
        assert_eq!(entity.a_string_property(), "typed");
    }

    #[test]
    fn test_set_text_without_uc_warns() {
        let (repo, sink) = setup();
        repo.get_or_create("item");
        set_example_text("typed", "item", &repo);
        assert!(sink.contains(LogLevel::Warning, "Unable to find EditExampleStringUC"));
    }
}
