use appobjects::cli::Args;
use appobjects::config::{self, Settings};
use appobjects::core::{
    AppObjectRepo, Component, PmAdapter, SingletonPmAdapter, ViewCallback, print_app_object_details,
};
use appobjects::domain::DomainFactoryRepo;
use appobjects::example_feature::{
    EXAMPLE_FEATURE_ID, EditExampleStringUc, ExampleFeatureFactory, ExamplePm, ExamplePmAdapter,
    ExampleRepo, ExampleSingletonPmAdapter, ExampleVm, set_example_text, toggle_example_boolean,
};
use appobjects::utils::{LerpNumber, LerpRequest};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;
    config::init_logging(args.verbosity, args.log_path().as_deref(), &settings)?;

    info!("appobjects demo starting...");
    debug!("Command-line args: {:?}", args);
    debug!("Settings: {:?}", settings);

    let repo = AppObjectRepo::new();
    let factories = DomainFactoryRepo::attach(&repo.get_or_create("DomainFactories"));
    ExampleFeatureFactory::attach(&repo);
    factories.setup_domain();
    print_app_object_details(EXAMPLE_FEATURE_ID, &repo);

    // ========== Singleton slice ==========
    let flag_view: ViewCallback<ExampleVm> = Arc::new(|vm: &ExampleVm| {
        println!(
            "flag view: {}",
            serde_json::to_string(vm).unwrap_or_else(|_| format!("{:?}", vm))
        );
    });
    println!("flag view (default): {:?}", ExampleSingletonPmAdapter.default_vm());
    let flag_sub = ExampleSingletonPmAdapter
        .subscribe(&repo, flag_view)
        .context("Example feature has no ExampleSingletonPM")?;

    for _ in 0..args.toggles {
        toggle_example_boolean(&repo);
    }
    ExampleSingletonPmAdapter.unsubscribe(&repo, flag_sub);

    // ========== Per-object slice ==========
    if let Some(text) = &args.text {
        let examples = repo
            .get_singleton::<ExampleRepo>()
            .context("Example feature has no ExampleRepo")?;
        let entity = examples
            .create_example_entity(None)
            .context("Failed to create example entity")?;
        let id = entity.core().app_object_id().to_string();
        if let Some(ao) = repo.get(&id) {
            EditExampleStringUc::attach(&ao);
            ExamplePm::attach(&ao);
        }

        let text_view: ViewCallback<String> = Arc::new(|vm: &String| println!("text view: {:?}", vm));
        let text_sub = ExamplePmAdapter.subscribe(&id, &repo, text_view);
        set_example_text(text, &id, &repo);
        if let Some(sub) = text_sub {
            ExamplePmAdapter.unsubscribe(&id, &repo, sub);
        }
        examples.delete_example_entity(&id);
    }

    // ========== Lerp ==========
    if let Some(target) = args.lerp_to {
        let mut lerp = LerpNumber::from_settings(&settings);
        let steps = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&steps);
        let done = lerp.lerp(LerpRequest::new(0.0, target, move |value| {
            s.fetch_add(1, Ordering::Relaxed);
            debug!("lerp value: {:.3}", value);
        }));
        lerp.run_to_end();
        let outcome = done.recv().context("Lerp finished without reporting")?;
        println!(
            "lerp 0 -> {}: {:?} after {} updates",
            target,
            outcome,
            steps.load(Ordering::Relaxed)
        );
    }

    info!("appobjects demo done");
    Ok(())
}
