//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `cardedit_core` linkage with a scripted edit session.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Set `CARDEDIT_LOG_DIR` to an absolute path to enable file logging.

use cardedit_core::{
    EditorConfig, EditorService, EditorServiceError, Fact, Field, InMemoryFactStore,
    SessionAction,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("cardedit_core ping={}", cardedit_core::ping());
    println!("cardedit_core version={}", cardedit_core::core_version());

    if let Ok(log_dir) = std::env::var("CARDEDIT_LOG_DIR") {
        if let Err(err) = cardedit_core::init_logging(cardedit_core::default_log_level(), &log_dir)
        {
            eprintln!("logging disabled: {err}");
        }
    }

    match run_probe() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_probe() -> Result<(), EditorServiceError> {
    let mut store = InMemoryFactStore::new();
    store.insert(Fact::new(vec![Field::new("Front", 0, "7 x 6")], "math"));
    let fact_id = store.insert(Fact::new(
        vec![Field::new("Front", 0, "France"), Field::new("Back", 1, "paris")],
        "geo",
    ));

    let config = EditorConfig::default();
    let add_tag_label = config.add_tag_label.clone();
    let mut service = EditorService::new(store, config);

    let result = service.edit_fact(fact_id, |session, service| {
        session.set_field_text(1, "Paris")?;
        service.open_tag_picker(session)?;
        session.add_new_tag("capitals");
        if let Some(picker) = session.tag_picker() {
            let labels = service.universe().read(|universe| {
                universe
                    .labels(&add_tag_label)
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            });
            for (index, label) in labels.iter().enumerate() {
                let mark = if picker.is_checked(index) { "x" } else { " " };
                println!("tag [{mark}] {label}");
            }
        }
        session.confirm_tag_picker()?;
        Ok(SessionAction::Commit)
    })?;

    let stored = service.load_fact(fact_id)?;
    info!("event=cli_probe module=cli status=ok result={result:?}");
    println!("result={result:?}");
    for field in &stored.fields {
        println!("field {}={}", field.name(), field.value);
    }
    println!("tags={}", stored.tags);
    Ok(())
}
