use cardedit_core::{
    EditResult, EditorConfig, EditorService, EditorServiceError, Fact, FactStore, Field,
    InMemoryFactStore, SessionAction,
};
use uuid::Uuid;

fn seeded_store() -> (InMemoryFactStore, Fact) {
    let mut store = InMemoryFactStore::new();
    store.insert(Fact::new(
        vec![Field::new("Front", 0, "2 + 2"), Field::new("Back", 1, "4")],
        "math, arithmetic",
    ));
    let target = Fact::new(
        vec![Field::new("Front", 0, "France"), Field::new("Back", 1, "Paris")],
        "geo",
    );
    store.insert(target.clone());
    (store, target)
}

#[test]
fn committed_change_is_persisted() {
    let (store, target) = seeded_store();
    let mut service = EditorService::new(store, EditorConfig::default());

    let result = service
        .edit_fact(target.id, |session, _| {
            session.set_field_text(1, "Paris, France")?;
            Ok(SessionAction::Commit)
        })
        .unwrap();
    assert_eq!(result, EditResult::Ok);

    let stored = service.load_fact(target.id).unwrap();
    assert_eq!(stored.fields[1].value, "Paris, France");
    assert_eq!(service.store().save_count(), 1);
}

#[test]
fn unchanged_commit_does_not_touch_store() {
    let (store, target) = seeded_store();
    let mut service = EditorService::new(store, EditorConfig::default());

    let result = service
        .edit_fact(target.id, |_, _| Ok(SessionAction::Commit))
        .unwrap();
    assert_eq!(result, EditResult::Canceled);
    assert_eq!(service.store().save_count(), 0);
}

#[test]
fn discarded_session_does_not_touch_store() {
    let (store, target) = seeded_store();
    let mut service = EditorService::new(store, EditorConfig::default());

    let result = service
        .edit_fact(target.id, |session, _| {
            session.set_field_text(0, "Germany")?;
            Ok(SessionAction::Discard)
        })
        .unwrap();
    assert_eq!(result, EditResult::Canceled);
    assert_eq!(service.load_fact(target.id).unwrap(), target);
    assert_eq!(service.store().save_count(), 0);
}

#[test]
fn tag_picker_uses_store_universe() {
    let (store, target) = seeded_store();
    let mut service = EditorService::new(store, EditorConfig::default());

    service
        .edit_fact(target.id, |session, service| {
            let picker = service.open_tag_picker(session)?;
            // sorted store tags: arithmetic, geo, math
            assert_eq!(picker.checked(), &[false, false, true, false]);
            session.pick_tag(3)?;
            session.confirm_tag_picker()?;
            Ok(SessionAction::Commit)
        })
        .unwrap();

    let stored = service.load_fact(target.id).unwrap();
    assert_eq!(stored.tags, "geo, math");
    assert_eq!(
        service.store().all_user_tags().unwrap(),
        vec!["arithmetic", "geo", "math"]
    );
}

#[test]
fn missing_fact_is_reported() {
    let (store, _) = seeded_store();
    let mut service = EditorService::new(store, EditorConfig::default());
    let missing = Uuid::new_v4();

    let err = service
        .edit_fact(missing, |_, _| Ok(SessionAction::Commit))
        .unwrap_err();
    assert!(matches!(err, EditorServiceError::FactNotFound(id) if id == missing));
}

#[test]
fn read_only_config_surfaces_session_error() {
    let (store, target) = seeded_store();
    let config = EditorConfig {
        display_transform_enabled: true,
        ..EditorConfig::default()
    };
    let mut service = EditorService::new(store, config);

    let err = service
        .edit_fact(target.id, |session, _| {
            session.set_field_text(1, "Lyon")?;
            Ok(SessionAction::Commit)
        })
        .unwrap_err();
    assert!(matches!(err, EditorServiceError::Session(_)));
    assert_eq!(service.store().save_count(), 0);
}
