// Copyright 2025 Cowboy AI, LLC.

//! DenotatorPath resolution, ordering and persistence

mod fixtures;

use anyhow::Result;
use cim_denotator::{DenotatorError, DenotatorPath, Module, PersistedPath, Repository};
use fixtures::{form, musical_schema, score};
use pretty_assertions::assert_eq;

#[test]
fn schema_paths_agree_with_instances() -> Result<()> {
    let schema = musical_schema();
    let score = score(&schema, &[0.0, 1.0]);
    let path = DenotatorPath::new(score.form(), &[1, 0])?;

    let found = score.get(path.indices())?;
    assert_eq!(path.end_form(), Some(found.form()));
    assert_eq!(path.module(), Some(&Module::reals()));
    assert_eq!(path.element_path_index(), Some(2));
    Ok(())
}

#[test]
fn invalid_paths_name_the_base_form() {
    let schema = musical_schema();
    let err = DenotatorPath::new(&form(&schema, "Score"), &[0, 7]).unwrap_err();
    match err {
        DenotatorError::InvalidPath {
            base_form, indices, ..
        } => {
            assert_eq!(base_form, "Score");
            assert_eq!(indices, vec![0, 7]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn colimit_parents_along_event_paths() -> Result<()> {
    let schema = musical_schema();
    let events = form(&schema, "Events");
    let note_onset = DenotatorPath::new(&events, &[2, 0, 0])?;
    let rest_onset = DenotatorPath::new(&events, &[2, 1, 0])?;
    let other_event = DenotatorPath::new(&events, &[3, 1, 0])?;

    assert_eq!(
        note_onset.parent_colimit_paths(),
        vec![DenotatorPath::new(&events, &[2])?]
    );
    assert!(note_onset.in_conflicting_colimit_positions(&rest_onset));
    assert!(!note_onset.in_conflicting_colimit_positions(&other_event));
    Ok(())
}

#[test]
fn powerset_search_over_the_node_schema() -> Result<()> {
    let schema = musical_schema();
    let root = DenotatorPath::root(&form(&schema, "NodeScore"));
    let satellites = root.powerset_path(0).expect("satellite slot");
    assert_eq!(satellites.indices(), &[0, 1]);
    assert_eq!(satellites.end_form(), Some(&form(&schema, "Satellites")));
    assert_eq!(root.powerset_path(1), None);
    Ok(())
}

#[test]
fn persisted_paths_round_trip_through_json() -> Result<()> {
    let schema = musical_schema();
    let path = DenotatorPath::new(&form(&schema, "NodeScore"), &[1, 1, 0, 0, 3])?;

    let json = serde_json::to_string(&path.to_persisted())?;
    assert_eq!(json, r#"{"base_form":"NodeScore","indices":[1,1,0,0,3]}"#);

    let restored: PersistedPath = serde_json::from_str(&json)?;
    let repository = Repository::new(schema.clone());
    assert_eq!(restored.resolve(&repository)?, path);
    assert_eq!(restored.resolve(&schema)?, path);
    Ok(())
}

#[test]
fn persisted_paths_need_their_base_form() {
    let schema = musical_schema();
    let persisted: PersistedPath =
        serde_json::from_str(r#"{"base_form":"Symphony","indices":[]}"#).unwrap();
    assert_eq!(
        persisted.resolve(&schema).unwrap_err(),
        DenotatorError::UnknownForm("Symphony".to_string())
    );
}
