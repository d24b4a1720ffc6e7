// Copyright 2025 Cowboy AI, LLC.

//! Shared musical schema for integration tests

#![allow(dead_code)]

use cim_denotator::{Denotator, Form, Module, ModuleElement, Schema, SchemaBuilder};

/// Notes, rests, scores and self-similar nodes with satellites
pub fn musical_schema() -> Schema {
    SchemaBuilder::new()
        .simple("Onset", Module::reals())
        .simple("Pitch", Module::integers())
        .simple("Loudness", Module::integers())
        .simple("Duration", Module::reals())
        .simple("Voice", Module::integers())
        .labeled_limit(
            "Note",
            [
                ("onset", "Onset"),
                ("pitch", "Pitch"),
                ("loudness", "Loudness"),
                ("duration", "Duration"),
                ("voice", "Voice"),
            ],
        )
        .power("Score", "Note")
        .limit("Rest", ["Onset", "Duration"])
        .colimit("NoteOrRest", ["Note", "Rest"])
        .list("Events", "NoteOrRest")
        .limit("Node", ["Note", "Satellites"])
        .power("Satellites", "Node")
        .power("NodeScore", "Node")
        .build()
        .expect("musical schema links")
}

pub fn form(schema: &Schema, name: &str) -> Form {
    schema.form(name).expect("form is registered")
}

fn simple(schema: &Schema, name: &str, element: ModuleElement) -> Denotator {
    Denotator::simple(None, &form(schema, name), element).expect("simple denotator")
}

pub fn onset(schema: &Schema, value: f64) -> Denotator {
    simple(schema, "Onset", ModuleElement::real(value))
}

pub fn note(schema: &Schema, onset_value: f64, pitch: i64) -> Denotator {
    let factors = vec![
        onset(schema, onset_value),
        simple(schema, "Pitch", ModuleElement::integer(pitch)),
        simple(schema, "Loudness", ModuleElement::integer(80)),
        simple(schema, "Duration", ModuleElement::real(1.0)),
        simple(schema, "Voice", ModuleElement::integer(0)),
    ];
    Denotator::limit(None, &form(schema, "Note"), factors).expect("note")
}

pub fn rest(schema: &Schema, onset_value: f64) -> Denotator {
    let factors = vec![
        onset(schema, onset_value),
        simple(schema, "Duration", ModuleElement::real(1.0)),
    ];
    Denotator::limit(None, &form(schema, "Rest"), factors).expect("rest")
}

pub fn score(schema: &Schema, onsets: &[f64]) -> Denotator {
    let notes = onsets.iter().map(|o| note(schema, *o, 60)).collect();
    Denotator::power(Some("score"), &form(schema, "Score"), notes).expect("score")
}

pub fn node(schema: &Schema, onset_value: f64, satellites: Vec<Denotator>) -> Denotator {
    let satellites =
        Denotator::power(None, &form(schema, "Satellites"), satellites).expect("satellites");
    Denotator::limit(
        None,
        &form(schema, "Node"),
        vec![note(schema, onset_value, 60), satellites],
    )
    .expect("node")
}
