// Copyright 2025 Cowboy AI, LLC.

//! Properties that hold for every denotator and path

mod fixtures;

use cim_denotator::{
    CollectionBuilder, Denotator, DenotatorPath, Module, ModuleElement, ModuleMorphism,
    Repository, Ring, Scalar,
};
use fixtures::{form, musical_schema, note, score};
use proptest::prelude::*;
use test_case::test_case;

#[test]
fn every_form_has_a_valid_default() {
    let schema = musical_schema();
    for form in schema.forms() {
        let d = form.create_default_denotator().unwrap();
        assert!(d.has_form(&form), "default of {form} has the wrong form");
        assert!(d.check(), "default of {form} does not validate");
    }
}

#[test_case(0 ; "index zero")]
#[test_case(1 ; "index one")]
#[test_case(41 ; "far out of range")]
fn singleton_collections_send_every_index_to_their_factor(index: usize) {
    let schema = musical_schema();
    let single = score(&schema, &[3.0]);
    assert_eq!(single.factor_count(), 1);
    let factor = single.factor(0).unwrap();
    assert!(single.get(&[index]).unwrap().ptr_eq(&factor));
    assert_eq!(
        single.get(&[index, 0]).unwrap().element().unwrap(),
        ModuleElement::real(3.0)
    );
}

#[test]
fn moving_denotators_evaluate_at_the_null_element() {
    let schema = musical_schema();
    let shift = ModuleMorphism::translation(Ring::Reals, vec![Scalar::Real(0.25)]).unwrap();
    let moving = Denotator::simple_with_morphism(None, &form(&schema, "Onset"), shift).unwrap();
    let mut builder = CollectionBuilder::new(&form(&schema, "Score"), Module::reals()).unwrap();
    let n = note(&schema, 0.0, 60)
        .change_address(&Module::reals())
        .unwrap()
        .replace(&[0], &moving)
        .unwrap();
    builder.append_factor(&n).unwrap();
    let moving_score = builder.build();

    let evaluated = moving_score.at_null();
    assert!(!evaluated.ptr_eq(&moving_score));
    assert_eq!(
        evaluated.element_at(&[0, 0]).unwrap(),
        ModuleElement::real(0.25)
    );
    assert!(evaluated.check());
}

#[test]
fn evaluation_merges_power_factors_that_coincide() {
    let schema = musical_schema();
    let onset_form = form(&schema, "Onset");
    let moving = |morphism| {
        let onset = Denotator::simple_with_morphism(None, &onset_form, morphism).unwrap();
        note(&schema, 0.0, 60)
            .change_address(&Module::reals())
            .unwrap()
            .replace(&[0], &onset)
            .unwrap()
    };
    let later = moving(ModuleMorphism::translation(Ring::Reals, vec![Scalar::Real(1.0)]).unwrap());
    let doubled = moving(ModuleMorphism::scaling(Ring::Reals, 1, Scalar::Real(2.0)).unwrap());
    let mut builder = CollectionBuilder::new(&form(&schema, "Score"), Module::reals()).unwrap();
    builder.replace_factors(&[later, doubled]).unwrap();
    let moving_score = builder.build();
    assert_eq!(moving_score.factor_count(), 2);

    // x + 1 and 2x agree at 1
    let evaluated = moving_score.at(&ModuleElement::real(1.0)).unwrap();
    assert_eq!(evaluated.factor_count(), 1);
    assert_eq!(evaluated.element_at(&[0, 0]).unwrap(), ModuleElement::real(2.0));
    assert!(evaluated.check());

    let apart = moving_score.at(&ModuleElement::real(3.0)).unwrap();
    assert_eq!(apart.factor_count(), 2);
    assert!(apart.check());
}

#[test]
fn resolving_references_restores_power_order() {
    let schema = musical_schema();
    let note_form = form(&schema, "Note");
    let mut repository = Repository::new(schema.clone());
    repository
        .register(note(&schema, 1.0, 60).named_copy(Some("motif")))
        .unwrap();

    let later = note(&schema, 2.0, 60).named_copy(Some("motif"));
    let placeholder = Denotator::reference("motif", &note_form);
    let unresolved =
        Denotator::power(None, &form(&schema, "Score"), vec![placeholder, later.clone()]).unwrap();
    // the placeholder sorts after every resolved note of the same name
    assert!(unresolved.factors()[0].ptr_eq(&later));
    assert!(unresolved.factors()[1].is_reference());

    let resolved = unresolved.resolve_references(&repository).unwrap();
    assert_eq!(resolved.factor_count(), 2);
    assert_eq!(resolved.element_at(&[0, 0]).unwrap(), ModuleElement::real(1.0));
    assert_eq!(resolved.element_at(&[1, 0]).unwrap(), ModuleElement::real(2.0));
    assert!(resolved.factors()[1].ptr_eq(&later));
    assert!(resolved.check());
}

fn onsets() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec((0i32..64).prop_map(|v| f64::from(v) / 4.0), 0..8)
}

fn score_path() -> impl Strategy<Value = Vec<usize>> {
    prop_oneof![
        Just(Vec::new()),
        (0usize..8).prop_map(|a| vec![a]),
        (0usize..8, 0usize..5).prop_map(|(a, b)| vec![a, b]),
    ]
}

proptest! {
    #[test]
    fn null_addressed_at_null_is_identity(values in onsets()) {
        let schema = musical_schema();
        let d = score(&schema, &values);
        prop_assert!(d.is_null_addressed());
        prop_assert!(d.at_null().ptr_eq(&d));
    }

    #[test]
    fn get_matches_factor_unless_singleton(values in onsets(), index in 0usize..8) {
        let schema = musical_schema();
        let d = score(&schema, &values);
        let count = d.factor_count();
        match (count, d.get(&[index])) {
            (1, Ok(found)) => prop_assert!(found.ptr_eq(&d.factors()[0])),
            (_, Ok(found)) => prop_assert!(found.ptr_eq(&d.factor(index).unwrap())),
            (_, Err(err)) => {
                prop_assert!(count != 1 && index >= count);
                prop_assert!(err.is_structural());
            }
        }
    }

    #[test]
    fn replace_with_self_is_a_no_op(values in onsets(), path in score_path()) {
        let schema = musical_schema();
        let d = score(&schema, &values);
        if let Ok(found) = d.get(&path) {
            let replaced = d.replace(&path, &found).unwrap();
            prop_assert_eq!(&replaced, &d);
            prop_assert!(replaced.check());
        }
    }

    #[test]
    fn power_content_stays_canonical(values in onsets(), path in score_path(), onset in 0i32..16) {
        let schema = musical_schema();
        let d = score(&schema, &values);
        if path.len() == 1 && d.get(&path).is_ok() {
            let replaced = d.replace(&path, &note(&schema, f64::from(onset), 60)).unwrap();
            prop_assert!(replaced.check());
        }
    }

    #[test]
    fn paths_sort_by_length_then_indices(paths in proptest::collection::vec(score_path(), 0..24)) {
        let schema = musical_schema();
        let base = form(&schema, "Score");
        let mut sorted: Vec<DenotatorPath> = paths
            .iter()
            .map(|indices| DenotatorPath::new(&base, indices).unwrap())
            .collect();
        sorted.sort();
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0].indices(), pair[1].indices());
            prop_assert!(a.len() < b.len() || (a.len() == b.len() && a <= b));
        }
        let mut expected = paths.clone();
        expected.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        let got: Vec<Vec<usize>> = sorted.iter().map(|p| p.indices().to_vec()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn parent_then_child_reconstructs_the_path(indices in score_path()) {
        let schema = musical_schema();
        let path = DenotatorPath::new(&form(&schema, "Score"), &indices).unwrap();
        if let (Some(parent), Some(last)) = (path.parent_path(), path.last_index()) {
            prop_assert_eq!(parent.child_path(last).unwrap(), path);
        } else {
            prop_assert!(path.is_root());
        }
    }
}
