//! Shared proptest generators for people and filter rules.
//!
//! Alphabets are deliberately small so that generated criteria actually hit
//! generated records.

#![allow(dead_code)]

use proptest::prelude::*;
use roster::model::{Fields, FilterRuleDraft};

pub const CITIES: [&str; 5] = ["Portland", "portland", "Hollywood", "Eugene", "Salem"];
pub const STATES: [&str; 3] = ["OR", "CA", "or"];
pub const LAST_NAMES: [&str; 5] = ["Olsen", "Moss", "Adams", "olsen", "Zhu"];
pub const FIELDS: [&str; 3] = ["city", "state", "lastName"];
pub const NEEDLES: [&str; 7] = ["port", "OR", "ca", "e", "o", "ss", "land"];

/// One person's fields without an id; `None` means the field is absent.
pub fn arb_person() -> impl Strategy<Value = (Option<&'static str>, Option<&'static str>, &'static str)> {
    (
        proptest::option::weighted(0.8, proptest::sample::select(CITIES.to_vec())),
        proptest::option::weighted(0.8, proptest::sample::select(STATES.to_vec())),
        proptest::sample::select(LAST_NAMES.to_vec()),
    )
}

/// A batch of people with unique ids `0..n`.
pub fn arb_people() -> impl Strategy<Value = Vec<Fields>> {
    proptest::collection::vec(arb_person(), 0..12).prop_map(|people| {
        people
            .into_iter()
            .enumerate()
            .map(|(i, (city, state, last))| {
                let mut fields = Fields::new();
                fields.insert("id".to_string(), i.to_string());
                fields.insert("lastName".to_string(), last.to_string());
                if let Some(city) = city {
                    fields.insert("city".to_string(), city.to_string());
                }
                if let Some(state) = state {
                    fields.insert("state".to_string(), state.to_string());
                }
                fields
            })
            .collect()
    })
}

/// A single `field -> needle` criterion.
pub fn arb_criterion() -> impl Strategy<Value = (String, String)> {
    (
        proptest::sample::select(FIELDS.to_vec()),
        proptest::sample::select(NEEDLES.to_vec()),
    )
        .prop_map(|(field, needle)| (field.to_string(), needle.to_string()))
}

/// Rules with unique ids `r0..rn`, random criteria, state and order.
pub fn arb_rules() -> impl Strategy<Value = Vec<FilterRuleDraft>> {
    proptest::collection::vec(
        (
            proptest::collection::vec(arb_criterion(), 1..3),
            any::<bool>(),
            0i64..4,
        ),
        0..5,
    )
    .prop_map(|rules| {
        rules
            .into_iter()
            .enumerate()
            .map(|(i, (criteria, enabled, order))| {
                criteria.into_iter().fold(
                    FilterRuleDraft::new(format!("r{i}"))
                        .enabled(enabled)
                        .order(order),
                    |draft, (field, needle)| draft.criterion(field, needle),
                )
            })
            .collect()
    })
}
