mod common;

use std::collections::BTreeMap;

use common::MockEndpoint;
use proptest::prelude::*;
use proptest::test_runner::Config;
use settings_form_core::{populate_settings_form, MemoryForm, Populator, PopulatorConfig};

/// Text fields with initial values, plus a payload over a subset of their names
fn form_and_payload() -> impl Strategy<Value = (BTreeMap<String, String>, Vec<(String, String)>)> {
    prop::collection::btree_map("[a-z_]{1,10}", "[a-zA-Z0-9 ]{0,12}", 0..10)
        .prop_flat_map(|fields| {
            let len = fields.len();
            (
                Just(fields),
                prop::collection::vec(prop::option::of("[a-zA-Z0-9 ]{0,12}"), len),
            )
        })
        .prop_map(|(fields, updates)| {
            let payload = fields
                .keys()
                .zip(updates)
                .filter_map(|(name, update)| update.map(|value| (name.clone(), value)))
                .collect();
            (fields, payload)
        })
}

fn run(body: &str, form: &mut MemoryForm) {
    let endpoint = MockEndpoint::json(body);
    let populator = Populator::new();
    let config = PopulatorConfig::default();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    runtime.block_on(populate_settings_form(&populator, &endpoint, &config, move |_| {
        Ok(form)
    }));
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn payload_fields_take_new_values_others_keep_theirs((fields, payload) in form_and_payload()) {
        let mut form = fields
            .iter()
            .fold(MemoryForm::new(), |form, (name, value)| form.with_text(name, value));
        let body: serde_json::Map<String, serde_json::Value> = payload
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        let body = serde_json::to_string(&body).unwrap();

        run(&body, &mut form);

        for (name, initial) in &fields {
            let expected = payload
                .iter()
                .find(|(k, _)| k == name)
                .map_or(initial, |(_, v)| v);
            let actual = form.value(name);
            prop_assert_eq!(actual.as_deref(), Some(expected.as_str()));
        }

        let once = form.clone();
        run(&body, &mut form);
        prop_assert_eq!(form, once);
    }
}
