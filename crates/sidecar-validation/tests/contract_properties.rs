use proptest::prelude::*;
use serde_json::json;
use sidecar_model::{full_payload_json, invalid_payload, sample_payload, CONTRACT_VERSION, SAMPLE_JSON};
use sidecar_test_utils::arb_valid_payload;
use sidecar_validation::{parse_and_validate, validate};

proptest! {
    #[test]
    fn prop_valid_payloads_have_no_errors(raw in arb_valid_payload()) {
        let result = validate(&raw);
        prop_assert!(result.errors.is_empty(), "{:?}", result.errors);
    }

    #[test]
    fn prop_wrong_contract_version_is_one_error_at_its_path(
        raw in arb_valid_payload(),
        version in prop_oneof![
            Just(json!(null)),
            Just(json!("sidecar_roadmap_v2")),
            Just(json!("")),
            Just(json!(1)),
        ],
        drop_field in any::<bool>(),
    ) {
        let mut raw = raw;
        if drop_field {
            raw.as_object_mut().unwrap().remove("contract_version");
        } else {
            raw["contract_version"] = version;
        }
        let result = validate(&raw);
        let at_version: Vec<_> = result.errors_at("contract_version").collect();
        prop_assert_eq!(at_version.len(), 1);
        prop_assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn prop_validator_never_panics_on_arbitrary_json(text in "\\PC{0,64}") {
        let _ = parse_and_validate(&text);
    }
}

#[test]
fn sample_dataset_is_clean() {
    let result = parse_and_validate(SAMPLE_JSON).result;
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());

    let reserialized = serde_json::to_value(sample_payload().unwrap()).unwrap();
    assert!(validate(&reserialized).is_clean());
}

#[test]
fn full_dataset_has_one_missing_progress_error() {
    let result = validate(&full_payload_json().unwrap());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].path,
        "projects[1].roadmaps[0].phases[0].items[1].progress"
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn invalid_dataset_reports_version_and_projects() {
    let result = validate(&invalid_payload());
    let paths: Vec<_> = result.errors.iter().map(|e| e.path.as_str()).collect();
    assert!(paths.contains(&"contract_version"));
    assert!(paths.contains(&"projects"));
    assert!(result.errors.len() >= 2);
}

#[test]
fn contract_version_literal_is_exact() {
    assert_eq!(CONTRACT_VERSION, "sidecar_roadmap_v1");
}
