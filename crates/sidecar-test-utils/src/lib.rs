//! Testing utilities for the Side-Car workspace
//!
//! Shared JSON fixtures and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use serde_json::{json, Value};
use sidecar_model::{Item, ItemStatus, Phase, Roadmap, CONTRACT_VERSION};

/// Minimal item object; `in_progress`/`blocked` get `progress: 50`
pub fn item(id: &str, status: &str) -> Value {
    let mut item = json!({ "item_id": id, "title": format!("Item {id}"), "status": status });
    if matches!(status, "in_progress" | "blocked") {
        item["progress"] = json!(50);
    }
    if status == "blocked" {
        item["blocker_reason"] = json!("waiting on upstream");
    }
    item
}

/// One project, one roadmap, one phase per entry of `phases`
pub fn payload_with_items(phases: Vec<Vec<Value>>) -> Value {
    let phases: Vec<Value> = phases
        .into_iter()
        .enumerate()
        .map(|(index, items)| {
            json!({
                "phase_id": format!("ph{index}"),
                "phase_name": format!("Phase {index}"),
                "items": items,
            })
        })
        .collect();

    json!({
        "contract_version": CONTRACT_VERSION,
        "projects": [{
            "project_id": "p0",
            "project_name": "Project 0",
            "roadmaps": [{
                "roadmap_id": "r0",
                "roadmap_name": "Roadmap 0",
                "phases": phases,
            }]
        }]
    })
}

/// Payload whose only item is `item`
pub fn single_item_payload(item: Value) -> Value {
    payload_with_items(vec![vec![item]])
}

/// Typed roadmap with one phase per entry of `phases`
pub fn roadmap_of(phases: Vec<Vec<Item>>) -> Roadmap {
    let phases = phases
        .into_iter()
        .enumerate()
        .map(|(index, items)| Phase::new(format!("ph{index}"), format!("Phase {index}"), items))
        .collect();
    Roadmap::new("r0", "Roadmap 0", phases)
}

fn contract_status() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("done"),
        Just("in_progress"),
        Just("blocked"),
        Just("not_started"),
    ]
}

fn item_body() -> impl Strategy<Value = Value> {
    (contract_status(), 0u8..=100, any::<bool>(), any::<bool>()).prop_map(
        |(status, progress, deliverable, has_reason)| {
            let mut body = json!({ "status": status });
            if matches!(status, "in_progress" | "blocked") {
                body["progress"] = json!(progress);
            }
            if deliverable {
                body["is_deliverable"] = json!(true);
            }
            if status == "blocked" && has_reason {
                body["blocker_reason"] = json!("waiting");
            }
            body
        },
    )
}

fn with_identity(mut node: Value, id_key: &str, id: String, name_key: &str) -> Value {
    node[name_key] = json!(format!("{id} name"));
    node[id_key] = json!(id);
    node
}

/// Payloads that satisfy every contract invariant
///
/// Ids are unique within their scope; items in sibling phases reuse ids
/// on purpose.
pub fn arb_valid_payload() -> impl Strategy<Value = Value> {
    let phase = prop::collection::vec(item_body(), 1..5).prop_map(|items| {
        let items: Vec<Value> = items
            .into_iter()
            .enumerate()
            .map(|(i, body)| with_identity(body, "item_id", format!("i{i}"), "title"))
            .collect();
        json!({ "items": items })
    });
    let roadmap = prop::collection::vec(phase, 1..4).prop_map(|phases| {
        let phases: Vec<Value> = phases
            .into_iter()
            .enumerate()
            .map(|(i, body)| with_identity(body, "phase_id", format!("ph{i}"), "phase_name"))
            .collect();
        json!({ "phases": phases })
    });
    let project = prop::collection::vec(roadmap, 1..3).prop_map(|roadmaps| {
        let roadmaps: Vec<Value> = roadmaps
            .into_iter()
            .enumerate()
            .map(|(i, body)| with_identity(body, "roadmap_id", format!("r{i}"), "roadmap_name"))
            .collect();
        json!({ "roadmaps": roadmaps })
    });
    prop::collection::vec(project, 1..3).prop_map(|projects| {
        let projects: Vec<Value> = projects
            .into_iter()
            .enumerate()
            .map(|(i, body)| with_identity(body, "project_id", format!("p{i}"), "project_name"))
            .collect();
        json!({ "contract_version": CONTRACT_VERSION, "projects": projects })
    })
}

/// Any status, including one outside the contract
pub fn arb_any_status() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![
        Just(ItemStatus::Done),
        Just(ItemStatus::InProgress),
        Just(ItemStatus::Blocked),
        Just(ItemStatus::NotStarted),
        Just(ItemStatus::Unknown),
    ]
}

/// Typed items that may violate the contract (out-of-range or absent progress)
pub fn arb_loose_item() -> impl Strategy<Value = Item> {
    (
        arb_any_status(),
        prop::option::of(-500.0f64..500.0),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(status, progress, deliverable)| {
            let mut item = Item::new("i", "Item", status);
            item.progress = progress;
            item.is_deliverable = deliverable;
            item
        })
}

/// Typed phases, possibly empty and possibly overridden
pub fn arb_loose_phase() -> impl Strategy<Value = Phase> {
    (
        prop::collection::vec(arb_loose_item(), 0..6),
        prop::option::of(any::<bool>()),
        prop::option::of(-200.0f64..300.0),
    )
        .prop_map(|(items, compute, override_value)| {
            let mut phase = Phase::new("ph", "Phase", items);
            phase.compute_phase_progress = compute;
            phase.phase_progress_override = override_value;
            phase
        })
}

/// Typed roadmaps built from [`arb_loose_phase`]
pub fn arb_loose_roadmap() -> impl Strategy<Value = Roadmap> {
    (
        prop::collection::vec(arb_loose_phase(), 0..5),
        prop::option::of(any::<bool>()),
        prop::option::of(-200.0f64..300.0),
    )
        .prop_map(|(phases, compute, override_value)| {
            let mut roadmap = Roadmap::new("r", "Roadmap", phases);
            roadmap.compute_overall_progress = compute;
            roadmap.overall_progress_override = override_value;
            roadmap
        })
}
